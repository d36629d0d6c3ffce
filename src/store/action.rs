use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DispatchError;
use crate::models::alert::Alert;
use crate::models::coordinate::Coordinate;
use crate::models::language::Language;
use crate::models::tourist::Tourist;

/// Every transition the store accepts.
///
/// The wire form mirrors the dispatch calls presentation code makes:
/// `{"type": "UPDATE_LOCATION", "payload": {"lat": 26.15, "lng": 91.74}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetCurrentTourist(Tourist),
    UpdateLocation(Coordinate),
    AddAlert(Alert),
    SetLanguage(Language),
    ToggleTracking,
    ToggleGeofence,
    SetTourists(Vec<Tourist>),
}

impl Action {
    pub const TAGS: [&'static str; 7] = [
        "SET_CURRENT_TOURIST",
        "UPDATE_LOCATION",
        "ADD_ALERT",
        "SET_LANGUAGE",
        "TOGGLE_TRACKING",
        "TOGGLE_GEOFENCE",
        "SET_TOURISTS",
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::SetCurrentTourist(_) => Self::TAGS[0],
            Self::UpdateLocation(_) => Self::TAGS[1],
            Self::AddAlert(_) => Self::TAGS[2],
            Self::SetLanguage(_) => Self::TAGS[3],
            Self::ToggleTracking => Self::TAGS[4],
            Self::ToggleGeofence => Self::TAGS[5],
            Self::SetTourists(_) => Self::TAGS[6],
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, DispatchError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DispatchError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validates an action at the dispatch boundary. Unknown tags and bad
    /// payloads (including out-of-range coordinates) are rejected here.
    pub fn from_value(value: Value) -> Result<Self, DispatchError> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::Malformed("missing string field 'type'".to_string()))?;

        if !Self::TAGS.contains(&tag) {
            return Err(DispatchError::UnknownAction(tag.to_string()));
        }

        serde_json::from_value(value).map_err(|e| DispatchError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::language::LanguageCode;

    #[test]
    fn test_parses_unit_actions() {
        assert_eq!(
            Action::from_json(r#"{"type": "TOGGLE_TRACKING"}"#).unwrap(),
            Action::ToggleTracking
        );
        assert_eq!(
            Action::from_json(r#"{"type": "TOGGLE_GEOFENCE"}"#).unwrap(),
            Action::ToggleGeofence
        );
    }

    #[test]
    fn test_parses_payload_actions() {
        let a = Action::from_json(r#"{"type": "UPDATE_LOCATION", "payload": {"lat": 26.15, "lng": 91.74}}"#)
            .unwrap();
        assert_eq!(a, Action::UpdateLocation(Coordinate::new(26.15, 91.74).unwrap()));

        let a = Action::from_json(
            r#"{"type": "SET_LANGUAGE", "payload": {"code": "hi", "name": "Hindi", "nativeName": "हिन्दी"}}"#,
        )
        .unwrap();
        match a {
            Action::SetLanguage(l) => assert_eq!(l.code, LanguageCode::Hi),
            other => panic!("unexpected {other:?}"),
        }

        let a = Action::from_json(r#"{"type": "SET_TOURISTS", "payload": []}"#).unwrap();
        assert_eq!(a, Action::SetTourists(vec![]));
    }

    #[test]
    fn test_rejects_unknown_action() {
        let err = Action::from_json(r#"{"type": "DELETE_EVERYTHING"}"#).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownAction(t) if t == "DELETE_EVERYTHING"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            Action::from_json("not json"),
            Err(DispatchError::Malformed(_))
        ));
        assert!(matches!(
            Action::from_json(r#"{"payload": 1}"#),
            Err(DispatchError::Malformed(_))
        ));
        assert!(matches!(
            Action::from_json(r#"{"type": "UPDATE_LOCATION", "payload": {"lat": 95.0, "lng": 0.0}}"#),
            Err(DispatchError::Malformed(_))
        ));
    }

    #[test]
    fn test_tags_match_wire_names() {
        let actions = [Action::ToggleTracking, Action::ToggleGeofence, Action::SetTourists(vec![])];
        for a in actions {
            let v = serde_json::to_value(&a).unwrap();
            assert_eq!(v["type"], a.tag());
        }
    }
}
