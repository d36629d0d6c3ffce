use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::alert::AlertKind;
use crate::models::coordinate::Coordinate;
use crate::store::Action;

/// One unit of work for the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A location fix, already range-checked.
    Sample(Coordinate),
    /// An action for the store, already past the dispatch boundary.
    Action(Action),
    /// An explicit alert request (panic button, demo controls).
    Trigger { kind: AlertKind, message: Option<String> },
}

/// A raw fix as sent by a tracker. Numbers may arrive as strings.
#[derive(Debug, Deserialize)]
pub struct LocationSample {
    #[serde(alias = "latitude", deserialize_with = "parse_f64")]
    pub lat: f64,
    #[serde(alias = "longitude", deserialize_with = "parse_f64")]
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
struct TriggerMessage {
    trigger: AlertKind,
    message: Option<String>,
}

impl InboundEvent {
    /// Classifies one JSON line: objects with `trigger` are alert triggers,
    /// objects with `type` are actions, anything else must be a sample.
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(line)?;

        if value.get("trigger").is_some() {
            let t: TriggerMessage = serde_json::from_value(value)?;
            return Ok(Self::Trigger {
                kind: t.trigger,
                message: t.message,
            });
        }

        if value.get("type").is_some() {
            return Ok(Self::Action(Action::from_value(value)?));
        }

        let sample: LocationSample = serde_json::from_value(value)?;
        Ok(Self::Sample(Coordinate::new(sample.lat, sample.lng)?))
    }
}

fn parse_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(f) => Ok(f),
        StringOrFloat::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeric_sample() {
        let event = InboundEvent::parse(r#"{"lat": 26.15, "lng": 91.74}"#).unwrap();
        assert_eq!(event, InboundEvent::Sample(Coordinate::new(26.15, 91.74).unwrap()));
    }

    #[test]
    fn test_parses_string_numbers_and_long_names() {
        let event = InboundEvent::parse(r#"{"latitude": "+26.1500", "longitude": " 91.7400 "}"#).unwrap();
        assert_eq!(event, InboundEvent::Sample(Coordinate::new(26.15, 91.74).unwrap()));
    }

    #[test]
    fn test_rejects_out_of_range_sample() {
        assert!(InboundEvent::parse(r#"{"lat": 91.0, "lng": 0.0}"#).is_err());
        assert!(InboundEvent::parse(r#"{"lat": "north", "lng": 0.0}"#).is_err());
        assert!(InboundEvent::parse(r#"{"lat": 10.0}"#).is_err());
    }

    #[test]
    fn test_parses_trigger() {
        let event = InboundEvent::parse(r#"{"trigger": "panic_button"}"#).unwrap();
        assert_eq!(
            event,
            InboundEvent::Trigger { kind: AlertKind::PanicButton, message: None }
        );

        let event = InboundEvent::parse(r#"{"trigger": "inactivity", "message": "idle 30m"}"#).unwrap();
        assert_eq!(
            event,
            InboundEvent::Trigger {
                kind: AlertKind::Inactivity,
                message: Some("idle 30m".to_string())
            }
        );
    }

    #[test]
    fn test_parses_action_and_rejects_unknown() {
        let event = InboundEvent::parse(r#"{"type": "TOGGLE_GEOFENCE"}"#).unwrap();
        assert_eq!(event, InboundEvent::Action(Action::ToggleGeofence));

        let err = InboundEvent::parse(r#"{"type": "NUKE"}"#).unwrap_err();
        assert!(err.to_string().contains("NUKE"));
    }
}
