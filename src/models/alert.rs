use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    GeofenceBreach,
    Inactivity,
    SuddenJump,
    PanicButton,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeofenceBreach => "geofence_breach",
            Self::Inactivity => "inactivity",
            Self::SuddenJump => "sudden_jump",
            Self::PanicButton => "panic_button",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Self::Inactivity => Severity::Medium,
            Self::GeofenceBreach | Self::SuddenJump | Self::PanicButton => Severity::High,
        }
    }

    /// English fallback text. Presentation may localize by kind instead.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::GeofenceBreach => "You have left your safe zone",
            Self::Inactivity => "No movement detected for an extended period",
            Self::SuddenJump => "Abnormal movement detected",
            Self::PanicButton => "Panic button pressed, help is on the way",
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            Self::GeofenceBreach => "geofence",
            Self::Inactivity => "inactivity",
            Self::SuddenJump => "jump",
            Self::PanicButton => "panic",
        }
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geofence_breach" => Ok(Self::GeofenceBreach),
            "inactivity" => Ok(Self::Inactivity),
            "sudden_jump" => Ok(Self::SuddenJump),
            "panic_button" => Ok(Self::PanicButton),
            other => Err(format!("unknown alert type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Immutable alert record. Fields are only readable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    id: String,
    tourist_id: String,
    #[serde(rename = "type")]
    kind: AlertKind,
    message: String,
    timestamp: DateTime<Utc>,
    severity: Severity,
}

impl Alert {
    pub fn new(
        tourist_id: impl Into<String>,
        kind: AlertKind,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_alert_id(kind, now),
            tourist_id: tourist_id.into(),
            kind,
            message: message.into(),
            timestamp: now,
            severity,
        }
    }

    /// Alert with the kind's default message and severity.
    pub fn of_kind(tourist_id: impl Into<String>, kind: AlertKind, now: DateTime<Utc>) -> Self {
        Self::new(tourist_id, kind, kind.default_message(), kind.default_severity(), now)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tourist_id(&self) -> &str {
        &self.tourist_id
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

// <prefix>_<unix millis>_<9 chars of a v4 uuid>
fn generate_alert_id(kind: AlertKind, now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", kind.id_prefix(), now.timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_within_same_millisecond() {
        let now = Utc::now();
        let ids: HashSet<String> = (0..1000)
            .map(|_| Alert::of_kind("t1", AlertKind::PanicButton, now).id().to_string())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_format() {
        let now = Utc::now();
        let alert = Alert::of_kind("t1", AlertKind::GeofenceBreach, now);
        let parts: Vec<&str> = alert.id().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "geofence");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(AlertKind::GeofenceBreach.default_severity(), Severity::High);
        assert_eq!(AlertKind::Inactivity.default_severity(), Severity::Medium);
        assert_eq!(AlertKind::SuddenJump.default_severity(), Severity::High);
        assert_eq!(AlertKind::PanicButton.default_severity(), Severity::High);
    }

    #[test]
    fn test_serializes_with_type_field() {
        let alert = Alert::of_kind("t1", AlertKind::SuddenJump, Utc::now());
        let v = serde_json::to_value(&alert).unwrap();
        assert_eq!(v["type"], "sudden_jump");
        assert_eq!(v["severity"], "high");
        assert_eq!(v["touristId"], "t1");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("panic_button".parse::<AlertKind>(), Ok(AlertKind::PanicButton));
        assert!("fire".parse::<AlertKind>().is_err());
    }
}
