use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::alert::Alert;
use crate::models::language::Language;
use crate::models::tourist::Tourist;
use crate::store::action::Action;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristState {
    pub current_tourist: Option<Tourist>,
    pub tourists: Vec<Tourist>,
    /// Newest first.
    pub alerts: Vec<Alert>,
    pub current_language: Language,
    pub is_tracking: bool,
    pub geofence_enabled: bool,
}

impl Default for TouristState {
    fn default() -> Self {
        Self {
            current_tourist: None,
            tourists: Vec::new(),
            alerts: Vec::new(),
            current_language: Language::default(),
            is_tracking: false,
            geofence_enabled: true,
        }
    }
}

/// Applies one action to `state`. Deterministic given `now`.
pub fn reduce(mut state: TouristState, action: Action, now: DateTime<Utc>) -> TouristState {
    match action {
        Action::SetCurrentTourist(tourist) => {
            state.current_tourist = Some(tourist);
        }
        Action::UpdateLocation(coordinates) => {
            if let Some(tourist) = state.current_tourist.as_mut() {
                tourist.coordinates = coordinates;
                tourist.last_seen = tourist.last_seen.max(now);
            }
        }
        Action::AddAlert(alert) => {
            state.alerts.insert(0, alert);
        }
        Action::SetLanguage(language) => {
            state.current_language = language;
        }
        Action::ToggleTracking => {
            state.is_tracking = !state.is_tracking;
        }
        Action::ToggleGeofence => {
            state.geofence_enabled = !state.geofence_enabled;
        }
        Action::SetTourists(tourists) => {
            state.tourists = tourists;
        }
    }
    state
}
