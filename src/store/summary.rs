//! Read-only views the dashboard and map collaborators render from.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geo;
use crate::models::alert::Severity;
use crate::models::coordinate::{Coordinate, DEFAULT_MAP_CENTER};
use crate::models::tourist::{Geofence, TouristStatus};
use crate::store::state::TouristState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_tourists: usize,
    pub safe: usize,
    pub alert: usize,
    pub emergency: usize,
    pub total_alerts: usize,
    pub high_alerts: usize,
    pub medium_alerts: usize,
    pub low_alerts: usize,
    pub geofences_active: usize,
    pub map_center: Coordinate,
}

impl DashboardSummary {
    pub fn from_state(state: &TouristState) -> Self {
        let status_count =
            |status: TouristStatus| state.tourists.iter().filter(|t| t.status == status).count();
        let severity_count =
            |severity: Severity| state.alerts.iter().filter(|a| a.severity() == severity).count();

        let positions: Vec<Coordinate> = state.tourists.iter().map(|t| t.coordinates).collect();

        Self {
            active_tourists: state.tourists.len(),
            safe: status_count(TouristStatus::Safe),
            alert: status_count(TouristStatus::Alert),
            emergency: status_count(TouristStatus::Emergency),
            total_alerts: state.alerts.len(),
            high_alerts: severity_count(Severity::High),
            medium_alerts: severity_count(Severity::Medium),
            low_alerts: severity_count(Severity::Low),
            geofences_active: state.tourists.len(),
            map_center: geo::centroid(&positions).unwrap_or(DEFAULT_MAP_CENTER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub tourist_id: String,
    pub name: String,
    pub position: Coordinate,
    pub status: TouristStatus,
    pub last_seen: DateTime<Utc>,
}

/// Everything the map renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub geofence: Option<Geofence>,
}

impl MapView {
    /// Roster markers plus the current tourist. The current tourist's circle is
    /// only included while geofencing is on.
    pub fn from_state(state: &TouristState) -> Self {
        let mut markers: Vec<MapMarker> = state
            .tourists
            .iter()
            .map(|t| MapMarker {
                tourist_id: t.id.clone(),
                name: t.name.clone(),
                position: t.coordinates,
                status: t.status,
                last_seen: t.last_seen,
            })
            .collect();

        if let Some(current) = &state.current_tourist {
            if !markers.iter().any(|m| m.tourist_id == current.id) {
                markers.push(MapMarker {
                    tourist_id: current.id.clone(),
                    name: current.name.clone(),
                    position: current.coordinates,
                    status: current.status,
                    last_seen: current.last_seen,
                });
            }
        }

        let geofence = state
            .current_tourist
            .as_ref()
            .filter(|_| state.geofence_enabled)
            .map(|t| t.geofence);

        Self { markers, geofence }
    }
}
