use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::coordinate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouristStatus {
    Safe,
    Alert,
    Emergency,
}

/// Circular permitted area around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeofence")]
pub struct Geofence {
    center: Coordinate,
    radius: f64,
}

#[derive(Deserialize)]
struct RawGeofence {
    center: Coordinate,
    radius: f64,
}

impl TryFrom<RawGeofence> for Geofence {
    type Error = ModelError;

    fn try_from(raw: RawGeofence) -> Result<Self, Self::Error> {
        Geofence::new(raw.center, raw.radius)
    }
}

impl Geofence {
    pub fn new(center: Coordinate, radius: f64) -> Result<Self, ModelError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ModelError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> &Coordinate {
        &self.center
    }

    /// Radius in meters, always > 0.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tourist {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
    pub last_seen: DateTime<Utc>,
    pub status: TouristStatus,
    pub geofence: Geofence,
}

impl Tourist {
    /// A newly enrolled tourist: safe, with the geofence centered on where
    /// they were first seen.
    pub fn enroll(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinate,
        radius_meters: f64,
        now: DateTime<Utc>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            coordinates: location,
            last_seen: now,
            status: TouristStatus::Safe,
            geofence: Geofence::new(location, radius_meters)?,
        })
    }
}

/// Three tourists around Guwahati used to populate the admin roster.
pub fn demo_roster(now: DateTime<Utc>) -> Vec<Tourist> {
    let entries = [
        ("tourist_001", "John Doe", 26.1445, 91.7362, 5, TouristStatus::Safe),
        ("tourist_002", "Sarah Smith", 26.1425, 91.7342, 2, TouristStatus::Alert),
        ("tourist_003", "Ahmed Hassan", 26.1465, 91.7382, 1, TouristStatus::Safe),
    ];

    entries
        .into_iter()
        .filter_map(|(id, name, lat, lng, minutes_ago, status)| {
            let location = Coordinate::new(lat, lng).ok()?;
            Some(Tourist {
                id: id.to_string(),
                name: name.to_string(),
                coordinates: location,
                last_seen: now - chrono::Duration::minutes(minutes_ago),
                status,
                geofence: Geofence { center: location, radius: 200.0 },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geofence_rejects_non_positive_radius() {
        let c = Coordinate::new(26.1445, 91.7362).unwrap();
        assert_eq!(Geofence::new(c, 0.0), Err(ModelError::InvalidRadius(0.0)));
        assert_eq!(Geofence::new(c, -5.0), Err(ModelError::InvalidRadius(-5.0)));
        assert!(Geofence::new(c, f64::INFINITY).is_err());
        assert_eq!(Geofence::new(c, 200.0).unwrap().radius(), 200.0);
    }

    #[test]
    fn test_enroll_centers_geofence_on_location() {
        let now = Utc::now();
        let c = Coordinate::new(26.1445, 91.7362).unwrap();
        let t = Tourist::enroll("tourist_main", "John Doe", c, 200.0, now).unwrap();

        assert_eq!(t.status, TouristStatus::Safe);
        assert_eq!(t.geofence.center(), &c);
        assert_eq!(t.last_seen, now);
    }

    #[test]
    fn test_tourist_json_shape() {
        let now = Utc::now();
        let c = Coordinate::new(26.1445, 91.7362).unwrap();
        let t = Tourist::enroll("tourist_main", "John Doe", c, 200.0, now).unwrap();

        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["status"], "safe");
        assert_eq!(v["geofence"]["radius"], 200.0);
        assert!(v.get("lastSeen").is_some());

        let back: Tourist = serde_json::from_value(v).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_deserialize_rejects_zero_radius() {
        let payload = r#"{"center": {"lat": 26.1, "lng": 91.7}, "radius": 0}"#;
        assert!(serde_json::from_str::<Geofence>(payload).is_err());
    }

    #[test]
    fn test_demo_roster() {
        let now = Utc::now();
        let roster = demo_roster(now);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[1].status, TouristStatus::Alert);
        assert!(roster.iter().all(|t| t.last_seen < now));
    }
}
