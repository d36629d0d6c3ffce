use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A WGS-84 position in degrees.
///
/// Every value is built through [`Coordinate::new`] (deserialization
/// included), so latitude and longitude are always finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Guwahati, the default map center when there is nothing to average.
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
    lat: 26.1445,
    lng: 91.7362,
};

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ModelError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, ModelError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(ModelError::NonFiniteCoordinate { lat, lng });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ModelError::InvalidLatitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ModelError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}
