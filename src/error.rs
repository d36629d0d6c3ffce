use thiserror::Error;

/// Rejections raised while constructing domain values at the boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Coordinate is not finite: ({lat}, {lng})")]
    NonFiniteCoordinate { lat: f64, lng: f64 },

    #[error("Latitude {0} out of range, expected [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0} out of range, expected [-180, 180]")]
    InvalidLongitude(f64),

    #[error("Geofence radius must be a positive number of meters (got {0})")]
    InvalidRadius(f64),
}

/// Rejections raised at the action dispatch boundary. The store is never
/// touched when one of these is returned.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown action type: '{0}'")]
    UnknownAction(String),

    #[error("Malformed action: {0}")]
    Malformed(String),
}
