use crate::error::ModelError;
use crate::models::coordinate::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude on the mean sphere.
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;

/// Great-circle distance between two coordinates, in meters.
///
/// Inputs must already be validated (see [`Coordinate::new`]); the result for
/// out-of-range values is meaningless.
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();

    let delta_phi = (b.lat() - a.lat()).to_radians();
    let delta_lambda = (b.lng() - a.lng()).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Moves `origin` by a local north/east displacement in meters.
///
/// Flat-earth approximation, good for the few hundred meters a simulated
/// walk covers. Longitude wraps into [-180, 180), latitude is clamped to the
/// poles. Non-finite displacements are rejected by [`Coordinate::new`].
pub fn offset_meters(origin: &Coordinate, north_m: f64, east_m: f64) -> Result<Coordinate, ModelError> {
    let lat = (origin.lat() + north_m / METERS_PER_DEGREE).clamp(-90.0, 90.0);

    let cos_lat = origin.lat().to_radians().cos().max(1e-9);
    let lng = origin.lng() + east_m / (METERS_PER_DEGREE * cos_lat);
    let lng = (lng + 180.0).rem_euclid(360.0) - 180.0;

    Coordinate::new(lat, lng)
}

/// Arithmetic mean of a set of coordinates, `None` when the set is empty.
pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat(), lng + p.lng()));
    Coordinate::new(lat_sum / n, lng_sum / n).ok()
}
