use crate::types::GeoPoint;

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in km between two points.
///
/// Inputs are not clamped; out-of-range coordinates give a defined but
/// meaningless result.
pub fn haversine_km(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let d_lat = (p2.lat - p1.lat).to_radians();
    let d_lng = (p2.lng - p1.lng).to_radians();
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance contributed by `new` given the previous sample of the session.
///
/// The first sample of a session contributes nothing.
pub fn accumulate(previous: Option<&GeoPoint>, new: &GeoPoint) -> f64 {
    previous.map_or(0.0, |p| haversine_km(p, new))
}
