//! Great-circle distance helpers.

/// Mean Earth radius expressed in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Convert degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in nautical miles between two coordinates given in
/// degrees, using the haversine formula.
///
/// NaN inputs propagate to a NaN result.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = to_radians(lat2 - lat1);
    let d_lon = to_radians(lon2 - lon1);

    let a = (d_lat / 2.0).sin().powi(2)
        + to_radians(lat1).cos() * to_radians(lat2).cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_NM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}
