//! Geodesic distance on the WGS-84 ellipsoid.
//!
//! Uses Lambert's formula over reduced latitudes, which is accurate to about
//! 10 metres over the distances that matter for nearest-station selection.
//! Only relative ordering of candidate stations is ever consumed, so a full
//! Karney/Vincenty solver would be overkill here.

/// WGS-84 semi-major axis, kilometres.
const SEMI_MAJOR_KM: f64 = 6378.137;

/// WGS-84 flattening.
const FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Geodesic distance in kilometres between two `(latitude, longitude)` pairs
/// given in decimal degrees.
///
/// Identical points return exactly `0.0`. Inputs are assumed to already be
/// range-checked (the configuration layer rejects out-of-range coordinates
/// before any distance is computed).
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let beta1 = reduced_latitude(a.0);
    let beta2 = reduced_latitude(b.0);
    let sigma = central_angle(beta1, a.1.to_radians(), beta2, b.1.to_radians());
    if sigma == 0.0 {
        return 0.0;
    }

    // Lambert's correction terms for the ellipsoid
    let p = (beta1 + beta2) / 2.0;
    let q = (beta2 - beta1) / 2.0;
    let x = (sigma - sigma.sin()) * (p.sin() * q.cos() / (sigma / 2.0).cos()).powi(2);
    let y = (sigma + sigma.sin()) * (p.cos() * q.sin() / (sigma / 2.0).sin()).powi(2);

    SEMI_MAJOR_KM * (sigma - FLATTENING / 2.0 * (x + y))
}

/// Latitude on the auxiliary sphere: tan(beta) = (1 - f) tan(phi).
fn reduced_latitude(lat_deg: f64) -> f64 {
    ((1.0 - FLATTENING) * lat_deg.to_radians().tan()).atan()
}

/// Central angle between two points on the auxiliary sphere (haversine form,
/// stable for small separations).
fn central_angle(beta1: f64, lon1: f64, beta2: f64, lon2: f64) -> f64 {
    let h = ((beta2 - beta1) / 2.0).sin().powi(2)
        + beta1.cos() * beta2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
    2.0 * h.sqrt().asin()
}
