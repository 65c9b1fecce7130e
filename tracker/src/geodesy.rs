//! Spherical-Earth geometry on geodetic points.
//!
//! Everything here works on a sphere of radius [`EARTH_RADIUS_KM`]. Public
//! signatures take and return degrees and kilometres; trigonometry is done in
//! radians.
//!
//! Two distances are provided and they are intentionally not the same
//! quantity: [`great_circle_distance_km`] is the arc along the surface,
//! [`straight_line_distance_km`] is the chord through the Earth (or through
//! space, once altitude is involved). For two surface points the chord is
//! always the shorter one, `chord = 2R sin(arc / 2R)`.

use track_types::prelude::GeoPoint;

/// Mean Earth radius [km]
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance [km] along the surface, altitude ignored
pub fn great_circle_distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lat2) = (a.latitude_radians(), b.latitude_radians());
    let dlat = lat2 - lat1;
    // Wrap so points on either side of the antimeridian compare equal
    let dlon = wrap_pi(b.longitude_radians() - a.longitude_radians());

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Euclidean distance [km] between the two points in an Earth-centered
/// frame, each at radius `EARTH_RADIUS_KM + altitude_km`.
pub fn straight_line_distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let pa = a.spherical_position_km(EARTH_RADIUS_KM);
    let pb = b.spherical_position_km(EARTH_RADIUS_KM);
    (pa - pb).norm()
}

/// Chord length [km] subtended by a surface arc of `arc_km`
pub fn chord_for_arc_km(arc_km: f64) -> f64 {
    2.0 * EARTH_RADIUS_KM * (arc_km / (2.0 * EARTH_RADIUS_KM)).sin()
}

/// Point reached from `origin` travelling `radius_km` along the surface on
/// the initial bearing `bearing_rad` (clockwise from north).
///
/// The result is on the surface, whatever the origin's altitude.
pub fn destination_point(origin: &GeoPoint, bearing_rad: f64, radius_km: f64) -> GeoPoint {
    let delta = radius_km / EARTH_RADIUS_KM;
    let (sin_delta, cos_delta) = delta.sin_cos();
    let (sin_lat1, cos_lat1) = origin.latitude_radians().sin_cos();
    let (sin_theta, cos_theta) = bearing_rad.sin_cos();

    let sin_lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * cos_theta).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lon2 = origin.longitude_radians()
        + (sin_theta * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * sin_lat2);

    GeoPoint::from_radians(lat2, lon2, 0.0)
}

fn wrap_pi(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}
