use crate::geodesy::destination_point;
use std::f64::consts::TAU;
use track_types::prelude::GeoPoint;

/// The default number of polygon vertices
pub const DEFAULT_POINT_COUNT: usize = 100;

/// Sample the visibility circle of `radius_km` around `center`.
///
/// Returns `point_count` points at bearings `i * 2π / point_count`, starting
/// north and going clockwise, all on the ground. The polygon is implicitly
/// closed. A radius that isn't a positive finite number collapses every
/// vertex onto `center`; radii past the antipode simply wrap around the
/// sphere.
pub fn footprint(center: &GeoPoint, radius_km: f64, point_count: usize) -> Vec<GeoPoint> {
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return vec![*center; point_count];
    }

    let step = TAU / point_count as f64;
    (0..point_count)
        .map(|i| destination_point(center, i as f64 * step, radius_km))
        .collect()
}
