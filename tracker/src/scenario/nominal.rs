use crate::{
    path::PathWindow,
    source::Selection,
    units::{Length, Time},
};
use track_types::prelude::*;

use super::TrackerConfig;

pub const VISIBILITY_RADIUS_KM: f64 = 2000.0;
pub const FOOTPRINT_POINTS: usize = crate::footprint::DEFAULT_POINT_COUNT;
pub const TRAIL_CAPACITY: usize = 200;
pub const PATH_BEFORE: Time = Time::from_whole_secs(30 * 60);
pub const PATH_AFTER: Time = Time::from_whole_secs(30 * 60);
pub const PATH_STEP: Time = Time::from_whole_secs(60);
pub const SHORT_STEP: Time = Time::from_whole_secs(30);
pub const LONG_STEP: Time = Time::from_whole_secs(10 * 60);

/// Ground target (latitude, longitude) [deg]
pub const TARGET: (f64, f64) = (7.398, 27.083);

pub const FALLBACK_NAME: &str = "ISS (ZARYA)";
pub const FALLBACK_LINE1: &str =
    "1 25544U 98067A   25140.37106448  .00008533  00000+0  15939-3 0  9993";
pub const FALLBACK_LINE2: &str =
    "2 25544  51.6374  84.8753 0002567 126.2244  18.1297 15.49625942510847";

/// Last-known-good element set used when no source can provide one
pub fn fallback_element_set() -> ElementSet {
    ElementSet::new(FALLBACK_NAME, FALLBACK_LINE1, FALLBACK_LINE2)
}

pub fn tracker_config() -> TrackerConfig {
    TrackerConfig {
        name: None,
        visibility_radius: Length::from_kilometers(VISIBILITY_RADIUS_KM),
        footprint_points: FOOTPRINT_POINTS,
        trail_capacity: TRAIL_CAPACITY,
        path_window: PathWindow {
            before: PATH_BEFORE,
            after: PATH_AFTER,
            step: PATH_STEP,
        },
        short_step: SHORT_STEP,
        long_step: LONG_STEP,
        target: GeoPoint::on_surface(TARGET.0, TARGET.1),
        start: None,
        tle: None,
        selection: Selection::First,
    }
}
