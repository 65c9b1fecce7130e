use crate::{path::PathSample, units::Timestamp};
use serde::Serialize;
use track_types::prelude::GeoPoint;

/// Everything one recomputation pass produces, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub instant: Timestamp,
    pub satellite: String,
    pub sub_point: GeoPoint,
    /// Oldest first, ending with `sub_point`
    pub trail: Vec<GeoPoint>,
    pub footprint: Vec<GeoPoint>,
    pub path: Vec<PathSample>,
    pub dropped_path_samples: usize,
    pub target: GeoPoint,
    /// Surface arc from the sub-point to the target [km]
    pub ground_distance_km: f64,
    /// Straight line from the satellite, at altitude, to the target [km]
    pub direct_distance_km: f64,
}

impl std::fmt::Display for TrackReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Time (UTC): {}", self.instant)?;
        writeln!(
            f,
            "{} Position: Lat {:.2}° | Lon {:.2}° | Alt {:.0} km",
            self.satellite,
            self.sub_point.latitude(),
            self.sub_point.longitude(),
            self.sub_point.altitude_km()
        )?;
        write!(
            f,
            "Ground Distance: {:.0} km | Direct Distance: {:.0} km",
            self.ground_distance_km, self.direct_distance_km
        )
    }
}
