//! Propagate a known element set and run the geometry on the result

use approx::assert_abs_diff_eq;
use tracker_lib::{
    footprint::footprint,
    geodesy::great_circle_distance_km,
    propagator::{Sgp4Propagator, SubPointPropagator},
    scenario::TrackerConfig,
    session::TrackingSession,
    trail::TrailBuffer,
    units::Timestamp,
};
use track_types::prelude::*;

// SGP4 verification record 00005, propagated at its own epoch
const NAME: &str = "VANGUARD 1";
const LINE1: &str = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
const LINE2: &str = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";
const T0: &str = "2000-06-27T18:50:19.733568Z";

// Reference sub-point at T0
const LAT0: f64 = 0.000322;
const LON0: f64 = 149.955736;
const ALT0_KM: f64 = 782.54;

fn elements() -> ElementSet {
    ElementSet::new(NAME, LINE1, LINE2)
}

fn t0() -> Timestamp {
    Timestamp::parse_rfc3339(T0).unwrap()
}

#[test]
fn sub_point_matches_reference() {
    let p = Sgp4Propagator::new(elements()).unwrap();
    let sp = p.propagate(t0()).unwrap();
    assert_abs_diff_eq!(sp.latitude(), LAT0, epsilon = 0.05);
    assert_abs_diff_eq!(sp.longitude(), LON0, epsilon = 0.05);
    assert_abs_diff_eq!(sp.altitude_km(), ALT0_KM, epsilon = 1.0);

    // Deterministic
    assert_eq!(p.propagate(t0()).unwrap(), sp);
}

#[test]
fn footprint_and_trail_around_reference() {
    let center = GeoPoint::on_surface(LAT0, LON0);
    let poly = footprint(&center, 2000.0, 100);
    assert_eq!(poly.len(), 100);
    for p in poly.iter() {
        assert_abs_diff_eq!(great_circle_distance_km(&center, p), 2000.0, epsilon = 1.0);
    }

    let mut trail = TrailBuffer::new(200).unwrap();
    trail.push(center);
    assert_eq!(trail.snapshot(), vec![center]);
}

#[test]
fn session_at_reference_instant() {
    let mut session =
        TrackingSession::from_element_set(elements(), t0(), TrackerConfig::default()).unwrap();
    let report = session.update().unwrap();

    assert_eq!(report.satellite, NAME);
    assert_abs_diff_eq!(report.sub_point.latitude(), LAT0, epsilon = 0.05);
    assert_abs_diff_eq!(report.sub_point.longitude(), LON0, epsilon = 0.05);
    assert_eq!(report.trail, vec![report.sub_point]);
    assert_eq!(report.footprint.len(), 100);
    assert_eq!(report.path.len() + report.dropped_path_samples, 61);
    assert_eq!(report.path[30].instant, t0());
    assert_eq!(report.path[30].point, report.sub_point);

    // Never closer than straight down
    assert!(report.ground_distance_km > 0.0);
    assert!(report.direct_distance_km > ALT0_KM);
}
