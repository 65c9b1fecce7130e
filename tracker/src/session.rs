use crate::{
    cursor::{Direction, Magnitude, TimeCursor},
    footprint::footprint,
    geodesy::{great_circle_distance_km, straight_line_distance_km},
    path::sample_path,
    propagator::{ParseError, PropagationError, Sgp4Propagator, SubPointPropagator},
    report::TrackReport,
    scenario::{ConfigurationError, TrackerConfig},
    trail::TrailBuffer,
    units::Timestamp,
};
use thiserror::Error;
use tracing::{debug, info};
use track_types::prelude::ElementSet;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// The tracker's only mutable state: a time cursor and a trail, together
/// with the propagator that owns the element set.
///
/// Every redraw or time-navigation event maps to one [`update`] or
/// [`step`] call, which recomputes everything at the cursor instant.
///
/// [`update`]: TrackingSession::update
/// [`step`]: TrackingSession::step
#[derive(Debug)]
pub struct TrackingSession<P = Sgp4Propagator> {
    propagator: P,
    cursor: TimeCursor,
    trail: TrailBuffer,
    config: TrackerConfig,
}

impl TrackingSession<Sgp4Propagator> {
    pub fn from_element_set(
        elements: ElementSet,
        initial: Timestamp,
        config: TrackerConfig,
    ) -> Result<Self, SessionError> {
        let propagator = Sgp4Propagator::new(elements)?;
        Self::new(propagator, initial, config)
    }
}

impl<P: SubPointPropagator> TrackingSession<P> {
    pub fn new(
        propagator: P,
        initial: Timestamp,
        config: TrackerConfig,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let cursor = TimeCursor::new(initial, config.short_step, config.long_step)?;
        let trail = TrailBuffer::new(config.trail_capacity)?;

        info!(
            satellite = %propagator.elements().name,
            start = %initial,
            trail_capacity = trail.capacity(),
            "Created tracking session"
        );

        Ok(Self {
            propagator,
            cursor,
            trail,
            config,
        })
    }

    /// One recomputation pass at the cursor instant.
    ///
    /// A propagation failure is returned as is and leaves the trail alone.
    pub fn update(&mut self) -> Result<TrackReport, PropagationError> {
        let instant = self.cursor.current();
        let sub_point = self.propagator.propagate(instant)?;
        self.trail.push(sub_point);

        let footprint = footprint(
            &sub_point,
            self.config.visibility_radius.as_kilometers(),
            self.config.footprint_points,
        );
        let path = sample_path(&self.propagator, instant, &self.config.path_window);

        let target = self.config.target;
        let ground_distance_km = great_circle_distance_km(&sub_point, &target);
        let direct_distance_km = straight_line_distance_km(&sub_point, &target);

        debug!(
            instant = %instant,
            sub_point = %sub_point,
            path_samples = path.samples.len(),
            ground_distance_km,
            "Updated"
        );

        Ok(TrackReport {
            instant,
            satellite: self.propagator.elements().name.clone(),
            sub_point,
            trail: self.trail.snapshot(),
            footprint,
            path: path.samples,
            dropped_path_samples: path.dropped,
            target,
            ground_distance_km,
            direct_distance_km,
        })
    }

    /// Move the cursor without recomputing
    pub fn advance(&mut self, direction: Direction, magnitude: Magnitude) -> Timestamp {
        self.cursor.advance(direction, magnitude)
    }

    /// Move the cursor, then recompute
    pub fn step(
        &mut self,
        direction: Direction,
        magnitude: Magnitude,
    ) -> Result<TrackReport, PropagationError> {
        self.advance(direction, magnitude);
        self.update()
    }

    pub fn cursor(&self) -> &TimeCursor {
        &self.cursor
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn elements(&self) -> &ElementSet {
        self.propagator.elements()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{
        tests::{t0, FakePropagator},
        PathWindow,
    };
    use crate::units::Time;
    use approx::assert_abs_diff_eq;
    use track_types::prelude::GeoPoint;

    fn session(blackout_minutes: Vec<i64>) -> TrackingSession<FakePropagator> {
        let mut p = FakePropagator::new(t0());
        p.blackout_minutes = blackout_minutes;
        let mut cfg = TrackerConfig::default();
        cfg.trail_capacity = 3;
        cfg.path_window = PathWindow::new(
            Time::from_minutes(2.0),
            Time::from_minutes(2.0),
            Time::from_minutes(1.0),
        )
        .unwrap();
        cfg.short_step = Time::from_minutes(1.0);
        cfg.long_step = Time::from_minutes(10.0);
        cfg.target = GeoPoint::on_surface(0.0, 0.0);
        TrackingSession::new(p, t0(), cfg).unwrap()
    }

    #[test]
    fn update_fills_the_report() {
        let mut s = session(vec![]);
        let r = s.update().unwrap();
        assert_eq!(r.instant, t0());
        assert_eq!(r.satellite, "FAKE");
        assert_eq!(r.sub_point, GeoPoint::new(0.0, 0.0, 400.0));
        assert_eq!(r.trail, vec![r.sub_point]);
        assert_eq!(r.footprint.len(), 100);
        assert_eq!(r.path.len(), 5);
        assert_eq!(r.dropped_path_samples, 0);
        assert_eq!(r.ground_distance_km, 0.0);
        assert_abs_diff_eq!(r.direct_distance_km, 400.0, epsilon = 1e-6);
    }

    #[test]
    fn steps_move_the_cursor_and_grow_the_trail() {
        let mut s = session(vec![]);
        s.update().unwrap();
        let r = s.step(Direction::Forward, Magnitude::Short).unwrap();
        assert_eq!(r.instant, t0() + Time::from_minutes(1.0));
        assert_eq!(r.sub_point.longitude(), 1.0);

        s.step(Direction::Forward, Magnitude::Long).unwrap();
        let r = s.step(Direction::Backward, Magnitude::Long).unwrap();
        assert_eq!(r.instant, t0() + Time::from_minutes(1.0));
        let lons: Vec<f64> = r.trail.iter().map(|p| p.longitude()).collect();
        assert_eq!(lons, vec![1.0, 11.0, 1.0]);
        assert_eq!(s.trail().len(), 3);
    }

    #[test]
    fn propagation_error_leaves_state_alone() {
        let mut s = session(vec![1]);
        s.update().unwrap();
        let before = s.trail().snapshot();

        let err = s.step(Direction::Forward, Magnitude::Short).unwrap_err();
        assert_eq!(err.instant, t0() + Time::from_minutes(1.0));
        assert_eq!(s.trail().snapshot(), before);
        assert_eq!(s.cursor().current(), t0() + Time::from_minutes(1.0));

        // Moving on recovers, with the blacked out path sample skipped
        let r = s.step(Direction::Forward, Magnitude::Short).unwrap();
        assert_eq!(r.dropped_path_samples, 1);
        assert_eq!(r.path.len(), 4);
        assert_eq!(r.trail.len(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = TrackerConfig::default();
        cfg.footprint_points = 0;
        let err = TrackingSession::new(FakePropagator::new(t0()), t0(), cfg).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Configuration(ConfigurationError::NonPositive("footprint point count"))
        ));
    }

    #[test]
    fn bad_element_set_is_fatal() {
        let elements = ElementSet::new("BROKEN", "1 00000", "2 00000");
        let err = TrackingSession::from_element_set(elements, t0(), TrackerConfig::default())
            .unwrap_err();
        assert!(matches!(err, SessionError::Parse(ParseError::Element(_))));
    }
}
