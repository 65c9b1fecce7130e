use crate::{
    propagator::SubPointPropagator,
    scenario::ConfigurationError,
    units::{Time, Timestamp},
};
use serde::Serialize;
use tracing::{debug, warn};
use track_types::prelude::GeoPoint;

/// A window of instants around a center, sampled at a fixed step
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PathWindow {
    pub(crate) before: Time,
    pub(crate) after: Time,
    pub(crate) step: Time,
}

impl PathWindow {
    pub fn new(before: Time, after: Time, step: Time) -> Result<Self, ConfigurationError> {
        if !step.is_positive() {
            return Err(ConfigurationError::NonPositive("path step"));
        }
        if before.is_negative() {
            return Err(ConfigurationError::Negative("path window before"));
        }
        if after.is_negative() {
            return Err(ConfigurationError::Negative("path window after"));
        }
        Ok(Self {
            before,
            after,
            step,
        })
    }

    pub fn before(&self) -> Time {
        self.before
    }

    pub fn after(&self) -> Time {
        self.after
    }

    pub fn step(&self) -> Time {
        self.step
    }

    /// Sample instants `center - before + i * step` for every `i` that
    /// doesn't pass `center + after`. Both ends are inclusive: the last
    /// instant is `center + after` exactly when the window length is a
    /// multiple of the step. Instants outside the calendar are left out.
    pub fn instants(&self, center: Timestamp) -> Vec<Timestamp> {
        let span = self.before.as_nanos() as i128 + self.after.as_nanos() as i128;
        let count = span / self.step.as_nanos() as i128 + 1;

        (0..count)
            .filter_map(|i| {
                let offset = i * self.step.as_nanos() as i128 - self.before.as_nanos() as i128;
                let offset = i64::try_from(offset).ok()?;
                center.checked_add(Time::from_nanos(offset))
            })
            .collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PathSample {
    pub instant: Timestamp,
    pub point: GeoPoint,
}

/// Samples in chronological order, plus how many instants were dropped
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampledPath {
    pub samples: Vec<PathSample>,
    pub dropped: usize,
}

/// Propagate every instant of `window` around `center`.
///
/// An instant that fails to propagate is skipped; the rest of the path is
/// still returned.
pub fn sample_path<P: SubPointPropagator + ?Sized>(
    propagator: &P,
    center: Timestamp,
    window: &PathWindow,
) -> SampledPath {
    let mut path = SampledPath::default();

    for instant in window.instants(center) {
        match propagator.propagate(instant) {
            Ok(point) => path.samples.push(PathSample { instant, point }),
            Err(e) => {
                debug!(instant = %instant, reason = %e.reason, "Dropping path sample");
                path.dropped += 1;
            }
        }
    }

    if path.dropped != 0 {
        warn!(
            center = %center,
            dropped = path.dropped,
            kept = path.samples.len(),
            "Some path samples failed to propagate"
        );
    }

    path
}
