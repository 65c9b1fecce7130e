//! Sub-point propagation: element set + instant -> geodetic point beneath the
//! satellite.

use crate::units::Timestamp;
use na::{Rotation3, Vector3};
use nav_types::{ECEF, WGS84};
use thiserror::Error;
use track_protocol::{validate_element_set, ElementError};
use track_types::prelude::*;

/// J2000 reference epoch, 2000-01-01T12:00:00Z, as Unix seconds
const J2000_UNIX_SECS: f64 = 946_728_000.0;
const SECONDS_PER_JULIAN_YEAR: f64 = 365.25 * 86_400.0;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error("Element set '{name}' was rejected by the propagator. {reason}")]
    Rejected { name: String, reason: String },
}

/// The model declined to produce a sub-point for one instant
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to propagate to {instant}. {reason}")]
pub struct PropagationError {
    pub instant: Timestamp,
    pub reason: String,
}

impl PropagationError {
    pub fn new(instant: Timestamp, reason: impl Into<String>) -> Self {
        Self {
            instant,
            reason: reason.into(),
        }
    }
}

/// Something that can locate the point beneath a satellite at an instant.
///
/// Implementations are deterministic: the same instant always yields the
/// same point.
pub trait SubPointPropagator {
    fn elements(&self) -> &ElementSet;

    fn propagate(&self, instant: Timestamp) -> Result<GeoPoint, PropagationError>;
}

/// Validate a raw three-line record and check the SGP4 model accepts it
pub fn parse(name: &str, line1: &str, line2: &str) -> Result<ElementSet, ParseError> {
    let elements = validate_element_set(name, line1, line2)?;
    Sgp4Propagator::new(elements.clone())?;
    Ok(elements)
}

pub struct Sgp4Propagator {
    elements: ElementSet,
    epoch: chrono::NaiveDateTime,
    constants: sgp4::Constants,
}

impl std::fmt::Debug for Sgp4Propagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sgp4Propagator")
            .field("elements", &self.elements)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Sgp4Propagator {
    pub fn new(elements: ElementSet) -> Result<Self, ParseError> {
        let elements = validate_element_set(&elements.name, &elements.line1, &elements.line2)?;

        let rejected = |reason: String| ParseError::Rejected {
            name: elements.name.clone(),
            reason,
        };
        let sgp4_elements = sgp4::Elements::from_tle(
            Some(elements.name.clone()),
            elements.line1.as_bytes(),
            elements.line2.as_bytes(),
        )
        .map_err(|e| rejected(e.to_string()))?;
        let constants =
            sgp4::Constants::from_elements(&sgp4_elements).map_err(|e| rejected(e.to_string()))?;

        Ok(Self {
            epoch: sgp4_elements.datetime,
            elements,
            constants,
        })
    }

    /// Element set epoch
    pub fn epoch(&self) -> Timestamp {
        Timestamp::from_utc(self.epoch.and_utc())
    }

    fn minutes_since_epoch(&self, instant: Timestamp) -> f64 {
        let dt = instant.as_utc().naive_utc() - self.epoch;
        match dt.num_microseconds() {
            Some(us) => us as f64 / 60_000_000.0,
            None => dt.num_milliseconds() as f64 / 60_000.0,
        }
    }
}

impl SubPointPropagator for Sgp4Propagator {
    fn elements(&self) -> &ElementSet {
        &self.elements
    }

    fn propagate(&self, instant: Timestamp) -> Result<GeoPoint, PropagationError> {
        let minutes = self.minutes_since_epoch(instant);
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| PropagationError::new(instant, e.to_string()))?;

        let [x, y, z] = prediction.position;
        let teme_km = Vector3::new(x, y, z);
        let fixed_km = Rotation3::from_axis_angle(&Vector3::z_axis(), -sidereal_angle(instant))
            * teme_km;

        let wgs = WGS84::from(ECEF::new(
            fixed_km.x * 1000.0,
            fixed_km.y * 1000.0,
            fixed_km.z * 1000.0,
        ));
        let (lat, lon, alt_km) = (
            wgs.latitude_degrees(),
            wgs.longitude_degrees(),
            wgs.altitude() / 1000.0,
        );
        if !(lat.is_finite() && lon.is_finite() && alt_km.is_finite()) {
            return Err(PropagationError::new(
                instant,
                "Propagator produced a non-finite position",
            ));
        }

        Ok(GeoPoint::new(lat, lon, alt_km))
    }
}

/// IAU-82 Greenwich mean sidereal angle [rad]
pub fn sidereal_angle(instant: Timestamp) -> f64 {
    let years = (instant.as_unix_secs_f64() - J2000_UNIX_SECS) / SECONDS_PER_JULIAN_YEAR;
    sgp4::iau_epoch_to_sidereal_time(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::nominal;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    #[test]
    fn sidereal_angle_at_j2000() {
        let t = Timestamp::from_utc(chrono::Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
        // 280.46061837° at J2000.0
        assert_abs_diff_eq!(
            sidereal_angle(t).to_degrees().rem_euclid(360.0),
            280.4606,
            epsilon = 1e-3
        );
    }

    #[test]
    fn propagation_is_deterministic() {
        let p = Sgp4Propagator::new(nominal::fallback_element_set()).unwrap();
        let t = p.epoch() + crate::units::Time::from_minutes(42.0);
        let a = p.propagate(t).unwrap();
        let b = p.propagate(t).unwrap();
        assert_eq!(a, b);
        assert!(a.altitude_km() > 300.0 && a.altitude_km() < 500.0);
        assert!(a.latitude().abs() <= 52.5);
    }

    #[test]
    fn parse_rejects_bad_lines() {
        let fallback = nominal::fallback_element_set();
        assert!(parse(&fallback.name, &fallback.line1, &fallback.line2).is_ok());

        let err = parse(&fallback.name, &fallback.line2, &fallback.line1).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Element(ElementError::LineNumber { line: 1 })
        ));
    }

    #[test]
    fn far_future_instant_does_not_panic() {
        let p = Sgp4Propagator::new(nominal::fallback_element_set()).unwrap();
        let t = p.epoch() + crate::units::Time::from_hours(24.0 * 365.0 * 50.0);
        // Either outcome is fine, it just has to come back
        let _ = p.propagate(t);
    }
}
