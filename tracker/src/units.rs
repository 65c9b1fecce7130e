//! A lightweight uom-ish library, just the quantities the tracker needs.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use track_types::prelude::UtcTimestamp;

const NANOS_PER_SEC: i64 = 1_000_000_000;

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

/// An absolute UTC instant
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp {
    utc: UtcTimestamp,
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl Timestamp {
    pub fn from_utc(utc: UtcTimestamp) -> Timestamp {
        Timestamp { utc }
    }

    /// Parse an RFC 3339 string, e.g. `2024-05-20T12:00:00Z`
    pub fn parse_rfc3339(s: &str) -> Result<Timestamp, chrono::ParseError> {
        let t = chrono::DateTime::parse_from_rfc3339(s)?;
        Ok(Timestamp::from_utc(t.with_timezone(&chrono::Utc)))
    }

    pub fn as_utc(&self) -> &UtcTimestamp {
        &self.utc
    }

    /// Seconds since the Unix epoch, with the sub-second part
    pub fn as_unix_secs_f64(&self) -> f64 {
        self.utc.timestamp() as f64 + f64::from(self.utc.timestamp_subsec_nanos()) / 1e9
    }

    /// The same instant with seconds and sub-seconds zeroed
    pub fn truncated_to_minute(&self) -> Timestamp {
        let secs = self.utc.timestamp();
        let secs = secs - secs.rem_euclid(60);
        match chrono::DateTime::from_timestamp(secs, 0) {
            Some(utc) => Timestamp::from_utc(utc),
            None => *self,
        }
    }

    pub fn checked_add(&self, rhs: Time) -> Option<Timestamp> {
        self.utc
            .checked_add_signed(rhs.as_chrono_duration())
            .map(Timestamp::from_utc)
    }

    pub fn checked_sub(&self, rhs: Time) -> Option<Timestamp> {
        self.utc
            .checked_sub_signed(rhs.as_chrono_duration())
            .map(Timestamp::from_utc)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Time;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Time::from_chrono_duration(*self.as_utc() - *rhs.as_utc())
    }
}

impl Add<Time> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Time) -> Self::Output {
        let mut ts = self;
        ts += rhs;
        ts
    }
}

impl AddAssign<Time> for Timestamp {
    fn add_assign(&mut self, rhs: Time) {
        self.utc += rhs.as_chrono_duration();
    }
}

impl Sub<Time> for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Time) -> Self::Output {
        let mut ts = self;
        ts -= rhs;
        ts
    }
}

impl SubAssign<Time> for Timestamp {
    fn sub_assign(&mut self, rhs: Time) {
        self.utc -= rhs.as_chrono_duration();
    }
}

/// A signed duration with nanosecond resolution
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Time {
    nanos: i64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.as_secs())
    }
}

impl Time {
    pub const ZERO: Time = Time { nanos: 0 };

    /// Saturates at the representable range
    pub fn from_chrono_duration(duration: chrono::Duration) -> Time {
        let nanos = duration.num_nanoseconds().unwrap_or(if duration < chrono::Duration::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        Time { nanos }
    }

    /// `None` if the duration doesn't fit
    pub fn from_std(duration: std::time::Duration) -> Option<Time> {
        i64::try_from(duration.as_nanos())
            .ok()
            .map(Time::from_nanos)
    }

    pub fn from_hours(hours: f64) -> Time {
        Self::from_minutes(hours * 60.0)
    }

    pub fn from_minutes(minutes: f64) -> Time {
        Self::from_secs(minutes * 60.0)
    }

    pub fn from_secs(seconds: f64) -> Time {
        Time {
            nanos: (seconds * NANOS_PER_SEC as f64).round() as i64,
        }
    }

    pub const fn from_nanos(nanos: i64) -> Time {
        Time { nanos }
    }

    pub const fn from_whole_secs(seconds: i64) -> Time {
        Time {
            nanos: seconds * NANOS_PER_SEC,
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    pub fn as_minutes(&self) -> f64 {
        self.as_secs() / 60.0
    }

    pub fn as_nanos(&self) -> i64 {
        self.nanos
    }

    pub fn as_chrono_duration(&self) -> chrono::Duration {
        chrono::Duration::nanoseconds(self.nanos)
    }

    pub fn is_positive(&self) -> bool {
        self.nanos > 0
    }

    pub fn is_negative(&self) -> bool {
        self.nanos < 0
    }
}

impl Neg for Time {
    type Output = Time;

    fn neg(self) -> Self::Output {
        Time::from_nanos(self.nanos.saturating_neg())
    }
}
