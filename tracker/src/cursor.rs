use crate::{
    scenario::ConfigurationError,
    units::{Time, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Magnitude {
    Short,
    Long,
}

/// One discrete time-navigation request, e.g. `forward-short`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    pub direction: Direction,
    pub magnitude: Magnitude,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (d, m) = s
            .split_once('-')
            .ok_or_else(|| format!("Expected <direction>-<magnitude>, got '{s}'"))?;
        let direction = match d {
            "forward" | "fwd" => Direction::Forward,
            "backward" | "back" => Direction::Backward,
            _ => return Err(format!("Unknown direction '{d}'")),
        };
        let magnitude = match m {
            "short" => Magnitude::Short,
            "long" => Magnitude::Long,
            _ => return Err(format!("Unknown magnitude '{m}'")),
        };
        Ok(Step {
            direction,
            magnitude,
        })
    }
}

/// The instant of interest, moved only in discrete steps
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeCursor {
    current: Timestamp,
    short_step: Time,
    long_step: Time,
}

impl TimeCursor {
    pub fn new(
        initial: Timestamp,
        short_step: Time,
        long_step: Time,
    ) -> Result<Self, ConfigurationError> {
        if !short_step.is_positive() {
            return Err(ConfigurationError::NonPositive("short step"));
        }
        if !long_step.is_positive() {
            return Err(ConfigurationError::NonPositive("long step"));
        }
        Ok(Self {
            current: initial,
            short_step,
            long_step,
        })
    }

    pub fn current(&self) -> Timestamp {
        self.current
    }

    pub fn short_step(&self) -> Time {
        self.short_step
    }

    pub fn long_step(&self) -> Time {
        self.long_step
    }

    /// Move by one short or long step. There are no bounds; only a step
    /// that would leave the representable calendar is ignored.
    pub fn advance(&mut self, direction: Direction, magnitude: Magnitude) -> Timestamp {
        let step = match magnitude {
            Magnitude::Short => self.short_step,
            Magnitude::Long => self.long_step,
        };
        let next = match direction {
            Direction::Forward => self.current.checked_add(step),
            Direction::Backward => self.current.checked_sub(step),
        };
        match next {
            Some(t) => self.current = t,
            None => warn!(
                current = %self.current,
                ?direction,
                ?magnitude,
                "Time cursor step is out of range, ignoring"
            ),
        }
        self.current
    }
}
