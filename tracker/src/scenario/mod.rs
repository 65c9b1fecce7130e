use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use track_types::prelude::GeoPoint;

use self::config::{Config, LoadError};
use crate::{
    path::PathWindow,
    source::Selection,
    units::{Length, Time, Timestamp},
};

pub mod config;
pub mod nominal;

/// Invalid tracker settings, rejected at construction and never clamped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("The {0} must be greater than zero")]
    NonPositive(&'static str),
    #[error("The {0} must not be negative")]
    Negative(&'static str),
    #[error("The {0} must be a finite number")]
    NonFinite(&'static str),
    #[error("Target latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("Invalid duration '{value}' for {field}. {reason}")]
    Duration {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Invalid start time '{value}'. {reason}")]
    Start { value: String, reason: String },
    #[error("Invalid satellite name pattern '{pattern}'. {reason}")]
    Pattern { pattern: String, reason: String },
    #[error("Only one of 'satellite' and 'matches' can be given")]
    AmbiguousSelection,
}

/// Validated runtime settings for a tracking session
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub name: Option<String>,
    pub visibility_radius: Length,
    pub footprint_points: usize,
    pub trail_capacity: usize,
    pub path_window: PathWindow,
    pub short_step: Time,
    pub long_step: Time,
    /// Fixed ground location distances are reported against
    pub target: GeoPoint,
    /// Initial cursor instant
    pub start: Option<Timestamp>,
    /// Element catalog file
    pub tle: Option<PathBuf>,
    pub selection: Selection,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        nominal::tracker_config()
    }
}

impl TrackerConfig {
    /// The nominal settings, overridden by the scenario file when one is given
    pub fn load<P: AsRef<Path>>(config: Option<P>) -> Result<Self, LoadError> {
        if let Some(cfg_path) = config.as_ref() {
            info!(
                config = %cfg_path.as_ref().display(),
                "Loading scenario from config file",
            );
            let cfg = Config::load(cfg_path)?;
            Ok(cfg.tracker_config()?)
        } else {
            info!("Loading default nominal scenario");
            Ok(nominal::tracker_config())
        }
    }

    /// Re-check the invariants the session relies on
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.visibility_radius.as_meters().is_finite() {
            return Err(ConfigurationError::NonFinite("visibility radius"));
        }
        if self.footprint_points == 0 {
            return Err(ConfigurationError::NonPositive("footprint point count"));
        }
        if self.trail_capacity == 0 {
            return Err(ConfigurationError::NonPositive("trail capacity"));
        }
        PathWindow::new(
            self.path_window.before(),
            self.path_window.after(),
            self.path_window.step(),
        )?;
        if !self.short_step.is_positive() {
            return Err(ConfigurationError::NonPositive("short step"));
        }
        if !self.long_step.is_positive() {
            return Err(ConfigurationError::NonPositive("long step"));
        }
        Ok(())
    }
}
