use super::{nominal, ConfigurationError, TrackerConfig};
use crate::{
    path::PathWindow,
    source::Selection,
    units::{Length, Time, Timestamp},
};
use regex::Regex;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use track_types::prelude::GeoPoint;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read config file '{}'. {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file. {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

/// A scenario file. Every field is optional and falls back to the nominal
/// scenario.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub name: Option<String>,
    /// Element catalog file, relative to the scenario file
    pub tle: Option<PathBuf>,
    /// Exact satellite name to select from the catalog
    pub satellite: Option<String>,
    /// Regex on the satellite name
    pub matches: Option<String>,
    /// RFC 3339 start instant
    pub start: Option<String>,
    /// [km]
    pub visibility_radius: Option<f64>,
    pub footprint_points: Option<i64>,
    pub trail_capacity: Option<i64>,
    pub short_step: Option<String>,
    pub long_step: Option<String>,
    pub path: Option<PathConfig>,
    pub target: Option<Target>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathConfig {
    pub before: Option<String>,
    pub after: Option<String>,
    pub step: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Target {
    /// [deg]
    pub latitude: Option<f64>,
    /// [deg]
    pub longitude: Option<f64>,
    /// [km]
    pub altitude: Option<f64>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_str_checked(&content)?;

        if let (Some(tle), Some(dir)) = (cfg.tle.as_ref(), path.parent()) {
            if tle.is_relative() {
                cfg.tle = Some(dir.join(tle));
            }
        }

        Ok(cfg)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, LoadError> {
        let cfg: Config = toml::from_str(s)?;
        cfg.tracker_config()?;
        Ok(cfg)
    }

    /// Merge over the nominal scenario and validate
    pub fn tracker_config(&self) -> Result<TrackerConfig, ConfigurationError> {
        let ncfg = nominal::tracker_config();

        let visibility_radius = match self.visibility_radius {
            Some(r) if !r.is_finite() => {
                return Err(ConfigurationError::NonFinite("visibility radius"))
            }
            Some(r) => Length::from_kilometers(r),
            None => ncfg.visibility_radius,
        };
        let footprint_points = positive_count(
            "footprint point count",
            self.footprint_points,
            ncfg.footprint_points,
        )?;
        let trail_capacity =
            positive_count("trail capacity", self.trail_capacity, ncfg.trail_capacity)?;

        let path = self.path.clone().unwrap_or_default();
        let path_window = PathWindow::new(
            duration("path window before", path.before.as_deref())?
                .unwrap_or(ncfg.path_window.before()),
            duration("path window after", path.after.as_deref())?
                .unwrap_or(ncfg.path_window.after()),
            duration("path step", path.step.as_deref())?.unwrap_or(ncfg.path_window.step()),
        )?;

        let short_step =
            duration("short step", self.short_step.as_deref())?.unwrap_or(ncfg.short_step);
        if !short_step.is_positive() {
            return Err(ConfigurationError::NonPositive("short step"));
        }
        let long_step =
            duration("long step", self.long_step.as_deref())?.unwrap_or(ncfg.long_step);
        if !long_step.is_positive() {
            return Err(ConfigurationError::NonPositive("long step"));
        }

        let target = match self.target.as_ref() {
            Some(t) => {
                let latitude = t.latitude.unwrap_or(ncfg.target.latitude());
                let longitude = t.longitude.unwrap_or(ncfg.target.longitude());
                let altitude = t.altitude.unwrap_or(0.0);
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(ConfigurationError::Latitude(latitude));
                }
                if !longitude.is_finite() {
                    return Err(ConfigurationError::NonFinite("target longitude"));
                }
                if !altitude.is_finite() {
                    return Err(ConfigurationError::NonFinite("target altitude"));
                }
                GeoPoint::new(latitude, longitude, altitude)
            }
            None => ncfg.target,
        };

        let start = self
            .start
            .as_deref()
            .map(|s| {
                Timestamp::parse_rfc3339(s).map_err(|e| ConfigurationError::Start {
                    value: s.to_owned(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let selection = match (self.satellite.as_ref(), self.matches.as_ref()) {
            (Some(_), Some(_)) => return Err(ConfigurationError::AmbiguousSelection),
            (Some(name), None) => Selection::Name(name.trim().to_owned()),
            (None, Some(pattern)) => {
                Selection::Matches(Regex::new(pattern).map_err(|e| {
                    ConfigurationError::Pattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    }
                })?)
            }
            (None, None) => ncfg.selection,
        };

        Ok(TrackerConfig {
            name: self.name.clone(),
            visibility_radius,
            footprint_points,
            trail_capacity,
            path_window,
            short_step,
            long_step,
            target,
            start,
            tle: self.tle.clone(),
            selection,
        })
    }
}

fn positive_count(
    field: &'static str,
    value: Option<i64>,
    nominal: usize,
) -> Result<usize, ConfigurationError> {
    match value {
        None => Ok(nominal),
        Some(v) if v <= 0 => Err(ConfigurationError::NonPositive(field)),
        Some(v) => usize::try_from(v).map_err(|_| ConfigurationError::NonPositive(field)),
    }
}

/// Humantime duration strings, with an optional leading '-' so negative
/// windows are reported as such rather than as syntax errors
fn duration(field: &'static str, value: Option<&str>) -> Result<Option<Time>, ConfigurationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let invalid = |reason: String| ConfigurationError::Duration {
        field,
        value: value.to_owned(),
        reason,
    };

    let trimmed = value.trim();
    let (negative, magnitude) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let d = humantime::parse_duration(magnitude).map_err(|e| invalid(e.to_string()))?;
    let t = Time::from_std(d).ok_or_else(|| invalid("Duration is too long".to_owned()))?;
    Ok(Some(if negative { -t } else { t }))
}
