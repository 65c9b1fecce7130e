use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

use tracker_lib::{
    cursor::Step,
    propagator::PropagationError,
    report::TrackReport,
    scenario::{nominal, TrackerConfig},
    session::TrackingSession,
    source::{fetch_or_fallback, CatalogFileSource, Selection},
    units::Timestamp,
};

/// Track a satellite's ground point and print one report per update
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The default nominal scenario is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Element catalog file (Celestrak FORMAT=tle text).
    ///
    /// Overrides the scenario's catalog. The built-in fallback element set
    /// is used when no catalog is given or it can't be read.
    #[arg(long = "tle")]
    tle_path: Option<PathBuf>,

    /// Satellite name to select from the catalog, the first record otherwise
    #[arg(long)]
    satellite: Option<String>,

    /// Initial instant (RFC 3339), defaults to the scenario start time or
    /// the current minute
    #[arg(long, value_parser = Timestamp::parse_rfc3339)]
    at: Option<Timestamp>,

    /// Time steps to apply after the initial update, in order.
    ///
    /// Each is <forward|backward>-<short|long>, e.g. `--step forward-long`.
    #[arg(long = "step")]
    steps: Vec<Step>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let mut config = TrackerConfig::load(opts.scenario.as_ref())?;
    if let Some(p) = opts.tle_path {
        config.tle = Some(p);
    }
    if let Some(name) = opts.satellite {
        config.selection = Selection::Name(name);
    }

    let fallback = nominal::fallback_element_set();
    let elements = match config.tle.as_ref() {
        Some(p) => {
            let mut source = CatalogFileSource::new(p, config.selection.clone());
            fetch_or_fallback(&mut source, fallback)
        }
        None => fallback,
    };

    let initial = opts
        .at
        .or(config.start)
        .unwrap_or_else(|| Timestamp::from_utc(chrono::Utc::now()).truncated_to_minute());

    let mut session = TrackingSession::from_element_set(elements, initial, config)?;

    emit(opts.format, session.update())?;
    for step in opts.steps.iter() {
        emit(opts.format, session.step(step.direction, step.magnitude))?;
    }

    Ok(())
}

fn emit(
    format: Format,
    report: Result<TrackReport, PropagationError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = match report {
        Ok(r) => r,
        Err(e) => {
            // Keep going, the next instant may well propagate
            warn!(instant = %e.instant, reason = %e.reason, "No sub-point for this instant");
            return Ok(());
        }
    };

    match format {
        Format::Text => println!("{report}\n"),
        Format::Json => println!("{}", serde_json::to_string(&report)?),
    }
    Ok(())
}
