// cargo run --bin path-profile --release -- --tle scenarios/stations.txt --at 2025-05-20T08:54:00Z --before 90m --after 90m --step 30s /tmp/path_data.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use tracker_lib::{
    path::{sample_path, PathWindow},
    propagator::Sgp4Propagator,
    scenario::nominal,
    source::{fetch_or_fallback, CatalogFileSource, Selection},
    units::{Time, Timestamp},
};

/// Print the sampled ground track around an instant
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Element catalog file, the built-in fallback element set otherwise
    #[arg(long = "tle")]
    tle_path: Option<PathBuf>,

    /// Satellite name to select from the catalog
    #[arg(short = 's', long)]
    satellite: Option<String>,

    /// Center instant (RFC 3339)
    #[arg(short = 'a', long, value_parser = Timestamp::parse_rfc3339)]
    at: Timestamp,

    /// Window before the center
    #[arg(short = 'b', long, default_value = "30m", value_parser = humantime::parse_duration)]
    before: std::time::Duration,

    /// Window after the center
    #[arg(short = 'f', long, default_value = "30m", value_parser = humantime::parse_duration)]
    after: std::time::Duration,

    /// Sampling step
    #[arg(short = 't', long, default_value = "60s", value_parser = humantime::parse_duration)]
    step: std::time::Duration,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let fallback = nominal::fallback_element_set();
    let elements = match opts.tle_path.as_ref() {
        Some(p) => {
            let selection = opts
                .satellite
                .clone()
                .map(Selection::Name)
                .unwrap_or_default();
            fetch_or_fallback(&mut CatalogFileSource::new(p, selection), fallback)
        }
        None => fallback,
    };
    let propagator = Sgp4Propagator::new(elements)?;

    let to_time = |d: std::time::Duration| Time::from_std(d).ok_or("Duration is too long");
    let window = PathWindow::new(to_time(opts.before)?, to_time(opts.after)?, to_time(opts.step)?)?;

    let mut output = File::create(opts.output)?;
    let path = sample_path(&propagator, opts.at, &window);
    for s in path.samples.iter() {
        writeln!(
            &mut output,
            "{} {} {} {}",
            s.instant.as_unix_secs_f64(),
            s.point.latitude(),
            s.point.longitude(),
            s.point.altitude_km()
        )?;
    }

    if path.dropped != 0 {
        eprintln!("Dropped {} samples that failed to propagate", path.dropped);
    }

    Ok(())
}
