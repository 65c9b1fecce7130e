// cargo run --bin footprint-profile -- --latitude 7.398 --longitude 27.083 --radius 2000 /tmp/footprint_data.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use track_types::prelude::GeoPoint;
use tracker_lib::footprint::{footprint, DEFAULT_POINT_COUNT};

/// Print a visibility footprint polygon
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Center latitude [deg]
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    /// Center longitude [deg]
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// Ground radius [km]
    #[arg(short = 'r', long, default_value_t = 2000.0)]
    radius: f64,

    /// Number of polygon vertices
    #[arg(short = 'n', long, default_value_t = DEFAULT_POINT_COUNT)]
    points: usize,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let center = GeoPoint::on_surface(opts.latitude, opts.longitude);
    let mut output = File::create(opts.output)?;

    let polygon = footprint(&center, opts.radius, opts.points);
    for (i, p) in polygon.iter().enumerate() {
        let bearing = 360.0 * i as f64 / opts.points as f64;
        writeln!(&mut output, "{} {} {}", bearing, p.latitude(), p.longitude())?;
    }

    Ok(())
}
