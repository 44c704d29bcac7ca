//! haversine-processor: benchmark host for the cycleprof timing core.
//!
//! Parses a JSON file of coordinate pairs, computes the average haversine
//! distance, optionally compares against a binary file of precomputed
//! reference distances, and prints a per-phase timing breakdown.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use cycleprof::haversine::{average_distance, Pairs};
use cycleprof::{output, Calibration, Report, ZoneRegistry};

#[derive(Parser, Debug)]
#[command(name = "haversine-processor")]
#[command(version)]
#[command(about = "Average haversine distance with per-phase cycle timing", long_about = None)]
struct Cli {
    /// JSON file of coordinate pairs: {"pairs": [{"x0", "y0", "x1", "y1"}, ...]}
    coordinates: PathBuf,

    /// Optional binary file of little-endian f64 reference distances
    answers: Option<PathBuf>,

    /// Calibration window in milliseconds
    #[arg(long, default_value_t = Calibration::DEFAULT_WAIT_MILLIS)]
    calibration_ms: u64,

    /// Emit the timing report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("haversine-processor: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut zones = ZoneRegistry::new();

    zones.start("startup");
    let cli = Cli::parse();
    let calibration = Calibration::estimate(cli.calibration_ms)?;
    zones.stop("startup")?;

    zones.start("read");
    let raw = fs::read(&cli.coordinates)?;
    zones.stop("read")?;

    zones.start("parse");
    let pairs: Pairs = serde_json::from_slice(&raw)?;
    zones.stop("parse")?;

    if pairs.pairs.is_empty() {
        return Err(format!("{}: no coordinate pairs", cli.coordinates.display()).into());
    }

    zones.start("sum");
    let average = average_distance(&pairs.pairs);
    zones.stop("sum")?;

    zones.start("misc_output");
    println!("Haversine average: {average:.6}");
    zones.stop("misc_output")?;

    if let Some(answers) = &cli.answers {
        zones.start("binary");
        let reference = binary_average(answers)?;
        println!("Reference average: {reference:.6}");
        println!("Difference       : {:.6}", average - reference);
        zones.stop("binary")?;
    }

    let report = Report::build(&zones, &calibration)?;
    println!();
    if cli.json {
        println!("{}", output::json::to_json_pretty(&report)?);
    } else {
        print!("{}", output::terminal::format_report(&report));
    }

    Ok(())
}

/// Average the little-endian f64 records in the answers file.
///
/// The file must be a non-empty whole number of 8-byte records; a trailing
/// partial record is an error rather than a silently dropped tail.
fn binary_average(path: &Path) -> Result<f64, Box<dyn Error>> {
    let raw = fs::read(path)?;

    if raw.is_empty() {
        return Err(format!("{}: no reference records", path.display()).into());
    }
    if raw.len() % 8 != 0 {
        return Err(format!(
            "{}: truncated reference file ({} bytes is not a whole number of f64 records)",
            path.display(),
            raw.len()
        )
        .into());
    }

    let mut sum = 0.0_f64;
    for chunk in raw.chunks_exact(8) {
        let record: [u8; 8] = chunk.try_into()?;
        sum += f64::from_le_bytes(record);
    }

    Ok(sum / (raw.len() / 8) as f64)
}
