//! Command-line interface for pixel-cluster vertex estimation.
//!
//! Works on JSON files of projected vertex hits ({z, r, w} records), so
//! scans can be replayed outside the host event loop.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use clap::{Parser, Subcommand};

use pixvtx_algorithms::{ScanConfig, ScanResult, ZScanner};
use pixvtx_core::hit::VertexHit;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] pixvtx_core::Error),
}

/// Pixel-cluster vertex z estimation.
#[derive(Parser)]
#[command(name = "pixvtx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the vertex z position from a JSON hit file
    Scan {
        /// Input hit file
        input: PathBuf,

        /// Lower edge of the candidate sweep (cm)
        #[arg(long, default_value = "-15.9", allow_hyphen_values = true)]
        min_z: f64,

        /// Upper edge of the candidate sweep (cm)
        #[arg(long, default_value = "15.95", allow_hyphen_values = true)]
        max_z: f64,

        /// Candidate spacing (cm)
        #[arg(long, default_value = "0.1")]
        z_step: f64,

        /// Score candidates in parallel
        #[arg(long)]
        parallel: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate a synthetic hit file for a known vertex position
    Generate {
        /// Output hit file
        #[arg(short, long)]
        output: PathBuf,

        /// True vertex z (cm)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        vertex_z: f64,

        /// Number of hits to generate
        #[arg(short = 'n', long, default_value = "200")]
        hits: usize,

        /// Barrel layer radii (cm)
        #[arg(long, value_delimiter = ',', default_value = "4.4,7.3,10.2")]
        radii: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            input,
            min_z,
            max_z,
            z_step,
            parallel,
            verbose,
        } => {
            let hits = read_hits(&input)?;
            if verbose {
                eprintln!("Read {} hits from {}", hits.len(), input.display());
                eprintln!("Sweep: [{}, {}] step {}", min_z, max_z, z_step);
            }

            let start = Instant::now();
            let result = run_scan(&hits, min_z, max_z, z_step, parallel)?;
            let elapsed = start.elapsed();

            println!(
                "estimated vertex z = {:.3} cm | contained hits = {} | score = {:.3}",
                result.best_z, result.best_count, result.best_score
            );
            if verbose {
                eprintln!("Scan took {:.2} ms", elapsed.as_secs_f64() * 1000.0);
            }
        }

        Commands::Generate {
            output,
            vertex_z,
            hits,
            radii,
        } => {
            let generated = generate_hits(vertex_z, hits, &radii);
            write_hits(&output, &generated)?;
            eprintln!(
                "Wrote {} hits for vertex z = {} to {}",
                generated.len(),
                vertex_z,
                output.display()
            );
        }
    }

    Ok(())
}

fn read_hits(path: &Path) -> Result<Vec<VertexHit>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_hits(path: &Path, hits: &[VertexHit]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, hits)?;
    Ok(())
}

fn run_scan(
    hits: &[VertexHit],
    min_z: f64,
    max_z: f64,
    z_step: f64,
    parallel: bool,
) -> Result<ScanResult> {
    let scanner = ZScanner::new(ScanConfig::new(min_z, max_z, z_step)?);
    let result = if parallel {
        scanner.scan_par(hits)
    } else {
        scanner.scan(hits)
    };
    Ok(result)
}

/// Deterministic synthetic hits following the width model for a vertex
/// at `vertex_z`, spread over +-12 cm across the given layers.
fn generate_hits(vertex_z: f64, count: usize, radii: &[f64]) -> Vec<VertexHit> {
    let mut hits = Vec::with_capacity(count);
    if radii.is_empty() || count == 0 {
        return hits;
    }

    for i in 0..count {
        let radius = radii[i % radii.len()];
        let fraction = i as f64 / count as f64;
        let z = vertex_z + (fraction * 2.0 - 1.0) * 12.0;
        let width = (2.0 * (z - vertex_z).abs() / radius + 0.5).round() as u16;
        hits.push(VertexHit::new(z, radius, width));
    }

    hits
}
