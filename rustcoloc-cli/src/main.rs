//! `coloc`: colocalization analysis over pre-segmented cell regions.
//!
//! Reads two JSON region files (base and overlaid channels), runs the
//! configured overlap criterion through the bucketed or brute-force
//! colocalizer, and writes the categorized result as JSON.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use rustcoloc_algorithms::{
    BucketedColocalizer, BucketedConfig, DistanceCriterion, OverlapCriterion, RatioCriterion,
    ReferenceColocalizer, SubsetCriterion,
};
use rustcoloc_core::{CellRegion, ColocalizationResult};

use std::fs;
use std::path::PathBuf;
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
    Core(#[from] rustcoloc_core::ColocalizationError),

    #[error("criterion '{criterion}' requires the {parameter} parameter")]
    MissingParameter {
        criterion: &'static str,
        parameter: &'static str,
    },
}

/// Overlap criterion selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Criterion {
    /// Jaccard ratio of intersection over union
    Ratio,
    /// Intersection over the larger region
    Subset,
    /// Centroid Euclidean distance
    Distance,
}

/// Colocalization analysis for segmented microscopy cell regions.
#[derive(Parser)]
#[command(name = "coloc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Colocalize an overlaid region file against a base region file
    Analyze {
        /// Base-channel regions (JSON: [[[x, y], ...], ...])
        #[arg(long)]
        base: PathBuf,

        /// Overlaid-channel regions (same format)
        #[arg(long)]
        overlaid: PathBuf,

        /// Overlap criterion to apply
        #[arg(short, long, value_enum, default_value = "ratio")]
        criterion: Criterion,

        /// Overlap threshold for ratio/subset criteria, in [0, 1]
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum centroid distance for the distance criterion (pixels)
        #[arg(long)]
        max_distance: Option<f64>,

        /// Bucket edge for the spatial index (pixels); pick at least the
        /// largest expected cell diameter
        #[arg(long, default_value = "32")]
        bucket_side: usize,

        /// Image width (pixels)
        #[arg(long)]
        width: usize,

        /// Image height (pixels)
        #[arg(long)]
        height: usize,

        /// Bypass the spatial index and compare every pair
        #[arg(long)]
        brute_force: bool,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose progress and timing output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// JSON payload written for downstream report/overlay tooling.
#[derive(Serialize)]
struct Report {
    criterion: &'static str,
    base_count: usize,
    overlaid_count: usize,
    matched_base_count: usize,
    matched_overlaid_count: usize,
    unmatched_overlaid_count: usize,
    overlaid_match_fraction: f64,
    matched_base: Vec<Vec<(i32, i32)>>,
    matched_overlaid: Vec<Vec<(i32, i32)>>,
    unmatched_overlaid: Vec<Vec<(i32, i32)>>,
}

fn region_points(region: &CellRegion) -> Vec<(i32, i32)> {
    let mut points: Vec<(i32, i32)> = region.iter().map(|p| (p.x, p.y)).collect();
    points.sort_unstable();
    points
}

fn load_regions(path: &PathBuf) -> Result<Vec<CellRegion>> {
    let text = fs::read_to_string(path)?;
    let raw: Vec<Vec<(i32, i32)>> = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .map(|points| points.into_iter().collect())
        .collect())
}

fn run_analysis<C: OverlapCriterion>(
    criterion: C,
    base: &[CellRegion],
    overlaid: &[CellRegion],
    config: BucketedConfig,
    brute_force: bool,
) -> Result<ColocalizationResult> {
    if brute_force {
        Ok(ReferenceColocalizer::new(criterion).analyze(base, overlaid))
    } else {
        Ok(BucketedColocalizer::new(criterion, config)?.analyze(base, overlaid))
    }
}

#[allow(clippy::too_many_arguments)]
fn analyze(
    base_path: &PathBuf,
    overlaid_path: &PathBuf,
    criterion: Criterion,
    threshold: Option<f64>,
    max_distance: Option<f64>,
    bucket_side: usize,
    width: usize,
    height: usize,
    brute_force: bool,
    output: Option<&PathBuf>,
    verbose: bool,
) -> Result<()> {
    let base = load_regions(base_path)?;
    let overlaid = load_regions(overlaid_path)?;
    if verbose {
        println!(
            "Loaded {} base and {} overlaid regions",
            base.len(),
            overlaid.len()
        );
    }

    let config = BucketedConfig {
        bucket_side,
        image_width: width,
        image_height: height,
        parallel: true,
    };

    let require = |value: Option<f64>, parameter: &'static str| {
        value.ok_or(CliError::MissingParameter {
            criterion: match criterion {
                Criterion::Ratio => "ratio",
                Criterion::Subset => "subset",
                Criterion::Distance => "distance",
            },
            parameter,
        })
    };

    let start = Instant::now();
    let (name, result) = match criterion {
        Criterion::Ratio => {
            let c = RatioCriterion::new(require(threshold, "--threshold")?)?;
            ("ratio", run_analysis(c, &base, &overlaid, config, brute_force)?)
        }
        Criterion::Subset => {
            let c = SubsetCriterion::new(require(threshold, "--threshold")?)?;
            ("subset", run_analysis(c, &base, &overlaid, config, brute_force)?)
        }
        Criterion::Distance => {
            let c = DistanceCriterion::new(require(max_distance, "--max-distance")?)?;
            ("distance", run_analysis(c, &base, &overlaid, config, brute_force)?)
        }
    };
    if verbose {
        println!(
            "Analysis took {:.3} s ({} of {} overlaid matched, efficiency {:.1}%)",
            start.elapsed().as_secs_f64(),
            result.matched_overlaid.len(),
            result.overlaid_count(),
            result.overlaid_match_fraction() * 100.0
        );
    }

    let report = Report {
        criterion: name,
        base_count: base.len(),
        overlaid_count: overlaid.len(),
        matched_base_count: result.matched_base.len(),
        matched_overlaid_count: result.matched_overlaid.len(),
        unmatched_overlaid_count: result.unmatched_overlaid.len(),
        overlaid_match_fraction: result.overlaid_match_fraction(),
        matched_base: result.matched_base.iter().map(region_points).collect(),
        matched_overlaid: result.matched_overlaid.iter().map(region_points).collect(),
        unmatched_overlaid: result.unmatched_overlaid.iter().map(region_points).collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Analyze {
            base,
            overlaid,
            criterion,
            threshold,
            max_distance,
            bucket_side,
            width,
            height,
            brute_force,
            output,
            verbose,
        } => analyze(
            &base,
            &overlaid,
            criterion,
            threshold,
            max_distance,
            bucket_side,
            width,
            height,
            brute_force,
            output.as_ref(),
            verbose,
        ),
    };
    if let Err(err) = outcome {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
