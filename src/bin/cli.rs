// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyhull CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use polyhull::cli::Reporter;
use polyhull::{analyze, build_many, convex_hull_with, io, HullConfig, PointCloud};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyhull")]
#[command(about = "Polyhull - robust 3D convex hulls of point clouds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./polyhull.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the hull of a point file
    Hull {
        /// Input point file (`x y z [r g b [intensity [class]]]` per line)
        input: PathBuf,

        /// Output OBJ file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: BuildOptions,

        /// Print hull statistics
        #[arg(long)]
        stats: bool,

        /// Write hull statistics as JSON
        #[arg(long, value_name = "FILE")]
        stats_json: Option<PathBuf>,
    },

    /// Compute the hull of a random point cloud
    Random {
        /// Number of points
        #[arg(short = 'n', long, default_value = "10000")]
        count: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Sample the unit sphere surface instead of the unit cube volume
        #[arg(long)]
        sphere: bool,

        /// Output OBJ file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: BuildOptions,
    },

    /// Compute hulls of many point files in parallel
    Batch {
        /// Input point files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for OBJ output, one file per input
        #[arg(long)]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        options: BuildOptions,
    },

    /// Write a default configuration file
    Config {
        /// Create the file
        #[arg(long)]
        init: bool,

        /// Target path
        #[arg(default_value = "polyhull.toml")]
        path: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct BuildOptions {
    /// Split faces into triangles
    #[arg(long)]
    triangulate: bool,

    /// Run the validity checker
    #[arg(long)]
    check: bool,

    /// Explicit distance tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// List face vertices clockwise
    #[arg(long)]
    clockwise: bool,

    /// Number OBJ vertices from zero
    #[arg(long)]
    zero_based: bool,

    /// Emit input point indices in faces
    #[arg(long)]
    point_relative: bool,
}

impl BuildOptions {
    fn apply(&self, config: &mut HullConfig) {
        config.triangulate |= self.triangulate;
        config.check |= self.check;
        if self.tolerance.is_some() {
            config.tolerance = self.tolerance;
        }
        if self.clockwise {
            config.indexing = config.indexing.clockwise();
        }
        if self.zero_based {
            config.indexing = config.indexing.zero_based();
        }
        if self.point_relative {
            config.indexing = config.indexing.point_relative();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HullConfig::from_file(path)?,
        None => HullConfig::load()?,
    };
    config.verbose |= cli.verbose;
    init_logging(config.verbose);

    match cli.command {
        Commands::Hull {
            input,
            output,
            options,
            stats,
            stats_json,
        } => {
            options.apply(&mut config);
            hull_command(&input, output.as_deref(), stats, stats_json.as_deref(), &config)?;
        }
        Commands::Random {
            count,
            seed,
            sphere,
            output,
            options,
        } => {
            options.apply(&mut config);
            random_command(count, seed, sphere, output.as_deref(), &config)?;
        }
        Commands::Batch {
            inputs,
            out_dir,
            options,
        } => {
            options.apply(&mut config);
            batch_command(&inputs, out_dir.as_deref(), &config)?;
        }
        Commands::Config { init, path } => {
            config_command(init, &path, &config)?;
        }
        Commands::Version => {
            println!("Polyhull v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "polyhull=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn hull_command(
    input: &Path,
    output: Option<&Path>,
    stats: bool,
    stats_json: Option<&Path>,
    config: &HullConfig,
) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let points = io::read_points(input)?;
    if config.verbose {
        Reporter::report_info(&format!("Loaded {} points from {}", points.len(), input.display()));
    }

    let name = input.display().to_string();
    let valid = build_and_report(&name, &points, output, stats, stats_json, config)?;
    if valid == Some(false) {
        std::process::exit(1);
    }
    Ok(())
}

fn random_command(
    count: usize,
    seed: u64,
    sphere: bool,
    output: Option<&Path>,
    config: &HullConfig,
) -> Result<()> {
    let cloud = if sphere {
        PointCloud::random_sphere(count, 1.0, seed)
    } else {
        PointCloud::random_cube(count, 1.0, seed)
    };
    let points = cloud.to_points();

    let name = format!(
        "{} random {} points (seed {})",
        count,
        if sphere { "sphere" } else { "cube" },
        seed
    );
    let valid = build_and_report(&name, &points, output, config.verbose, None, config)?;
    if valid == Some(false) {
        std::process::exit(1);
    }
    Ok(())
}

fn build_and_report(
    name: &str,
    points: &[polyhull::Point],
    output: Option<&Path>,
    stats: bool,
    stats_json: Option<&Path>,
    config: &HullConfig,
) -> Result<Option<bool>> {
    let start = Instant::now();
    let hull = convex_hull_with(points, config)
        .with_context(|| format!("Failed to build hull of {}", name))?;
    let elapsed = start.elapsed();

    let valid = config.check.then(|| hull.check());
    Reporter::report_hull(name, &hull, elapsed, valid);

    if stats || stats_json.is_some() {
        let hull_stats = analyze(&hull);
        if stats {
            hull_stats.print();
        }
        if let Some(path) = stats_json {
            io::export_stats_json(&hull_stats, path)?;
        }
    }

    if let Some(path) = output {
        io::export_obj(&hull, path, config.indexing)?;
        Reporter::success(&format!("Wrote {}", path.display()));
    }

    Ok(valid)
}

fn batch_command(inputs: &[PathBuf], out_dir: Option<&Path>, config: &HullConfig) -> Result<()> {
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let mut sets = Vec::with_capacity(inputs.len());
    for input in inputs {
        progress.set_message(format!("Reading {}", input.display()));
        sets.push(io::read_points(input)?);
        progress.inc(1);
    }
    progress.finish_with_message("Points loaded");

    let start = Instant::now();
    let outcomes = build_many(&sets, config);
    let total = start.elapsed();

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut failed = 0usize;
    for (input, outcome) in inputs.iter().zip(&outcomes) {
        match outcome {
            Ok(outcome) => {
                let status = match outcome.valid {
                    Some(false) => {
                        failed += 1;
                        "invalid".red()
                    }
                    Some(true) => "valid".green(),
                    None => "built".green(),
                };
                println!(
                    "  {} {} {} vertices, {} faces in {}",
                    status,
                    input.display().to_string().cyan(),
                    outcome.hull.num_vertices(),
                    outcome.hull.num_faces(),
                    Reporter::format_duration(outcome.elapsed).yellow()
                );

                if let Some(dir) = out_dir {
                    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned());
                    let stem = stem.unwrap_or_else(|| "hull".to_string());
                    let path = dir.join(format!("{}.obj", stem));
                    io::export_obj(&outcome.hull, &path, config.indexing)?;
                }
            }
            Err(err) => {
                failed += 1;
                println!("  {} {} {}", "failed".red(), input.display().to_string().cyan(), err);
            }
        }
    }

    println!("\n{}", "═".repeat(80).bright_black());
    println!(
        "  {} {}  {} {}  {} {}",
        "Inputs:".bright_black(),
        inputs.len().to_string().cyan(),
        "Failed:".bright_black(),
        if failed > 0 { failed.to_string().red() } else { failed.to_string().green() },
        "Total:".bright_black(),
        Reporter::format_duration(total).yellow()
    );
    println!("{}", "═".repeat(80).bright_black());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn config_command(init: bool, path: &Path, config: &HullConfig) -> Result<()> {
    if !init {
        print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?);
        return Ok(());
    }

    if path.exists() {
        Reporter::report_warning(&format!(
            "{} already exists, leaving it untouched",
            path.display()
        ));
        return Ok(());
    }
    HullConfig::default().save(path)?;
    Reporter::success(&format!("Wrote {}", path.display()));
    Ok(())
}
