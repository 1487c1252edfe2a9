//! Command-line parsing for the `linfit` binary.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the ingest/training code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "linfit", version, about = "Typed CSV ingest + gradient descent linear regression")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Mirror log output into this file (appended).
    #[arg(long, global = true, env = "LINFIT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LevelFilter,

    /// Resolve relative CSV paths against this directory.
    #[arg(long, global = true, env = "LINFIT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load feature and target columns, train, and print the fitted weights.
    Fit(FitArgs),
    /// Show the inferred type and first values of selected columns.
    Inspect(InspectArgs),
    /// Write a synthetic CSV with known weights.
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct FitArgs {
    /// Input CSV (header row first).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Target column name.
    #[arg(short, long)]
    pub target: String,

    /// Feature column names, in model order (repeat or comma-separate).
    #[arg(short, long = "feature", value_delimiter = ',', required = true)]
    pub features: Vec<String>,

    /// Field delimiter.
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Gradient descent step size.
    #[arg(long, default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Maximum number of epochs.
    #[arg(long, default_value_t = 1000)]
    pub epochs: usize,

    /// Predict one sample after training (comma-separated feature values).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub predict: Option<Vec<f64>>,

    /// Export per-row predictions to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the fit report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Input CSV (header row first).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Column names to load (repeat or comma-separate).
    #[arg(short, long = "column", value_delimiter = ',', required = true)]
    pub columns: Vec<String>,

    /// Field delimiter.
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Values to show per column.
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Clone, Parser)]
pub struct GenerateArgs {
    /// Output CSV path.
    #[arg(value_name = "OUT")]
    pub out: PathBuf,

    /// True weights, one per feature (comma-separated).
    #[arg(short, long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub weights: Vec<f64>,

    /// Number of data rows.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub rows: usize,

    /// Standard deviation of Gaussian noise added to the target.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Lower bound of uniformly drawn feature values.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub min: f64,

    /// Upper bound of uniformly drawn feature values.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub max: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
