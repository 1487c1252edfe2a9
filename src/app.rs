//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the logging subscriber
//! - dispatches to `fit`, `inspect` or `generate`

use std::path::Path;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FitArgs, GenerateArgs, InspectArgs};
use crate::data::{SynthConfig, generate, write_csv};
use crate::domain::{FitConfig, TrainConfig};
use crate::error::AppError;
use crate::io::{TableLoader, data_path};
use crate::logging::{self, LogConfig};

pub mod pipeline;

/// Entry point for the `linfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();
    logging::init(&LogConfig {
        level: cli.global.log_level,
        file: cli.global.log_file.clone(),
    })?;

    let data_dir = cli.global.data_dir.as_deref();
    match cli.command {
        Command::Fit(args) => handle_fit(&args, data_dir),
        Command::Inspect(args) => handle_inspect(&args, data_dir),
        Command::Generate(args) => handle_generate(&args, data_dir),
    }
}

fn handle_fit(args: &FitArgs, data_dir: Option<&Path>) -> Result<(), AppError> {
    let config = fit_config_from_args(args, data_dir);
    let run = pipeline::run_fit(&config)?;

    if config.json {
        let json = run
            .report
            .to_json()
            .map_err(|e| AppError::new(2, format!("Failed to serialize report: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_fit_summary(&run.report));
    }

    if let Some(path) = &config.export_predictions {
        info!(path = %path.display(), "wrote predictions");
    }
    Ok(())
}

fn handle_inspect(args: &InspectArgs, data_dir: Option<&Path>) -> Result<(), AppError> {
    let path = data_path(data_dir, &args.csv);
    let table = TableLoader::new().delimiter(args.delimiter).load(&path, &args.columns)?;

    for name in &args.columns {
        if !table.contains(name) {
            println!("{name}: not found in header");
        }
    }
    print!("{}", crate::report::format_table_preview(&table, args.rows));
    Ok(())
}

fn handle_generate(args: &GenerateArgs, data_dir: Option<&Path>) -> Result<(), AppError> {
    let config = SynthConfig {
        weights: args.weights.clone(),
        rows: args.rows,
        noise: args.noise,
        feature_min: args.min,
        feature_max: args.max,
        seed: args.seed,
    };
    let data = generate(&config)?;
    let path = data_path(data_dir, &args.out);
    write_csv(&path, &data)?;

    info!(path = %path.display(), rows = data.target.len(), "wrote synthetic dataset");
    println!("Wrote {} rows to {}", data.target.len(), path.display());
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs, data_dir: Option<&Path>) -> FitConfig {
    FitConfig {
        csv_path: data_path(data_dir, &args.csv),
        delimiter: args.delimiter,
        features: args.features.clone(),
        target: args.target.clone(),
        train: TrainConfig {
            learning_rate: args.learning_rate,
            epochs: args.epochs,
        },
        predict: args.predict.clone(),
        export_predictions: args.export.clone(),
        json: args.json,
    }
}
