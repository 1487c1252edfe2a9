//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place keeps `app` focused on presentation:
//! load columns -> build engine -> train -> report -> optional exports

use crate::domain::{Column, FitConfig, Table};
use crate::error::AppError;
use crate::io::TableLoader;
use crate::io::export::write_predictions_csv;
use crate::math::solve_least_squares;
use crate::models::LinearRegression;
use crate::report::{FitReport, Prediction};

/// All computed outputs of a single `linfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: Table,
    pub model: LinearRegression,
    pub report: FitReport,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Load exactly the requested columns.
    let mut names: Vec<&str> = config.features.iter().map(String::as_str).collect();
    names.push(config.target.as_str());

    let table = TableLoader::new()
        .delimiter(config.delimiter)
        .require_all(true)
        .load(&config.csv_path, &names)?;

    // 2) Check the engine's shape preconditions before building it.
    let feature_cols = config
        .features
        .iter()
        .map(|name| lookup(&table, name))
        .collect::<Result<Vec<&Column>, AppError>>()?;
    let target_col = lookup(&table, &config.target)?;
    ensure_equal_lengths(&config.features, &feature_cols, &config.target, target_col)?;
    ensure_no_nan(&config.features, &feature_cols, &config.target, target_col)?;

    // 3) Train.
    let mut model = LinearRegression::new(&feature_cols, target_col);
    let outcome = model.try_fit(&config.train)?;

    // 4) Report.
    let mut report = FitReport::new(
        &config.target,
        &config.features,
        model.n_samples(),
        config.train,
        &outcome,
    );
    report.closed_form = solve_least_squares(model.features(), model.target());

    if let Some(input) = &config.predict {
        if input.len() != model.n_features() {
            return Err(AppError::new(
                2,
                format!(
                    "--predict needs {} value(s), got {}.",
                    model.n_features(),
                    input.len()
                ),
            ));
        }
        report.prediction = Some(Prediction {
            input: input.clone(),
            value: model.predict_single(input),
        });
    }

    // 5) Optional export.
    if let Some(path) = &config.export_predictions {
        write_predictions_csv(path, model.target(), &model.predict_training())?;
    }

    Ok(RunOutput { table, model, report })
}

fn lookup<'a>(table: &'a Table, name: &str) -> Result<&'a Column, AppError> {
    table
        .get(name)
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
}

fn ensure_equal_lengths(
    feature_names: &[String],
    features: &[&Column],
    target_name: &str,
    target: &Column,
) -> Result<(), AppError> {
    let expected = target.len();
    for (name, col) in feature_names.iter().zip(features) {
        if col.len() != expected {
            return Err(AppError::new(
                2,
                format!(
                    "Column `{name}` has {} values but target `{target_name}` has {expected}; rows with missing fields?",
                    col.len()
                ),
            ));
        }
    }
    Ok(())
}

fn ensure_no_nan(
    feature_names: &[String],
    features: &[&Column],
    target_name: &str,
    target: &Column,
) -> Result<(), AppError> {
    let named = feature_names
        .iter()
        .map(String::as_str)
        .zip(features.iter().copied())
        .chain(std::iter::once((target_name, target)));

    for (name, col) in named {
        if let Column::Float(values) = col {
            if let Some(idx) = values.iter().position(|v| v.is_nan()) {
                return Err(AppError::new(2, format!("Column `{name}` has a NaN value at row {idx}.")));
            }
        }
    }
    Ok(())
}
