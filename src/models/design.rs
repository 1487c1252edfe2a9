//! Numeric design matrix construction.
//!
//! Every column type is coerced to `f64`:
//! - `Int` widens elementwise
//! - `Float` passes through; a NaN element is a caller contract breach (panic)
//! - `Text` has no numeric encoding and becomes all zeros (logged)
//!
//! # Panics
//! The functions here panic on NaN input, ragged feature columns, or a
//! weight vector whose length differs from a row. Those are programmer errors,
//! not data errors, and are logged before aborting.

use tracing::{error, warn};

use crate::domain::Column;
use crate::math::dot;

/// Coerce one column to `f64`. `label` names the column in diagnostics.
pub fn column_to_f64(column: &Column, label: &str) -> Vec<f64> {
    match column {
        Column::Int(values) => values.iter().map(|&v| v as f64).collect(),
        Column::Float(values) => {
            if let Some(idx) = values.iter().position(|v| v.is_nan()) {
                error!(column = label, index = idx, "NaN value in float column");
                panic!("found NaN value in column {label} at index {idx}");
            }
            values.clone()
        }
        Column::Text(values) => {
            warn!(column = label, len = values.len(), "text column has no numeric encoding; using 0.0");
            vec![0.0; values.len()]
        }
    }
}

/// Transpose feature columns into row-major samples.
///
/// The sample count is the length of the first column (zero when there are
/// no columns).
pub fn build_feature_matrix(columns: &[&Column]) -> Vec<Vec<f64>> {
    let coerced: Vec<Vec<f64>> = columns
        .iter()
        .enumerate()
        .map(|(idx, col)| column_to_f64(col, &format!("feature[{idx}]")))
        .collect();

    let n_samples = coerced.first().map_or(0, Vec::len);
    if let Some((idx, col)) = coerced.iter().enumerate().find(|(_, c)| c.len() != n_samples) {
        error!(feature = idx, len = col.len(), expected = n_samples, "feature column length mismatch");
        panic!(
            "feature column {idx} has {} values, expected {n_samples}",
            col.len()
        );
    }

    (0..n_samples)
        .map(|s| coerced.iter().map(|col| col[s]).collect())
        .collect()
}

/// Dot every row with `weights`, in row order.
pub fn predict_rows(rows: &[Vec<f64>], weights: &[f64]) -> Vec<f64> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            if row.len() != weights.len() {
                error!(row = idx, width = row.len(), weights = weights.len(), "row width mismatch");
                panic!(
                    "predict: row {idx} has {} features but there are {} weights",
                    row.len(),
                    weights.len()
                );
            }
            dot(row, weights)
        })
        .collect()
}
