//! Export per-row predictions to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::error::AppError;

/// Write `row,actual,predicted,residual` for every sample.
pub fn write_predictions_csv(path: &Path, actual: &[f64], predicted: &[f64]) -> Result<(), AppError> {
    if actual.len() != predicted.len() {
        return Err(AppError::new(
            4,
            format!(
                "Cannot export predictions: {} targets but {} predictions.",
                actual.len(),
                predicted.len()
            ),
        ));
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["row", "actual", "predicted", "residual"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (idx, (y, y_hat)) in actual.iter().zip(predicted).enumerate() {
        writer
            .write_record([
                idx.to_string(),
                format!("{y:.10}"),
                format!("{y_hat:.10}"),
                format!("{:.10}", y - y_hat),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}
