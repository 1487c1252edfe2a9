//! Batch gradient descent for a linear model without intercept.
//!
//! For `ŷ = Xw` and squared error `E = Σ (ŷ_k - y_k)^2`, each epoch moves every
//! weight against the mean gradient:
//!
//! ```text
//! w_j ← w_j - lr * Σ_k (ŷ_k - y_k) x_kj / n
//! ```
//!
//! Training stops early once `E` drops below [`CONVERGENCE_THRESHOLD`]. Any
//! non-finite error, gradient or weight aborts the run with the epoch (and
//! feature) where it happened.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::TrainConfig;
use crate::math::{MathError, squared_error};
use crate::models::predict_rows;

/// Squared error below which training halts early.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-6;

/// Recoverable training failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainError {
    #[error("feature matrix is empty (no samples)")]
    NoSamples,
    #[error("feature matrix is empty (no feature columns)")]
    NoFeatures,
    #[error("row {row} has {width} features, expected {expected}")]
    RaggedRow { row: usize, width: usize, expected: usize },
    #[error("target has {target} values but the feature matrix has {rows} rows")]
    TargetLength { target: usize, rows: usize },
    #[error("learning rate must be finite and > 0, got {0}")]
    InvalidLearningRate(f64),
    #[error("epoch count must be > 0")]
    InvalidEpochs,
    #[error("squared error failed at epoch {epoch}: {source}")]
    Math {
        epoch: usize,
        #[source]
        source: MathError,
    },
    #[error("squared error is not finite at epoch {epoch}")]
    NonFiniteError { epoch: usize },
    #[error("gradient is not finite at epoch {epoch}, feature {feature}")]
    NonFiniteGradient { epoch: usize, feature: usize },
    #[error("weight is not finite at epoch {epoch}, feature {feature}")]
    NonFiniteWeight { epoch: usize, feature: usize },
}

/// Result of a successful gradient-descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct GdOutcome {
    pub weights: Vec<f64>,
    /// Epochs whose error was evaluated (including the converging one).
    pub epochs_run: usize,
    pub converged: bool,
    /// Squared error of the last evaluated epoch.
    pub final_error: f64,
    /// Wall-clock time spent in the epoch loop.
    pub elapsed_seconds: f64,
}

/// Check the shape and hyperparameter preconditions of a run.
pub fn validate(features: &[Vec<f64>], target: &[f64], config: &TrainConfig) -> Result<(), TrainError> {
    let Some(first) = features.first() else {
        return Err(TrainError::NoSamples);
    };
    let width = first.len();
    if width == 0 {
        return Err(TrainError::NoFeatures);
    }
    if let Some((row, r)) = features.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(TrainError::RaggedRow {
            row,
            width: r.len(),
            expected: width,
        });
    }
    if target.len() != features.len() {
        return Err(TrainError::TargetLength {
            target: target.len(),
            rows: features.len(),
        });
    }
    if !config.learning_rate.is_finite() || config.learning_rate <= 0.0 {
        return Err(TrainError::InvalidLearningRate(config.learning_rate));
    }
    if config.epochs == 0 {
        return Err(TrainError::InvalidEpochs);
    }
    Ok(())
}

/// Fit weights for `features · w ≈ target`.
///
/// `features` is row-major: one row per sample.
pub fn gradient_descent(
    features: &[Vec<f64>],
    target: &[f64],
    config: &TrainConfig,
) -> Result<GdOutcome, TrainError> {
    validate(features, target, config)?;

    let start = Instant::now();
    let n = features.len();
    let m = features[0].len();
    let lr = config.learning_rate;
    let mut weights = vec![0.0; m];
    let mut error = f64::INFINITY;

    for epoch in 0..config.epochs {
        let predicted = predict_rows(features, &weights);

        error = squared_error(target, &predicted).map_err(|source| TrainError::Math { epoch, source })?;
        if !error.is_finite() {
            return Err(TrainError::NonFiniteError { epoch });
        }

        if error < CONVERGENCE_THRESHOLD {
            info!(epoch, error, "converged");
            return Ok(GdOutcome {
                weights,
                epochs_run: epoch + 1,
                converged: true,
                final_error: error,
                elapsed_seconds: start.elapsed().as_secs_f64(),
            });
        }

        for j in 0..m {
            let gradient: f64 = features
                .iter()
                .zip(predicted.iter().zip(target))
                .map(|(row, (y_hat, y))| (y_hat - y) * row[j])
                .sum();
            if !gradient.is_finite() {
                return Err(TrainError::NonFiniteGradient { epoch, feature: j });
            }

            weights[j] -= lr * gradient / n as f64;
            if !weights[j].is_finite() {
                return Err(TrainError::NonFiniteWeight { epoch, feature: j });
            }
        }

        debug!(epoch, error, "epoch done");
    }

    info!(epochs = config.epochs, error, "epoch budget exhausted before convergence");
    Ok(GdOutcome {
        weights,
        epochs_run: config.epochs,
        converged: false,
        final_error: error,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}
