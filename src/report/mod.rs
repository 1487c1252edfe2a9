//! Reporting utilities: fit reports and formatted terminal output.
//!
//! Reports are diagnostic output only; nothing reads them back.

use serde::Serialize;

use crate::domain::TrainConfig;
use crate::fit::GdOutcome;

pub mod format;

pub use format::*;

/// Everything worth printing about one training run.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub target: String,
    pub features: Vec<String>,
    pub samples: usize,
    pub train: TrainConfig,
    pub weights: Vec<f64>,
    pub epochs_run: usize,
    pub converged: bool,
    pub squared_error: f64,
    pub rmse: f64,
    pub elapsed_seconds: f64,
    /// Exact least squares weights, when the system is well-conditioned.
    pub closed_form: Option<Vec<f64>>,
    pub prediction: Option<Prediction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub input: Vec<f64>,
    pub value: f64,
}

impl FitReport {
    pub fn new(
        target: &str,
        features: &[String],
        samples: usize,
        train: TrainConfig,
        outcome: &GdOutcome,
    ) -> Self {
        let rmse = if samples == 0 {
            f64::NAN
        } else {
            (outcome.final_error / samples as f64).sqrt()
        };
        Self {
            target: target.to_string(),
            features: features.to_vec(),
            samples,
            train,
            weights: outcome.weights.clone(),
            epochs_run: outcome.epochs_run,
            converged: outcome.converged,
            squared_error: outcome.final_error,
            rmse,
            elapsed_seconds: outcome.elapsed_seconds,
            closed_form: None,
            prediction: None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
