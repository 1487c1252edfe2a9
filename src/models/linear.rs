//! Linear regression engine.
//!
//! Lifecycle:
//! - **built**: `new` coerces the columns into a feature matrix and a target vector
//! - **trained**: a successful `fit`/`try_fit` stores weights; fitting again
//!   overwrites them, a failed fit keeps whatever was there before
//!
//! Prediction is not gated on training. Before the first successful fit the
//! weight vector is empty, so `predict_single` hits the dimension check.

use tracing::{error, info};

use crate::domain::{Column, TrainConfig};
use crate::fit::{GdOutcome, TrainError, gradient_descent};
use crate::models::design::{build_feature_matrix, column_to_f64, predict_rows};

#[derive(Debug, Clone)]
pub struct LinearRegression {
    features: Vec<Vec<f64>>,
    target: Vec<f64>,
    weights: Vec<f64>,
}

impl LinearRegression {
    /// Build the feature matrix (features in the given order) and the target vector.
    ///
    /// # Panics
    /// Panics if a float column contains NaN or the feature columns differ in length.
    pub fn new(features: &[&Column], target: &Column) -> Self {
        Self {
            features: build_feature_matrix(features),
            target: column_to_f64(target, "target"),
            weights: Vec::new(),
        }
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Current weights (empty until the first successful fit).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Train and return the weights.
    ///
    /// On failure the error is logged and the previous weights are returned
    /// unchanged (empty if no fit has succeeded yet).
    pub fn fit(&mut self, learning_rate: f64, epochs: usize) -> Vec<f64> {
        let config = TrainConfig { learning_rate, epochs };
        if let Err(err) = self.try_fit(&config) {
            error!(%err, "error in gradient descent");
        }
        self.weights.clone()
    }

    /// Train, returning the full outcome or the reason the run was aborted.
    pub fn try_fit(&mut self, config: &TrainConfig) -> Result<GdOutcome, TrainError> {
        info!(
            samples = self.n_samples(),
            features = self.n_features(),
            learning_rate = config.learning_rate,
            epochs = config.epochs,
            "training model"
        );
        let outcome = gradient_descent(&self.features, &self.target, config)?;
        self.weights = outcome.weights.clone();
        info!(
            seconds = outcome.elapsed_seconds,
            epochs_run = outcome.epochs_run,
            converged = outcome.converged,
            "model trained"
        );
        Ok(outcome)
    }

    /// Dot product of one sample with the weights.
    ///
    /// # Panics
    /// Panics if `features.len()` differs from the weight count, or if the
    /// running sum becomes NaN.
    pub fn predict_single(&self, features: &[f64]) -> f64 {
        if features.len() != self.weights.len() {
            error!(features = features.len(), weights = self.weights.len(), "prediction size mismatch");
            panic!(
                "prediction needs {} features, got {}",
                self.weights.len(),
                features.len()
            );
        }

        let mut acc = 0.0;
        for (idx, (x, w)) in features.iter().zip(&self.weights).enumerate() {
            acc += x * w;
            if acc.is_nan() {
                error!(index = idx, "prediction resulted in NaN");
                panic!("prediction resulted in NaN: [{idx}]");
            }
        }
        acc
    }

    /// Predictions for every training sample with the current weights.
    ///
    /// # Panics
    /// Panics before the first successful fit (the weight vector is empty).
    pub fn predict_training(&self) -> Vec<f64> {
        predict_rows(&self.features, &self.weights)
    }
}
