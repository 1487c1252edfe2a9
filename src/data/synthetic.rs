//! Synthetic regression datasets with known weights.
//!
//! Each row draws features uniformly from `[feature_min, feature_max]` and sets
//! `y = Σ w_j x_j + ε` with `ε ~ N(0, noise²)`. The generator is seeded, so
//! the same config always yields the same file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("need at least one weight")]
    NoWeights,
    #[error("row count must be > 0")]
    NoRows,
    #[error("invalid feature range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("noise distribution error: {0}")]
    Noise(String),
    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub weights: Vec<f64>,
    pub rows: usize,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
    pub feature_min: f64,
    pub feature_max: f64,
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            weights: vec![2.0],
            rows: 100,
            noise: 0.0,
            feature_min: 0.0,
            feature_max: 1.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntheticData {
    /// Row-major features.
    pub features: Vec<Vec<f64>>,
    pub target: Vec<f64>,
}

impl SyntheticData {
    /// Header names: `x1..xk` then `y`.
    pub fn header(&self) -> Vec<String> {
        let width = self.features.first().map_or(0, Vec::len);
        (1..=width)
            .map(|j| format!("x{j}"))
            .chain(std::iter::once("y".to_string()))
            .collect()
    }
}

pub fn generate(config: &SynthConfig) -> Result<SyntheticData, SynthError> {
    if config.weights.is_empty() {
        return Err(SynthError::NoWeights);
    }
    if config.rows == 0 {
        return Err(SynthError::NoRows);
    }
    if !(config.feature_min.is_finite() && config.feature_max.is_finite() && config.feature_max > config.feature_min)
    {
        return Err(SynthError::InvalidRange {
            min: config.feature_min,
            max: config.feature_max,
        });
    }

    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(SynthError::Noise(format!(
            "standard deviation must be finite and >= 0, got {}",
            config.noise
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise).map_err(|e| SynthError::Noise(e.to_string()))?;

    let mut features = Vec::with_capacity(config.rows);
    let mut target = Vec::with_capacity(config.rows);
    for _ in 0..config.rows {
        let row: Vec<f64> = config
            .weights
            .iter()
            .map(|_| rng.gen_range(config.feature_min..=config.feature_max))
            .collect();
        let clean: f64 = row.iter().zip(&config.weights).map(|(x, w)| x * w).sum();
        target.push(clean + normal.sample(&mut rng));
        features.push(row);
    }

    Ok(SyntheticData { features, target })
}

/// Write `data` as a comma-delimited file with a header row.
pub fn write_csv(path: &Path, data: &SyntheticData) -> Result<(), SynthError> {
    let io_err = |source| SynthError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    writeln!(out, "{}", data.header().join(",")).map_err(io_err)?;
    for (row, y) in data.features.iter().zip(&data.target) {
        let mut fields: Vec<String> = row.iter().map(|x| format!("{x:.6}")).collect();
        fields.push(format!("{y:.6}"));
        writeln!(out, "{}", fields.join(",")).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noiseless_target_matches_weights() {
        let config = SynthConfig {
            weights: vec![1.5, -2.0],
            rows: 20,
            ..SynthConfig::default()
        };
        let data = generate(&config).unwrap();

        assert_eq!(data.features.len(), 20);
        assert_eq!(data.header(), vec!["x1", "x2", "y"]);
        for (row, y) in data.features.iter().zip(&data.target) {
            assert!((1.5 * row[0] - 2.0 * row[1] - y).abs() < 1e-12);
            assert!(row.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn same_seed_same_data() {
        let config = SynthConfig {
            noise: 0.3,
            ..SynthConfig::default()
        };
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        assert_eq!(a.target, b.target);
    }

    #[test]
    fn rejects_bad_configs() {
        let no_weights = SynthConfig {
            weights: vec![],
            ..SynthConfig::default()
        };
        assert!(matches!(generate(&no_weights), Err(SynthError::NoWeights)));

        let negative_noise = SynthConfig {
            noise: -1.0,
            ..SynthConfig::default()
        };
        assert!(matches!(generate(&negative_noise), Err(SynthError::Noise(_))));

        let nan_noise = SynthConfig {
            noise: f64::NAN,
            ..SynthConfig::default()
        };
        assert!(matches!(generate(&nan_noise), Err(SynthError::Noise(_))));

        let empty_range = SynthConfig {
            feature_min: 1.0,
            feature_max: 1.0,
            ..SynthConfig::default()
        };
        assert!(matches!(generate(&empty_range), Err(SynthError::InvalidRange { .. })));
    }
}
