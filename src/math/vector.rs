//! Small dense-vector helpers shared by training and reporting.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("vectors must be of the same length: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Sum of squared differences between `actual` and `predicted`.
pub fn squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64, MathError> {
    if actual.len() != predicted.len() {
        return Err(MathError::LengthMismatch {
            left: actual.len(),
            right: predicted.len(),
        });
    }
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(y, y_hat)| (y - y_hat) * (y - y_hat))
        .sum())
}

/// Dot product over the common prefix of `a` and `b`.
///
/// Callers check lengths; this helper never panics.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, w)| x * w).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_error_sums_squares() {
        let err = squared_error(&[1.0, 2.0, 3.0], &[1.0, 4.0, 0.0]).unwrap();
        assert!((err - 13.0).abs() < 1e-12);
    }

    #[test]
    fn squared_error_rejects_mismatch() {
        assert_eq!(
            squared_error(&[1.0], &[1.0, 2.0]),
            Err(MathError::LengthMismatch { left: 1, right: 2 })
        );
    }

    #[test]
    fn dot_product() {
        assert!((dot(&[1.0, 2.0], &[3.0, 4.0]) - 11.0).abs() < 1e-12);
    }
}
