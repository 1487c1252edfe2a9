//! Closed-form least squares reference.
//!
//! Gradient descent only approaches the minimizer of
//!
//! ```text
//! minimize Σ (y_i - x_i^T w)^2
//! ```
//!
//! so reports also show the exact solution for comparison. The design matrix
//! has no intercept column, matching the gradient-descent model.
//!
//! We use SVD so the solve also works for tall matrices (more rows than
//! columns). Nalgebra's `QR::solve` is intended for square systems.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// `rows` is row-major with one sample per row. Returns `None` for an empty or
/// ragged matrix, a target of the wrong length, or a system too ill-conditioned
/// to solve robustly.
pub fn solve_least_squares(rows: &[Vec<f64>], target: &[f64]) -> Option<Vec<f64>> {
    let n = rows.len();
    let p = rows.first().map_or(0, Vec::len);
    if n == 0 || p == 0 || target.len() != n || rows.iter().any(|r| r.len() != p) {
        return None;
    }

    let x = DMatrix::from_fn(n, p, |i, j| rows[i][j]);
    let y = DVector::from_column_slice(target);
    let svd = x.svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(w) = svd.solve(&y, tol) {
            if w.iter().all(|v| v.is_finite()) {
                return Some(w.iter().copied().collect());
            }
        }
    }

    None
}
