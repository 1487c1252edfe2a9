//! Mathematical utilities: vector helpers and a closed-form least squares reference.

pub mod ols;
pub mod vector;

pub use ols::*;
pub use vector::*;
