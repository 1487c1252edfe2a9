//! Model training.
//!
//! Responsibilities:
//!
//! - validate training inputs and hyperparameters
//! - run batch gradient descent with non-finite guards

pub mod gradient;

pub use gradient::*;
