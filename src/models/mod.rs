//! Linear model implementation.
//!
//! - column coercion, feature matrix construction and batch prediction (`design`)
//! - the stateful regression engine (`linear`)

pub mod design;
pub mod linear;

pub use design::*;
pub use linear::*;
