//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - typed columns and tables produced by ingest (`Column`, `Table`)
//! - training hyperparameters (`TrainConfig`)
//! - the resolved run configuration (`FitConfig`)

pub mod types;

pub use types::*;
