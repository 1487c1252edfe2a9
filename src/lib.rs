//! `linfit` library crate.
//!
//! The binary (`linfit`) is a thin wrapper around this library so that:
//!
//! - CSV ingest and training are testable without spawning processes
//! - the typed table loader and the regression engine can be used on their own

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
