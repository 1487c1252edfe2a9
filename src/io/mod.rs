//! Input/output helpers.
//!
//! - quoted-field row splitting (`row`)
//! - CSV ingest into typed columns (`ingest`)
//! - prediction exports (`export`)
//! - data path and fixed-offset date helpers (`paths`, `date`)

pub mod date;
pub mod export;
pub mod ingest;
pub mod paths;
pub mod row;

pub use date::*;
pub use export::*;
pub use ingest::*;
pub use paths::*;
pub use row::*;
