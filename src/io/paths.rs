//! Data file path resolution.

use std::path::{Path, PathBuf};

/// Resolve `filename` against an optional base directory.
///
/// Absolute filenames are returned unchanged.
pub fn data_path(base: Option<&Path>, filename: impl AsRef<Path>) -> PathBuf {
    let filename = filename.as_ref();
    match base {
        Some(base) if filename.is_relative() => base.join(filename),
        _ => filename.to_path_buf(),
    }
}
