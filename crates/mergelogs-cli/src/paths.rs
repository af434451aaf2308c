// Rust guideline compliant 2026-02-06

//! Path helpers for command-line arguments.

use mergelogs_core::Error;
use std::path::{Path, PathBuf};

/// Makes `path` absolute against the current working directory.
///
/// The path is not required to exist and is not canonicalized, so symlinks
/// and `..` components are kept as given.
///
/// # Errors
///
/// Returns `PathResolution` if the path is empty or the working directory
/// cannot be determined.
pub fn resolve_absolute(path: &Path) -> Result<PathBuf, Error> {
    std::path::absolute(path).map_err(|source| Error::PathResolution {
        path: path.to_path_buf(),
        source,
    })
}
