// Rust guideline compliant 2026-02-06

//! Error types for the Mergelogs core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Mergelogs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Mergelogs operations.
///
/// Every variant is fatal to a merge run. Variants tied to a file carry the
/// path so the message names both the operation and the file involved.
#[derive(Debug, Error)]
pub enum Error {
    /// The transient store could not be created or failed its liveness check.
    #[error("can't open store {}: {source}", path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `logs` table could not be created, or is missing.
    #[error("schema error: {0}")]
    Schema(String),

    /// The transient store file could not be removed.
    #[error("can't remove store {}: {source}", path.display())]
    StoreDispose {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input log file could not be opened.
    #[error("can't open log file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an input file is not a valid log record.
    #[error("decode error in {} at line {line}: {source}", path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be written into the store.
    #[error("can't save log: {0}")]
    Insert(#[source] std::io::Error),

    /// The output file could not be created.
    #[error("can't create file {}: {source}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading rows back from the store failed.
    #[error("query error: {0}")]
    Query(String),

    /// Writing the output file failed.
    #[error("write error on {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The merge was invoked incorrectly, e.g. without any input.
    #[error("usage error: {0}")]
    Usage(String),

    /// A path could not be made absolute.
    #[error("incorrect path {}: {source}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid merge state transition.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Invalid configuration file or value.
    #[error("Invalid config: {0}")]
    Config(String),
}
