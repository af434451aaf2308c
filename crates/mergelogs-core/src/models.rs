// Rust guideline compliant 2026-02-06

//! Core data models for Mergelogs.

use serde::{Deserialize, Serialize};

/// A single log entry as found in the input and output files.
///
/// All three fields are required. The level is an opaque label and the
/// timestamp is kept verbatim; ordering compares the timestamp strings
/// byte-wise, so inputs are expected to use a fixed-width sortable format
/// such as `2024-01-01T00:00:01.000Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogRecord {
    /// Severity label, e.g. `INFO`.
    #[serde(rename = "log_level")]
    pub level: String,
    /// Timestamp exactly as written in the input.
    pub timestamp: String,
    /// Free-form message text.
    pub message: String,
}

impl LogRecord {
    /// Creates a new LogRecord.
    ///
    /// # Arguments
    ///
    /// * `level` - Severity label
    /// * `timestamp` - Sortable timestamp string
    /// * `message` - Message text
    ///
    /// # Returns
    ///
    /// A new LogRecord instance.
    pub fn new(
        level: impl Into<String>,
        timestamp: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }
}

/// Row layout of the `logs` table inside the transient store.
///
/// Uses the store's column names rather than the external field names.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredRow {
    pub level: String,
    pub timestamp: String,
    pub message: String,
}

/// Borrowed view of a [`LogRecord`] serialized as a store row.
#[derive(Debug, Serialize)]
pub(crate) struct StoredRowRef<'a> {
    pub level: &'a str,
    pub timestamp: &'a str,
    pub message: &'a str,
}

impl<'a> From<&'a LogRecord> for StoredRowRef<'a> {
    fn from(record: &'a LogRecord) -> Self {
        Self {
            level: &record.level,
            timestamp: &record.timestamp,
            message: &record.message,
        }
    }
}

impl From<StoredRow> for LogRecord {
    fn from(row: StoredRow) -> Self {
        Self {
            level: row.level,
            timestamp: row.timestamp,
            message: row.message,
        }
    }
}
