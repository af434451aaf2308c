// Rust guideline compliant 2026-02-06

//! Ingest phase: load JSONL log files into the transient store.

use crate::{Error, LogRecord, Result, TransientStore};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads `path` line by line and inserts every record into `store`.
///
/// # Arguments
///
/// * `store` - Store with the `logs` table in place
/// * `path` - JSONL log file to read
///
/// # Returns
///
/// The number of records inserted.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened (`FileOpen`)
/// - A line is not a complete log record (`Decode`)
/// - A row cannot be written to the store (`Insert`, `Schema`)
pub fn ingest(store: &mut TransientStore, path: &Path) -> Result<usize> {
    ingest_with_progress(store, path, |_| {})
}

/// Like [`ingest`], calling `progress` with the running count after each
/// inserted record.
///
/// Blank lines are skipped. Decoding stops at the first bad line; rows
/// inserted before it stay in the store.
pub fn ingest_with_progress<F>(
    store: &mut TransientStore,
    path: &Path,
    mut progress: F,
) -> Result<usize>
where
    F: FnMut(usize),
{
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    let mut line_no = 0usize;
    let mut inserted = 0usize;

    loop {
        line.clear();
        let read = reader.read_line(&mut line).map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            line: line_no + 1,
            source: serde::de::Error::custom(e),
        })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        if line.trim().is_empty() {
            continue;
        }

        let record: LogRecord = serde_json::from_str(&line).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            line: line_no,
            source,
        })?;

        store.insert(&record)?;
        inserted += 1;
        progress(inserted);
    }

    tracing::debug!(file = %path.display(), records = inserted, "ingested log file");
    Ok(inserted)
}
