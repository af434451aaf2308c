// Rust guideline compliant 2026-02-06

//! Export phase: write the store's rows to the merged JSONL file.

use crate::{Error, Result, TransientStore};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes every row of the store to `output_path`, ascending by timestamp.
///
/// Rows are streamed to a temporary sibling file which is renamed onto
/// `output_path` after the last row is flushed. A failed export removes the
/// temporary file and leaves `output_path` untouched.
///
/// # Arguments
///
/// * `store` - Store holding the `logs` table
/// * `output_path` - Destination of the merged log
///
/// # Returns
///
/// The number of records written.
///
/// # Errors
///
/// Returns an error if:
/// - The output file cannot be created (`FileCreate`)
/// - A row cannot be read back from the store (`Query`, `Schema`)
/// - Writing, flushing or renaming the output fails (`Write`)
pub fn export(store: &mut TransientStore, output_path: &Path) -> Result<usize> {
    let temp_path = temp_path_for(output_path);

    let result = write_rows(store, output_path, &temp_path);
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

fn write_rows(
    store: &mut TransientStore,
    output_path: &Path,
    temp_path: &Path,
) -> Result<usize> {
    let file = File::create(temp_path).map_err(|source| Error::FileCreate {
        path: output_path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let write_error = |source: std::io::Error| Error::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let mut written = 0usize;
    for row in store.rows_by_timestamp()? {
        let record = row?;
        serde_json::to_writer(&mut writer, &record).map_err(|e| write_error(e.into()))?;
        writer.write_all(b"\n").map_err(write_error)?;
        written += 1;
    }

    let file = writer.into_inner().map_err(|e| write_error(e.into_error()))?;
    file.sync_all().map_err(write_error)?;
    drop(file);

    std::fs::rename(temp_path, output_path).map_err(write_error)?;

    tracing::debug!(output = %output_path.display(), records = written, "exported merged log");
    Ok(written)
}

/// Returns the temporary path used while `output_path` is being written.
fn temp_path_for(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    output_path.with_file_name(name)
}
