// Rust guideline compliant 2026-02-06

//! Transient ordered store backing a merge run.
//!
//! The store is a single file holding one table, `logs`. The file starts with
//! a schema header line followed by one JSON row per line. An in-memory index
//! maps each row's timestamp to its byte offset, so rows can be read back in
//! timestamp order without keeping messages in memory.

use crate::models::{StoredRow, StoredRowRef};
use crate::{Error, LogRecord, Result};
use fs2::FileExt;
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Name of the only table in the store.
pub const LOGS_TABLE: &str = "logs";

/// Required, non-nullable columns of the `logs` table.
pub const LOGS_COLUMNS: [&str; 3] = ["level", "timestamp", "message"];

/// First line of a store file, declaring its table.
#[derive(Debug, Serialize)]
struct SchemaHeader {
    table: &'static str,
    columns: [&'static str; 3],
}

/// Ordered index over the rows of the `logs` table.
///
/// Maps `(timestamp, insertion sequence)` to the byte offset of the row in the
/// store file. The sequence number keeps rows with equal timestamps distinct.
#[derive(Debug, Clone, Default)]
pub struct Index {
    map: BTreeMap<(String, u64), u64>,
}

impl Index {
    /// Records the byte offset of a new row.
    ///
    /// # Arguments
    ///
    /// * `timestamp` - The row's timestamp
    /// * `offset` - The byte offset in the store file
    pub fn insert(&mut self, timestamp: String, offset: u64) {
        let seq = self.map.len() as u64;
        self.map.insert((timestamp, seq), offset);
    }

    /// Iterates row offsets in ascending timestamp order.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        self.map.values().copied()
    }

    /// Returns the number of entries in the index.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Transient store for one merge run.
///
/// Holds an exclusive lock on a sibling `<store>.lock` file for its whole
/// lifetime; the data file itself stays unlocked so it can be read back
/// through a second handle. Both files are removed by
/// [`TransientStore::dispose`], or on drop if dispose was never reached.
pub struct TransientStore {
    /// Path to the backing file.
    path: PathBuf,
    /// Locked sibling file; `None` once the lock has been released.
    lock: Option<File>,
    /// Append handle; `None` once the store has been closed.
    writer: Option<BufWriter<File>>,
    /// Byte offset where the next line will be written.
    offset: u64,
    /// Index of the `logs` table, present once the schema exists.
    table: Option<Index>,
    disposed: bool,
}

impl TransientStore {
    /// Creates the backing store file at `path`, truncating leftovers.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the store file
    ///
    /// # Returns
    ///
    /// An open, empty store without any table.
    ///
    /// # Errors
    ///
    /// Returns `StoreOpen` if:
    /// - The path is empty
    /// - The file or its lock file cannot be created
    /// - Another run holds the store lock
    /// - The liveness check on the file fails
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.as_os_str().is_empty() {
            return Err(open_error(
                &path,
                io::Error::new(io::ErrorKind::InvalidInput, "Path cannot be empty"),
            ));
        }

        let lock_path = lock_path_for(&path);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| open_error(&path, e))?;

        lock.try_lock_exclusive().map_err(|e| {
            open_error(
                &path,
                io::Error::new(
                    io::ErrorKind::WouldBlock,
                    format!("store is locked by another run: {}", e),
                ),
            )
        })?;

        // Only truncate once the lock is ours.
        let opened = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .and_then(|file| file.metadata().map(|_| file));
        let file = match opened {
            Ok(file) => file,
            Err(e) => {
                let _ = std::fs::remove_file(&path);
                release_lock(lock, &lock_path);
                return Err(open_error(&path, e));
            }
        };

        tracing::info!(store = %path.display(), "opened transient store");

        Ok(Self {
            path,
            lock: Some(lock),
            writer: Some(BufWriter::new(file)),
            offset: 0,
            table: None,
            disposed: false,
        })
    }

    /// Runs `f` against a freshly opened store and disposes of it afterwards.
    ///
    /// Disposal happens exactly once whatever `f` returns. When `f` fails and
    /// disposal fails too, the error from `f` is returned and the disposal
    /// error is logged.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the store file
    /// * `f` - The work to run while the store exists
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The store cannot be opened
    /// - The closure returns an error
    /// - The store cannot be removed after a successful closure
    pub fn scoped<F, T>(path: impl Into<PathBuf>, f: F) -> Result<T>
    where
        F: FnOnce(&mut TransientStore) -> Result<T>,
    {
        let mut store = Self::open(path)?;
        let result = f(&mut store);
        let disposed = store.dispose();

        match (result, disposed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(dispose_err)) => Err(dispose_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(dispose_err)) => {
                tracing::error!(error = %dispose_err, "failed to remove transient store");
                Err(err)
            }
        }
    }

    /// Returns a reference to the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the `logs` table exists.
    pub fn has_schema(&self) -> bool {
        self.table.is_some()
    }

    /// Returns the number of rows in the `logs` table.
    pub fn len(&self) -> usize {
        self.table.as_ref().map_or(0, Index::len)
    }

    /// Returns true if the `logs` table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates the `logs` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `Schema` if the table header cannot be written.
    pub fn ensure_schema(&mut self) -> Result<()> {
        if self.table.is_some() {
            tracing::debug!(table = LOGS_TABLE, "table already exists");
            return Ok(());
        }

        let header = SchemaHeader {
            table: LOGS_TABLE,
            columns: LOGS_COLUMNS,
        };
        let schema_error =
            |e: io::Error| Error::Schema(format!("can't create table {}: {}", LOGS_TABLE, e));

        let mut line = serde_json::to_vec(&header).map_err(|e| schema_error(e.into()))?;
        line.push(b'\n');

        let writer = self.writer.as_mut().ok_or_else(|| schema_error(closed()))?;
        writer.write_all(&line).map_err(schema_error)?;
        writer.flush().map_err(schema_error)?;

        self.offset += line.len() as u64;
        self.table = Some(Index::default());
        Ok(())
    }

    /// Inserts one record as a row of the `logs` table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table does not exist (`Schema`)
    /// - The row cannot be written (`Insert`)
    pub fn insert(&mut self, record: &LogRecord) -> Result<()> {
        let table = self.table.as_mut().ok_or_else(missing_table)?;
        let writer = self.writer.as_mut().ok_or_else(|| Error::Insert(closed()))?;

        let mut line = serde_json::to_vec(&StoredRowRef::from(record))
            .map_err(|e| Error::Insert(e.into()))?;
        line.push(b'\n');
        writer.write_all(&line).map_err(Error::Insert)?;

        table.insert(record.timestamp.clone(), self.offset);
        self.offset += line.len() as u64;
        Ok(())
    }

    /// Opens a cursor over all rows, ascending by timestamp.
    ///
    /// Rows with equal timestamps come back in no guaranteed order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table does not exist (`Schema`)
    /// - Pending rows cannot be flushed or the file reopened (`Query`)
    pub fn rows_by_timestamp(&mut self) -> Result<Rows<'_>> {
        if self.table.is_none() {
            return Err(missing_table());
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::Query("store is closed".to_string()))?;
        writer
            .flush()
            .map_err(|e| Error::Query(format!("can't flush store: {}", e)))?;

        let file = File::open(&self.path).map_err(|e| {
            Error::Query(format!("can't read store {}: {}", self.path.display(), e))
        })?;

        let index = self.table.as_ref().ok_or_else(missing_table)?;
        Ok(Rows {
            offsets: index.map.values(),
            reader: BufReader::new(file),
            position: 0,
            line: String::new(),
        })
    }

    /// Deletes the backing file, then releases and removes the lock file.
    ///
    /// The lock is released even when the backing file cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreDispose` if the file cannot be removed.
    pub fn dispose(mut self) -> Result<()> {
        self.disposed = true;
        self.writer = None;

        let removed = std::fs::remove_file(&self.path);
        self.release();

        removed.map_err(|source| Error::StoreDispose {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(store = %self.path.display(), "removed transient store");
        Ok(())
    }

    fn release(&mut self) {
        if let Some(lock) = self.lock.take() {
            release_lock(lock, &lock_path_for(&self.path));
        }
    }
}

impl Drop for TransientStore {
    fn drop(&mut self) {
        if self.disposed {
            return;
        }
        self.writer = None;
        let removed = std::fs::remove_file(&self.path);
        self.release();
        if let Err(e) = removed {
            tracing::warn!(
                store = %self.path.display(),
                error = %e,
                "failed to remove abandoned store"
            );
        }
    }
}

/// Cursor over the `logs` table in timestamp order.
///
/// Each row is read from disk as the cursor advances.
pub struct Rows<'a> {
    offsets: btree_map::Values<'a, (String, u64), u64>,
    reader: BufReader<File>,
    /// Current read position of `reader`.
    position: u64,
    line: String,
}

impl Rows<'_> {
    fn read_row(&mut self, offset: u64) -> Result<LogRecord> {
        if offset != self.position {
            self.reader
                .seek(SeekFrom::Start(offset))
                .map_err(|e| Error::Query(format!("can't seek to row at {}: {}", offset, e)))?;
        }

        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| Error::Query(format!("can't read row at {}: {}", offset, e)))?;
        if read == 0 {
            return Err(Error::Query(format!("row at {} is missing", offset)));
        }
        self.position = offset + read as u64;

        let row: StoredRow = serde_json::from_str(self.line.trim_end())
            .map_err(|e| Error::Query(format!("corrupt row at {}: {}", offset, e)))?;
        Ok(row.into())
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = *self.offsets.next()?;
        Some(self.read_row(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

/// Returns the lock file guarding the store at `path`.
pub(crate) fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

fn release_lock(lock: File, lock_path: &Path) {
    let _ = lock.unlock();
    drop(lock);
    let _ = std::fs::remove_file(lock_path);
}

fn open_error(path: &Path, source: io::Error) -> Error {
    Error::StoreOpen {
        path: path.to_path_buf(),
        source,
    }
}

fn missing_table() -> Error {
    Error::Schema(format!("no such table: {}", LOGS_TABLE))
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "store is closed")
}
