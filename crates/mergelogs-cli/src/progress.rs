// Rust guideline compliant 2026-02-06

//! Progress reporting utilities for long-running merges.

use mergelogs_core::{FileReport, MergeObserver};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Simple progress reporter that emits periodic updates.
pub struct ProgressReporter {
    label: String,
    interval: usize,
}

impl ProgressReporter {
    /// Creates a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `label` - Label to include in progress messages
    /// * `interval` - Report every N items (minimum 1)
    ///
    /// # Returns
    ///
    /// A new ProgressReporter instance.
    pub fn new(label: &str, interval: usize) -> Self {
        Self {
            label: label.to_string(),
            interval: interval.max(1),
        }
    }

    /// Returns the progress line for `current`, if one is due.
    pub fn message(&self, current: usize) -> Option<String> {
        if current == 0 || !current.is_multiple_of(self.interval) {
            return None;
        }
        Some(format!("{}: {} records", self.label, current))
    }

    /// Reports progress at the configured interval.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item count processed (1-based)
    pub fn report(&self, current: usize) {
        if let Some(message) = self.message(current) {
            eprintln!("{}", message);
        }
    }
}

/// Prints the phase summary of a merge run to `out`.
///
/// Write failures on `out` are ignored; the summary is informational.
pub struct ConsoleObserver<W: Write> {
    out: W,
    interval: usize,
    progress: Option<ProgressReporter>,
}

impl<W: Write> ConsoleObserver<W> {
    /// Creates an observer printing to `out` with progress every `interval`
    /// records.
    pub fn new(out: W, interval: usize) -> Self {
        Self {
            out,
            interval,
            progress: None,
        }
    }

    /// Consumes the observer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MergeObserver for ConsoleObserver<W> {
    fn on_ingest_start(&mut self, path: &Path) {
        let _ = writeln!(self.out, "transfer log: {}", path.display());
        self.progress = Some(ProgressReporter::new(
            &path.display().to_string(),
            self.interval,
        ));
    }

    fn on_ingest_progress(&mut self, _path: &Path, records: usize) {
        if let Some(progress) = &self.progress {
            progress.report(records);
        }
    }

    fn on_ingest_finish(&mut self, report: &FileReport) {
        self.progress = None;
        let _ = writeln!(
            self.out,
            "transferred {} records in {} sec",
            report.records,
            report.elapsed.as_secs_f64()
        );
    }

    fn on_export_start(&mut self, output: &Path) {
        let _ = writeln!(self.out, "merge logs: {}", output.display());
    }

    fn on_export_finish(&mut self, _output: &Path, records: usize, elapsed: Duration) {
        let _ = writeln!(
            self.out,
            "merged {} records in {} sec",
            records,
            elapsed.as_secs_f64()
        );
    }
}
