// Rust guideline compliant 2026-02-06

//! Merge orchestration: provision, ingest, export, dispose.

use crate::export::export;
use crate::ingest::ingest_with_progress;
use crate::store::lock_path_for;
use crate::{Error, MergeConfig, MergeState, Result, TransientStore};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Hooks for reporting merge progress to a user interface.
///
/// Every method has a no-op default, so implementors only override what they
/// display.
pub trait MergeObserver {
    /// Called before an input file is read.
    fn on_ingest_start(&mut self, _path: &Path) {}

    /// Called every `progress_interval` records while a file is read.
    fn on_ingest_progress(&mut self, _path: &Path, _records: usize) {}

    /// Called after an input file was fully loaded.
    fn on_ingest_finish(&mut self, _report: &FileReport) {}

    /// Called before the merged file is written.
    fn on_export_start(&mut self, _output: &Path) {}

    /// Called after the merged file was written.
    fn on_export_finish(&mut self, _output: &Path, _records: usize, _elapsed: Duration) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {}

/// Outcome of loading one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Input file path.
    pub path: PathBuf,
    /// Records inserted from the file.
    pub records: usize,
    /// Time spent on the file.
    pub elapsed: Duration,
}

/// Summary of a successful merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Per-file ingest results, in input order.
    pub files: Vec<FileReport>,
    /// Merged log path.
    pub output: PathBuf,
    /// Records written to the merged log.
    pub exported: usize,
    /// Time spent writing the merged log.
    pub export_elapsed: Duration,
}

impl MergeReport {
    /// Returns the total number of records read from all inputs.
    pub fn ingested(&self) -> usize {
        self.files.iter().map(|f| f.records).sum()
    }
}

/// Runs one merge operation and tracks its lifecycle state.
///
/// An engine runs at most once; build a new one for the next merge.
#[derive(Debug)]
pub struct MergeEngine {
    config: MergeConfig,
    state: MergeState,
}

impl MergeEngine {
    /// Creates an idle engine with the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        Self {
            config,
            state: MergeState::Idle,
        }
    }

    /// Returns the current lifecycle state.
    ///
    /// The state tracks the merge itself, not store disposal: a run whose
    /// store cannot be removed afterwards still reports `Done` while
    /// [`MergeEngine::run`] returns `StoreDispose`.
    pub fn state(&self) -> MergeState {
        self.state
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merges `inputs` into `output` without progress reporting.
    ///
    /// See [`MergeEngine::run_with_observer`].
    pub fn run(&mut self, inputs: &[PathBuf], output: &Path) -> Result<MergeReport> {
        self.run_with_observer(inputs, output, &mut NoopObserver)
    }

    /// Merges `inputs` into `output`, reporting each phase to `observer`.
    ///
    /// Inputs are loaded one at a time in the given order. The transient store
    /// is removed once the run reaches `Done` or `Failed`.
    ///
    /// # Arguments
    ///
    /// * `inputs` - JSONL log files to merge, at least one
    /// * `output` - Path of the merged log
    /// * `observer` - Progress hooks
    ///
    /// # Returns
    ///
    /// A report with per-phase counts and timings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No inputs were given (`Usage`)
    /// - The output or an input is the store file itself (`Usage`)
    /// - The engine already ran (`InvalidTransition`)
    /// - The configuration is invalid (`Config`)
    /// - Any provisioning, ingest, export or disposal step fails
    pub fn run_with_observer(
        &mut self,
        inputs: &[PathBuf],
        output: &Path,
        observer: &mut dyn MergeObserver,
    ) -> Result<MergeReport> {
        if self.state != MergeState::Idle {
            return Err(Error::InvalidTransition(format!(
                "merge already ran and is {}",
                self.state
            )));
        }
        if inputs.is_empty() {
            return Err(Error::Usage("log path not specified".to_string()));
        }
        self.config.validate()?;
        self.check_paths(inputs, output)?;

        let store_path = self.config.store_path.clone();
        TransientStore::scoped(store_path, |store| {
            let result = self.execute(store, inputs, output, observer);
            if result.is_err() && self.state.can_transition_to(MergeState::Failed).is_ok() {
                tracing::debug!(from = %self.state, "merge failed");
                self.state = MergeState::Failed;
            }
            result
        })
    }

    fn execute(
        &mut self,
        store: &mut TransientStore,
        inputs: &[PathBuf],
        output: &Path,
        observer: &mut dyn MergeObserver,
    ) -> Result<MergeReport> {
        store.ensure_schema()?;
        self.transition(MergeState::Provisioned)?;

        let mut report = MergeReport {
            output: output.to_path_buf(),
            ..MergeReport::default()
        };
        let interval = self.config.progress_interval;

        for path in inputs {
            self.transition(MergeState::Ingesting)?;
            observer.on_ingest_start(path);

            let started = Instant::now();
            let records = ingest_with_progress(store, path, |count| {
                if count.is_multiple_of(interval) {
                    observer.on_ingest_progress(path, count);
                }
            })?;

            let file = FileReport {
                path: path.clone(),
                records,
                elapsed: started.elapsed(),
            };
            observer.on_ingest_finish(&file);
            report.files.push(file);
        }

        self.transition(MergeState::Exporting)?;
        observer.on_export_start(output);

        let started = Instant::now();
        report.exported = export(store, output)?;
        report.export_elapsed = started.elapsed();
        observer.on_export_finish(output, report.exported, report.export_elapsed);

        self.transition(MergeState::Done)?;
        Ok(report)
    }

    fn check_paths(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let store = comparable(&self.config.store_path);
        let lock = comparable(&lock_path_for(&self.config.store_path));
        let clashes = |path: &Path| {
            let path = comparable(path);
            path == store || path == lock
        };

        if clashes(output) {
            return Err(Error::Usage(format!(
                "output {} collides with store {}",
                output.display(),
                self.config.store_path.display()
            )));
        }
        if let Some(input) = inputs.iter().find(|path| clashes(path.as_path())) {
            return Err(Error::Usage(format!(
                "input {} collides with store {}",
                input.display(),
                self.config.store_path.display()
            )));
        }
        Ok(())
    }

    fn transition(&mut self, target: MergeState) -> Result<()> {
        self.state.can_transition_to(target)?;
        tracing::debug!(from = %self.state, to = %target, "merge state change");
        self.state = target;
        Ok(())
    }
}

/// Makes `path` absolute so relative and absolute spellings compare equal.
fn comparable(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Merges `inputs` into `output` with a fresh engine.
///
/// # Errors
///
/// Returns the first error of the run; see [`MergeEngine::run_with_observer`].
pub fn merge_logs(
    config: &MergeConfig,
    inputs: &[PathBuf],
    output: &Path,
) -> Result<MergeReport> {
    MergeEngine::new(config.clone()).run(inputs, output)
}
