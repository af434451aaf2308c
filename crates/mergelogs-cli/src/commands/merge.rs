// Rust guideline compliant 2026-02-06

//! Implementation of the merge command.
//!
//! Resolves paths, loads configuration and runs the merge engine, printing a
//! phase summary as it goes.

use crate::paths::resolve_absolute;
use crate::progress::ConsoleObserver;
use anyhow::{Context, Result};
use mergelogs_core::{MergeConfig, MergeEngine, MergeReport};
use std::io::Write;
use std::path::PathBuf;

/// Inputs of a merge invocation, as given on the command line.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Directory receiving the merged log.
    pub output_dir: PathBuf,
    /// Optional transient store location overriding the config.
    pub store_path: Option<PathBuf>,
    /// Optional TOML configuration file.
    pub config: Option<PathBuf>,
    /// Log files to merge, in order.
    pub inputs: Vec<PathBuf>,
}

/// Merges the input logs into `<output_dir>/<output_file_name>`.
///
/// # Arguments
///
/// * `options` - Command-line inputs
/// * `out` - Destination of the phase summary
///
/// # Returns
///
/// The merge report on success.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be loaded
/// - A path cannot be made absolute
/// - Any merge step fails
pub fn execute<W: Write>(options: MergeOptions, out: W) -> Result<MergeReport> {
    let mut config = match &options.config {
        Some(path) => MergeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MergeConfig::default(),
    };
    if let Some(store_path) = options.store_path {
        config.store_path = store_path;
    }

    let output = resolve_absolute(&config.output_path(&options.output_dir))?;
    let inputs = options
        .inputs
        .iter()
        .map(|path| resolve_absolute(path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        inputs = inputs.len(),
        output = %output.display(),
        store = %config.store_path.display(),
        "starting merge"
    );

    let mut observer = ConsoleObserver::new(out, config.progress_interval);
    let mut engine = MergeEngine::new(config);
    let report = engine.run_with_observer(&inputs, &output, &mut observer)?;

    Ok(report)
}
