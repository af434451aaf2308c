// Rust guideline compliant 2026-02-06

//! Configuration management for Mergelogs.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a merge run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Location of the transient store file.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// File name of the merged log inside the output directory.
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,

    /// Number of ingested records between progress reports.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

/// Default transient store location, relative to the working directory.
fn default_store_path() -> PathBuf {
    PathBuf::from("merge.db")
}

/// Default merged log file name.
fn default_output_file_name() -> String {
    "mergedlog.jsonl".to_string()
}

fn default_progress_interval() -> usize {
    100_000
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            output_file_name: default_output_file_name(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl MergeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Fields missing from the file keep their default values.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    ///
    /// A validated MergeConfig.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("can't read config file {}: {}", path.display(), e))
        })?;
        let config: MergeConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - store_path is empty
    /// - output_file_name is empty or contains a path separator
    /// - progress_interval is zero
    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(Error::Config("store_path cannot be empty".to_string()));
        }

        if self.output_file_name.is_empty() {
            return Err(Error::Config(
                "output_file_name cannot be empty".to_string(),
            ));
        }

        if self.output_file_name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "output_file_name must be a bare file name, got {}",
                self.output_file_name
            )));
        }

        if self.progress_interval == 0 {
            return Err(Error::Config(
                "progress_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the merged log path inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.output_file_name)
    }
}
