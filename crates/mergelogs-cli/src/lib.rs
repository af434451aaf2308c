// Rust guideline compliant 2026-02-06

//! Mergelogs CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod logging;
pub mod paths;
pub mod progress;

pub use paths::resolve_absolute;
pub use progress::{ConsoleObserver, ProgressReporter};
