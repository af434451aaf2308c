// Rust guideline compliant 2026-02-06

//! Diagnostic logging setup.

use tracing::Level;
use tracing_subscriber::fmt;

/// Verbosity of diagnostic output on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
        }
    }
}

/// Installs a stderr `fmt` subscriber at `level`.
///
/// Stdout stays reserved for the run summary. Installing twice is a no-op.
pub fn init_tracing(level: LogLevel) {
    let subscriber = fmt()
        .with_max_level(Level::from(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
