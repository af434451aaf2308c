// Rust guideline compliant 2026-02-06

//! Mergelogs CLI Application
//!
//! Merges JSONL log files into one file ordered by timestamp.

use clap::Parser;
use mergelogs_cli::commands::merge::{self, MergeOptions};
use mergelogs_cli::logging::{init_tracing, LogLevel};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "mergelogs",
    version,
    about = "Merge JSONL log files into one chronologically ordered file",
    after_help = "Examples:\n  mergelogs api.jsonl worker.jsonl\n  mergelogs -o /var/log/merged a.jsonl b.jsonl c.jsonl\n"
)]
struct Cli {
    /// Directory for the merged log
    #[arg(short = 'o', long, default_value = "./")]
    output_dir: PathBuf,

    /// Location of the transient store file
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Custom config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostic log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Log files to merge
    #[arg(required = true)]
    logs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let options = MergeOptions {
        output_dir: cli.output_dir,
        store_path: cli.store_path,
        config: cli.config,
        inputs: cli.logs,
    };
    merge::execute(options, std::io::stdout().lock())?;

    println!("finished in {} sec", started.elapsed().as_secs_f64());
    Ok(())
}
