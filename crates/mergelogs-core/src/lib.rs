// Rust guideline compliant 2026-02-06

//! Mergelogs Core Library
//!
//! This crate provides the building blocks for merging JSONL log files into a
//! single chronologically ordered file:
//! - Data model (LogRecord)
//! - Transient ordered store (JSONL rows, timestamp index, file locking)
//! - Ingest and export phases
//! - FSM logic for the merge lifecycle
//! - Merge orchestration with guaranteed store disposal
//! - Error types and result handling

pub mod config;
pub mod error;
pub mod export;
pub mod fsm;
pub mod ingest;
pub mod merge;
pub mod models;
pub mod store;

pub use config::MergeConfig;
pub use error::{Error, Result};
pub use export::export;
pub use fsm::MergeState;
pub use ingest::{ingest, ingest_with_progress};
pub use merge::{merge_logs, FileReport, MergeEngine, MergeObserver, MergeReport, NoopObserver};
pub use models::LogRecord;
pub use store::TransientStore;
