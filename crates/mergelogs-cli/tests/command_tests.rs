// Rust guideline compliant 2026-02-06

//! Integration tests for the merge command.

use mergelogs_cli::commands::merge::{execute, MergeOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to write a JSONL log file into `dir`.
fn write_log(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write log file");
    path
}

fn options(dir: &Path, inputs: Vec<PathBuf>) -> MergeOptions {
    MergeOptions {
        output_dir: dir.to_path_buf(),
        store_path: Some(dir.join("merge.db")),
        config: None,
        inputs,
    }
}

#[test]
fn test_execute_writes_merged_log_and_summary() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let a = write_log(
        temp_dir.path(),
        "a.jsonl",
        "{\"log_level\":\"INFO\",\"timestamp\":\"2024-01-01T00:00:02Z\",\"message\":\"b\"}\n",
    );
    let b = write_log(
        temp_dir.path(),
        "b.jsonl",
        "{\"log_level\":\"WARN\",\"timestamp\":\"2024-01-01T00:00:01Z\",\"message\":\"a\"}\n",
    );

    let mut summary = Vec::new();
    let report = execute(options(temp_dir.path(), vec![a.clone(), b]), &mut summary)
        .expect("Merge should succeed");

    let merged = temp_dir.path().join("mergedlog.jsonl");
    assert_eq!(report.output, merged);
    assert_eq!(report.exported, 2);

    let lines: Vec<String> = fs::read_to_string(&merged)
        .expect("Failed to read merged log")
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"message\":\"a\""));
    assert!(lines[1].contains("\"message\":\"b\""));

    let summary = String::from_utf8(summary).expect("Summary should be UTF-8");
    assert!(summary.contains(&format!("transfer log: {}", a.display())));
    assert!(summary.contains("transferred 1 records in "));
    assert!(summary.contains(&format!("merge logs: {}", merged.display())));
    assert!(summary.contains("merged 2 records in "));

    assert!(!temp_dir.path().join("merge.db").exists());
}

#[test]
fn test_execute_uses_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let a = write_log(
        temp_dir.path(),
        "a.jsonl",
        "{\"log_level\":\"INFO\",\"timestamp\":\"2024-01-01T00:00:02Z\",\"message\":\"b\"}\n",
    );
    let store = temp_dir.path().join("configured.db");
    let config_path = temp_dir.path().join("mergelogs.toml");
    fs::write(
        &config_path,
        format!(
            "store_path = {:?}\noutput_file_name = \"all.jsonl\"\n",
            store.display().to_string()
        ),
    )
    .expect("Failed to write config");

    let opts = MergeOptions {
        output_dir: temp_dir.path().to_path_buf(),
        store_path: None,
        config: Some(config_path),
        inputs: vec![a],
    };
    execute(opts, Vec::new()).expect("Merge should succeed");

    assert!(temp_dir.path().join("all.jsonl").exists());
    assert!(!store.exists());
}

#[test]
fn test_execute_reports_missing_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let opts = MergeOptions {
        config: Some(temp_dir.path().join("missing.toml")),
        ..options(temp_dir.path(), vec![temp_dir.path().join("a.jsonl")])
    };

    let err = execute(opts, Vec::new()).unwrap_err();
    assert!(err.to_string().contains("failed to load config"));
}

#[test]
fn test_execute_fails_on_malformed_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let bad = write_log(temp_dir.path(), "bad.jsonl", "{not json}\n");

    let err = execute(options(temp_dir.path(), vec![bad]), Vec::new()).unwrap_err();
    let root = err
        .downcast_ref::<mergelogs_core::Error>()
        .expect("Should carry the core error");
    assert!(matches!(root, mergelogs_core::Error::Decode { line: 1, .. }));

    assert!(!temp_dir.path().join("merge.db").exists());
    assert!(!temp_dir.path().join("mergedlog.jsonl").exists());
}

#[test]
fn test_execute_without_inputs_is_usage_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let err = execute(options(temp_dir.path(), Vec::new()), Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<mergelogs_core::Error>(),
        Some(mergelogs_core::Error::Usage(_))
    ));
}

#[test]
fn test_execute_rejects_store_at_output_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let a = write_log(
        temp_dir.path(),
        "a.jsonl",
        "{\"log_level\":\"INFO\",\"timestamp\":\"2024-01-01T00:00:02Z\",\"message\":\"b\"}\n",
    );
    let merged = temp_dir.path().join("mergedlog.jsonl");
    let options = MergeOptions {
        store_path: Some(merged.clone()),
        ..options(temp_dir.path(), vec![a])
    };

    let result = execute(options, Vec::<u8>::new());
    let err = result.expect_err("Store and output must not share a path");
    assert!(err.to_string().contains("collides with store"));
    assert!(!merged.exists());
}
