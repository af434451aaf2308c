// Rust guideline compliant 2026-02-06

//! End-to-end tests running the `mergelogs` binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn mergelogs_merges_into_output_dir() {
    let temp_dir = TempDir::new().expect("temp dir");
    let out_dir = temp_dir.path().join("out");
    fs::create_dir(&out_dir).expect("create out dir");
    fs::write(
        temp_dir.path().join("a.jsonl"),
        "{\"log_level\":\"INFO\",\"timestamp\":\"2024-01-01T00:00:02Z\",\"message\":\"b\"}\n",
    )
    .expect("write a.jsonl");
    fs::write(
        temp_dir.path().join("b.jsonl"),
        "{\"log_level\":\"WARN\",\"timestamp\":\"2024-01-01T00:00:01Z\",\"message\":\"a\"}\n",
    )
    .expect("write b.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_mergelogs"))
        .current_dir(temp_dir.path())
        .args(["-o", "out", "a.jsonl", "b.jsonl"])
        .output()
        .expect("run mergelogs");

    assert!(
        output.status.success(),
        "expected success, got status: {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("transfer log: "), "stdout:\n{}", stdout);
    assert!(stdout.contains("merge logs: "), "stdout:\n{}", stdout);
    assert!(stdout.contains("finished in "), "stdout:\n{}", stdout);

    let merged = fs::read_to_string(out_dir.join("mergedlog.jsonl")).expect("read merged log");
    let records: Vec<serde_json::Value> = merged
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["log_level"], "WARN");
    assert_eq!(records[1]["log_level"], "INFO");

    assert!(
        !temp_dir.path().join("merge.db").exists(),
        "transient store must be removed"
    );
}

#[test]
fn mergelogs_without_logs_is_usage_error() {
    let temp_dir = TempDir::new().expect("temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_mergelogs"))
        .current_dir(temp_dir.path())
        .output()
        .expect("run mergelogs");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    assert!(!temp_dir.path().join("mergedlog.jsonl").exists());
}

#[test]
fn mergelogs_reports_decode_error_and_cleans_up() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(
        temp_dir.path().join("a.jsonl"),
        "{\"log_level\":\"INFO\",\"timestamp\":\"2024-01-01T00:00:02Z\",\"message\":\"b\"}\nbroken\n",
    )
    .expect("write a.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_mergelogs"))
        .current_dir(temp_dir.path())
        .arg("a.jsonl")
        .output()
        .expect("run mergelogs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("decode error"), "stderr:\n{}", stderr);
    assert!(stderr.contains("line 2"), "stderr:\n{}", stderr);
    assert!(!temp_dir.path().join("merge.db").exists());
    assert!(!temp_dir.path().join("mergedlog.jsonl").exists());
}

#[test]
fn mergelogs_reports_missing_input() {
    let temp_dir = TempDir::new().expect("temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_mergelogs"))
        .current_dir(temp_dir.path())
        .arg("missing.jsonl")
        .output()
        .expect("run mergelogs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't open log file"), "stderr:\n{}", stderr);
    assert!(!temp_dir.path().join("merge.db").exists());
}
