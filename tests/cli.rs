//! CLI integration tests
//!
//! These tests run the built `reg-diff` binary against hive files written
//! to a temporary directory.

mod common;

use common::{scenario_a, scenario_b, write_hive};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn reg_diff(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reg-diff"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn setup(temp_dir: &TempDir) {
    write_hive(temp_dir.path(), "A.hive", &scenario_a());
    write_hive(temp_dir.path(), "B.hive", &scenario_b());
}

#[test]
fn test_cli_reports_unique_paths() {
    let temp_dir = TempDir::new().unwrap();
    setup(&temp_dir);

    // relative arguments are resolved against the working directory
    let output = reg_diff(temp_dir.path(), &["A.hive", "B.hive"]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let cwd = std::fs::canonicalize(temp_dir.path()).unwrap();
    let expected_label = format!("UNIQUE-A: {}", cwd.join("A.hive").display());
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            expected_label.as_str(),
            "  Software",
            "  Software/Sub",
            "  Software/Ver___value",
            "",
        ]
    );
    assert!(!stdout.contains("count-A"));
}

#[test]
fn test_cli_empty_difference_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    setup(&temp_dir);

    let output = reg_diff(temp_dir.path(), &["B.hive", "A.hive"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("UNIQUE-A: "));
    assert!(stdout.contains("(empty)"));
}

#[test]
fn test_cli_debug_prints_counts() {
    let temp_dir = TempDir::new().unwrap();
    setup(&temp_dir);

    let output = reg_diff(temp_dir.path(), &["--debug", "A.hive", "B.hive"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("count-A: 3\n\ncount-A !B: 3\n\nUNIQUE-A: "));
}

#[test]
fn test_cli_missing_file_fails_without_report() {
    let temp_dir = TempDir::new().unwrap();
    setup(&temp_dir);

    let output = reg_diff(temp_dir.path(), &["A.hive", "nope.hive"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial report expected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("nope.hive"));
}

#[test]
fn test_cli_rejects_non_hive_file() {
    let temp_dir = TempDir::new().unwrap();
    setup(&temp_dir);
    std::fs::write(temp_dir.path().join("junk.bin"), vec![0u8; 8192]).unwrap();

    let output = reg_diff(temp_dir.path(), &["junk.bin", "B.hive"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid signature"));
}

#[test]
fn test_cli_requires_two_files() {
    let temp_dir = TempDir::new().unwrap();
    let output = reg_diff(temp_dir.path(), &["A.hive"]);
    assert!(!output.status.success());
}

#[cfg(feature = "json")]
#[test]
fn test_cli_json_format() {
    let temp_dir = TempDir::new().unwrap();
    setup(&temp_dir);

    let output = reg_diff(temp_dir.path(), &["--format", "json", "--debug", "A.hive", "B.hive"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["count_a"], 3);
    assert_eq!(
        report["unique"],
        serde_json::json!(["Software", "Software/Sub", "Software/Ver___value"])
    );
}
