//! Integration tests for the walklog binary.
//!
//! These tests verify end-to-end behavior including:
//! - First submission of a day and its baseline entry
//! - Accumulation across invocations
//! - Rejected submissions leaving the record unchanged
//! - Read-only summaries and configuration overrides

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MORNING_RECORD: &str = r#"{
  "date": "2024-03-14",
  "cumulative_calories": 50.0,
  "entries": {
    "08:00:00": 0,
    "09:00:00": 5000
  }
}"#;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI with an isolated config location and a frozen clock
fn cli_at(data_dir: &Path, now: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("walklog"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--now")
        .arg(now);
    cmd
}

fn cli(data_dir: &Path) -> Command {
    cli_at(data_dir, "2024-03-14T12:00:00")
}

fn record_path(data_dir: &Path) -> PathBuf {
    data_dir.join("days/2024-03-14.json")
}

fn write_morning_record(data_dir: &Path) {
    fs::create_dir_all(data_dir.join("days")).unwrap();
    fs::write(record_path(data_dir), MORNING_RECORD).unwrap();
}

fn read_record(data_dir: &Path) -> Value {
    let contents = fs::read_to_string(record_path(data_dir)).expect("Failed to read record");
    serde_json::from_str(&contents).expect("Record is not valid JSON")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("walklog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Daily step, distance and calorie tracker",
        ));
}

#[test]
fn test_first_submission_creates_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli_at(data_dir, "2024-03-14T09:00:00")
        .arg("submit")
        .arg("10:10:10")
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 10:10:10."))
        .stdout(predicate::str::contains("Today you have walked 100 steps."))
        .stdout(predicate::str::contains("participation, not victory!"));

    let record = read_record(data_dir);
    assert_eq!(record["date"], "2024-03-14");
    assert!(record["cumulative_calories"].as_f64().unwrap() > 0.0);

    let entries = record["entries"].as_object().unwrap();
    let keys: Vec<&str> = entries.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["09:00:00", "10:10:10"]);
    assert_eq!(entries["09:00:00"], 0);
    assert_eq!(entries["10:10:10"], 100);
}

#[test]
fn test_advancing_submission_accumulates() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    write_morning_record(data_dir);

    cli(data_dir)
        .arg("submit")
        .arg("09:30:00")
        .arg("3000")
        .assert()
        .success()
        .stdout(predicate::str::contains("Today you have walked 8000 steps."))
        .stdout(predicate::str::contains("The walked distance is 5.20 km."))
        .stdout(predicate::str::contains("Not bad! It was a productive day."));

    let record = read_record(data_dir);
    assert!(record["cumulative_calories"].as_f64().unwrap() > 50.0);
    assert_eq!(record["entries"]["09:30:00"], 3000);
}

#[test]
fn test_out_of_order_submission_leaves_record_unchanged() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    write_morning_record(data_dir);
    let before: Value = serde_json::from_str(MORNING_RECORD).unwrap();

    cli(data_dir)
        .arg("submit")
        .arg("08:30:00")
        .arg("1000")
        .assert()
        .success()
        .stderr(predicate::str::contains("Submission ignored"))
        .stdout(predicate::str::contains("Time: 09:00:00."))
        .stdout(predicate::str::contains("Today you have walked 5000 steps."))
        .stdout(predicate::str::contains("You spent 50.00 kilocalories"));

    assert_eq!(read_record(data_dir), before);
}

#[test]
fn test_rejection_logged_at_debug_level() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    write_morning_record(data_dir);

    cli(data_dir)
        .env("RUST_LOG", "debug")
        .arg("submit")
        .arg("08:30:00")
        .arg("1000")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Submission for 2024-03-14 left the record unchanged",
        ))
        .stdout(predicate::str::contains("left the record unchanged").not());
}

#[test]
fn test_zero_steps_ignored() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    write_morning_record(data_dir);
    let before: Value = serde_json::from_str(MORNING_RECORD).unwrap();

    cli(data_dir)
        .arg("submit")
        .arg("10:00:00")
        .arg("0")
        .assert()
        .success()
        .stderr(predicate::str::contains("non-zero step count"));

    assert_eq!(read_record(data_dir), before);
}

#[test]
fn test_invalid_time_is_rejected_not_fatal() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .arg("submit")
        .arg("25:99:00")
        .arg("100")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid time '25:99:00'"))
        .stdout(predicate::str::contains("Today you have walked 0 steps."));

    // The baseline entry is still persisted
    let record = read_record(data_dir);
    assert_eq!(record["entries"]["12:00:00"], 0);
}

#[test]
fn test_non_numeric_steps_rejected_by_parser() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .arg("submit")
        .arg("10:00:00")
        .arg("lots")
        .assert()
        .failure();

    assert!(!record_path(data_dir).exists());
}

#[test]
fn test_show_without_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No walks recorded for 2024-03-14."));

    assert!(!record_path(data_dir).exists());
}

#[test]
fn test_show_existing_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    write_morning_record(data_dir);

    cli(data_dir)
        .arg("show")
        .arg("--date")
        .arg("2024-03-14")
        .assert()
        .success()
        .stdout(predicate::str::contains("Today you have walked 5000 steps."))
        .stdout(predicate::str::contains("The walked distance is 3.25 km."))
        .stdout(predicate::str::contains("catch up tomorrow"));

    let before: Value = serde_json::from_str(MORNING_RECORD).unwrap();
    assert_eq!(read_record(data_dir), before);
}

#[test]
fn test_config_overrides_messages() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let config_path = data_dir.join("custom.toml");
    fs::write(
        &config_path,
        r#"
[goals]
fallback_message = "Keep moving."

[[goals.tiers]]
min_km = 1.0
message = "One kilometre down."
"#,
    )
    .unwrap();

    cli(data_dir)
        .arg("--config")
        .arg(&config_path)
        .arg("submit")
        .arg("12:30:00")
        .arg("2000")
        .assert()
        .success()
        .stdout(predicate::str::contains("One kilometre down."));
}

#[test]
fn test_day_accumulates_across_runs() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for (time, steps) in [("12:30:00", "3000"), ("13:00:00", "4000"), ("14:15:00", "4000")] {
        cli(data_dir)
            .arg("submit")
            .arg(time)
            .arg(steps)
            .assert()
            .success();
    }

    cli(data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 14:15:00."))
        .stdout(predicate::str::contains("Today you have walked 11000 steps."))
        .stdout(predicate::str::contains("Great result! The goal has been achieved."));
}
