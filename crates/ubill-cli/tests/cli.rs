//! Contract tests for the ubill binary. Nothing here talks to the network;
//! every case fails before the service call would happen.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn ubill() -> Command {
    Command::cargo_bin("ubill").unwrap()
}

fn write_config(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    ubill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn extract_requires_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "{}");

    ubill()
        .args(["extract", "bill.pdf", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn extract_requires_model_id() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &dir,
        r#"{"azure": {"endpoint": "https://example.test", "api_key": "k"}}"#,
    );

    ubill()
        .args(["extract", "bill.pdf", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No extraction model"));
}

#[test]
fn extract_rejects_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &dir,
        r#"{"azure": {"endpoint": "https://example.test", "api_key": "k"}, "extraction": {"model_id": "utilitybill-v1"}}"#,
    );

    ubill()
        .args(["extract", "no-such-file.pdf", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn config_path_reports_location() {
    ubill()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}
