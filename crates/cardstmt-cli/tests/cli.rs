//! End-to-end tests for the cardstmt binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const HDFC_STATEMENT: &str = "\
HDFC Bank Credit Card Statement
Customer Name: Rahul Sharma
Card No: XXXX XXXX XXXX 4321  Platinum
Statement Period: 01/03/2024 to 31/03/2024
Payment Due Date: 15/04/2024
Total Amount Due: Rs. 12,543.89
05/03/2024 AMAZON RETAIL 2,499.00
";

fn cardstmt() -> Command {
    Command::cargo_bin("cardstmt").unwrap()
}

#[test]
fn process_text_statement_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hdfc.txt");
    fs::write(&input, HDFC_STATEMENT).unwrap();

    cardstmt()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"extracted\""))
        .stdout(predicate::str::contains("\"HDFC\""))
        .stdout(predicate::str::contains("Rahul Sharma"))
        .stdout(predicate::str::contains("2024-04-15"));
}

#[test]
fn process_text_summary_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hdfc.txt");
    fs::write(&input, HDFC_STATEMENT).unwrap();

    cardstmt()
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Issuer: HDFC"))
        .stdout(predicate::str::contains("**** 4321"))
        .stdout(predicate::str::contains("₹12,543.89"));
}

#[test]
fn process_unknown_issuer_is_gated() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("other.txt");
    fs::write(&input, "Some Other Bank Total Amount Due 500.00").unwrap();

    cardstmt()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"unsupported\""));

    cardstmt()
        .args(["process", "--no-gate"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"extracted\""))
        .stdout(predicate::str::contains("\"UNKNOWN\""));
}

#[test]
fn process_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.docx");
    fs::write(&input, "irrelevant").unwrap();

    cardstmt()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn process_missing_input_fails() {
    cardstmt()
        .args(["process", "/nonexistent/statement.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), HDFC_STATEMENT).unwrap();
    fs::write(dir.path().join("b.txt"), "Some Other Bank 500.00").unwrap();
    let out_dir = dir.path().join("out");

    let pattern = dir.path().join("*.txt");
    cardstmt()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--summary")
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 files"));

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("extracted"));
    assert!(summary.contains("unsupported"));
    assert!(summary.contains("a.txt"));
}

#[test]
fn batch_empty_pattern_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.pdf");

    cardstmt()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_set_validates_extraction_tunables() {
    let dir = tempfile::tempdir().unwrap();

    cardstmt()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "extraction.min_cycle_days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("billing-cycle bounds"));

    cardstmt()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "extraction.max_cycle_days", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set extraction.max_cycle_days = 40"));
}

#[test]
fn config_path_prints_location() {
    cardstmt()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}
