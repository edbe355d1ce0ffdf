//! Output format tests.
//!
//! Verifies JSON Lines and JSON array output and the report schema.

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const RECORDS: [&str; 3] = [
    r#"{"label":"sharp.jpg","sharpness":10,"contrast":10,"exposure":5}"#,
    r#"{"label":"blurry.jpg","sharpness":0,"contrast":0,"exposure":5}"#,
    r#"{"label":"odd.jpg","sharpness":7.126,"contrast":7.004,"exposure":4.999}"#,
];

fn batch(records: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.jsonl");
    fs::write(&path, records.join("\n")).unwrap();
    (dir, path)
}

fn run(args: &[&str], path: &PathBuf) -> String {
    let output = Command::cargo_bin("photo-score")
        .unwrap()
        .env("XDG_CONFIG_HOME", "/nonexistent/photo-score-test-config")
        .args(args)
        .arg(path)
        .output()
        .unwrap();
    assert!(output.status.success(), "exit {:?}", output.status.code());
    String::from_utf8(output.stdout).unwrap()
}

fn reports(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// === JSON Lines ===

#[test]
fn test_jsonl_format_single_object_per_line() {
    let (_dir, path) = batch(&RECORDS);
    let stdout = run(&["--format", "jsonl"], &path);

    let lines = reports(&stdout);
    assert_eq!(lines.len(), 3);
    for report in &lines {
        assert!(report.is_object());
    }
}

#[test]
fn test_jsonl_preserves_input_order() {
    let (_dir, path) = batch(&RECORDS);
    let labels: Vec<_> = reports(&run(&[], &path))
        .into_iter()
        .map(|r| r["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["sharp.jpg", "blurry.jpg", "odd.jpg"]);
}

// === JSON Array ===

#[test]
fn test_json_format_is_array() {
    let (_dir, path) = batch(&RECORDS);
    let stdout = run(&["--format", "json"], &path);

    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn test_json_format_empty_array_for_no_records() {
    let (_dir, path) = batch(&[]);
    let stdout = run(&["--format", "json"], &path);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_pretty_format_is_indented() {
    let (_dir, path) = batch(&RECORDS);
    let stdout = run(&["--format", "json", "--pretty"], &path);
    assert!(stdout.lines().count() > 3);
    assert!(stdout.contains("\n  {"));
}

#[test]
fn test_non_pretty_format_is_compact() {
    let (_dir, path) = batch(&RECORDS);
    let stdout = run(&["--format", "json"], &path);
    assert_eq!(stdout.trim().lines().count(), 1);
}

// === Report Schema ===

#[test]
fn test_report_fields() {
    let (_dir, path) = batch(&RECORDS[..1]);
    let report = &reports(&run(&[], &path))[0];

    assert_eq!(report["label"], "sharp.jpg");
    assert_eq!(report["status"], "success");
    assert_eq!(report["band"], "excellent");
    assert!(report["timestamp"].as_str().unwrap().contains('T'));
    let quality = report["quality"].as_f64().unwrap();
    assert!((80.0..=100.0).contains(&quality), "got {quality}");
    assert!(report.get("error").is_none());
    assert!(report.get("activations").is_none());
}

#[test]
fn test_inputs_rounded_to_two_decimals() {
    let (_dir, path) = batch(&RECORDS[2..]);
    let report = &reports(&run(&[], &path))[0];

    assert_eq!(report["sharpness"], 7.13);
    assert_eq!(report["contrast"], 7.0);
    assert_eq!(report["exposure"], 5.0);
}

#[test]
fn test_low_quality_band() {
    let (_dir, path) = batch(&RECORDS[1..2]);
    let report = &reports(&run(&[], &path))[0];

    assert_eq!(report["band"], "poor");
    assert!(report["quality"].as_f64().unwrap() < 30.0);
}

#[test]
fn test_explain_includes_all_rules() {
    let (_dir, path) = batch(&RECORDS[..1]);
    let report = &reports(&run(&["--explain"], &path))[0];

    let activations = report["activations"].as_array().unwrap();
    assert_eq!(activations.len(), 8);
    assert_eq!(activations[0]["rule"], 1);
    assert_eq!(activations[1]["consequent"], "excellent");
    assert_eq!(activations[1]["strength"], 1.0);
    for activation in activations {
        let s = activation["strength"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&s));
    }
}
