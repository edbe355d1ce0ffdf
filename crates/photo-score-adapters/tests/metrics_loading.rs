//! Integration tests for loading metrics from the filesystem.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use photo_score_adapters::{FsMetricsSource, StaticMetricsSource};
use photo_score_core::{Metrics, MetricsRecord, MetricsSource};
use std::fs;
use tempfile::TempDir;

const LINE: &str = r#"{"sharpness":8,"contrast":8,"exposure":5}"#;

#[test]
fn test_load_jsonl_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("batch.jsonl");
    fs::write(
        &path,
        format!("{LINE}\n{{\"label\":\"dark.jpg\",\"sharpness\":1,\"contrast\":1,\"exposure\":0}}\n"),
    )
    .unwrap();

    let source = FsMetricsSource::new(vec![path], false);
    assert_eq!(source.count_hint(), Some(2));

    let records: Vec<_> = source.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert!(records[0].label.ends_with("batch.jsonl:1"));
    assert_eq!(records[0].metrics, Metrics::new(8.0, 8.0, 5.0));
    assert_eq!(records[1].label, "dark.jpg");
}

#[test]
fn test_load_json_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("batch.json");
    fs::write(&path, format!("[{LINE}, {LINE}, {LINE}]")).unwrap();

    let source = FsMetricsSource::new(vec![path], false);
    assert_eq!(source.count_hint(), Some(3));
    assert_eq!(source.records().filter(Result::is_ok).count(), 3);
}

#[test]
fn test_malformed_array_element_is_per_record_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("batch.json");
    fs::write(
        &path,
        format!("[{LINE}, {{\"sharpness\":\"x\",\"contrast\":1,\"exposure\":1}}, {LINE}]"),
    )
    .unwrap();

    let source = FsMetricsSource::new(vec![path], false);
    assert_eq!(source.count_hint(), Some(3));

    let records: Vec<_> = source.records().collect();
    assert_eq!(records.len(), 3);
    assert!(records[0].as_ref().unwrap().label.ends_with("batch.json:1"));
    assert!(records[2].as_ref().unwrap().label.ends_with("batch.json:3"));

    let err = records[1].as_ref().expect_err("element 2 is malformed");
    assert!(format!("{err:#}").contains("batch.json:2"));
}

#[test]
fn test_count_hint_is_stable_across_reads() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.jsonl"), format!("{LINE}\n{LINE}\n")).unwrap();

    let source = FsMetricsSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));
    assert_eq!(source.records().count(), 2);
    assert_eq!(source.records().count(), 2);
    assert_eq!(source.count_hint(), Some(2));
}

#[test]
fn test_malformed_line_is_per_record_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("batch.jsonl");
    fs::write(&path, format!("{LINE}\n{{\"sharpness\":\"high\"}}\n{LINE}\n")).unwrap();

    let source = FsMetricsSource::new(vec![path], false);
    let records: Vec<_> = source.records().collect();
    assert_eq!(records.len(), 3);
    assert!(records[0].is_ok());
    assert!(records[2].is_ok());

    let err = records[1].as_ref().expect_err("line 2 is malformed");
    assert!(format!("{err:#}").contains("batch.jsonl:2"));
}

#[test]
fn test_directory_scan_respects_recursive() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("a.jsonl"), format!("{LINE}\n")).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(nested.join("b.json"), LINE).unwrap();

    let flat = FsMetricsSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.records().count(), 1);

    let deep = FsMetricsSource::new(vec![dir.path().to_path_buf()], true);
    let labels: Vec<_> = deep.records().map(|r| r.unwrap().label).collect();
    assert_eq!(labels.len(), 2);
    assert!(labels[1].ends_with("b.json"));
}

#[test]
fn test_missing_path_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let source = FsMetricsSource::new(vec![dir.path().join("absent.jsonl")], false);
    assert_eq!(source.records().count(), 0);
    assert_eq!(source.count_hint(), Some(0));
}

#[test]
fn test_static_source_preserves_order() {
    let source = StaticMetricsSource::new(vec![
        MetricsRecord::new("first", Metrics::new(1.0, 1.0, 1.0)),
        MetricsRecord::new("second", Metrics::new(9.0, 9.0, 5.0)),
    ]);
    assert_eq!(source.count_hint(), Some(2));
    let labels: Vec<_> = source.records().map(|r| r.unwrap().label).collect();
    assert_eq!(labels, ["first", "second"]);
}
