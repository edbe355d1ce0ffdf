//! Filesystem adapter for reading metrics records.

use anyhow::{Context, Result};
use photo_score_core::{Metrics, MetricsRecord, MetricsSource};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Line-delimited extensions: one record per line.
const LINE_EXTENSIONS: &[&str] = &["jsonl", "ndjson"];
/// Document extensions: a single record or an array of records.
const DOCUMENT_EXTENSIONS: &[&str] = &["json"];

/// Record as it appears on disk; the label is optional.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default, alias = "path")]
    label: Option<String>,
    sharpness: f64,
    contrast: f64,
    exposure: f64,
}

impl RawRecord {
    fn into_record(self, default_label: impl FnOnce() -> String) -> MetricsRecord {
        let label = self.label.unwrap_or_else(default_label);
        MetricsRecord::new(
            label,
            Metrics::new(self.sharpness, self.contrast, self.exposure),
        )
    }
}

/// Files found under the configured paths and their record count.
#[derive(Debug)]
struct Scan {
    files: Vec<PathBuf>,
    total: usize,
}

/// Filesystem metrics source adapter.
///
/// Reads `.jsonl`/`.ndjson` files (one record per line, blank lines
/// ignored) and `.json` files (a single record or an array). Records
/// without a label are named after their position, `<file>:<line>` for
/// line-delimited files and `<file>:<n>` for array elements.
///
/// The paths are scanned once, on first use, and the file list is reused by
/// both [`count_hint`](MetricsSource::count_hint) and
/// [`records`](MetricsSource::records).
pub struct FsMetricsSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    scan: OnceLock<Scan>,
}

impl FsMetricsSource {
    /// Creates a new filesystem metrics source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            scan: OnceLock::new(),
        }
    }

    fn scan(&self) -> &Scan {
        self.scan.get_or_init(|| {
            let files = self.collect_files();
            let total = files.iter().map(|path| count_records(path)).sum();
            debug!("Found {} metrics files with {total} records", files.len());
            Scan { files, total }
        })
    }

    /// Collects all metrics files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported_file(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(e) => e.flatten().map(|entry| entry.path()).collect(),
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };
        // read_dir order is platform dependent
        entries.sort();

        for path in entries {
            if path.is_file() && is_supported_file(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl MetricsSource for FsMetricsSource {
    fn records(&self) -> Box<dyn Iterator<Item = Result<MetricsRecord>> + Send + '_> {
        Box::new(self.scan().files.iter().flat_map(|path| read_file(path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.scan().total)
    }
}

/// Checks if a path has a supported extension.
fn is_supported_file(path: &Path) -> bool {
    extension(path).is_some_and(|e| {
        LINE_EXTENSIONS.contains(&e.as_str()) || DOCUMENT_EXTENSIONS.contains(&e.as_str())
    })
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn is_line_delimited(path: &Path) -> bool {
    extension(path).is_some_and(|e| LINE_EXTENSIONS.contains(&e.as_str()))
}

/// Reads every record in a file. An unreadable file yields one error.
fn read_file(path: &Path) -> Vec<Result<MetricsRecord>> {
    let text = match std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file: {}", path.display()))
    {
        Ok(text) => text,
        Err(e) => return vec![Err(e)],
    };

    if is_line_delimited(path) {
        parse_lines(path, &text)
    } else {
        parse_document(path, &text)
    }
}

fn parse_lines(path: &Path, text: &str) -> Vec<Result<MetricsRecord>> {
    let name = path.display().to_string();
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line_no = i + 1;
            serde_json::from_str::<RawRecord>(line)
                .with_context(|| format!("Invalid metrics record at {name}:{line_no}"))
                .map(|raw| raw.into_record(|| format!("{name}:{line_no}")))
        })
        .collect()
}

/// Parses a `.json` file. Array elements are parsed one by one so a bad
/// element only loses itself.
fn parse_document(path: &Path, text: &str) -> Vec<Result<MetricsRecord>> {
    let name = path.display().to_string();
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            return vec![Err(anyhow::Error::new(e)
                .context(format!("Invalid metrics document: {name}")))];
        }
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let n = i + 1;
                serde_json::from_value::<RawRecord>(item)
                    .with_context(|| format!("Invalid metrics record at {name}:{n}"))
                    .map(|raw| raw.into_record(|| format!("{name}:{n}")))
            })
            .collect(),
        value => vec![serde_json::from_value::<RawRecord>(value)
            .with_context(|| format!("Invalid metrics document: {name}"))
            .map(|raw| raw.into_record(|| name.clone()))],
    }
}

/// Counts records without validating them.
fn count_records(path: &Path) -> usize {
    let Ok(text) = std::fs::read_to_string(path) else {
        return 1;
    };

    if is_line_delimited(path) {
        text.lines().filter(|line| !line.trim().is_empty()).count()
    } else {
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => items.len(),
            _ => 1,
        }
    }
}
