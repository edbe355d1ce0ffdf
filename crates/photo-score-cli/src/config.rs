//! Configuration file support for photo-score.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/photo-score/config.toml` (lowest priority)
//! - Project-local: `.photo-score.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use photo_score_core::fuzzy::{Defuzzifier, FuzzyError, Universe};
use photo_score_core::quality::{INPUT_RANGE, OUTPUT_RANGE};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Inference engine settings.
    pub engine: EngineConfig,
    /// Scoring policy.
    pub score: ScoreConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Inference engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Defuzzification method: centroid, bisector, mom, som or lom.
    pub defuzzify: Option<String>,
    /// Sampling step of the input universes.
    pub input_step: Option<f64>,
    /// Sampling step of the output universe.
    pub output_step: Option<f64>,
}

/// Scoring policy configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Scores below this value set exit code 1 (0-100).
    pub min_quality: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// Include rule activations in reports.
    pub explain: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/photo-score/config.toml`
    /// 2. Project-local: `.photo-score.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as
    /// warnings and dropped, so the hardcoded default applies instead.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
            config.discard_invalid();
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    ///
    /// Reports every invalid value, separated by `; `.
    fn validate(&self) -> Result<(), String> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(ref d) = self.engine.defuzzify {
            if let Err(e) = d.parse::<Defuzzifier>() {
                problems.push(format!("engine.defuzzify: {e}"));
            }
        }
        if let Some(s) = self.engine.input_step {
            if let Err(e) = check_step(INPUT_RANGE, s) {
                problems.push(format!("engine.input_step: {e}"));
            }
        }
        if let Some(s) = self.engine.output_step {
            if let Err(e) = check_step(OUTPUT_RANGE, s) {
                problems.push(format!("engine.output_step: {e}"));
            }
        }
        if let Some(q) = self.score.min_quality {
            if !valid_quality(q) {
                problems.push(format!("score.min_quality must be 0-100, got {q}"));
            }
        }
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        problems
    }

    /// Drop values that failed validation.
    fn discard_invalid(&mut self) {
        if self
            .engine
            .defuzzify
            .as_deref()
            .is_some_and(|d| d.parse::<Defuzzifier>().is_err())
        {
            self.engine.defuzzify = None;
        }
        self.engine.input_step = self
            .engine
            .input_step
            .filter(|&s| check_step(INPUT_RANGE, s).is_ok());
        self.engine.output_step = self
            .engine
            .output_step
            .filter(|&s| check_step(OUTPUT_RANGE, s).is_ok());
        self.score.min_quality = self.score.min_quality.filter(|&q| valid_quality(q));
        if self
            .output
            .format
            .as_deref()
            .is_some_and(|f| f != "json" && f != "jsonl")
        {
            self.output.format = None;
        }
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Engine
        self.engine.defuzzify = other
            .engine
            .defuzzify
            .or_else(|| self.engine.defuzzify.take());
        self.engine.input_step = other.engine.input_step.or(self.engine.input_step);
        self.engine.output_step = other.engine.output_step.or(self.engine.output_step);

        // Score
        self.score.min_quality = other.score.min_quality.or(self.score.min_quality);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.explain = other.output.explain.or(self.output.explain);
    }
}

/// A step is valid when it yields a usable universe over `range`.
fn check_step((min, max): (f64, f64), step: f64) -> Result<(), FuzzyError> {
    Universe::new(min, max, step).map(drop)
}

fn valid_quality(q: f64) -> bool {
    (0.0..=100.0).contains(&q)
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("photo-score").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.photo-score.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".photo-score.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.engine.defuzzify.is_none());
        assert!(config.score.min_quality.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.general.recursive.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[engine]
defuzzify = 'bisector'
input_step = 0.05
output_step = 0.5

[score]
min_quality = 40

[output]
format = 'json'
pretty = true
progress = false
explain = true
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.engine.defuzzify.as_deref(), Some("bisector"));
        assert_eq!(config.engine.input_step, Some(0.05));
        assert_eq!(config.engine.output_step, Some(0.5));
        assert_eq!(config.score.min_quality, Some(40.0));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.explain, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[engine]
defuzzify = 'mom'
output_step = 0.5

[score]
min_quality = 30
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[engine]
defuzzify = 'centroid'

[output]
pretty = true
",
        )
        .expect("parse override");

        base.merge(override_config);

        // Overridden
        assert_eq!(base.engine.defuzzify.as_deref(), Some("centroid"));
        // Preserved from base
        assert_eq!(base.engine.output_step, Some(0.5));
        assert_eq!(base.score.min_quality, Some(30.0));
        // Added from override
        assert_eq!(base.output.pretty, Some(true));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[score]
min_quality = 55
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.score.min_quality, Some(55.0));
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[engine
defuzzify = 'mom'
";
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[score]
min_quality = "high"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = AppConfig::default();
        config.engine.defuzzify = Some("median".to_string());
        config.engine.output_step = Some(0.0);
        config.score.min_quality = Some(120.0);
        config.output.format = Some("xml".to_string());

        let err = config.validate().unwrap_err();
        assert!(err.contains("engine.defuzzify"));
        assert!(err.contains("engine.output_step"));
        assert!(err.contains("score.min_quality"));
        assert!(err.contains("output.format"));
    }

    #[test]
    fn test_discard_invalid_keeps_valid_values() {
        let mut config = AppConfig::default();
        config.engine.defuzzify = Some("lom".to_string());
        config.engine.input_step = Some(-1.0);
        config.score.min_quality = Some(f64::NAN);
        config.output.format = Some("jsonl".to_string());

        config.discard_invalid();

        assert_eq!(config.engine.defuzzify.as_deref(), Some("lom"));
        assert!(config.engine.input_step.is_none());
        assert!(config.score.min_quality.is_none());
        assert_eq!(config.output.format.as_deref(), Some("jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_too_fine_steps_are_rejected() {
        let mut config = AppConfig::default();
        config.engine.input_step = Some(1e-6);
        config.engine.output_step = Some(1e-5);

        let err = config.validate().unwrap_err();
        assert!(err.contains("engine.input_step: invalid universe [0, 10]"));
        assert!(err.contains("engine.output_step: invalid universe [0, 100]"));

        config.discard_invalid();
        assert!(config.engine.input_step.is_none());
        assert!(config.engine.output_step.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fine_but_usable_steps_are_kept() {
        let mut config = AppConfig::default();
        config.engine.input_step = Some(1e-4);
        config.engine.output_step = Some(1e-3);

        assert!(config.validate().is_ok());
        config.discard_invalid();
        assert_eq!(config.engine.input_step, Some(1e-4));
        assert_eq!(config.engine.output_step, Some(1e-3));
    }

    #[test]
    fn test_find_config_in_parents() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(".photo-score.toml"), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, temp.path().join(".photo-score.toml"));
    }
}
