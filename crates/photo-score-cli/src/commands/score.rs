//! Score command - rate photos from their sharpness, contrast and exposure.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use photo_score_adapters::{FsMetricsSource, StaticMetricsSource};
use photo_score_core::fuzzy::Defuzzifier;
use photo_score_core::{
    score_all, BatchSummary, Clock, Metrics, MetricsRecord, MetricsSource, QualityConfig,
    ScoreOptions, SharedEngine,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonLayout, JsonOutput, ProgressBar};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Parse and validate a metric value (any finite number; out-of-range values are clamped).
fn parse_metric(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{value} is not a finite number"))
    }
}

/// Parse and validate a quality threshold (0-100).
fn parse_quality(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

fn parse_defuzzifier(s: &str) -> Result<Defuzzifier, String> {
    s.parse()
}

/// Shared arguments for scoring.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScoreArgs {
    /// Metrics files (.jsonl, .ndjson, .json) or directories to score
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Sharpness of a single photo (0-10)
    #[arg(
        long,
        value_parser = parse_metric,
        requires_all = ["contrast", "exposure"],
        conflicts_with = "paths",
        allow_hyphen_values = true
    )]
    pub sharpness: Option<f64>,

    /// Contrast of a single photo (0-10)
    #[arg(
        long,
        value_parser = parse_metric,
        requires_all = ["sharpness", "exposure"],
        allow_hyphen_values = true
    )]
    pub contrast: Option<f64>,

    /// Exposure of a single photo (0-10, 5 is correct)
    #[arg(
        long,
        value_parser = parse_metric,
        requires_all = ["sharpness", "contrast"],
        allow_hyphen_values = true
    )]
    pub exposure: Option<f64>,

    /// Label for the single photo given by --sharpness/--contrast/--exposure
    #[arg(long, default_value = "inline")]
    pub label: String,

    /// Exit with code 1 if any photo scores below this quality (0-100)
    #[arg(long, value_parser = parse_quality)]
    pub min_quality: Option<f64>,

    /// Defuzzification method (centroid, bisector, mom, som, lom)
    #[arg(long, value_parser = parse_defuzzifier)]
    pub defuzzify: Option<Defuzzifier>,

    /// Include per-rule activation strengths in each report
    #[arg(long)]
    pub explain: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl ScoreArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Boolean flags: config applies only if the CLI flag was not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }
        if !args.explain {
            args.explain = config.output.explain.unwrap_or(false);
        }

        // Values: CLI > config (accessor provides hardcoded fallback)
        args.min_quality = args.min_quality.or(config.score.min_quality);
        if args.defuzzify.is_none() {
            args.defuzzify = config
                .engine
                .defuzzify
                .as_deref()
                .and_then(|d| d.parse().ok());
        }
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| match s {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Store config for the engine sampling settings
        args.config = Some(config.clone());

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    /// Engine settings from args and config, over hardcoded defaults.
    fn engine_config(&self) -> QualityConfig {
        let defaults = QualityConfig::default();
        let engine = self.config.as_ref().map(|c| &c.engine);
        QualityConfig {
            input_step: engine
                .and_then(|e| e.input_step)
                .unwrap_or(defaults.input_step),
            output_step: engine
                .and_then(|e| e.output_step)
                .unwrap_or(defaults.output_step),
            defuzzifier: self.defuzzify.unwrap_or(defaults.defuzzifier),
        }
    }

    /// Inline metrics, when all three were given.
    fn inline_metrics(&self) -> Option<Metrics> {
        match (self.sharpness, self.contrast, self.exposure) {
            (Some(s), Some(c), Some(e)) => Some(Metrics::new(s, c, e)),
            _ => None,
        }
    }
}

/// Result of running the score command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ScoreResult {
    /// Batch counts.
    pub summary: BatchSummary,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Wall clock for report timestamps.
struct SystemClock;

impl Clock for SystemClock {
    fn now_rfc3339(&self) -> String {
        iso_timestamp()
    }
}

/// Run the score command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ScoreArgs) -> Result<ScoreResult> {
    let inline = args.inline_metrics();
    if inline.is_none() && args.paths.is_empty() {
        anyhow::bail!("No paths specified. Use --help for usage information.");
    }

    // Build the engine before reading anything; a bad configuration is fatal
    let engine_config = args.engine_config();
    let scorer = SharedEngine::build(&engine_config).context("Failed to build quality engine")?;
    debug!(
        "Engine built ({}, input step {}, output step {})",
        engine_config.defuzzifier, engine_config.input_step, engine_config.output_step
    );

    let source: Box<dyn MetricsSource> = match inline {
        Some(metrics) => {
            info!("Scoring inline metrics");
            Box::new(StaticMetricsSource::single(MetricsRecord::new(
                args.label.clone(),
                metrics,
            )))
        }
        None => {
            info!("Running score command on {} paths", args.paths.len());
            Box::new(FsMetricsSource::new(args.paths.clone(), args.recursive))
        }
    };
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let layout = match args.format() {
        OutputFormat::Jsonl => JsonLayout::Lines,
        OutputFormat::Json => JsonLayout::Array {
            pretty: args.pretty,
        },
    };
    let output = JsonOutput::stdout(layout);

    let options = ScoreOptions {
        min_quality: args.min_quality,
        explain: args.explain,
    };
    let summary = score_all(
        source.as_ref(),
        &scorer,
        &output,
        &progress_bar,
        &SystemClock,
        options,
    )?;

    let exit_code = if summary.below_threshold > 0 {
        ExitCode::BelowThreshold
    } else {
        ExitCode::Success
    };

    Ok(ScoreResult { summary, exit_code })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
