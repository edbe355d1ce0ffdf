//! Score report types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Metrics;
use crate::quality::{Assessment, FALLBACK_QUALITY};

/// Output term with the strongest activation.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    /// Low quality.
    Poor,
    /// Average quality.
    Acceptable,
    /// High quality.
    Excellent,
}

impl QualityBand {
    /// Maps a `quality` term name to its band.
    #[must_use]
    pub fn from_term(term: &str) -> Option<Self> {
        match term {
            "poor" => Some(Self::Poor),
            "acceptable" => Some(Self::Acceptable),
            "excellent" => Some(Self::Excellent),
            _ => None,
        }
    }

    /// Term name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Acceptable => "acceptable",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a score was computed or substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Quality computed by the engine.
    Success,
    /// Engine failed; quality is [`FALLBACK_QUALITY`].
    Error,
}

/// Activation strength of one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleActivation {
    /// 1-based rule number.
    pub rule: usize,
    /// Consequent term the rule concludes on.
    pub consequent: String,
    /// Fuzzy truth of the antecedent, in `[0, 1]`.
    pub strength: f64,
}

/// Result for a single photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Record label.
    pub label: String,
    /// Timestamp of scoring (RFC 3339).
    pub timestamp: String,
    /// Quality on `[0, 100]`.
    pub quality: f64,
    /// Strongest output term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<QualityBand>,
    /// Outcome.
    pub status: ScoreStatus,
    /// Failure message when `status` is `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Input sharpness, rounded to two decimals.
    pub sharpness: f64,
    /// Input contrast, rounded to two decimals.
    pub contrast: f64,
    /// Input exposure, rounded to two decimals.
    pub exposure: f64,
    /// Set when no rule fired and the midpoint was used.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    /// Per-rule activations, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activations: Option<Vec<RuleActivation>>,
}

impl ScoreReport {
    /// Report for a successful assessment.
    #[must_use]
    pub fn success(
        label: impl Into<String>,
        timestamp: impl Into<String>,
        metrics: Metrics,
        assessment: Assessment,
        explain: bool,
    ) -> Self {
        Self {
            label: label.into(),
            timestamp: timestamp.into(),
            quality: assessment.quality,
            band: Some(assessment.band),
            status: ScoreStatus::Success,
            error: None,
            sharpness: round2(metrics.sharpness),
            contrast: round2(metrics.contrast),
            exposure: round2(metrics.exposure),
            fallback: assessment.fallback_used,
            activations: explain.then_some(assessment.activations),
        }
    }

    /// Report substituting [`FALLBACK_QUALITY`] after a failure.
    #[must_use]
    pub fn failure(
        label: impl Into<String>,
        timestamp: impl Into<String>,
        metrics: Metrics,
        error: &dyn fmt::Display,
    ) -> Self {
        Self {
            label: label.into(),
            timestamp: timestamp.into(),
            quality: FALLBACK_QUALITY,
            band: None,
            status: ScoreStatus::Error,
            error: Some(error.to_string()),
            sharpness: round2(metrics.sharpness),
            contrast: round2(metrics.contrast),
            exposure: round2(metrics.exposure),
            fallback: false,
            activations: None,
        }
    }

    /// True if the engine produced the score.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ScoreStatus::Success
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn assessment() -> Assessment {
        Assessment {
            quality: 61.5,
            band: QualityBand::Acceptable,
            fallback_used: false,
            activations: vec![RuleActivation {
                rule: 6,
                consequent: "acceptable".into(),
                strength: 1.0,
            }],
        }
    }

    #[test]
    fn test_success_rounds_inputs() {
        let report = ScoreReport::success(
            "a.jpg",
            "2024-01-01T00:00:00Z",
            Metrics::new(7.126, 3.3333, 5.0),
            assessment(),
            false,
        );
        assert_eq!(report.sharpness, 7.13);
        assert_eq!(report.contrast, 3.33);
        assert!(report.is_success());
        assert!(report.activations.is_none());
    }

    #[test]
    fn test_success_serialization_omits_empty_fields() {
        let report = ScoreReport::success(
            "a.jpg",
            "2024-01-01T00:00:00Z",
            Metrics::new(5.0, 5.0, 5.0),
            assessment(),
            false,
        );
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["band"], "acceptable");
        assert!(json.get("error").is_none());
        assert!(json.get("fallback").is_none());
        assert!(json.get("activations").is_none());
    }

    #[test]
    fn test_explain_includes_activations() {
        let report = ScoreReport::success(
            "a.jpg",
            "2024-01-01T00:00:00Z",
            Metrics::new(5.0, 5.0, 5.0),
            assessment(),
            true,
        );
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["activations"][0]["rule"], 6);
    }

    #[test]
    fn test_failure_uses_fallback_quality() {
        let report = ScoreReport::failure(
            "b.jpg",
            "2024-01-01T00:00:00Z",
            Metrics::new(1.0, 2.0, 3.0),
            &"engine unavailable",
        );
        assert_eq!(report.quality, FALLBACK_QUALITY);
        assert!(!report.is_success());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "engine unavailable");
        assert!(json.get("band").is_none());
    }

    #[test]
    fn test_band_names() {
        for band in [QualityBand::Poor, QualityBand::Acceptable, QualityBand::Excellent] {
            assert_eq!(QualityBand::from_term(band.as_str()), Some(band));
        }
        assert_eq!(QualityBand::from_term("mediocre"), None);
    }
}
