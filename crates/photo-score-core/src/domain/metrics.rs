//! Crisp image statistics fed into the engine.

use serde::{Deserialize, Serialize};

/// Sharpness, contrast and exposure, each nominally on `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Edge sharpness; 0 is fully blurred.
    pub sharpness: f64,
    /// Tonal contrast; 0 is flat.
    pub contrast: f64,
    /// Brightness; 0 is black, 5 is correct, 10 is blown out.
    pub exposure: f64,
}

impl Metrics {
    /// Creates a metrics triple.
    #[must_use]
    pub const fn new(sharpness: f64, contrast: f64, exposure: f64) -> Self {
        Self {
            sharpness,
            contrast,
            exposure,
        }
    }

    /// True if no component is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.sharpness.is_finite() && self.contrast.is_finite() && self.exposure.is_finite()
    }
}

/// Metrics for one photo, with a label identifying it in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Identifier echoed in the report (file name, record position, ...).
    pub label: String,
    /// The measured statistics.
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl MetricsRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(label: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            label: label.into(),
            metrics,
        }
    }
}
