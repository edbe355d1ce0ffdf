//! Synthetic metrics builders for testing.

use photo_score_core::domain::{Metrics, MetricsRecord};

/// Builder for creating synthetic metrics records.
///
/// Provides named photos with known characteristics (sharp, blurry,
/// underexposed, ...) so tests can reason about the expected band.
pub struct MetricsBuilder;

impl MetricsBuilder {
    /// Creates a record with the given label and metrics.
    #[must_use]
    pub fn record(label: &str, sharpness: f64, contrast: f64, exposure: f64) -> MetricsRecord {
        MetricsRecord::new(label, Metrics::new(sharpness, contrast, exposure))
    }

    // === Named Photos ===

    /// Crisp, punchy and correctly exposed: scores excellent.
    #[must_use]
    pub fn sharp() -> MetricsRecord {
        Self::record("synthetic://sharp", 10.0, 10.0, 5.0)
    }

    /// Out of focus and flat: scores poor.
    #[must_use]
    pub fn blurry() -> MetricsRecord {
        Self::record("synthetic://blurry", 0.0, 0.0, 5.0)
    }

    /// Middle of every range: scores acceptable.
    #[must_use]
    pub fn average() -> MetricsRecord {
        Self::record("synthetic://average", 5.0, 5.0, 5.0)
    }

    /// Sharp and contrasty but far too dark.
    #[must_use]
    pub fn underexposed() -> MetricsRecord {
        Self::record("synthetic://underexposed", 8.0, 8.0, 0.0)
    }

    /// Sharp and contrasty but blown out.
    #[must_use]
    pub fn overexposed() -> MetricsRecord {
        Self::record("synthetic://overexposed", 8.0, 8.0, 10.0)
    }

    /// Record with a NaN component; the engine rejects it.
    #[must_use]
    pub fn corrupt() -> MetricsRecord {
        Self::record("synthetic://corrupt", f64::NAN, 5.0, 5.0)
    }

    // === Sweeps ===

    /// Sharpness sweep from 0 to 10 in `steps` equal increments, other
    /// metrics held at 5.
    #[must_use]
    pub fn sharpness_sweep(steps: usize) -> Vec<MetricsRecord> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let s = 10.0 * i as f64 / steps as f64;
                Self::record(&format!("synthetic://sweep/{i}"), s, 5.0, 5.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_covers_range() {
        let sweep = MetricsBuilder::sharpness_sweep(4);
        assert_eq!(sweep.len(), 5);
        assert!(sweep[0].metrics.sharpness.abs() < f64::EPSILON);
        assert!((sweep[4].metrics.sharpness - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_corrupt_is_not_finite() {
        assert!(!MetricsBuilder::corrupt().metrics.is_finite());
        assert!(MetricsBuilder::sharp().metrics.is_finite());
    }
}
