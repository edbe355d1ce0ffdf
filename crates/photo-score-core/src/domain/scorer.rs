//! Scoring seam between the pipeline and the engine.

use super::Metrics;
use crate::quality::Assessment;

/// Anything that can turn metrics into a quality assessment.
///
/// Implementations must be shareable across threads; the engines in
/// [`crate::quality`] satisfy this by locking internally.
pub trait QualityScorer: Send + Sync {
    /// Returns the name of this scorer.
    fn name(&self) -> &'static str;

    /// Assesses one metrics triple.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be scored.
    fn assess(&self, metrics: Metrics) -> anyhow::Result<Assessment>;
}
