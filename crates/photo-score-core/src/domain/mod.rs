//! Core domain types for photo scoring.

mod metrics;
mod report;
mod scorer;

pub use metrics::{Metrics, MetricsRecord};
pub use report::{QualityBand, RuleActivation, ScoreReport, ScoreStatus};
pub use scorer::QualityScorer;
