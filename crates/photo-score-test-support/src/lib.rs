//! Test support utilities for photo-score.
//!
//! Provides mocks, synthetic metrics builders, and utilities for testing
//! the photo-score scoring pipeline.
//!
//! # Example
//!
//! ```
//! use photo_score_test_support::{MetricsBuilder, MockMetricsSource};
//!
//! // Create synthetic records
//! let sharp = MetricsBuilder::sharp();
//! let blurry = MetricsBuilder::blurry();
//!
//! // Create mock metrics source
//! let source = MockMetricsSource::new(vec![sharp, blurry]);
//! ```

mod builders;
mod mocks;

pub use builders::MetricsBuilder;
pub use mocks::{
    FailingScorer, FixedClock, MockMetricsSource, MockProgressSink, MockReportOutput,
};
