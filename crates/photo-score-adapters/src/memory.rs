//! In-memory metrics source.

use anyhow::Result;
use photo_score_core::{MetricsRecord, MetricsSource};

/// Metrics source over records already in memory, such as values given on
/// the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticMetricsSource {
    records: Vec<MetricsRecord>,
}

impl StaticMetricsSource {
    /// Creates a source yielding `records` in order.
    #[must_use]
    pub const fn new(records: Vec<MetricsRecord>) -> Self {
        Self { records }
    }

    /// Creates a source with a single record.
    #[must_use]
    pub fn single(record: MetricsRecord) -> Self {
        Self::new(vec![record])
    }
}

impl MetricsSource for StaticMetricsSource {
    fn records(&self) -> Box<dyn Iterator<Item = Result<MetricsRecord>> + Send + '_> {
        Box::new(self.records.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.records.len())
    }
}
