//! Metrics source port for reading photo statistics.

use crate::domain::MetricsRecord;

/// Port for reading metrics records from a source.
pub trait MetricsSource: Send + Sync {
    /// Returns an iterator over records from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a record fails to parse.
    fn records(&self) -> Box<dyn Iterator<Item = anyhow::Result<MetricsRecord>> + Send + '_>;

    /// Returns the total number of records, if known.
    fn count_hint(&self) -> Option<usize>;
}
