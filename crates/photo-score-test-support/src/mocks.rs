//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use photo_score_core::domain::{Metrics, MetricsRecord, QualityScorer, ScoreReport};
use photo_score_core::ports::{Clock, MetricsSource, ProgressEvent, ProgressSink, ReportOutput};
use photo_score_core::quality::Assessment;

/// Mock implementation of `MetricsSource` for testing.
///
/// Yields pre-built records, optionally interleaved with read errors, and
/// tracks iteration for assertions.
pub struct MockMetricsSource {
    entries: Vec<Result<MetricsRecord, String>>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockMetricsSource {
    /// Creates a new mock source with the given records.
    #[must_use]
    pub fn new(records: Vec<MetricsRecord>) -> Self {
        Self::with_entries(records.into_iter().map(Ok).collect())
    }

    /// Creates a source from records and read errors, in order.
    #[must_use]
    pub fn with_entries(entries: Vec<Result<MetricsRecord, String>>) -> Self {
        Self {
            entries,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl MetricsSource for MockMetricsSource {
    fn records(&self) -> Box<dyn Iterator<Item = anyhow::Result<MetricsRecord>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(
            self.entries
                .iter()
                .map(|entry| entry.clone().map_err(anyhow::Error::msg)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Mock implementation of `ReportOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockReportOutput {
    reports: Arc<Mutex<Vec<ScoreReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockReportOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<ScoreReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockReportOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportOutput for MockReportOutput {
    fn write(&self, report: &ScoreReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final `(scored, failed, skipped)` counts, if finished.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                scored,
                failed,
                skipped,
            } => Some((*scored, *failed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Clock returning a fixed timestamp.
pub struct FixedClock(pub &'static str);

impl Default for FixedClock {
    fn default() -> Self {
        Self("2024-01-01T00:00:00Z")
    }
}

impl Clock for FixedClock {
    fn now_rfc3339(&self) -> String {
        self.0.to_string()
    }
}

/// Scorer that fails for every input, or for one metrics triple only.
pub struct FailingScorer {
    message: String,
    only: Option<Metrics>,
    inner: Option<Box<dyn QualityScorer>>,
}

impl FailingScorer {
    /// Fails every assessment with `message`.
    #[must_use]
    pub fn always(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            only: None,
            inner: None,
        }
    }

    /// Fails only for `metrics`, delegating everything else to `inner`.
    #[must_use]
    pub fn on(metrics: Metrics, inner: Box<dyn QualityScorer>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            only: Some(metrics),
            inner: Some(inner),
        }
    }
}

impl QualityScorer for FailingScorer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn assess(&self, metrics: Metrics) -> anyhow::Result<Assessment> {
        match (&self.only, &self.inner) {
            (Some(target), Some(inner)) if *target != metrics => inner.assess(metrics),
            _ => anyhow::bail!("{}", self.message),
        }
    }
}
