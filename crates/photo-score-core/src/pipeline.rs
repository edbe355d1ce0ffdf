//! Batch scoring over the ports.

use tracing::{debug, warn};

use crate::domain::{QualityScorer, ScoreReport};
use crate::ports::{Clock, MetricsSource, ProgressEvent, ProgressSink, ReportOutput};

/// Per-batch options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreOptions {
    /// Scores strictly below this count towards `below_threshold`.
    pub min_quality: Option<f64>,
    /// Attach rule activations to each report.
    pub explain: bool,
}

/// Counts gathered over one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records scored by the engine.
    pub scored: usize,
    /// Records that received the fallback score.
    pub failed: usize,
    /// Records that could not be read.
    pub skipped: usize,
    /// Scored records under `min_quality`.
    pub below_threshold: usize,
}

impl BatchSummary {
    /// Records that produced a report.
    #[must_use]
    pub const fn reported(&self) -> usize {
        self.scored + self.failed
    }
}

/// Scores every record in `source`, writing one report per readable record.
///
/// Unreadable records are skipped. A scorer failure yields a fallback
/// report with status `error` and does not abort the batch. Failed
/// reports never count as below the threshold.
///
/// # Errors
///
/// Returns an error only if writing or flushing `output` fails.
pub fn score_all(
    source: &dyn MetricsSource,
    scorer: &dyn QualityScorer,
    output: &dyn ReportOutput,
    progress: &dyn ProgressSink,
    clock: &dyn Clock,
    options: ScoreOptions,
) -> anyhow::Result<BatchSummary> {
    let total = source.count_hint();
    let mut summary = BatchSummary::default();
    debug!("Scoring with {} scorer", scorer.name());

    for (index, record) in source.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    label: format!("record {index}"),
                    reason: format!("{e:#}"),
                });
                summary.skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            label: record.label.clone(),
            index,
            total,
        });

        let report = match scorer.assess(record.metrics) {
            Ok(assessment) => {
                summary.scored += 1;
                if options.min_quality.is_some_and(|min| assessment.quality < min) {
                    summary.below_threshold += 1;
                }
                ScoreReport::success(
                    record.label,
                    clock.now_rfc3339(),
                    record.metrics,
                    assessment,
                    options.explain,
                )
            }
            Err(e) => {
                warn!("Scoring failed for {}: {e:#}", record.label);
                summary.failed += 1;
                ScoreReport::failure(record.label, clock.now_rfc3339(), record.metrics, &e)
            }
        };

        output.write(&report)?;
        progress.on_event(ProgressEvent::Completed { report });
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        scored: summary.scored,
        failed: summary.failed,
        skipped: summary.skipped,
    });

    Ok(summary)
}
