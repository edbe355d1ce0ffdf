//! Progress reporting port for UI integration.

use crate::domain::ScoreReport;

/// Events emitted during scoring for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Scoring started for a record.
    Started {
        /// Record label.
        label: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total records in batch, if known.
        total: Option<usize>,
    },
    /// Scoring completed for a record, successfully or with the fallback.
    Completed {
        /// The score report.
        report: ScoreReport,
    },
    /// A record could not be read and was skipped.
    Skipped {
        /// Record label, or the source position if none was readable.
        label: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All records have been processed.
    Finished {
        /// Records scored by the engine.
        scored: usize,
        /// Records that received the fallback score.
        failed: usize,
        /// Records skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
