//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod clock;
mod metrics_source;
mod progress;
mod report_output;

pub use clock::Clock;
pub use metrics_source::MetricsSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use report_output::ReportOutput;
