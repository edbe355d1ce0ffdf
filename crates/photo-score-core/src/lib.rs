//! Photo Score Core - fuzzy inference engine and scoring pipeline
//!
//! This crate contains a small Mamdani fuzzy inference engine, the photo
//! quality rule base built on it, the domain types for score reports, and
//! the ports the batch pipeline is written against.

pub mod domain;
pub mod fuzzy;
pub mod pipeline;
pub mod ports;
pub mod quality;

pub use domain::{
    Metrics, MetricsRecord, QualityBand, QualityScorer, RuleActivation, ScoreReport, ScoreStatus,
};
pub use pipeline::{score_all, BatchSummary, ScoreOptions};
pub use ports::{Clock, MetricsSource, ProgressEvent, ProgressSink, ReportOutput};
pub use quality::{
    Assessment, EnginePool, QualityConfig, QualityEngine, SharedEngine, FALLBACK_QUALITY,
};
