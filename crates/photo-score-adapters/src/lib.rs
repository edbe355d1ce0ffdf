//! Photo Score Adapters - External adapters for photo-score.
//!
//! This crate provides adapters for:
//! - Filesystem metrics source (JSON and JSON Lines)
//! - In-memory metrics source

pub mod fs;
pub mod memory;

pub use fs::FsMetricsSource;
pub use memory::StaticMetricsSource;
