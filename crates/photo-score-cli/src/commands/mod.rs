//! CLI command definitions and handlers.

pub mod rules;
pub mod score;

use clap::{Parser, Subcommand};

/// Photo Score - fuzzy-logic aesthetic quality scoring for photographs
#[derive(Parser)]
#[command(name = "photo-score")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared score arguments (paths, inline metrics, flags).
    #[command(flatten)]
    pub score: score::ScoreArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score photos from their sharpness, contrast and exposure
    Score(score::ScoreArgs),
    /// Print the membership functions and rule base
    Rules(rules::RulesArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every photo scored at or above the threshold.
    Success = 0,
    /// At least one photo scored below `--min-quality`.
    BelowThreshold = 1,
    /// Invalid usage or a fatal error.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
