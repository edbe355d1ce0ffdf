//! Error types for fuzzy system construction and evaluation.

use thiserror::Error;

/// Errors raised while building or driving a fuzzy control system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("membership control points must be non-decreasing, got {points:?}")]
    NonMonotonic { points: Vec<f64> },

    #[error("membership control points must be finite, got {points:?}")]
    NonFinite { points: Vec<f64> },

    #[error("term '{term}' is defined twice in variable '{variable}'")]
    DuplicateTerm { variable: String, term: String },

    #[error("variable '{variable}' is defined twice")]
    DuplicateVariable { variable: String },

    #[error("unknown variable '{variable}'")]
    UnknownVariable { variable: String },

    #[error("unknown term '{term}' in variable '{variable}'")]
    UnknownTerm { variable: String, term: String },

    #[error("AND/OR expression has no operands")]
    EmptyExpression,

    #[error("variable '{variable}' is not an antecedent")]
    NotAntecedent { variable: String },

    #[error("variable '{variable}' is not the consequent")]
    NotConsequent { variable: String },

    #[error("control system has no consequent variable")]
    MissingConsequent,

    #[error("control system has no rules")]
    EmptyRuleBase,

    #[error("no input value set for '{variable}'")]
    MissingInput { variable: String },

    #[error("input '{variable}' must be finite, got {value}")]
    NonFiniteInput { variable: String, value: f64 },
}

/// Result type for fuzzy operations.
pub type FuzzyResult<T> = Result<T, FuzzyError>;
