//! Aesthetic quality scoring on top of the fuzzy engine.
//!
//! Three antecedents (`sharpness`, `contrast`, `exposure`, each on `[0, 10]`)
//! feed eight fixed rules that conclude on `quality` (`[0, 100]`).

mod engine;
mod rules;
mod shared;

pub use engine::{Assessment, QualityConfig, QualityEngine};
pub use rules::{
    build_system, rule_base, CONTRAST, EXPOSURE, INPUT_RANGE, OUTPUT_RANGE, QUALITY, SHARPNESS,
};
pub use shared::{EnginePool, SharedEngine};

/// Quality reported when a score cannot be computed.
///
/// The midpoint of the output range, chosen as a neutral value for callers
/// that must always return a number. It is a product decision, not a result
/// of the rule base.
pub const FALLBACK_QUALITY: f64 = 50.0;
