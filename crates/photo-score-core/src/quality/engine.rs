//! Single-threaded quality evaluator.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::rules::{build_system, CONTRAST, EXPOSURE, SHARPNESS};
use crate::domain::{Metrics, QualityBand, RuleActivation};
use crate::fuzzy::{ControlSystem, Defuzzifier, FuzzyResult, Simulation};

/// Construction parameters for the quality system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityConfig {
    /// Sampling step of the input universes.
    pub input_step: f64,
    /// Sampling step of the output universe.
    pub output_step: f64,
    /// Defuzzification method.
    pub defuzzifier: Defuzzifier,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            input_step: 0.1,
            output_step: 1.0,
            defuzzifier: Defuzzifier::Centroid,
        }
    }
}

/// Score plus the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Crisp quality on `[0, 100]`.
    pub quality: f64,
    /// Output term with the strongest activation.
    pub band: QualityBand,
    /// True if no rule fired and the midpoint was used.
    pub fallback_used: bool,
    /// Activation of every rule, in rule order.
    pub activations: Vec<RuleActivation>,
}

/// Evaluates photo metrics against the quality rule base.
///
/// Construction is the expensive step; build once and reuse. Evaluation
/// takes `&mut self`, so wrap in [`SharedEngine`](super::SharedEngine) or
/// [`EnginePool`](super::EnginePool) to share across threads.
#[derive(Debug, Clone)]
pub struct QualityEngine {
    simulation: Simulation,
}

impl QualityEngine {
    /// Builds the quality system and an evaluator for it.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` yields an invalid system; no partial
    /// engine is produced.
    pub fn new(config: &QualityConfig) -> FuzzyResult<Self> {
        let system = build_system(config)?;
        debug!(
            "Quality engine ready (input step {}, output step {}, {})",
            config.input_step, config.output_step, config.defuzzifier
        );
        Ok(Self::from_system(Arc::new(system)))
    }

    /// Creates an evaluator over an already built system.
    #[must_use]
    pub fn from_system(system: Arc<ControlSystem>) -> Self {
        Self {
            simulation: Simulation::new(system),
        }
    }

    /// The underlying control system.
    #[must_use]
    pub const fn system(&self) -> &Arc<ControlSystem> {
        self.simulation.system()
    }

    /// Computes the crisp quality for `metrics`.
    ///
    /// Out-of-range inputs are clamped to `[0, 10]`.
    ///
    /// # Errors
    ///
    /// Returns an error only for NaN or infinite metrics.
    pub fn evaluate(&mut self, metrics: Metrics) -> FuzzyResult<f64> {
        self.simulation.set_input(SHARPNESS, metrics.sharpness)?;
        self.simulation.set_input(CONTRAST, metrics.contrast)?;
        self.simulation.set_input(EXPOSURE, metrics.exposure)?;
        self.simulation.compute()
    }

    /// Like [`evaluate`](Self::evaluate), also reporting band and rule activations.
    ///
    /// # Errors
    ///
    /// Returns an error only for NaN or infinite metrics.
    pub fn assess(&mut self, metrics: Metrics) -> FuzzyResult<Assessment> {
        let quality = self.evaluate(metrics)?;
        let system = self.simulation.system();
        let trace = self.simulation.trace();

        let activations = system
            .rules()
            .iter()
            .zip(trace.rule_strengths)
            .enumerate()
            .map(|(i, (rule, &strength))| RuleActivation {
                rule: i + 1,
                consequent: rule.consequent().term.clone(),
                strength,
            })
            .collect();

        let mut strongest: Option<(usize, f64)> = None;
        for (i, &level) in trace.term_levels.iter().enumerate() {
            if level > 0.0 && strongest.map_or(true, |(_, best)| level > best) {
                strongest = Some((i, level));
            }
        }
        let band = strongest
            .and_then(|(i, _)| QualityBand::from_term(system.consequent().terms()[i].name()))
            .unwrap_or(QualityBand::Acceptable);

        Ok(Assessment {
            quality,
            band,
            fallback_used: trace.fallback_used,
            activations,
        })
    }
}
