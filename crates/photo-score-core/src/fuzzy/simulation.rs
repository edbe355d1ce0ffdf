//! Stateful evaluation of a control system.

use std::sync::Arc;

use tracing::{trace, warn};

use super::error::{FuzzyError, FuzzyResult};
use super::system::ControlSystem;

/// Intermediate results of the last [`Simulation::compute`].
///
/// `degrees` follows antecedent order, `rule_strengths` rule order and
/// `term_levels` consequent term order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceTrace<'a> {
    pub degrees: &'a [Vec<f64>],
    pub rule_strengths: &'a [f64],
    pub term_levels: &'a [f64],
    pub aggregated: &'a [f64],
    pub fallback_used: bool,
}

/// Evaluator bound to one [`ControlSystem`].
///
/// Holds the current crisp inputs, the last crisp output and the
/// intermediate buffers of the most recent [`compute`](Self::compute).
/// Inputs fully determine the output; buffers are only reused to avoid
/// allocating per call. A `Simulation` is not meant to be shared: give each
/// thread its own clone, or put it behind a lock.
#[derive(Debug, Clone)]
pub struct Simulation {
    system: Arc<ControlSystem>,
    inputs: Vec<Option<f64>>,
    output: Option<f64>,
    degrees: Vec<Vec<f64>>,
    rule_strengths: Vec<f64>,
    term_levels: Vec<f64>,
    aggregated: Vec<f64>,
    fallback_used: bool,
}

impl Simulation {
    /// Creates an evaluator with no inputs set.
    #[must_use]
    pub fn new(system: Arc<ControlSystem>) -> Self {
        let inputs = vec![None; system.antecedents().len()];
        let degrees = system
            .antecedents()
            .iter()
            .map(|v| Vec::with_capacity(v.terms().len()))
            .collect();
        let rule_strengths = vec![0.0; system.rules().len()];
        let term_levels = vec![0.0; system.consequent().terms().len()];
        let aggregated = vec![0.0; system.consequent().universe().len()];

        Self {
            system,
            inputs,
            output: None,
            degrees,
            rule_strengths,
            term_levels,
            aggregated,
            fallback_used: false,
        }
    }

    /// The system being evaluated.
    #[must_use]
    pub const fn system(&self) -> &Arc<ControlSystem> {
        &self.system
    }

    /// Sets a crisp input, clamped to the variable's universe.
    ///
    /// # Errors
    ///
    /// Returns an error if `variable` is not an antecedent or `value` is
    /// NaN or infinite.
    pub fn set_input(&mut self, variable: &str, value: f64) -> FuzzyResult<()> {
        let index = self
            .system
            .antecedent_index(variable)
            .ok_or_else(|| FuzzyError::UnknownVariable {
                variable: variable.to_string(),
            })?;
        if !value.is_finite() {
            return Err(FuzzyError::NonFiniteInput {
                variable: variable.to_string(),
                value,
            });
        }
        let clamped = self.system.antecedents()[index].universe().clamp(value);
        self.inputs[index] = Some(clamped);
        Ok(())
    }

    /// Current (clamped) input value.
    #[must_use]
    pub fn input(&self, variable: &str) -> Option<f64> {
        self.system
            .antecedent_index(variable)
            .and_then(|i| self.inputs[i])
    }

    /// Clears inputs, output and intermediate state.
    pub fn reset(&mut self) {
        self.inputs.fill(None);
        self.output = None;
        self.rule_strengths.fill(0.0);
        self.term_levels.fill(0.0);
        self.aggregated.fill(0.0);
        self.fallback_used = false;
        for d in &mut self.degrees {
            d.clear();
        }
    }

    /// Runs fuzzification, rule activation, aggregation and
    /// defuzzification over the current inputs.
    ///
    /// When no rule fires the aggregated set is empty and the output falls
    /// back to the midpoint of the consequent universe; see
    /// [`fallback_used`](Self::fallback_used).
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::MissingInput`] if any antecedent has no value.
    pub fn compute(&mut self) -> FuzzyResult<f64> {
        let Self {
            system,
            inputs,
            output,
            degrees,
            rule_strengths,
            term_levels,
            aggregated,
            fallback_used,
        } = self;

        for ((variable, value), out) in system
            .antecedents()
            .iter()
            .zip(inputs.iter())
            .zip(degrees.iter_mut())
        {
            let value = value.ok_or_else(|| FuzzyError::MissingInput {
                variable: variable.name().to_string(),
            })?;
            variable.fuzzify_into(value, out);
        }

        // Clipping each rule's term at its own strength and taking the max
        // equals clipping once at the strongest rule for that term.
        term_levels.fill(0.0);
        for (rule, strength) in system.compiled.iter().zip(rule_strengths.iter_mut()) {
            *strength = rule.antecedent.evaluate(degrees);
            term_levels[rule.term] = term_levels[rule.term].max(*strength);
        }

        aggregated.fill(0.0);
        for (curve, &level) in system.consequent_curves.iter().zip(term_levels.iter()) {
            if level <= 0.0 {
                continue;
            }
            for (agg, &mu) in aggregated.iter_mut().zip(curve) {
                *agg = agg.max(mu.min(level));
            }
        }

        let universe = system.consequent().universe();
        let crisp = match system
            .defuzzifier()
            .defuzzify(universe.samples(), aggregated)
        {
            Some(value) => {
                *fallback_used = false;
                value
            }
            None => {
                warn!(
                    "No rule fired for inputs {:?}; using midpoint {}",
                    inputs,
                    universe.midpoint()
                );
                *fallback_used = true;
                universe.midpoint()
            }
        };

        trace!("Rule strengths {:?} -> {}", rule_strengths, crisp);
        *output = Some(crisp);
        Ok(crisp)
    }

    /// Crisp output of the last successful [`compute`](Self::compute).
    #[must_use]
    pub const fn output(&self) -> Option<f64> {
        self.output
    }

    /// Term degrees of an input variable from the last compute.
    #[must_use]
    pub fn degrees(&self, variable: &str) -> Option<&[f64]> {
        self.system
            .antecedent_index(variable)
            .map(|i| self.degrees[i].as_slice())
    }

    /// Activation strength of every rule, in rule order.
    #[must_use]
    pub fn rule_strengths(&self) -> &[f64] {
        &self.rule_strengths
    }

    /// Strongest activation per consequent term, in term order.
    #[must_use]
    pub fn term_levels(&self) -> &[f64] {
        &self.term_levels
    }

    /// Aggregated output membership, one value per consequent sample.
    #[must_use]
    pub fn aggregated(&self) -> &[f64] {
        &self.aggregated
    }

    /// Whether the last output came from the empty-set fallback.
    #[must_use]
    pub const fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    /// Everything the last compute produced, borrowed in one view.
    #[must_use]
    pub fn trace(&self) -> InferenceTrace<'_> {
        InferenceTrace {
            degrees: &self.degrees,
            rule_strengths: &self.rule_strengths,
            term_levels: &self.term_levels,
            aggregated: &self.aggregated,
            fallback_used: self.fallback_used,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::fuzzy::{
        Antecedent, LinguisticVariable, MembershipFunction, Rule, TermRef, Universe,
    };

    /// One input whose only term covers [2, 4], so inputs elsewhere fire nothing.
    fn narrow_system() -> Arc<ControlSystem> {
        let x = LinguisticVariable::new("x", Universe::new(0.0, 10.0, 0.5).unwrap())
            .with_term("mid", MembershipFunction::triangular(2.0, 3.0, 4.0).unwrap())
            .unwrap();
        let y = LinguisticVariable::new("y", Universe::new(0.0, 100.0, 1.0).unwrap())
            .with_term("high", MembershipFunction::triangular(60.0, 80.0, 100.0).unwrap())
            .unwrap();
        Arc::new(
            ControlSystem::builder()
                .antecedent(x)
                .consequent(y)
                .rule(Rule::new(Antecedent::is("x", "mid"), TermRef::new("y", "high")))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_missing_input() {
        let mut sim = Simulation::new(narrow_system());
        assert_eq!(
            sim.compute().unwrap_err(),
            FuzzyError::MissingInput {
                variable: "x".into()
            }
        );
    }

    #[test]
    fn test_unknown_and_non_finite_input() {
        let mut sim = Simulation::new(narrow_system());
        assert!(matches!(
            sim.set_input("z", 1.0),
            Err(FuzzyError::UnknownVariable { .. })
        ));
        assert!(matches!(
            sim.set_input("x", f64::NAN),
            Err(FuzzyError::NonFiniteInput { .. })
        ));
        assert!(matches!(
            sim.set_input("x", f64::INFINITY),
            Err(FuzzyError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn test_input_is_clamped() {
        let mut sim = Simulation::new(narrow_system());
        sim.set_input("x", 25.0).unwrap();
        assert_eq!(sim.input("x"), Some(10.0));
        sim.set_input("x", -1.0).unwrap();
        assert_eq!(sim.input("x"), Some(0.0));
    }

    #[test]
    fn test_fired_rule_output() {
        let mut sim = Simulation::new(narrow_system());
        sim.set_input("x", 3.0).unwrap();
        let out = sim.compute().unwrap();
        assert!((out - 80.0).abs() < 1e-9, "symmetric triangle centroid, got {out}");
        assert!(!sim.fallback_used());
        assert_eq!(sim.rule_strengths(), &[1.0]);
        assert_eq!(sim.output(), Some(out));
    }

    #[test]
    fn test_no_rule_fires_falls_back_to_midpoint() {
        let mut sim = Simulation::new(narrow_system());
        sim.set_input("x", 9.0).unwrap();
        let out = sim.compute().unwrap();
        assert_eq!(out, 50.0);
        assert!(sim.fallback_used());
        assert!(sim.aggregated().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_trace_matches_accessors() {
        let mut sim = Simulation::new(narrow_system());
        sim.set_input("x", 2.5).unwrap();
        sim.compute().unwrap();

        let trace = sim.trace();
        assert_eq!(trace.degrees.len(), 1);
        assert_eq!(trace.degrees[0].as_slice(), sim.degrees("x").unwrap());
        assert_eq!(trace.rule_strengths, &[0.5]);
        assert_eq!(trace.term_levels, sim.term_levels());
        assert_eq!(trace.aggregated.len(), 101);
        assert!(!trace.fallback_used);
    }

    #[test]
    fn test_fallback_flag_clears_on_next_compute() {
        let mut sim = Simulation::new(narrow_system());
        sim.set_input("x", 9.0).unwrap();
        sim.compute().unwrap();
        sim.set_input("x", 3.5).unwrap();
        sim.compute().unwrap();
        assert!(!sim.fallback_used());
    }

    #[test]
    fn test_reset() {
        let mut sim = Simulation::new(narrow_system());
        sim.set_input("x", 3.0).unwrap();
        sim.compute().unwrap();
        sim.reset();
        assert_eq!(sim.output(), None);
        assert_eq!(sim.input("x"), None);
        assert!(sim.compute().is_err());
    }

    #[test]
    fn test_clones_are_independent() {
        let mut a = Simulation::new(narrow_system());
        a.set_input("x", 3.0).unwrap();
        let mut b = a.clone();
        b.set_input("x", 9.0).unwrap();
        assert_eq!(a.input("x"), Some(3.0));
        assert!(Arc::ptr_eq(a.system(), b.system()));
    }
}
