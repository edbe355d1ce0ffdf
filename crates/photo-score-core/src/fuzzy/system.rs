//! Validated, immutable fuzzy control systems.

use tracing::debug;

use super::defuzz::Defuzzifier;
use super::error::{FuzzyError, FuzzyResult};
use super::rule::{Antecedent, CompiledAntecedent, Rule};
use super::variable::LinguisticVariable;

/// A rule with every name resolved against the system's variables.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) antecedent: CompiledAntecedent,
    /// Index of the consequent term.
    pub(crate) term: usize,
}

/// Mamdani control system: antecedents, one consequent and a fixed rule base.
///
/// Built once through [`ControlSystemBuilder`]; a system that exists is
/// fully validated. Share it between evaluators with an `Arc`.
#[derive(Debug, Clone)]
pub struct ControlSystem {
    antecedents: Vec<LinguisticVariable>,
    consequent: LinguisticVariable,
    rules: Vec<Rule>,
    pub(crate) compiled: Vec<CompiledRule>,
    /// Consequent term curves sampled over the consequent universe.
    pub(crate) consequent_curves: Vec<Vec<f64>>,
    defuzzifier: Defuzzifier,
}

impl ControlSystem {
    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> ControlSystemBuilder {
        ControlSystemBuilder::default()
    }

    /// Input variables in declaration order.
    #[must_use]
    pub fn antecedents(&self) -> &[LinguisticVariable] {
        &self.antecedents
    }

    /// Position of an input variable.
    #[must_use]
    pub fn antecedent_index(&self, name: &str) -> Option<usize> {
        self.antecedents.iter().position(|v| v.name() == name)
    }

    /// Output variable.
    #[must_use]
    pub const fn consequent(&self) -> &LinguisticVariable {
        &self.consequent
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Defuzzification method.
    #[must_use]
    pub const fn defuzzifier(&self) -> Defuzzifier {
        self.defuzzifier
    }
}

/// Builder for [`ControlSystem`].
#[derive(Debug, Default)]
pub struct ControlSystemBuilder {
    antecedents: Vec<LinguisticVariable>,
    consequent: Option<LinguisticVariable>,
    rules: Vec<Rule>,
    defuzzifier: Defuzzifier,
}

impl ControlSystemBuilder {
    /// Adds an input variable.
    #[must_use]
    pub fn antecedent(mut self, variable: LinguisticVariable) -> Self {
        self.antecedents.push(variable);
        self
    }

    /// Sets the output variable.
    #[must_use]
    pub fn consequent(mut self, variable: LinguisticVariable) -> Self {
        self.consequent = Some(variable);
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends several rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the defuzzification method (centroid by default).
    #[must_use]
    pub const fn defuzzifier(mut self, defuzzifier: Defuzzifier) -> Self {
        self.defuzzifier = defuzzifier;
        self
    }

    /// Validates everything and produces the system.
    ///
    /// # Errors
    ///
    /// Fails on a missing consequent, duplicate variable names, an empty
    /// rule base, or any rule that references an unknown variable or term,
    /// uses a variable in the wrong role, or contains an empty AND/OR.
    pub fn build(self) -> FuzzyResult<ControlSystem> {
        let consequent = self.consequent.ok_or(FuzzyError::MissingConsequent)?;

        let mut names: Vec<&str> = Vec::with_capacity(self.antecedents.len() + 1);
        for name in self
            .antecedents
            .iter()
            .map(LinguisticVariable::name)
            .chain(std::iter::once(consequent.name()))
        {
            if names.contains(&name) {
                return Err(FuzzyError::DuplicateVariable {
                    variable: name.to_string(),
                });
            }
            names.push(name);
        }

        if self.rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase);
        }

        let compiled = self
            .rules
            .iter()
            .map(|rule| compile_rule(rule, &self.antecedents, &consequent))
            .collect::<FuzzyResult<Vec<_>>>()?;

        let consequent_curves = consequent
            .terms()
            .iter()
            .map(|t| t.function().sample(consequent.universe()))
            .collect();

        debug!(
            "Built control system: {} antecedents, {} rules, {} output samples",
            self.antecedents.len(),
            compiled.len(),
            consequent.universe().len()
        );

        Ok(ControlSystem {
            antecedents: self.antecedents,
            consequent,
            rules: self.rules,
            compiled,
            consequent_curves,
            defuzzifier: self.defuzzifier,
        })
    }
}

fn compile_rule(
    rule: &Rule,
    antecedents: &[LinguisticVariable],
    consequent: &LinguisticVariable,
) -> FuzzyResult<CompiledRule> {
    let target = rule.consequent();
    if target.variable != consequent.name() {
        return Err(if antecedents.iter().any(|v| v.name() == target.variable) {
            FuzzyError::NotConsequent {
                variable: target.variable.clone(),
            }
        } else {
            FuzzyError::UnknownVariable {
                variable: target.variable.clone(),
            }
        });
    }
    let term = consequent
        .term_index(&target.term)
        .ok_or_else(|| FuzzyError::UnknownTerm {
            variable: target.variable.clone(),
            term: target.term.clone(),
        })?;

    let antecedent = compile_antecedent(rule.antecedent(), antecedents, consequent)?;
    Ok(CompiledRule { antecedent, term })
}

fn compile_antecedent(
    expr: &Antecedent,
    antecedents: &[LinguisticVariable],
    consequent: &LinguisticVariable,
) -> FuzzyResult<CompiledAntecedent> {
    match expr {
        Antecedent::Is(r) => {
            let Some(variable) = antecedents.iter().position(|v| v.name() == r.variable) else {
                return Err(if consequent.name() == r.variable {
                    FuzzyError::NotAntecedent {
                        variable: r.variable.clone(),
                    }
                } else {
                    FuzzyError::UnknownVariable {
                        variable: r.variable.clone(),
                    }
                });
            };
            let term = antecedents[variable].term_index(&r.term).ok_or_else(|| {
                FuzzyError::UnknownTerm {
                    variable: r.variable.clone(),
                    term: r.term.clone(),
                }
            })?;
            Ok(CompiledAntecedent::Leaf { variable, term })
        }
        Antecedent::And(operands) | Antecedent::Or(operands) => {
            if operands.is_empty() {
                return Err(FuzzyError::EmptyExpression);
            }
            let compiled = operands
                .iter()
                .map(|o| compile_antecedent(o, antecedents, consequent))
                .collect::<FuzzyResult<Vec<_>>>()?;
            Ok(match expr {
                Antecedent::And(_) => CompiledAntecedent::And(compiled),
                _ => CompiledAntecedent::Or(compiled),
            })
        }
    }
}
