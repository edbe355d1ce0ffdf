//! Linguistic variables and the eight-rule base.

use crate::fuzzy::{
    Antecedent, ControlSystem, FuzzyResult, LinguisticVariable, MembershipFunction, Rule,
    TermRef, Universe,
};

use super::QualityConfig;

/// Sharpness antecedent; terms `low`, `medium`, `high`.
pub const SHARPNESS: &str = "sharpness";
/// Contrast antecedent; terms `low`, `normal`, `high`.
pub const CONTRAST: &str = "contrast";
/// Exposure antecedent; terms `dark`, `correct`, `bright`.
pub const EXPOSURE: &str = "exposure";
/// Quality consequent; terms `poor`, `acceptable`, `excellent`.
pub const QUALITY: &str = "quality";

/// Bounds of every input universe.
pub const INPUT_RANGE: (f64, f64) = (0.0, 10.0);
/// Bounds of the output universe.
pub const OUTPUT_RANGE: (f64, f64) = (0.0, 100.0);

/// Input variable with the shared low / middle / high triangle layout.
fn input_variable(name: &str, terms: [&str; 3], step: f64) -> FuzzyResult<LinguisticVariable> {
    let (lo, hi) = INPUT_RANGE;
    let mid = (lo + hi) / 2.0;
    let [low, middle, high] = terms;

    LinguisticVariable::new(name, Universe::new(lo, hi, step)?)
        .with_term(low, MembershipFunction::triangular(lo, lo, mid)?)?
        .with_term(middle, MembershipFunction::triangular(lo, mid, hi)?)?
        .with_term(high, MembershipFunction::triangular(mid, hi, hi)?)
}

fn quality_variable(step: f64) -> FuzzyResult<LinguisticVariable> {
    let (lo, hi) = OUTPUT_RANGE;

    LinguisticVariable::new(QUALITY, Universe::new(lo, hi, step)?)
        .with_term("poor", MembershipFunction::trapezoidal(0.0, 0.0, 30.0, 50.0)?)?
        .with_term("acceptable", MembershipFunction::triangular(30.0, 60.0, 90.0)?)?
        .with_term(
            "excellent",
            MembershipFunction::trapezoidal(70.0, 90.0, 100.0, 100.0)?,
        )
}

fn is(variable: &str, term: &str) -> Antecedent {
    Antecedent::is(variable, term)
}

fn then(term: &str) -> TermRef {
    TermRef::new(QUALITY, term)
}

/// The eight rules, in their canonical order.
#[must_use]
pub fn rule_base() -> Vec<Rule> {
    vec![
        Rule::new(is(SHARPNESS, "low").or(is(CONTRAST, "low")), then("poor")),
        Rule::new(
            is(SHARPNESS, "high").and(is(CONTRAST, "high")),
            then("excellent"),
        ),
        Rule::new(
            is(EXPOSURE, "dark").or(is(EXPOSURE, "bright")),
            then("poor"),
        ),
        Rule::new(
            is(SHARPNESS, "medium")
                .and(is(CONTRAST, "normal"))
                .and(is(EXPOSURE, "correct")),
            then("acceptable"),
        ),
        Rule::new(
            is(SHARPNESS, "high")
                .and(is(CONTRAST, "normal"))
                .and(is(EXPOSURE, "correct")),
            then("excellent"),
        ),
        Rule::new(
            is(SHARPNESS, "medium").or(is(CONTRAST, "normal")),
            then("acceptable"),
        ),
        Rule::new(is(SHARPNESS, "low").and(is(EXPOSURE, "dark")), then("poor")),
        Rule::new(
            is(CONTRAST, "high").and(is(EXPOSURE, "bright")),
            then("poor"),
        ),
    ]
}

/// Builds the photo quality control system.
///
/// # Errors
///
/// Fails if either sampling step in `config` is not a valid universe step.
pub fn build_system(config: &QualityConfig) -> FuzzyResult<ControlSystem> {
    ControlSystem::builder()
        .antecedent(input_variable(
            SHARPNESS,
            ["low", "medium", "high"],
            config.input_step,
        )?)
        .antecedent(input_variable(
            CONTRAST,
            ["low", "normal", "high"],
            config.input_step,
        )?)
        .antecedent(input_variable(
            EXPOSURE,
            ["dark", "correct", "bright"],
            config.input_step,
        )?)
        .consequent(quality_variable(config.output_step)?)
        .rules(rule_base())
        .defuzzifier(config.defuzzifier)
        .build()
}
