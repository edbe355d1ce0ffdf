//! Mamdani fuzzy inference.
//!
//! Membership functions and linguistic variables describe the inputs and
//! output, rules combine term degrees with min (AND) and max (OR), and a
//! [`Simulation`] runs fuzzify -> activate -> aggregate -> defuzzify over a
//! shared, immutable [`ControlSystem`].

mod defuzz;
mod error;
mod membership;
mod rule;
mod simulation;
mod system;
mod universe;
mod variable;

pub use defuzz::Defuzzifier;
pub use error::{FuzzyError, FuzzyResult};
pub use membership::MembershipFunction;
pub use rule::{Antecedent, Rule, TermRef};
pub use simulation::{InferenceTrace, Simulation};
pub use system::{ControlSystem, ControlSystemBuilder};
pub use universe::Universe;
pub use variable::{LinguisticVariable, Term};
