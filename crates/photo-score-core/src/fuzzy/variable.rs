//! Linguistic variables and their terms.

use super::error::{FuzzyError, FuzzyResult};
use super::membership::MembershipFunction;
use super::universe::Universe;

/// A named fuzzy set inside a linguistic variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    name: String,
    function: MembershipFunction,
}

impl Term {
    /// Creates a term.
    #[must_use]
    pub fn new(name: impl Into<String>, function: MembershipFunction) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }

    /// Term name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership function defining the term.
    #[must_use]
    pub const fn function(&self) -> &MembershipFunction {
        &self.function
    }
}

/// A named scalar quantity bound to a universe and a set of terms.
///
/// Terms keep their insertion order; degrees returned by
/// [`LinguisticVariable::fuzzify`] are indexed the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    /// Creates a variable with no terms.
    #[must_use]
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    /// Adds a term, builder style.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::DuplicateTerm`] if a term with this name exists.
    pub fn with_term(
        mut self,
        name: impl Into<String>,
        function: MembershipFunction,
    ) -> FuzzyResult<Self> {
        let name = name.into();
        if self.term_index(&name).is_some() {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name,
                term: name,
            });
        }
        self.terms.push(Term::new(name, function));
        Ok(self)
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe of discourse.
    #[must_use]
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Looks up a term by name.
    #[must_use]
    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Position of a term by name.
    #[must_use]
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Membership degree of `x` in every term, after clamping to the universe.
    #[must_use]
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        let mut degrees = Vec::with_capacity(self.terms.len());
        self.fuzzify_into(x, &mut degrees);
        degrees
    }

    /// Like [`fuzzify`](Self::fuzzify), reusing `out`.
    pub fn fuzzify_into(&self, x: f64, out: &mut Vec<f64>) {
        let x = self.universe.clamp(x);
        out.clear();
        out.extend(self.terms.iter().map(|t| t.function.degree(x)));
    }
}
