//! Rule antecedents as explicit expression trees.

use std::fmt;

/// Reference to a term of a variable, e.g. `sharpness IS low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermRef {
    /// Variable name.
    pub variable: String,
    /// Term name within the variable.
    pub term: String,
}

impl TermRef {
    /// Creates a reference.
    #[must_use]
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for TermRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}", self.variable, self.term)
    }
}

/// Boolean combination of term references.
///
/// AND evaluates to the minimum of its operands, OR to the maximum.
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    /// A single `(variable, term)` degree.
    Is(TermRef),
    /// Fuzzy conjunction.
    And(Vec<Antecedent>),
    /// Fuzzy disjunction.
    Or(Vec<Antecedent>),
}

impl Antecedent {
    /// Leaf referencing `variable IS term`.
    #[must_use]
    pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self::Is(TermRef::new(variable, term))
    }

    /// Conjunction with `other`, appending to an existing AND node.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut operands) => {
                operands.push(other);
                Self::And(operands)
            }
            lhs => Self::And(vec![lhs, other]),
        }
    }

    /// Disjunction with `other`, appending to an existing OR node.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut operands) => {
                operands.push(other);
                Self::Or(operands)
            }
            lhs => Self::Or(vec![lhs, other]),
        }
    }

    /// All term references in the tree, left to right.
    #[must_use]
    pub fn term_refs(&self) -> Vec<&TermRef> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a TermRef>) {
        match self {
            Self::Is(term) => refs.push(term),
            Self::And(operands) | Self::Or(operands) => {
                for operand in operands {
                    operand.collect_refs(refs);
                }
            }
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Is(_) => write!(f, "{self}"),
            _ => write!(f, "({self})"),
        }
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (operands, op) = match self {
            Self::Is(term) => return write!(f, "{term}"),
            Self::And(operands) => (operands, " AND "),
            Self::Or(operands) => (operands, " OR "),
        };
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                f.write_str(op)?;
            }
            operand.fmt_operand(f)?;
        }
        Ok(())
    }
}

/// An implication `antecedent -> consequent term`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: Antecedent,
    consequent: TermRef,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(antecedent: Antecedent, consequent: TermRef) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// Condition side.
    #[must_use]
    pub const fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    /// Conclusion side.
    #[must_use]
    pub const fn consequent(&self) -> &TermRef {
        &self.consequent
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN {}", self.antecedent, self.consequent)
    }
}

/// Antecedent with names resolved to variable and term positions.
#[derive(Debug, Clone)]
pub(crate) enum CompiledAntecedent {
    Leaf { variable: usize, term: usize },
    And(Vec<CompiledAntecedent>),
    Or(Vec<CompiledAntecedent>),
}

impl CompiledAntecedent {
    /// Activation strength given per-variable term degrees.
    pub(crate) fn evaluate(&self, degrees: &[Vec<f64>]) -> f64 {
        match self {
            Self::Leaf { variable, term } => degrees[*variable][*term],
            Self::And(operands) => operands
                .iter()
                .map(|o| o.evaluate(degrees))
                .fold(1.0, f64::min),
            Self::Or(operands) => operands
                .iter()
                .map(|o| o.evaluate(degrees))
                .fold(0.0, f64::max),
        }
    }
}
