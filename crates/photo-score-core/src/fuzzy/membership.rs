//! Piecewise-linear membership functions.

use std::fmt;

use super::error::{FuzzyError, FuzzyResult};
use super::universe::Universe;

/// Maps a universe value to a degree of membership in `[0, 1]`.
///
/// Construct through [`MembershipFunction::triangular`] or
/// [`MembershipFunction::trapezoidal`], which reject non-finite or
/// decreasing control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFunction {
    /// Zero at `a`, peak at `b`, zero again at `c`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Zero at `a`, plateau over `[b, c]`, zero again at `d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Creates a triangular function.
    ///
    /// `a == b` or `b == c` gives a right triangle with a vertical edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are non-finite or not non-decreasing.
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        validate_points(&[a, b, c])?;
        Ok(Self::Triangular { a, b, c })
    }

    /// Creates a trapezoidal function.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are non-finite or not non-decreasing.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        validate_points(&[a, b, c, d])?;
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Degree of membership of `x`.
    #[must_use]
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => trapezoid(a, b, b, c, x),
            Self::Trapezoidal { a, b, c, d } => trapezoid(a, b, c, d, x),
        }
    }

    /// Evaluates the function at every sample of `universe`.
    #[must_use]
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.samples().iter().map(|&x| self.degree(x)).collect()
    }

    /// Interval outside of which membership is zero.
    #[must_use]
    pub const fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// Interval on which membership is one.
    #[must_use]
    pub const fn peak(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { b, .. } => (b, b),
            Self::Trapezoidal { b, c, .. } => (b, c),
        }
    }
}

impl fmt::Display for MembershipFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangular { a, b, c } => write!(f, "triangular({a}, {b}, {c})"),
            Self::Trapezoidal { a, b, c, d } => write!(f, "trapezoidal({a}, {b}, {c}, {d})"),
        }
    }
}

/// Shared shape: a triangle is a trapezoid with a single-point plateau.
///
/// Rise and fall segments are only divided when strictly positive in width;
/// a zero-width edge falls through to the plateau branch and acts as a step.
fn trapezoid(a: f64, b: f64, c: f64, d: f64, x: f64) -> f64 {
    if x.is_nan() || x < a || x > d {
        return 0.0;
    }
    if x >= b && x <= c {
        return 1.0;
    }
    if x < b {
        // a <= x < b, so b > a
        (x - a) / (b - a)
    } else {
        // c < x <= d, so d > c
        (d - x) / (d - c)
    }
}

fn validate_points(points: &[f64]) -> FuzzyResult<()> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(FuzzyError::NonFinite {
            points: points.to_vec(),
        });
    }
    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(FuzzyError::NonMonotonic {
            points: points.to_vec(),
        });
    }
    Ok(())
}
