//! Discretized domains for linguistic variables.

use super::error::{FuzzyError, FuzzyResult};

/// Upper bound on grid size; anything finer is a configuration mistake.
const MAX_SAMPLES: f64 = 1_000_000.0;

/// Tolerance when deciding whether `max` already lies on the grid.
const GRID_EPSILON: f64 = 1e-9;

/// A bounded, evenly sampled range of real numbers.
///
/// Samples are computed as `min + i * step` rather than by accumulation, and
/// the last sample is always exactly `max`, so integration over the grid does
/// not drift for steps like `0.1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    samples: Vec<f64>,
}

impl Universe {
    /// Creates a universe over `[min, max]` sampled every `step`.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::InvalidUniverse`] if any bound is non-finite,
    /// `min >= max`, `step <= 0`, or the grid would be unreasonably large.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(min: f64, max: f64, step: f64) -> FuzzyResult<Self> {
        let invalid = || FuzzyError::InvalidUniverse { min, max, step };

        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(invalid());
        }
        if min >= max || step <= 0.0 {
            return Err(invalid());
        }

        let span = (max - min) / step;
        if span > MAX_SAMPLES {
            return Err(invalid());
        }

        let rounded = span.round();
        let intervals = if (span - rounded).abs() < GRID_EPSILON {
            rounded
        } else {
            span.floor()
        } as usize;

        let mut samples: Vec<f64> = (0..=intervals).map(|i| min + step * i as f64).collect();
        match samples.last_mut() {
            Some(last) if (max - *last).abs() <= step * GRID_EPSILON => *last = max,
            _ => samples.push(max),
        }

        Ok(Self {
            min,
            max,
            step,
            samples,
        })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Sampling step.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Sample points in ascending order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of sample points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a valid universe has at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clamps `x` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Midpoint of the range.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Returns true if `x` lies within the bounds.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }
}
