//! Thread-safe wrappers around [`QualityEngine`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use super::engine::{Assessment, QualityConfig, QualityEngine};
use super::rules::build_system;
use crate::domain::{Metrics, QualityScorer};
use crate::fuzzy::{ControlSystem, FuzzyResult};

/// One engine behind a mutex.
///
/// Each evaluation holds the lock for the whole fuzzify-to-defuzzify
/// sequence, so concurrent callers are serialized.
#[derive(Debug)]
pub struct SharedEngine {
    engine: Mutex<QualityEngine>,
}

impl SharedEngine {
    /// Wraps an existing engine.
    #[must_use]
    pub const fn new(engine: QualityEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Builds an engine from `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the quality system cannot be built.
    pub fn build(config: &QualityConfig) -> FuzzyResult<Self> {
        QualityEngine::new(config).map(Self::new)
    }

    /// Evaluates `metrics` under the lock.
    ///
    /// # Errors
    ///
    /// Returns an error only for NaN or infinite metrics.
    pub fn evaluate(&self, metrics: Metrics) -> FuzzyResult<f64> {
        self.engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .evaluate(metrics)
    }

    /// Assesses `metrics` under the lock.
    ///
    /// # Errors
    ///
    /// Returns an error only for NaN or infinite metrics.
    pub fn assess(&self, metrics: Metrics) -> FuzzyResult<Assessment> {
        self.engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .assess(metrics)
    }
}

impl QualityScorer for SharedEngine {
    fn name(&self) -> &'static str {
        "shared"
    }

    fn assess(&self, metrics: Metrics) -> anyhow::Result<Assessment> {
        Ok(Self::assess(self, metrics)?)
    }
}

/// Several independent engines over one control system.
///
/// Callers pick engines round-robin and skip any that are busy, blocking
/// only when every engine is in use.
#[derive(Debug)]
pub struct EnginePool {
    engines: Vec<Mutex<QualityEngine>>,
    next: AtomicUsize,
}

impl EnginePool {
    /// Creates `size` evaluators (at least one) sharing `system`.
    #[must_use]
    pub fn new(system: &Arc<ControlSystem>, size: usize) -> Self {
        let engines = (0..size.max(1))
            .map(|_| Mutex::new(QualityEngine::from_system(Arc::clone(system))))
            .collect();
        Self {
            engines,
            next: AtomicUsize::new(0),
        }
    }

    /// Builds the quality system once and a pool of `size` evaluators.
    ///
    /// # Errors
    ///
    /// Returns an error if the quality system cannot be built.
    pub fn build(config: &QualityConfig, size: usize) -> FuzzyResult<Self> {
        let system = Arc::new(build_system(config)?);
        Ok(Self::new(&system, size))
    }

    /// Number of evaluators.
    #[must_use]
    pub fn size(&self) -> usize {
        self.engines.len()
    }

    fn with_engine<T>(&self, f: impl FnOnce(&mut QualityEngine) -> T) -> T {
        let len = self.engines.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed) % len;

        for offset in 0..len {
            match self.engines[(start + offset) % len].try_lock() {
                Ok(mut engine) => return f(&mut engine),
                Err(TryLockError::Poisoned(poisoned)) => return f(&mut poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => {}
            }
        }

        let mut engine = self.engines[start]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    /// Evaluates `metrics` on a free engine.
    ///
    /// # Errors
    ///
    /// Returns an error only for NaN or infinite metrics.
    pub fn evaluate(&self, metrics: Metrics) -> FuzzyResult<f64> {
        self.with_engine(|engine| engine.evaluate(metrics))
    }

    /// Assesses `metrics` on a free engine.
    ///
    /// # Errors
    ///
    /// Returns an error only for NaN or infinite metrics.
    pub fn assess(&self, metrics: Metrics) -> FuzzyResult<Assessment> {
        self.with_engine(|engine| engine.assess(metrics))
    }
}

impl QualityScorer for EnginePool {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn assess(&self, metrics: Metrics) -> anyhow::Result<Assessment> {
        Ok(Self::assess(self, metrics)?)
    }
}
