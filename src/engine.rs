//! Generic executor shared by every algorithm.
//!
//! The executor owns one [`TracedAlgorithm`] instance and runs it either
//! silently (with a [`NullSink`]) or with a fresh [`Trace`]. Nothing is kept
//! between runs, so calling [`Executor::run_traced`] twice gives two
//! independent, identical traces.

use crate::report::Report;
use crate::trace::{NullSink, Trace};
use crate::traits::TracedAlgorithm;

/// Runs a given algorithm instance `A`.
///
/// Typical usage:
/// ```
/// use algo_trace::{Executor, problems::knapsack::ZeroOneKnapsack};
/// use algo_trace::instance::Item;
///
/// let items = vec![
///     Item { value: 60, weight: 10 },
///     Item { value: 100, weight: 20 },
///     Item { value: 120, weight: 30 },
/// ];
/// let engine = Executor::new(ZeroOneKnapsack::new(items, 50));
/// let (outcome, trace) = engine.run_traced();
/// assert_eq!(outcome.max_value, 220);
/// assert!(!trace.is_empty());
/// ```
pub struct Executor<A: TracedAlgorithm> {
    algorithm: A,
}

impl<A: TracedAlgorithm> Executor<A> {
    pub fn new(algorithm: A) -> Self {
        Self { algorithm }
    }

    /// Expose the underlying algorithm instance.
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Give the instance back, e.g. to rerun it under another executor.
    pub fn into_inner(self) -> A {
        self.algorithm
    }

    /// Run without recording steps.
    pub fn run(&self) -> A::Outcome {
        let span = tracing::debug_span!(
            "execute",
            algorithm = self.algorithm.name(),
            traced = false
        );
        let _enter = span.enter();
        let outcome = self.algorithm.execute(&mut NullSink);
        tracing::debug!("run complete");
        outcome
    }

    /// Run with a fresh trace and return it alongside the outcome.
    pub fn run_traced(&self) -> (A::Outcome, Trace<A::Step>) {
        let span = tracing::debug_span!(
            "execute",
            algorithm = self.algorithm.name(),
            traced = true
        );
        let _enter = span.enter();
        let mut trace = Trace::new();
        let outcome = self.algorithm.execute(&mut trace);
        tracing::debug!(steps = trace.len(), "run complete");
        (outcome, trace)
    }

    /// Run and package the result for serialization.
    pub fn report(&self, traced: bool) -> Report<A::Outcome, A::Step> {
        if traced {
            let (outcome, trace) = self.run_traced();
            Report::new(self.algorithm.name(), outcome, Some(trace))
        } else {
            Report::new(self.algorithm.name(), self.run(), None)
        }
    }
}
