//! Core trait definitions shared by every algorithm in the crate.
//!
//! An algorithm is a struct holding one validated problem instance (an
//! array, a graph, a pair of strings, ...). It implements [`TracedAlgorithm`]
//! by running to completion while reporting its state transitions to a
//! [`StepSink`].
//!
//! The sink is the only difference between a silent run and a traced run:
//! - [`NullSink`](crate::trace::NullSink) discards steps without building them,
//! - [`Trace`](crate::trace::Trace) appends every step in order.
//!
//! The algorithm itself is written once and never knows which one it got.

use serde::Serialize;

/// Receiver for the step records an algorithm emits while it runs.
///
/// Steps are handed over as closures so a sink that is not recording never
/// pays for building snapshots. A recording sink must call `make` exactly
/// once per call and keep the result in call order.
pub trait StepSink<S> {
    /// Append the step produced by `make`.
    fn record_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> S;

    /// Whether steps handed to this sink are kept.
    fn is_recording(&self) -> bool;
}

/// A single deterministic algorithm run over a fixed problem instance.
///
/// Semantics:
/// - `execute` runs to completion; it cannot fail because all validation
///   happens when the instance is constructed.
/// - Steps are emitted synchronously, in the order the state transitions
///   happen, so the recorded trace replays the run.
/// - Running twice on the same instance yields the same outcome and the
///   same steps.
pub trait TracedAlgorithm {
    /// One recorded state transition.
    type Step: Serialize + Describe + Clone;

    /// Final answer of the run.
    type Outcome: Serialize + Summary;

    /// Display name, also used as the `algorithm` key of JSON reports.
    fn name(&self) -> &'static str;

    /// Run the algorithm, reporting steps to `sink`.
    fn execute<S: StepSink<Self::Step>>(&self, sink: &mut S) -> Self::Outcome;
}

/// Human-readable view of a step record.
pub trait Describe {
    /// Short discriminant, e.g. `compare` or `relax`.
    fn kind(&self) -> &'static str;

    /// One-line explanation of the transition.
    fn description(&self) -> &str;
}

/// Text rendering of an outcome as `key: value` lines.
pub trait Summary {
    fn summary(&self) -> Vec<(&'static str, String)>;
}

/// Join any displayable values with `, `.
pub(crate) fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join optional values, rendering `None` as `INF`.
pub(crate) fn join_optional<T: std::fmt::Display>(values: &[Option<T>]) -> String {
    values
        .iter()
        .map(|v| match v {
            Some(v) => v.to_string(),
            None => "INF".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_formats_lists() {
        assert_eq!(join::<i32>(&[]), "");
        assert_eq!(join(&[1, 2, 3]), "1, 2, 3");
    }

    #[test]
    fn join_optional_marks_infinity() {
        assert_eq!(join_optional(&[Some(0), None, Some(7)]), "0, INF, 7");
    }
}
