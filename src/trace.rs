//! Step sinks: the accumulating [`Trace`] and the discarding [`NullSink`].
//!
//! A `Trace` is append-only. Steps are owned values, so anything an
//! algorithm wants to snapshot (an array, a DP table) is cloned into the step
//! when it is recorded and later mutation of the engine state cannot reach it.

use serde::Serialize;

use crate::traits::StepSink;

/// Ordered, append-only log of the steps of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    steps: Vec<S>,
}

impl<S> Trace<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Number of recorded steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recorded steps in replay order.
    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    /// Take ownership of the steps, e.g. to post-process them.
    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StepSink<S> for Trace<S> {
    #[inline]
    fn record_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> S,
    {
        self.steps.push(make());
    }

    #[inline]
    fn is_recording(&self) -> bool {
        true
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Sink for silent runs; step closures are never invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<S> StepSink<S> for NullSink {
    #[inline]
    fn record_with<F>(&mut self, _make: F)
    where
        F: FnOnce() -> S,
    {
    }

    #[inline]
    fn is_recording(&self) -> bool {
        false
    }
}
