//! Linear, binary, jump and exponential search.
//!
//! All but linear search need non-decreasing input; [`Search::new`] rejects
//! unsorted arrays for them. With duplicates the reported index is the one
//! the probe sequence hits first, not necessarily the leftmost.

use serde::Serialize;

use crate::error::InputError;
use crate::problems::sorting::is_sorted;
use crate::traits::{Describe, StepSink, Summary, TracedAlgorithm};
use crate::utils::jump_block_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Linear,
    Binary,
    Jump,
    Exponential,
}

impl SearchKind {
    pub fn name(&self) -> &'static str {
        match self {
            SearchKind::Linear => "Linear Search",
            SearchKind::Binary => "Binary Search",
            SearchKind::Jump => "Jump Search",
            SearchKind::Exponential => "Exponential Search",
        }
    }

    pub fn requires_sorted(&self) -> bool {
        !matches!(self, SearchKind::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStepKind {
    Probe,
    Range,
    Found,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStep {
    pub kind: SearchStepKind,
    pub index: Option<usize>,
    pub value: Option<i64>,
    /// Inclusive candidate range still under consideration.
    pub low: Option<usize>,
    pub high: Option<usize>,
    pub description: String,
}

impl Describe for SearchStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            SearchStepKind::Probe => "probe",
            SearchStepKind::Range => "range",
            SearchStepKind::Found => "found",
            SearchStepKind::NotFound => "not_found",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub array: Vec<i64>,
    pub target: i64,
    pub found: bool,
    pub index: Option<usize>,
    pub comparisons: usize,
}

impl Summary for SearchOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("target", self.target.to_string()),
            ("found", self.found.to_string()),
            (
                "index",
                self.index.map_or_else(|| "none".to_string(), |i| i.to_string()),
            ),
            ("comparisons", self.comparisons.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Search {
    kind: SearchKind,
    array: Vec<i64>,
    target: i64,
}

impl Search {
    pub fn new(kind: SearchKind, array: Vec<i64>, target: i64) -> Result<Self, InputError> {
        if kind.requires_sorted() && !is_sorted(&array) {
            return Err(InputError::Invalid(format!(
                "{} requires the array to be sorted in non-decreasing order",
                kind.name()
            )));
        }
        Ok(Self {
            kind,
            array,
            target,
        })
    }
}

impl TracedAlgorithm for Search {
    type Step = SearchStep;
    type Outcome = SearchOutcome;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn execute<S: StepSink<SearchStep>>(&self, sink: &mut S) -> SearchOutcome {
        let mut probe = Prober {
            a: &self.array,
            target: self.target,
            sink,
            comparisons: 0,
        };
        let index = match self.kind {
            SearchKind::Linear => probe.linear(),
            SearchKind::Binary => probe.binary(0, self.array.len()),
            SearchKind::Jump => probe.jump(),
            SearchKind::Exponential => probe.exponential(),
        };
        let target = self.target;
        match index {
            Some(i) => probe.sink.record_with(|| SearchStep {
                kind: SearchStepKind::Found,
                index: Some(i),
                value: Some(target),
                low: None,
                high: None,
                description: format!("Found {target} at index {i}"),
            }),
            None => probe.sink.record_with(|| SearchStep {
                kind: SearchStepKind::NotFound,
                index: None,
                value: None,
                low: None,
                high: None,
                description: format!("{target} is not in the array"),
            }),
        }
        SearchOutcome {
            array: self.array.clone(),
            target,
            found: index.is_some(),
            index,
            comparisons: probe.comparisons,
        }
    }
}

struct Prober<'a, S> {
    a: &'a [i64],
    target: i64,
    sink: &'a mut S,
    comparisons: usize,
}

impl<S: StepSink<SearchStep>> Prober<'_, S> {
    /// Compare `a[i]` with the target and record the probe.
    fn probe(&mut self, i: usize, low: Option<usize>, high: Option<usize>) -> std::cmp::Ordering {
        self.comparisons += 1;
        let (value, target) = (self.a[i], self.target);
        let ord = value.cmp(&target);
        self.sink.record_with(|| SearchStep {
            kind: SearchStepKind::Probe,
            index: Some(i),
            value: Some(value),
            low,
            high,
            description: match ord {
                std::cmp::Ordering::Equal => format!("a[{i}] = {value} equals {target}"),
                std::cmp::Ordering::Less => format!("a[{i}] = {value} < {target}"),
                std::cmp::Ordering::Greater => format!("a[{i}] = {value} > {target}"),
            },
        });
        ord
    }

    fn range(&mut self, low: usize, high: usize, why: &str) {
        self.sink.record_with(|| SearchStep {
            kind: SearchStepKind::Range,
            index: None,
            value: None,
            low: Some(low),
            high: Some(high),
            description: format!("{why}: [{low}, {high}]"),
        });
    }

    fn linear(&mut self) -> Option<usize> {
        (0..self.a.len()).find(|&i| self.probe(i, None, None).is_eq())
    }

    /// Binary search over the half-open range `lo..hi`.
    fn binary(&mut self, mut lo: usize, mut hi: usize) -> Option<usize> {
        use std::cmp::Ordering::*;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.probe(mid, Some(lo), Some(hi - 1)) {
                Equal => return Some(mid),
                Less => lo = mid + 1,
                Greater => hi = mid,
            }
        }
        None
    }

    fn jump(&mut self) -> Option<usize> {
        let n = self.a.len();
        if n == 0 {
            return None;
        }
        let block = jump_block_size(n);
        let mut prev = 0;
        let mut end = block.min(n);
        while self.probe(end - 1, Some(prev), Some(end - 1)).is_lt() {
            prev = end;
            if prev >= n {
                return None;
            }
            end = (end + block).min(n);
        }
        self.range(prev, end - 1, "Scan block");
        for i in prev..end {
            match self.probe(i, Some(i), Some(end - 1)) {
                std::cmp::Ordering::Equal => return Some(i),
                std::cmp::Ordering::Greater => return None,
                std::cmp::Ordering::Less => {}
            }
        }
        None
    }

    fn exponential(&mut self) -> Option<usize> {
        let n = self.a.len();
        if n == 0 {
            return None;
        }
        if self.probe(0, None, None).is_eq() {
            return Some(0);
        }
        let mut bound = 1;
        while bound < n && self.probe(bound, None, None).is_lt() {
            bound *= 2;
        }
        let (lo, hi) = (bound / 2, bound.min(n - 1));
        self.range(lo, hi, "Binary search within");
        self.binary(lo, hi + 1)
    }
}
