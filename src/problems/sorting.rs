//! Comparison and distribution sorts over `i64` arrays.
//!
//! Every sort works on its own copy of the input and records a snapshot of
//! the whole array at each step. The outcome counts comparisons and element
//! moves (swaps, shifts and writes) so runs of different sorts on the same
//! input can be compared.

use serde::Serialize;

use crate::error::InputError;
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

/// Largest `max - min + 1` counting sort accepts.
pub const COUNTING_RANGE_LIMIT: u64 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    Bubble,
    Insertion,
    Selection,
    Quick,
    Merge,
    Heap,
    Counting,
    Radix,
}

impl SortKind {
    pub const ALL: [SortKind; 8] = [
        SortKind::Bubble,
        SortKind::Insertion,
        SortKind::Selection,
        SortKind::Quick,
        SortKind::Merge,
        SortKind::Heap,
        SortKind::Counting,
        SortKind::Radix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortKind::Bubble => "Bubble Sort",
            SortKind::Insertion => "Insertion Sort",
            SortKind::Selection => "Selection Sort",
            SortKind::Quick => "Quick Sort",
            SortKind::Merge => "Merge Sort",
            SortKind::Heap => "Heap Sort",
            SortKind::Counting => "Counting Sort",
            SortKind::Radix => "Radix Sort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStepKind {
    Start,
    Compare,
    Swap,
    Shift,
    Write,
    Pivot,
    PivotPlace,
    Merge,
    Count,
    Cumulative,
    Place,
    Pass,
    Done,
}

impl SortStepKind {
    fn label(&self) -> &'static str {
        match self {
            SortStepKind::Start => "start",
            SortStepKind::Compare => "compare",
            SortStepKind::Swap => "swap",
            SortStepKind::Shift => "shift",
            SortStepKind::Write => "write",
            SortStepKind::Pivot => "pivot",
            SortStepKind::PivotPlace => "pivot_place",
            SortStepKind::Merge => "merge",
            SortStepKind::Count => "count",
            SortStepKind::Cumulative => "cumulative",
            SortStepKind::Place => "place",
            SortStepKind::Pass => "pass",
            SortStepKind::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortStep {
    pub kind: SortStepKind,
    pub i: Option<usize>,
    pub j: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
    pub array: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<usize>>,
    pub description: String,
}

impl Describe for SortStep {
    fn kind(&self) -> &'static str {
        self.kind.label()
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOutcome {
    pub input: Vec<i64>,
    pub sorted: Vec<i64>,
    pub comparisons: usize,
    pub moves: usize,
}

impl Summary for SortOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("input", join(&self.input)),
            ("sorted", join(&self.sorted)),
            ("comparisons", self.comparisons.to_string()),
            ("moves", self.moves.to_string()),
        ]
    }
}

/// One sort of one array.
#[derive(Debug, Clone)]
pub struct Sorter {
    kind: SortKind,
    input: Vec<i64>,
}

impl Sorter {
    /// Fails only for counting sort over a value range wider than
    /// [`COUNTING_RANGE_LIMIT`].
    pub fn new(kind: SortKind, input: Vec<i64>) -> Result<Self, InputError> {
        if kind == SortKind::Counting {
            if let (Some(min), Some(max)) = (input.iter().min(), input.iter().max()) {
                let range = (*max as i128 - *min as i128 + 1) as u128;
                if range > COUNTING_RANGE_LIMIT as u128 {
                    return Err(InputError::Invalid(format!(
                        "counting sort value range {range} exceeds {COUNTING_RANGE_LIMIT}"
                    )));
                }
            }
        }
        Ok(Self { kind, input })
    }

    pub fn kind(&self) -> SortKind {
        self.kind
    }

    pub fn input(&self) -> &[i64] {
        &self.input
    }
}

impl TracedAlgorithm for Sorter {
    type Step = SortStep;
    type Outcome = SortOutcome;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn execute<S: StepSink<SortStep>>(&self, sink: &mut S) -> SortOutcome {
        let mut a = self.input.clone();
        let mut ctx = Ctx {
            sink,
            comparisons: 0,
            moves: 0,
        };
        ctx.step(SortStepKind::Start, None, None, &a, || {
            format!("Start with {} element(s)", a.len())
        });
        match self.kind {
            SortKind::Bubble => bubble(&mut a, &mut ctx),
            SortKind::Insertion => insertion(&mut a, &mut ctx),
            SortKind::Selection => selection(&mut a, &mut ctx),
            SortKind::Quick => quick(&mut a, &mut ctx),
            SortKind::Merge => {
                let n = a.len();
                merge_sort(&mut a, 0, n, &mut ctx)
            }
            SortKind::Heap => heap(&mut a, &mut ctx),
            SortKind::Counting => counting(&mut a, &mut ctx),
            SortKind::Radix => radix(&mut a, &mut ctx),
        }
        ctx.step(SortStepKind::Done, None, None, &a, || "Array is sorted".to_string());
        SortOutcome {
            input: self.input.clone(),
            sorted: a,
            comparisons: ctx.comparisons,
            moves: ctx.moves,
        }
    }
}

struct Ctx<'a, S> {
    sink: &'a mut S,
    comparisons: usize,
    moves: usize,
}

impl<S: StepSink<SortStep>> Ctx<'_, S> {
    fn step<D>(
        &mut self,
        kind: SortStepKind,
        i: Option<usize>,
        j: Option<usize>,
        a: &[i64],
        describe: D,
    ) where
        D: FnOnce() -> String,
    {
        self.sink.record_with(|| SortStep {
            kind,
            i,
            j,
            pivot: None,
            array: a.to_vec(),
            buckets: None,
            description: describe(),
        });
    }

    fn pivot_step<D>(
        &mut self,
        kind: SortStepKind,
        i: usize,
        j: usize,
        pivot: usize,
        a: &[i64],
        describe: D,
    ) where
        D: FnOnce() -> String,
    {
        self.sink.record_with(|| SortStep {
            kind,
            i: Some(i),
            j: Some(j),
            pivot: Some(pivot),
            array: a.to_vec(),
            buckets: None,
            description: describe(),
        });
    }

    fn bucket_step<D>(
        &mut self,
        kind: SortStepKind,
        i: Option<usize>,
        a: &[i64],
        buckets: &[usize],
        describe: D,
    ) where
        D: FnOnce() -> String,
    {
        self.sink.record_with(|| SortStep {
            kind,
            i,
            j: None,
            pivot: None,
            array: a.to_vec(),
            buckets: Some(buckets.to_vec()),
            description: describe(),
        });
    }

    fn compare(&mut self, i: usize, j: usize, a: &[i64]) {
        self.comparisons += 1;
        self.step(SortStepKind::Compare, Some(i), Some(j), a, || {
            format!("Compare a[{i}]={} with a[{j}]={}", a[i], a[j])
        });
    }
}

fn bubble<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    let n = a.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            ctx.compare(j, j + 1, a);
            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                ctx.moves += 1;
                swapped = true;
                ctx.step(SortStepKind::Swap, Some(j), Some(j + 1), a, || {
                    format!("Swap positions {j} and {}", j + 1)
                });
            }
        }
        if !swapped {
            break;
        }
    }
}

fn insertion<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    for i in 1..a.len() {
        let key = a[i];
        let mut j = i;
        while j > 0 {
            ctx.comparisons += 1;
            ctx.step(SortStepKind::Compare, Some(j - 1), Some(i), a, || {
                format!("Compare a[{}]={} with key {key}", j - 1, a[j - 1])
            });
            if a[j - 1] <= key {
                break;
            }
            a[j] = a[j - 1];
            ctx.moves += 1;
            ctx.step(SortStepKind::Shift, Some(j - 1), Some(j), a, || {
                format!("Shift {} right to position {j}", a[j])
            });
            j -= 1;
        }
        if j != i {
            a[j] = key;
            ctx.moves += 1;
            ctx.step(SortStepKind::Write, Some(j), None, a, || {
                format!("Insert key {key} at position {j}")
            });
        }
    }
}

fn selection<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    let n = a.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            ctx.compare(min, j, a);
            if a[j] < a[min] {
                min = j;
            }
        }
        if min != i {
            a.swap(i, min);
            ctx.moves += 1;
            ctx.step(SortStepKind::Swap, Some(i), Some(min), a, || {
                format!("Move minimum {} into position {i}", a[i])
            });
        }
    }
}

/// Lomuto partitioning with the last element as pivot. Ranges are kept on an
/// explicit stack, left part first, so the visiting order matches the
/// recursive formulation without its stack depth.
fn quick<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    let mut ranges = Vec::new();
    if a.len() > 1 {
        ranges.push((0usize, a.len() - 1));
    }
    while let Some((lo, hi)) = ranges.pop() {
        let pivot = a[hi];
        ctx.pivot_step(SortStepKind::Pivot, lo, hi, hi, a, || {
            format!("Partition [{lo}, {hi}] around pivot {pivot}")
        });
        let mut store = lo;
        for j in lo..hi {
            ctx.comparisons += 1;
            ctx.pivot_step(SortStepKind::Compare, store, j, hi, a, || {
                format!("Compare a[{j}]={} with pivot {pivot}", a[j])
            });
            if a[j] < pivot {
                if store != j {
                    a.swap(store, j);
                    ctx.moves += 1;
                    ctx.pivot_step(SortStepKind::Swap, store, j, hi, a, || {
                        format!("Swap positions {store} and {j}")
                    });
                }
                store += 1;
            }
        }
        if store != hi {
            a.swap(store, hi);
            ctx.moves += 1;
        }
        ctx.pivot_step(SortStepKind::PivotPlace, store, hi, store, a, || {
            format!("Pivot {pivot} settles at position {store}")
        });
        if store + 1 < hi {
            ranges.push((store + 1, hi));
        }
        if store > lo + 1 {
            ranges.push((lo, store - 1));
        }
    }
}

/// Top-down merge sort over `a[lo..hi]`.
fn merge_sort<S: StepSink<SortStep>>(a: &mut [i64], lo: usize, hi: usize, ctx: &mut Ctx<'_, S>) {
    if hi - lo < 2 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort(a, lo, mid, ctx);
    merge_sort(a, mid, hi, ctx);

    ctx.step(SortStepKind::Merge, Some(lo), Some(hi - 1), a, || {
        format!("Merge [{lo}, {}] with [{mid}, {}]", mid - 1, hi - 1)
    });
    let left = a[lo..mid].to_vec();
    let right = a[mid..hi].to_vec();
    let (mut l, mut r, mut k) = (0, 0, lo);
    while l < left.len() && r < right.len() {
        ctx.comparisons += 1;
        let (x, y) = (left[l], right[r]);
        ctx.step(SortStepKind::Compare, Some(lo + l), Some(mid + r), a, || {
            format!("Compare left run value {x} with right run value {y}")
        });
        if x <= y {
            a[k] = x;
            l += 1;
        } else {
            a[k] = y;
            r += 1;
        }
        ctx.moves += 1;
        ctx.step(SortStepKind::Write, Some(k), None, a, || {
            format!("Write {} at position {k}", a[k])
        });
        k += 1;
    }
    for &v in left[l..].iter().chain(right[r..].iter()) {
        a[k] = v;
        ctx.moves += 1;
        ctx.step(SortStepKind::Write, Some(k), None, a, || {
            format!("Copy remaining {v} to position {k}")
        });
        k += 1;
    }
}

fn heap<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    let n = a.len();
    for i in (0..n / 2).rev() {
        sift_down(a, n, i, ctx);
    }
    for end in (1..n).rev() {
        a.swap(0, end);
        ctx.moves += 1;
        ctx.step(SortStepKind::Swap, Some(0), Some(end), a, || {
            format!("Move maximum {} to position {end}", a[end])
        });
        sift_down(a, end, 0, ctx);
    }
}

fn sift_down<S: StepSink<SortStep>>(
    a: &mut [i64],
    size: usize,
    mut i: usize,
    ctx: &mut Ctx<'_, S>,
) {
    loop {
        let (left, right) = (2 * i + 1, 2 * i + 2);
        let mut largest = i;
        if left < size {
            ctx.compare(left, largest, a);
            if a[left] > a[largest] {
                largest = left;
            }
        }
        if right < size {
            ctx.compare(right, largest, a);
            if a[right] > a[largest] {
                largest = right;
            }
        }
        if largest == i {
            return;
        }
        a.swap(i, largest);
        ctx.moves += 1;
        ctx.step(SortStepKind::Swap, Some(i), Some(largest), a, || {
            format!("Sift down: swap positions {i} and {largest} (heap size {size})")
        });
        i = largest;
    }
}

fn counting<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    let (Some(&min), Some(&max)) = (a.iter().min(), a.iter().max()) else {
        return;
    };
    let range = (max - min) as usize + 1;
    let mut count = vec![0usize; range];
    for (i, &v) in a.iter().enumerate() {
        count[(v - min) as usize] += 1;
        ctx.bucket_step(SortStepKind::Count, Some(i), a, &count, || {
            format!("Count value {v}")
        });
    }
    for k in 1..range {
        count[k] += count[k - 1];
        ctx.bucket_step(SortStepKind::Cumulative, Some(k), a, &count, || {
            format!("Prefix sum for value {}: {}", min + k as i64, count[k])
        });
    }
    let mut output = a.to_vec();
    for i in (0..a.len()).rev() {
        let v = a[i];
        let slot = (v - min) as usize;
        count[slot] -= 1;
        output[count[slot]] = v;
        ctx.moves += 1;
        ctx.bucket_step(SortStepKind::Place, Some(count[slot]), &output, &count, || {
            format!("Place {v} at position {}", count[slot])
        });
    }
    a.copy_from_slice(&output);
}

/// LSD radix sort, base 10, over `v - min` so negative values work.
fn radix<S: StepSink<SortStep>>(a: &mut [i64], ctx: &mut Ctx<'_, S>) {
    let Some(&min) = a.iter().min() else {
        return;
    };
    let offset = |v: i64| (v as i128 - min as i128) as u64;
    let max_offset = a.iter().map(|&v| offset(v)).max().unwrap_or(0);

    let mut exp: u64 = 1;
    while max_offset / exp > 0 {
        let digit = |v: i64| ((offset(v) / exp) % 10) as usize;
        let mut count = vec![0usize; 10];
        for (i, &v) in a.iter().enumerate() {
            count[digit(v)] += 1;
            ctx.bucket_step(SortStepKind::Count, Some(i), a, &count, || {
                format!("Digit {} of {v} (place {exp})", digit(v))
            });
        }
        for d in 1..10 {
            count[d] += count[d - 1];
        }
        ctx.bucket_step(SortStepKind::Cumulative, None, a, &count, || {
            format!("Prefix sums of digit counts for place {exp}")
        });
        let mut output = a.to_vec();
        for i in (0..a.len()).rev() {
            let v = a[i];
            let d = digit(v);
            count[d] -= 1;
            output[count[d]] = v;
            ctx.moves += 1;
            ctx.bucket_step(SortStepKind::Place, Some(count[d]), &output, &count, || {
                format!("Place {v} at position {}", count[d])
            });
        }
        a.copy_from_slice(&output);
        ctx.step(SortStepKind::Pass, None, None, a, || {
            format!("Finished pass for place {exp}")
        });
        match exp.checked_mul(10) {
            Some(next) => exp = next,
            None => break,
        }
    }
}

/// True when `values` is non-decreasing.
pub fn is_sorted(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Executor;

    fn sort(kind: SortKind, input: &[i64]) -> SortOutcome {
        Executor::new(Sorter::new(kind, input.to_vec()).unwrap()).run()
    }

    #[test]
    fn every_kind_sorts_example() {
        for kind in SortKind::ALL {
            assert_eq!(sort(kind, &[5, 3, 8, 1]).sorted, vec![1, 3, 5, 8], "{kind:?}");
        }
    }

    #[test]
    fn every_kind_handles_negatives_and_duplicates() {
        let input = [3, -7, 0, 3, -7, 12, 5, 0];
        let mut expected = input.to_vec();
        expected.sort();
        for kind in SortKind::ALL {
            assert_eq!(sort(kind, &input).sorted, expected, "{kind:?}");
        }
    }

    #[test]
    fn empty_and_single_record_no_comparisons() {
        for kind in SortKind::ALL {
            let (out, trace) = Executor::new(Sorter::new(kind, vec![]).unwrap()).run_traced();
            assert!(out.sorted.is_empty());
            assert_eq!(trace.len(), 2, "{kind:?}: start + done only");

            let (out, trace) = Executor::new(Sorter::new(kind, vec![42]).unwrap()).run_traced();
            assert_eq!(out.sorted, vec![42]);
            assert_eq!(out.comparisons, 0);
            assert!(trace.iter().all(|s| s.kind != SortStepKind::Compare));
        }
    }

    #[test]
    fn bubble_trace_matches_hand_run() {
        let sorter = Sorter::new(SortKind::Bubble, vec![2, 1]).unwrap();
        let (_, trace) = Executor::new(sorter).run_traced();
        let kinds: Vec<_> = trace.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SortStepKind::Start,
                SortStepKind::Compare,
                SortStepKind::Swap,
                SortStepKind::Done
            ]
        );
        assert_eq!(trace.steps()[1].array, vec![2, 1]);
        assert_eq!(trace.steps()[2].array, vec![1, 2]);
    }

    #[test]
    fn compare_count_matches_compare_steps() {
        for kind in SortKind::ALL {
            let sorter = Sorter::new(kind, vec![9, 4, 7, 1, 8, 2]).unwrap();
            let (out, trace) = Executor::new(sorter).run_traced();
            let compares = trace.iter().filter(|s| s.kind == SortStepKind::Compare).count();
            assert_eq!(out.comparisons, compares, "{kind:?}");
        }
    }

    #[test]
    fn counting_sort_rejects_huge_range() {
        assert!(Sorter::new(SortKind::Counting, vec![0, 10_000_000]).is_err());
        assert!(Sorter::new(SortKind::Radix, vec![0, 10_000_000]).is_ok());
    }

    #[test]
    fn radix_handles_extreme_values() {
        let out = sort(SortKind::Radix, &[i64::MAX, i64::MIN, 0]);
        assert_eq!(out.sorted, vec![i64::MIN, 0, i64::MAX]);
    }
}
