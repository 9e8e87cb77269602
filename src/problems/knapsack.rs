//! 0/1 knapsack over an `(n + 1) x (capacity + 1)` table.
//!
//! `dp[i][w]` is the best value using the first `i` items within weight
//! `w`. Every cell step carries the value written into the table, so
//! replaying the `cell` steps over a zero table rebuilds `dpTable`.

use serde::Serialize;

use crate::instance::Item;
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Take,
    Skip,
    TooHeavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnapsackStepKind {
    Cell,
    /// Row `i` finished; carries the row.
    Row,
    /// Traceback picked item `i - 1`.
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnapsackStep {
    pub kind: KnapsackStepKind,
    pub i: usize,
    pub w: usize,
    pub item_value: i64,
    pub item_weight: u64,
    /// `value + dp[i-1][w - weight]`; absent when the item does not fit.
    pub take_value: Option<i64>,
    pub skip_value: Option<i64>,
    pub dp_value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Vec<i64>>,
    pub description: String,
}

impl Describe for KnapsackStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            KnapsackStepKind::Cell => "cell",
            KnapsackStepKind::Row => "row",
            KnapsackStepKind::Select => "select",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnapsackOutcome {
    pub capacity: usize,
    pub max_value: i64,
    /// Indices of chosen items, ascending.
    pub selected: Vec<usize>,
    pub total_weight: u64,
    pub total_value: i64,
    pub dp_table: Vec<Vec<i64>>,
}

impl Summary for KnapsackOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("capacity", self.capacity.to_string()),
            ("maxValue", self.max_value.to_string()),
            ("selected", join(&self.selected)),
            ("totalWeight", self.total_weight.to_string()),
            ("totalValue", self.total_value.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ZeroOneKnapsack {
    items: Vec<Item>,
    capacity: usize,
}

impl ZeroOneKnapsack {
    pub fn new(items: Vec<Item>, capacity: usize) -> Self {
        Self { items, capacity }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Cells the table will hold.
    pub fn table_cells(&self) -> usize {
        (self.items.len() + 1).saturating_mul(self.capacity.saturating_add(1))
    }
}

impl TracedAlgorithm for ZeroOneKnapsack {
    type Step = KnapsackStep;
    type Outcome = KnapsackOutcome;

    fn name(&self) -> &'static str {
        "0/1 Knapsack"
    }

    fn execute<S: StepSink<KnapsackStep>>(&self, sink: &mut S) -> KnapsackOutcome {
        let n = self.items.len();
        let cap = self.capacity;
        let mut dp = vec![vec![0i64; cap + 1]; n + 1];

        for i in 1..=n {
            let item = self.items[i - 1];
            for w in 1..=cap {
                let skip = dp[i - 1][w];
                let take = usize::try_from(item.weight)
                    .ok()
                    .filter(|&iw| iw <= w)
                    .map(|iw| item.value.saturating_add(dp[i - 1][w - iw]));
                let (value, decision) = match take {
                    Some(t) if t > skip => (t, Decision::Take),
                    Some(_) => (skip, Decision::Skip),
                    None => (skip, Decision::TooHeavy),
                };
                dp[i][w] = value;
                sink.record_with(|| KnapsackStep {
                    kind: KnapsackStepKind::Cell,
                    i,
                    w,
                    item_value: item.value,
                    item_weight: item.weight,
                    take_value: take,
                    skip_value: Some(skip),
                    dp_value: value,
                    decision: Some(decision),
                    row: None,
                    description: match decision {
                        Decision::Take => format!(
                            "dp[{i}][{w}] = {value}: take item {} ({} > {skip})",
                            i - 1,
                            value
                        ),
                        Decision::Skip => format!("dp[{i}][{w}] = {value}: skip item {}", i - 1),
                        Decision::TooHeavy => format!(
                            "dp[{i}][{w}] = {value}: item {} too heavy ({} > {w})",
                            i - 1,
                            item.weight
                        ),
                    },
                });
            }
            sink.record_with(|| KnapsackStep {
                kind: KnapsackStepKind::Row,
                i,
                w: cap,
                item_value: item.value,
                item_weight: item.weight,
                take_value: None,
                skip_value: None,
                dp_value: dp[i][cap],
                decision: None,
                row: Some(dp[i].clone()),
                description: format!("Row {i} complete"),
            });
        }

        let mut selected = Vec::new();
        let mut w = cap;
        for i in (1..=n).rev() {
            if dp[i][w] == 0 {
                break;
            }
            if dp[i][w] != dp[i - 1][w] {
                let item = self.items[i - 1];
                selected.push(i - 1);
                let remaining = w;
                sink.record_with(|| KnapsackStep {
                    kind: KnapsackStepKind::Select,
                    i,
                    w: remaining,
                    item_value: item.value,
                    item_weight: item.weight,
                    take_value: None,
                    skip_value: None,
                    dp_value: dp[i][remaining],
                    decision: Some(Decision::Take),
                    row: None,
                    description: format!(
                        "dp[{i}][{remaining}] differs from the row above: item {} was taken",
                        i - 1
                    ),
                });
                // the item was taken, so it fit
                w -= item.weight as usize;
            }
        }
        selected.reverse();

        let total_weight = selected.iter().map(|&i| self.items[i].weight).sum();
        let total_value = selected.iter().map(|&i| self.items[i].value).sum();
        KnapsackOutcome {
            capacity: cap,
            max_value: dp[n][cap],
            selected,
            total_weight,
            total_value,
            dp_table: dp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Executor;

    fn classic() -> ZeroOneKnapsack {
        ZeroOneKnapsack::new(
            vec![
                Item { value: 60, weight: 10 },
                Item { value: 100, weight: 20 },
                Item { value: 120, weight: 30 },
            ],
            50,
        )
    }

    #[test]
    fn classic_instance() {
        let out = Executor::new(classic()).run();
        assert_eq!(out.max_value, 220);
        assert_eq!(out.selected, vec![1, 2]);
        assert_eq!(out.total_weight, 50);
        assert_eq!(out.total_value, 220);
        assert_eq!(out.dp_table.len(), 4);
        assert_eq!(out.dp_table[0].len(), 51);
    }

    #[test]
    fn zero_capacity_selects_nothing() {
        let out = Executor::new(ZeroOneKnapsack::new(vec![Item { value: 5, weight: 1 }], 0)).run();
        assert_eq!(out.max_value, 0);
        assert!(out.selected.is_empty());
    }

    #[test]
    fn cell_steps_replay_table() {
        let (out, trace) = Executor::new(classic()).run_traced();
        let mut table = vec![vec![0; 51]; 4];
        for s in trace.iter().filter(|s| s.kind == KnapsackStepKind::Cell) {
            table[s.i][s.w] = s.dp_value;
        }
        assert_eq!(table, out.dp_table);
    }

    #[test]
    fn table_cells_counts_zero_row() {
        assert_eq!(classic().table_cells(), 4 * 51);
    }
}
