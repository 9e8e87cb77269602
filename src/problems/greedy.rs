//! Greedy selections: activity selection, fractional knapsack and job
//! sequencing with deadlines.
//!
//! Each one sorts its input once (stably, so ties keep input order) and
//! then makes a single pass of irrevocable choices. Indices in outcomes
//! refer to input positions.

use std::cmp::Ordering;

use serde::Serialize;

use crate::instance::{Activity, Item, Job};
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GreedyStepKind {
    /// Candidates sorted; carries the processing order.
    Order,
    Accept,
    /// Fractional knapsack: part of an item taken.
    Partial,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GreedyStep {
    pub kind: GreedyStepKind,
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<usize>>,
    /// Activity selection: finish time of the last accepted activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_finish: Option<i64>,
    /// Fractional knapsack: capacity left after the step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
    /// Job sequencing: slot taken (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
    /// Running total (count, value or profit) after the step.
    pub total: f64,
    pub description: String,
}

impl GreedyStep {
    fn new(kind: GreedyStepKind, index: Option<usize>, total: f64, description: String) -> Self {
        Self {
            kind,
            index,
            order: None,
            last_finish: None,
            remaining: None,
            slot: None,
            total,
            description,
        }
    }
}

impl Describe for GreedyStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            GreedyStepKind::Order => "order",
            GreedyStepKind::Accept => "accept",
            GreedyStepKind::Partial => "partial",
            GreedyStepKind::Reject => "reject",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Indices of `0..len` stably sorted by `cmp`.
fn sorted_indices<F: FnMut(&usize, &usize) -> Ordering>(len: usize, cmp: F) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by(cmp);
    order
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityOutcome {
    pub total_activities: usize,
    pub selected_count: usize,
    /// Input indices in selection order.
    pub selected: Vec<usize>,
}

impl Summary for ActivityOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("totalActivities", self.total_activities.to_string()),
            ("selectedCount", self.selected_count.to_string()),
            ("selected", join(&self.selected)),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ActivitySelection {
    activities: Vec<Activity>,
}

impl ActivitySelection {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }
}

impl TracedAlgorithm for ActivitySelection {
    type Step = GreedyStep;
    type Outcome = ActivityOutcome;

    fn name(&self) -> &'static str {
        "Activity Selection"
    }

    fn execute<S: StepSink<GreedyStep>>(&self, sink: &mut S) -> ActivityOutcome {
        let acts = &self.activities;
        let order = sorted_indices(acts.len(), |&a, &b| acts[a].finish.cmp(&acts[b].finish));
        sink.record_with(|| GreedyStep {
            order: Some(order.clone()),
            ..GreedyStep::new(
                GreedyStepKind::Order,
                None,
                0.0,
                "Sort activities by finish time".into(),
            )
        });

        let mut selected: Vec<usize> = Vec::new();
        let mut last_finish: Option<i64> = None;
        for &i in &order {
            let Activity { start, finish } = acts[i];
            let fits = last_finish.map_or(true, |f| start >= f);
            if fits {
                selected.push(i);
                last_finish = Some(finish);
            }
            let total = selected.len() as f64;
            sink.record_with(|| {
                let step = if fits {
                    GreedyStep::new(
                        GreedyStepKind::Accept,
                        Some(i),
                        total,
                        format!("Select activity {i} [{start}, {finish})"),
                    )
                } else {
                    GreedyStep::new(
                        GreedyStepKind::Reject,
                        Some(i),
                        total,
                        format!("Skip activity {i}: starts at {start}, before the last finish"),
                    )
                };
                GreedyStep { last_finish, ..step }
            });
        }

        ActivityOutcome {
            total_activities: acts.len(),
            selected_count: selected.len(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portion {
    pub index: usize,
    /// Share of the item taken, in `(0, 1]`.
    pub fraction: f64,
    pub weight: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionalOutcome {
    pub capacity: u64,
    pub max_value: f64,
    pub taken: Vec<Portion>,
}

impl Summary for FractionalOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let taken: Vec<String> = self
            .taken
            .iter()
            .map(|p| format!("item {} x {:.4}", p.index, p.fraction))
            .collect();
        vec![
            ("capacity", self.capacity.to_string()),
            ("maxValue", format!("{:.4}", self.max_value)),
            ("taken", taken.join(", ")),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct FractionalKnapsack {
    items: Vec<Item>,
    capacity: u64,
}

impl FractionalKnapsack {
    pub fn new(items: Vec<Item>, capacity: u64) -> Self {
        Self { items, capacity }
    }
}

impl TracedAlgorithm for FractionalKnapsack {
    type Step = GreedyStep;
    type Outcome = FractionalOutcome;

    fn name(&self) -> &'static str {
        "Fractional Knapsack"
    }

    fn execute<S: StepSink<GreedyStep>>(&self, sink: &mut S) -> FractionalOutcome {
        let items = &self.items;
        // value_a / weight_a > value_b / weight_b, without rounding
        let order = sorted_indices(items.len(), |&a, &b| {
            let lhs = items[a].value as i128 * items[b].weight as i128;
            let rhs = items[b].value as i128 * items[a].weight as i128;
            rhs.cmp(&lhs)
        });
        sink.record_with(|| GreedyStep {
            order: Some(order.clone()),
            remaining: Some(self.capacity),
            ..GreedyStep::new(
                GreedyStepKind::Order,
                None,
                0.0,
                "Sort items by value/weight, best first".into(),
            )
        });

        let mut remaining = self.capacity;
        let mut total = 0.0;
        let mut taken = Vec::new();
        for &i in &order {
            let item = items[i];
            if remaining == 0 {
                sink.record_with(|| GreedyStep {
                    remaining: Some(0),
                    ..GreedyStep::new(
                        GreedyStepKind::Reject,
                        Some(i),
                        total,
                        format!("Knapsack full, skip item {i}"),
                    )
                });
                continue;
            }
            if item.weight <= remaining {
                remaining -= item.weight;
                total += item.value as f64;
                taken.push(Portion {
                    index: i,
                    fraction: 1.0,
                    weight: item.weight as f64,
                    value: item.value as f64,
                });
                sink.record_with(|| GreedyStep {
                    remaining: Some(remaining),
                    ..GreedyStep::new(
                        GreedyStepKind::Accept,
                        Some(i),
                        total,
                        format!("Take all of item {i} (w={}, v={})", item.weight, item.value),
                    )
                });
            } else {
                let fraction = remaining as f64 / item.weight as f64;
                let value = item.value as f64 * fraction;
                total += value;
                taken.push(Portion {
                    index: i,
                    fraction,
                    weight: remaining as f64,
                    value,
                });
                let used = remaining;
                remaining = 0;
                sink.record_with(|| GreedyStep {
                    remaining: Some(0),
                    ..GreedyStep::new(
                        GreedyStepKind::Partial,
                        Some(i),
                        total,
                        format!("Take {used}/{} of item {i} for {value:.4}", item.weight),
                    )
                });
            }
        }

        FractionalOutcome {
            capacity: self.capacity,
            max_value: total,
            taken,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutcome {
    /// Job id per time slot (slot 1 first); `None` for an idle slot.
    pub slots: Vec<Option<String>>,
    /// Scheduled ids in slot order.
    pub sequence: Vec<String>,
    pub total_profit: i64,
}

impl Summary for JobOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sequence", self.sequence.join(", ")),
            ("totalProfit", self.total_profit.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct JobSequencing {
    jobs: Vec<Job>,
}

impl JobSequencing {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }
}

impl TracedAlgorithm for JobSequencing {
    type Step = GreedyStep;
    type Outcome = JobOutcome;

    fn name(&self) -> &'static str {
        "Job Sequencing"
    }

    fn execute<S: StepSink<GreedyStep>>(&self, sink: &mut S) -> JobOutcome {
        let jobs = &self.jobs;
        let order = sorted_indices(jobs.len(), |&a, &b| jobs[b].profit.cmp(&jobs[a].profit));
        sink.record_with(|| GreedyStep {
            order: Some(order.clone()),
            ..GreedyStep::new(
                GreedyStepKind::Order,
                None,
                0.0,
                "Sort jobs by profit, highest first".into(),
            )
        });

        // more slots than jobs can never be filled
        let horizon = jobs.iter().map(|j| j.deadline).max().unwrap_or(0).min(jobs.len());
        let mut slots: Vec<Option<usize>> = vec![None; horizon];
        let mut total: i64 = 0;
        for &i in &order {
            let job = &jobs[i];
            let latest = job.deadline.min(horizon);
            let free = (0..latest).rev().find(|&s| slots[s].is_none());
            match free {
                Some(s) => {
                    slots[s] = Some(i);
                    total = total.saturating_add(job.profit);
                    sink.record_with(|| GreedyStep {
                        slot: Some(s + 1),
                        ..GreedyStep::new(
                            GreedyStepKind::Accept,
                            Some(i),
                            total as f64,
                            format!("Schedule job {} in slot {}", job.id, s + 1),
                        )
                    });
                }
                None => sink.record_with(|| {
                    GreedyStep::new(
                        GreedyStepKind::Reject,
                        Some(i),
                        total as f64,
                        format!(
                            "Reject job {}: no free slot up to its deadline {}",
                            job.id, job.deadline
                        ),
                    )
                }),
            }
        }

        let slots: Vec<Option<String>> = slots
            .into_iter()
            .map(|s| s.map(|i| jobs[i].id.clone()))
            .collect();
        JobOutcome {
            sequence: slots.iter().flatten().cloned().collect(),
            slots,
            total_profit: total,
        }
    }
}
