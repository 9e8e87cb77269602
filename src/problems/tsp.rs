//! Travelling salesman via Held–Karp bitmask DP, tours starting and ending
//! at city 0.
//!
//! `cost[mask][j]` is the cheapest path that starts at 0, visits exactly the
//! cities in `mask` (which always contains 0 and `j`) and ends at `j`. Masks
//! are processed in increasing numeric order, and `mask ^ (1 << j)` is
//! smaller than `mask`, so every cell reads finished cells only.

use serde::Serialize;

use crate::error::InputError;
use crate::instance::DistanceMatrix;
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};
use crate::utils::{mask_contains, mask_label};

pub const MAX_CITIES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TspStepKind {
    Cell,
    /// Closing edge back to city 0 tried.
    Close,
    Tour,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TspStep {
    pub kind: TspStepKind,
    pub mask: usize,
    pub mask_binary: String,
    pub city: usize,
    /// `None` while no path reaches this state.
    pub cost: Option<i64>,
    pub previous: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<usize>>,
    pub description: String,
}

impl Describe for TspStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            TspStepKind::Cell => "cell",
            TspStepKind::Close => "close",
            TspStepKind::Tour => "tour",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TspOutcome {
    pub cities: usize,
    /// `None` when no Hamiltonian cycle exists.
    pub min_cost: Option<i64>,
    /// `0, …, 0`; empty when there is no tour.
    pub best_path: Vec<usize>,
}

impl Summary for TspOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("cities", self.cities.to_string()),
            (
                "minCost",
                self.min_cost.map_or_else(|| "INF".to_string(), |c| c.to_string()),
            ),
            ("bestPath", join(&self.best_path)),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct HeldKarp {
    matrix: DistanceMatrix,
}

impl HeldKarp {
    pub fn new(matrix: DistanceMatrix) -> Result<Self, InputError> {
        match matrix.len() {
            0 => Err(InputError::Invalid("TSP needs at least one city".into())),
            n if n > MAX_CITIES => Err(InputError::Invalid(format!(
                "TSP supports at most {MAX_CITIES} cities, found {n}"
            ))),
            _ => Ok(Self { matrix }),
        }
    }
}

fn binary(mask: usize, n: usize) -> String {
    (0..n)
        .rev()
        .map(|b| if mask_contains(mask, b) { '1' } else { '0' })
        .collect()
}

impl TracedAlgorithm for HeldKarp {
    type Step = TspStep;
    type Outcome = TspOutcome;

    fn name(&self) -> &'static str {
        "Travelling Salesman (Held-Karp)"
    }

    fn execute<S: StepSink<TspStep>>(&self, sink: &mut S) -> TspOutcome {
        let n = self.matrix.len();
        if n == 1 {
            sink.record_with(|| TspStep {
                kind: TspStepKind::Tour,
                mask: 1,
                mask_binary: "1".into(),
                city: 0,
                cost: Some(0),
                previous: None,
                path: Some(vec![0, 0]),
                description: "Single city: the tour is trivial".into(),
            });
            return TspOutcome {
                cities: 1,
                min_cost: Some(0),
                best_path: vec![0, 0],
            };
        }

        let full = (1usize << n) - 1;
        let at = |mask: usize, j: usize| mask * n + j;
        let mut cost: Vec<Option<i64>> = vec![None; (full + 1) * n];
        let mut parent: Vec<Option<usize>> = vec![None; (full + 1) * n];
        cost[at(1, 0)] = Some(0);

        for mask in (3..=full).step_by(2) {
            for j in 1..n {
                if !mask_contains(mask, j) {
                    continue;
                }
                let prev_mask = mask ^ (1 << j);
                let mut best: Option<(i64, usize)> = None;
                for i in 0..n {
                    if !mask_contains(prev_mask, i) {
                        continue;
                    }
                    // city 0 only ends the one-element path
                    if i == 0 && prev_mask != 1 {
                        continue;
                    }
                    let edge = self.matrix.get(i, j);
                    let (Some(base), Some(edge)) = (cost[at(prev_mask, i)], edge) else {
                        continue;
                    };
                    let candidate = base.saturating_add(edge);
                    if best.map_or(true, |(b, _)| candidate < b) {
                        best = Some((candidate, i));
                    }
                }
                cost[at(mask, j)] = best.map(|(c, _)| c);
                parent[at(mask, j)] = best.map(|(_, i)| i);
                sink.record_with(|| TspStep {
                    kind: TspStepKind::Cell,
                    mask,
                    mask_binary: binary(mask, n),
                    city: j,
                    cost: best.map(|(c, _)| c),
                    previous: best.map(|(_, i)| i),
                    path: None,
                    description: match best {
                        Some((c, i)) => format!(
                            "cost[{}][{j}] = {c}, arriving from {i}",
                            mask_label(mask)
                        ),
                        None => format!("cost[{}][{j}] unreachable", mask_label(mask)),
                    },
                });
            }
        }

        let mut best: Option<(i64, usize)> = None;
        for j in 1..n {
            let (Some(base), Some(back)) = (cost[at(full, j)], self.matrix.get(j, 0)) else {
                continue;
            };
            let total = base.saturating_add(back);
            if best.map_or(true, |(b, _)| total < b) {
                best = Some((total, j));
            }
            sink.record_with(|| TspStep {
                kind: TspStepKind::Close,
                mask: full,
                mask_binary: binary(full, n),
                city: j,
                cost: Some(total),
                previous: None,
                path: None,
                description: format!("End at {j} and return to 0: total {total}"),
            });
        }

        let Some((min_cost, last)) = best else {
            return TspOutcome {
                cities: n,
                min_cost: None,
                best_path: Vec::new(),
            };
        };

        let mut path = vec![0];
        let (mut mask, mut city) = (full, last);
        while city != 0 {
            path.push(city);
            let Some(prev) = parent[at(mask, city)] else {
                break;
            };
            mask ^= 1 << city;
            city = prev;
        }
        path.push(0);
        path.reverse();

        sink.record_with(|| TspStep {
            kind: TspStepKind::Tour,
            mask: full,
            mask_binary: binary(full, n),
            city: 0,
            cost: Some(min_cost),
            previous: Some(last),
            path: Some(path.clone()),
            description: format!("Best tour {} costs {min_cost}", join(&path)),
        });

        TspOutcome {
            cities: n,
            min_cost: Some(min_cost),
            best_path: path,
        }
    }
}
