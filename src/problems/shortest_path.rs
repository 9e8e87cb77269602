//! Single-source (Dijkstra, Bellman-Ford) and all-pairs (Floyd-Warshall)
//! shortest paths.
//!
//! Distances are `Option<i64>`; `None` is "unreachable" and serializes as
//! `null`. Sums saturate instead of overflowing.
//!
//! On an undirected graph every edge is usable both ways, so a single
//! negative edge already forms a negative cycle for Bellman-Ford and
//! Floyd-Warshall.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::error::InputError;
use crate::instance::{Edge, WeightedGraph};
use crate::traits::{join, join_optional, Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStepKind {
    Init,
    /// Dijkstra: vertex settled from the heap.
    Settle,
    /// Dijkstra: stale heap entry dropped.
    Stale,
    Relax,
    /// Edge examined but no improvement.
    Keep,
    /// Bellman-Ford: one full pass over the edges finished.
    Round,
    NegativeCycle,
}

/// Step of a single-source run. `distances` is the tentative distance
/// vector after the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    pub kind: PathStepKind,
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub weight: Option<i64>,
    pub round: Option<usize>,
    pub distances: Vec<Option<i64>>,
    pub description: String,
}

impl Describe for PathStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            PathStepKind::Init => "init",
            PathStepKind::Settle => "settle",
            PathStepKind::Stale => "stale",
            PathStepKind::Relax => "relax",
            PathStepKind::Keep => "keep",
            PathStepKind::Round => "round",
            PathStepKind::NegativeCycle => "negative_cycle",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathOutcome {
    pub source: usize,
    pub distances: Vec<Option<i64>>,
    /// Predecessor on a shortest path.
    pub previous: Vec<Option<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_negative_cycle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_cycle: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<usize>,
}

impl PathOutcome {
    /// Vertices from the source to `target`, if reachable and free of
    /// negative cycles.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distances.get(target).copied().flatten()?;
        let mut path = vec![target];
        let mut cur = target;
        while cur != self.source {
            cur = self.previous[cur]?;
            if path.len() > self.distances.len() {
                return None;
            }
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }
}

impl Summary for PathOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("source", self.source.to_string()),
            ("distances", join_optional(&self.distances)),
        ];
        if let Some(flag) = self.has_negative_cycle {
            lines.push(("hasNegativeCycle", flag.to_string()));
        }
        if let Some(cycle) = &self.negative_cycle {
            lines.push(("negativeCycle", join(cycle)));
        }
        lines
    }
}

fn relaxed(du: Option<i64>, w: i64) -> Option<i64> {
    du.map(|d| d.saturating_add(w))
}

fn improves(candidate: Option<i64>, current: Option<i64>) -> bool {
    match (candidate, current) {
        (Some(c), Some(d)) => c < d,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Dijkstra with a binary heap and lazy deletion. Weights must be
/// non-negative.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    graph: WeightedGraph,
    source: usize,
}

impl Dijkstra {
    pub fn new(graph: WeightedGraph, source: usize) -> Result<Self, InputError> {
        graph.check_vertex("source vertex", source)?;
        if let Some(e) = graph.edges().iter().find(|e| e.weight < 0) {
            return Err(InputError::Invalid(format!(
                "Dijkstra requires non-negative weights: edge {}-{} has weight {}",
                e.from, e.to, e.weight
            )));
        }
        Ok(Self { graph, source })
    }
}

impl TracedAlgorithm for Dijkstra {
    type Step = PathStep;
    type Outcome = PathOutcome;

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn execute<S: StepSink<PathStep>>(&self, sink: &mut S) -> PathOutcome {
        let n = self.graph.vertices();
        let adj = self.graph.adjacency();
        let mut dist: Vec<Option<i64>> = vec![None; n];
        let mut prev = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();
        let source = self.source;

        dist[source] = Some(0);
        heap.push(Reverse((0i64, source)));
        sink.record_with(|| PathStep {
            kind: PathStepKind::Init,
            from: None,
            to: Some(source),
            weight: None,
            round: None,
            distances: dist.clone(),
            description: format!("Distance to source {source} is 0, all others unknown"),
        });

        while let Some(Reverse((d, u))) = heap.pop() {
            if settled[u] || dist[u] != Some(d) {
                sink.record_with(|| PathStep {
                    kind: PathStepKind::Stale,
                    from: None,
                    to: Some(u),
                    weight: None,
                    round: None,
                    distances: dist.clone(),
                    description: format!("Skip stale heap entry ({u}, {d})"),
                });
                continue;
            }
            settled[u] = true;
            sink.record_with(|| PathStep {
                kind: PathStepKind::Settle,
                from: None,
                to: Some(u),
                weight: None,
                round: None,
                distances: dist.clone(),
                description: format!("Settle {u} at distance {d}"),
            });
            for &(v, w) in &adj[u] {
                if settled[v] {
                    continue;
                }
                let candidate = Some(d.saturating_add(w));
                let kind = if improves(candidate, dist[v]) {
                    dist[v] = candidate;
                    prev[v] = Some(u);
                    heap.push(Reverse((d.saturating_add(w), v)));
                    PathStepKind::Relax
                } else {
                    PathStepKind::Keep
                };
                sink.record_with(|| PathStep {
                    kind,
                    from: Some(u),
                    to: Some(v),
                    weight: Some(w),
                    round: None,
                    distances: dist.clone(),
                    description: match kind {
                        PathStepKind::Relax => {
                            format!("Relax {u}->{v}: distance {} via {u}", d.saturating_add(w))
                        }
                        _ => format!("Keep {v}: {} via {u} is no better", d.saturating_add(w)),
                    },
                });
            }
        }

        PathOutcome {
            source,
            distances: dist,
            previous: prev,
            has_negative_cycle: None,
            negative_cycle: None,
            rounds: None,
        }
    }
}

/// Bellman-Ford with early exit and negative-cycle extraction.
#[derive(Debug, Clone)]
pub struct BellmanFord {
    graph: WeightedGraph,
    source: usize,
}

impl BellmanFord {
    pub fn new(graph: WeightedGraph, source: usize) -> Result<Self, InputError> {
        graph.check_vertex("source vertex", source)?;
        Ok(Self { graph, source })
    }
}

impl TracedAlgorithm for BellmanFord {
    type Step = PathStep;
    type Outcome = PathOutcome;

    fn name(&self) -> &'static str {
        "Bellman-Ford"
    }

    fn execute<S: StepSink<PathStep>>(&self, sink: &mut S) -> PathOutcome {
        let n = self.graph.vertices();
        let arcs = self.graph.arcs();
        let mut dist: Vec<Option<i64>> = vec![None; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let source = self.source;
        dist[source] = Some(0);
        sink.record_with(|| PathStep {
            kind: PathStepKind::Init,
            from: None,
            to: Some(source),
            weight: None,
            round: None,
            distances: dist.clone(),
            description: format!("Distance to source {source} is 0, all others unknown"),
        });

        let mut rounds = 0;
        for round in 1..n {
            rounds = round;
            let mut changed = false;
            for &Edge { from, to, weight } in &arcs {
                let candidate = relaxed(dist[from], weight);
                if improves(candidate, dist[to]) {
                    dist[to] = candidate;
                    prev[to] = Some(from);
                    changed = true;
                    sink.record_with(|| PathStep {
                        kind: PathStepKind::Relax,
                        from: Some(from),
                        to: Some(to),
                        weight: Some(weight),
                        round: Some(round),
                        distances: dist.clone(),
                        description: format!(
                            "Round {round}: relax {from}->{to} (w={weight}), distance now {}",
                            dist[to].unwrap_or_default()
                        ),
                    });
                }
            }
            sink.record_with(|| PathStep {
                kind: PathStepKind::Round,
                from: None,
                to: None,
                weight: None,
                round: Some(round),
                distances: dist.clone(),
                description: if changed {
                    format!("Round {round} complete")
                } else {
                    format!("Round {round} relaxed nothing, stop early")
                },
            });
            if !changed {
                break;
            }
        }

        let mut negative_cycle = None;
        for &Edge { from, to, weight } in &arcs {
            let candidate = relaxed(dist[from], weight);
            if improves(candidate, dist[to]) {
                prev[to] = Some(from);
                negative_cycle = Some(extract_cycle(&prev, to, n));
                sink.record_with(|| PathStep {
                    kind: PathStepKind::NegativeCycle,
                    from: Some(from),
                    to: Some(to),
                    weight: Some(weight),
                    round: None,
                    distances: dist.clone(),
                    description: format!("Edge {from}->{to} still relaxes: negative cycle"),
                });
                break;
            }
        }

        PathOutcome {
            source,
            distances: dist,
            previous: prev,
            has_negative_cycle: Some(negative_cycle.is_some()),
            negative_cycle: negative_cycle.flatten(),
            rounds: Some(rounds),
        }
    }
}

/// Walk predecessors `n` times from `start` to land on the cycle, then
/// collect it in forward order.
fn extract_cycle(prev: &[Option<usize>], start: usize, n: usize) -> Option<Vec<usize>> {
    let mut x = start;
    for _ in 0..n {
        x = prev[x]?;
    }
    let mut cycle = vec![x];
    let mut cur = prev[x]?;
    while cur != x {
        cycle.push(cur);
        cur = prev[cur]?;
        if cycle.len() > n {
            return None;
        }
    }
    cycle.reverse();
    Some(cycle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FloydStepKind {
    Init,
    Update,
    Phase,
    NegativeCycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloydStep {
    pub kind: FloydStepKind,
    pub k: Option<usize>,
    pub i: Option<usize>,
    pub j: Option<usize>,
    pub value: Option<i64>,
    /// Full matrix, recorded on `init` and at the end of every phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<Option<i64>>>>,
    pub description: String,
}

impl Describe for FloydStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            FloydStepKind::Init => "init",
            FloydStepKind::Update => "update",
            FloydStepKind::Phase => "phase",
            FloydStepKind::NegativeCycle => "negative_cycle",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloydOutcome {
    pub distances: Vec<Vec<Option<i64>>>,
    pub has_negative_cycle: bool,
}

impl Summary for FloydOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("hasNegativeCycle", self.has_negative_cycle.to_string())];
        for row in &self.distances {
            lines.push(("row", join_optional(row)));
        }
        lines
    }
}

#[derive(Debug, Clone)]
pub struct FloydWarshall {
    graph: WeightedGraph,
}

impl FloydWarshall {
    pub fn new(graph: WeightedGraph) -> Self {
        Self { graph }
    }
}

impl TracedAlgorithm for FloydWarshall {
    type Step = FloydStep;
    type Outcome = FloydOutcome;

    fn name(&self) -> &'static str {
        "Floyd-Warshall"
    }

    fn execute<S: StepSink<FloydStep>>(&self, sink: &mut S) -> FloydOutcome {
        let n = self.graph.vertices();
        let mut d: Vec<Vec<Option<i64>>> = vec![vec![None; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = Some(0);
        }
        for arc in self.graph.arcs() {
            let cell = &mut d[arc.from][arc.to];
            if improves(Some(arc.weight), *cell) {
                *cell = Some(arc.weight);
            }
        }
        sink.record_with(|| FloydStep {
            kind: FloydStepKind::Init,
            k: None,
            i: None,
            j: None,
            value: None,
            matrix: Some(d.clone()),
            description: "Initial matrix from direct edges".to_string(),
        });

        for k in 0..n {
            for i in 0..n {
                let Some(ik) = d[i][k] else { continue };
                for j in 0..n {
                    let candidate = relaxed(d[k][j], ik);
                    if improves(candidate, d[i][j]) {
                        d[i][j] = candidate;
                        sink.record_with(|| FloydStep {
                            kind: FloydStepKind::Update,
                            k: Some(k),
                            i: Some(i),
                            j: Some(j),
                            value: candidate,
                            matrix: None,
                            description: format!(
                                "dist[{i}][{j}] = {} via {k}",
                                candidate.unwrap_or_default()
                            ),
                        });
                    }
                }
            }
            sink.record_with(|| FloydStep {
                kind: FloydStepKind::Phase,
                k: Some(k),
                i: None,
                j: None,
                value: None,
                matrix: Some(d.clone()),
                description: format!("Intermediate vertex {k} done"),
            });
        }

        let negative = (0..n).find(|&i| d[i][i].is_some_and(|v| v < 0));
        if let Some(i) = negative {
            sink.record_with(|| FloydStep {
                kind: FloydStepKind::NegativeCycle,
                k: None,
                i: Some(i),
                j: Some(i),
                value: d[i][i],
                matrix: None,
                description: format!("dist[{i}][{i}] is negative: negative cycle through {i}"),
            });
        }

        FloydOutcome {
            distances: d,
            has_negative_cycle: negative.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Executor;

    fn sample(orientation: crate::instance::Orientation) -> WeightedGraph {
        WeightedGraph::new(
            4,
            vec![
                Edge::new(0, 1, 4),
                Edge::new(0, 2, 1),
                Edge::new(1, 2, 2),
                Edge::new(1, 3, 5),
                Edge::new(2, 3, 8),
            ],
            orientation,
        )
        .unwrap()
    }

    #[test]
    fn dijkstra_reference_graph() {
        let g = sample(crate::instance::Orientation::Undirected);
        let out = Executor::new(Dijkstra::new(g, 0).unwrap()).run();
        assert_eq!(out.distances, vec![Some(0), Some(3), Some(1), Some(8)]);
        assert_eq!(out.path_to(3), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn bellman_ford_matches_dijkstra() {
        let g = sample(crate::instance::Orientation::Undirected);
        let out = Executor::new(BellmanFord::new(g, 0).unwrap()).run();
        assert_eq!(out.distances, vec![Some(0), Some(3), Some(1), Some(8)]);
        assert_eq!(out.has_negative_cycle, Some(false));
    }

    #[test]
    fn directed_reference_graph() {
        let g = sample(crate::instance::Orientation::Directed);
        let out = Executor::new(BellmanFord::new(g, 0).unwrap()).run();
        assert_eq!(out.distances, vec![Some(0), Some(4), Some(1), Some(9)]);
    }

    #[test]
    fn dijkstra_rejects_negative_weight() {
        let g = WeightedGraph::directed(2, vec![Edge::new(0, 1, -1)]).unwrap();
        assert!(Dijkstra::new(g, 0).is_err());
    }

    #[test]
    fn unreachable_is_none() {
        let g = WeightedGraph::directed(3, vec![Edge::new(0, 1, 2)]).unwrap();
        let out = Executor::new(Dijkstra::new(g, 0).unwrap()).run();
        assert_eq!(out.distances[2], None);
        assert_eq!(out.path_to(2), None);
    }

    #[test]
    fn bellman_ford_finds_negative_cycle() {
        let g = WeightedGraph::directed(
            4,
            vec![
                Edge::new(0, 1, 1),
                Edge::new(1, 2, -1),
                Edge::new(2, 3, -1),
                Edge::new(3, 1, -1),
            ],
        )
        .unwrap();
        let out = Executor::new(BellmanFord::new(g, 0).unwrap()).run();
        assert_eq!(out.has_negative_cycle, Some(true));
        let mut cycle = out.negative_cycle.unwrap();
        cycle.sort();
        assert_eq!(cycle, vec![1, 2, 3]);
    }

    #[test]
    fn bellman_ford_stops_early() {
        let g = WeightedGraph::directed(5, vec![Edge::new(0, 1, 1)]).unwrap();
        let out = Executor::new(BellmanFord::new(g, 0).unwrap()).run();
        assert_eq!(out.rounds, Some(2));
    }

    #[test]
    fn floyd_all_pairs() {
        let g = sample(crate::instance::Orientation::Directed);
        let out = Executor::new(FloydWarshall::new(g)).run();
        assert!(!out.has_negative_cycle);
        assert_eq!(out.distances[0], vec![Some(0), Some(4), Some(1), Some(9)]);
        assert_eq!(out.distances[3][0], None);
    }

    #[test]
    fn floyd_flags_negative_cycle() {
        let g = WeightedGraph::directed(2, vec![Edge::new(0, 1, 1), Edge::new(1, 0, -2)]).unwrap();
        assert!(Executor::new(FloydWarshall::new(g)).run().has_negative_cycle);
    }

    #[test]
    fn floyd_last_phase_snapshot_equals_result() {
        let g = sample(crate::instance::Orientation::Undirected);
        let (out, trace) = Executor::new(FloydWarshall::new(g)).run_traced();
        let last_phase = trace
            .iter()
            .filter(|s| s.kind == FloydStepKind::Phase)
            .last()
            .and_then(|s| s.matrix.clone());
        assert_eq!(last_phase, Some(out.distances));
    }
}
