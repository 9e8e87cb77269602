//! Breadth-first and depth-first traversal from a start vertex.
//!
//! Neighbours are explored in input order. DFS keeps an explicit stack of
//! `(vertex, next neighbour)` frames so the visit order is exactly that of
//! the recursive formulation.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::InputError;
use crate::instance::WeightedGraph;
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalKind {
    BreadthFirst,
    DepthFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalStepKind {
    /// Vertex added to the frontier.
    Discover,
    /// Vertex taken from the frontier and appended to the visit order.
    Visit,
    /// Edge to an already discovered vertex.
    Skip,
    /// DFS frame finished.
    Backtrack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStep {
    pub kind: TraversalStepKind,
    pub vertex: usize,
    pub from: Option<usize>,
    /// Queue (BFS, front first) or stack (DFS, bottom first) after the step.
    pub frontier: Vec<usize>,
    pub visited: Vec<usize>,
    pub description: String,
}

impl Describe for TraversalStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            TraversalStepKind::Discover => "discover",
            TraversalStepKind::Visit => "visit",
            TraversalStepKind::Skip => "skip",
            TraversalStepKind::Backtrack => "backtrack",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalOutcome {
    pub start: usize,
    pub order: Vec<usize>,
    /// Tree parent of every reached vertex; `None` for the start and for
    /// unreachable vertices.
    pub parent: Vec<Option<usize>>,
    /// Tree depth of every reached vertex.
    pub depth: Vec<Option<usize>>,
}

impl Summary for TraversalOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.start.to_string()),
            ("order", join(&self.order)),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Traversal {
    kind: TraversalKind,
    graph: WeightedGraph,
    start: usize,
}

impl Traversal {
    pub fn new(
        kind: TraversalKind,
        graph: WeightedGraph,
        start: usize,
    ) -> Result<Self, InputError> {
        graph.check_vertex("start vertex", start)?;
        Ok(Self { kind, graph, start })
    }

    pub fn bfs(graph: WeightedGraph, start: usize) -> Result<Self, InputError> {
        Self::new(TraversalKind::BreadthFirst, graph, start)
    }

    pub fn dfs(graph: WeightedGraph, start: usize) -> Result<Self, InputError> {
        Self::new(TraversalKind::DepthFirst, graph, start)
    }
}

impl TracedAlgorithm for Traversal {
    type Step = TraversalStep;
    type Outcome = TraversalOutcome;

    fn name(&self) -> &'static str {
        match self.kind {
            TraversalKind::BreadthFirst => "Breadth-First Search",
            TraversalKind::DepthFirst => "Depth-First Search",
        }
    }

    fn execute<S: StepSink<TraversalStep>>(&self, sink: &mut S) -> TraversalOutcome {
        let n = self.graph.vertices();
        let mut walk = Walk {
            sink,
            order: Vec::with_capacity(n),
            parent: vec![None; n],
            depth: vec![None; n],
        };
        let adj = self.graph.adjacency();
        match self.kind {
            TraversalKind::BreadthFirst => walk.bfs(&adj, self.start),
            TraversalKind::DepthFirst => walk.dfs(&adj, self.start),
        }
        TraversalOutcome {
            start: self.start,
            order: walk.order,
            parent: walk.parent,
            depth: walk.depth,
        }
    }
}

struct Walk<'a, S> {
    sink: &'a mut S,
    order: Vec<usize>,
    parent: Vec<Option<usize>>,
    depth: Vec<Option<usize>>,
}

impl<S: StepSink<TraversalStep>> Walk<'_, S> {
    fn step<D>(
        &mut self,
        kind: TraversalStepKind,
        vertex: usize,
        from: Option<usize>,
        frontier: Vec<usize>,
        describe: D,
    ) where
        D: FnOnce() -> String,
    {
        let visited = &self.order;
        self.sink.record_with(|| TraversalStep {
            kind,
            vertex,
            from,
            frontier,
            visited: visited.clone(),
            description: describe(),
        });
    }

    /// Queue contents for the next step; empty when nothing is recorded.
    fn frontier(&self, queue: &VecDeque<usize>) -> Vec<usize> {
        if self.sink.is_recording() {
            queue.iter().copied().collect()
        } else {
            Vec::new()
        }
    }

    fn bfs(&mut self, adj: &[Vec<(usize, i64)>], start: usize) {
        let mut discovered = vec![false; adj.len()];
        let mut queue = VecDeque::from([start]);
        discovered[start] = true;
        self.depth[start] = Some(0);
        self.step(TraversalStepKind::Discover, start, None, vec![start], || {
            format!("Enqueue start vertex {start}")
        });

        while let Some(u) = queue.pop_front() {
            self.order.push(u);
            let frontier = self.frontier(&queue);
            self.step(TraversalStepKind::Visit, u, self.parent[u], frontier, || {
                format!("Dequeue and visit {u}")
            });
            for &(v, _) in &adj[u] {
                if discovered[v] {
                    let frontier = self.frontier(&queue);
                    self.step(TraversalStepKind::Skip, v, Some(u), frontier, || {
                        format!("{v} already discovered")
                    });
                    continue;
                }
                discovered[v] = true;
                self.parent[v] = Some(u);
                self.depth[v] = self.depth[u].map(|d| d + 1);
                queue.push_back(v);
                let frontier = self.frontier(&queue);
                self.step(TraversalStepKind::Discover, v, Some(u), frontier, || {
                    format!("Enqueue {v} via edge {u}-{v}")
                });
            }
        }
    }

    fn dfs(&mut self, adj: &[Vec<(usize, i64)>], start: usize) {
        let mut visited = vec![false; adj.len()];
        // (vertex, index of the next neighbour to try)
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        visited[start] = true;
        self.depth[start] = Some(0);
        self.order.push(start);
        self.step(TraversalStepKind::Visit, start, None, vec![start], || {
            format!("Visit start vertex {start}")
        });

        while let Some(frame) = stack.last_mut() {
            let (u, next) = *frame;
            if next == adj[u].len() {
                stack.pop();
                let frontier = stack.iter().map(|&(v, _)| v).collect();
                self.step(TraversalStepKind::Backtrack, u, None, frontier, || {
                    format!("All neighbours of {u} explored, backtrack")
                });
                continue;
            }
            frame.1 += 1;
            let v = adj[u][next].0;
            if visited[v] {
                let frontier = stack.iter().map(|&(w, _)| w).collect();
                self.step(TraversalStepKind::Skip, v, Some(u), frontier, || {
                    format!("{v} already visited")
                });
                continue;
            }
            visited[v] = true;
            self.parent[v] = Some(u);
            self.depth[v] = self.depth[u].map(|d| d + 1);
            self.order.push(v);
            stack.push((v, 0));
            let frontier = stack.iter().map(|&(w, _)| w).collect();
            self.step(TraversalStepKind::Visit, v, Some(u), frontier, || {
                format!("Visit {v} via edge {u}-{v}")
            });
        }
    }
}
