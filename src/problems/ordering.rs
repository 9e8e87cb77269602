//! Orderings of directed graphs: Kahn's algorithm, DFS finish-order
//! topological sort and Kosaraju's strongly connected components.
//!
//! These always read edges as directed arcs `u -> v`.

use std::collections::VecDeque;

use serde::Serialize;

use crate::instance::{Orientation, WeightedGraph};
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStepKind {
    /// Kahn: in-degrees computed.
    Init,
    Enqueue,
    /// Kahn: vertex removed from the queue and emitted.
    Emit,
    /// Kahn: in-degree of a successor lowered.
    Decrement,
    /// DFS: vertex entered.
    Enter,
    /// DFS: vertex finished.
    Finish,
    /// DFS: edge to a vertex still on the stack.
    BackEdge,
    /// Kosaraju: one component collected.
    Component,
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStep {
    pub kind: OrderStepKind,
    pub vertex: Option<usize>,
    pub from: Option<usize>,
    /// Kosaraju pass (1 forward, 2 reversed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<u8>,
    /// Kahn: in-degree of every vertex after the step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_degree: Option<Vec<usize>>,
    /// Vertices emitted (Kahn), finished (DFS) or grouped (Kosaraju) so far.
    pub sequence: Vec<usize>,
    pub description: String,
}

impl Describe for OrderStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            OrderStepKind::Init => "init",
            OrderStepKind::Enqueue => "enqueue",
            OrderStepKind::Emit => "emit",
            OrderStepKind::Decrement => "decrement",
            OrderStepKind::Enter => "enter",
            OrderStepKind::Finish => "finish",
            OrderStepKind::BackEdge => "back_edge",
            OrderStepKind::Component => "component",
            OrderStepKind::Cycle => "cycle",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

impl OrderStep {
    fn new(
        kind: OrderStepKind,
        vertex: Option<usize>,
        sequence: &[usize],
        description: String,
    ) -> Self {
        Self {
            kind,
            vertex,
            from: None,
            pass: None,
            in_degree: None,
            sequence: sequence.to_vec(),
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopoOutcome {
    /// `None` when the graph has a cycle.
    pub order: Option<Vec<usize>>,
    pub has_cycle: bool,
}

impl Summary for TopoOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "order",
                self.order.as_deref().map_or_else(|| "none".to_string(), join),
            ),
            ("hasCycle", self.has_cycle.to_string()),
        ]
    }
}

/// DFS events produced by [`depth_first`].
enum Event {
    Enter { v: usize, parent: Option<usize> },
    Back { u: usize, v: usize },
    Finish(usize),
}

/// Iterative DFS from `root` over unvisited vertices, neighbours in input
/// order, reporting events in the order recursion would.
fn depth_first<F: FnMut(Event)>(
    adj: &[Vec<(usize, i64)>],
    root: usize,
    visited: &mut [bool],
    on_stack: &mut [bool],
    mut on_event: F,
) {
    if visited[root] {
        return;
    }
    visited[root] = true;
    on_stack[root] = true;
    on_event(Event::Enter { v: root, parent: None });
    let mut stack = vec![(root, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (u, next) = *frame;
        if next == adj[u].len() {
            stack.pop();
            on_stack[u] = false;
            on_event(Event::Finish(u));
            continue;
        }
        frame.1 += 1;
        let v = adj[u][next].0;
        if on_stack[v] {
            on_event(Event::Back { u, v });
        } else if !visited[v] {
            visited[v] = true;
            on_stack[v] = true;
            on_event(Event::Enter { v, parent: Some(u) });
            stack.push((v, 0));
        }
    }
}

fn directed(graph: WeightedGraph) -> WeightedGraph {
    graph.with_orientation(Orientation::Directed)
}

/// Kahn's algorithm with a FIFO queue seeded in vertex order.
#[derive(Debug, Clone)]
pub struct Kahn {
    graph: WeightedGraph,
}

impl Kahn {
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            graph: directed(graph),
        }
    }
}

impl TracedAlgorithm for Kahn {
    type Step = OrderStep;
    type Outcome = TopoOutcome;

    fn name(&self) -> &'static str {
        "Kahn's Algorithm"
    }

    fn execute<S: StepSink<OrderStep>>(&self, sink: &mut S) -> TopoOutcome {
        let n = self.graph.vertices();
        let adj = self.graph.adjacency();
        let mut in_degree = vec![0usize; n];
        for e in self.graph.edges() {
            in_degree[e.to] += 1;
        }
        let mut order = Vec::with_capacity(n);
        sink.record_with(|| OrderStep {
            in_degree: Some(in_degree.clone()),
            ..OrderStep::new(OrderStepKind::Init, None, &order, "Compute in-degrees".into())
        });

        let mut queue = VecDeque::new();
        for v in 0..n {
            if in_degree[v] == 0 {
                queue.push_back(v);
                sink.record_with(|| {
                    let description = format!("{v} has in-degree 0");
                    OrderStep::new(OrderStepKind::Enqueue, Some(v), &order, description)
                });
            }
        }

        while let Some(u) = queue.pop_front() {
            order.push(u);
            sink.record_with(|| {
                OrderStep::new(OrderStepKind::Emit, Some(u), &order, format!("Emit {u}"))
            });
            for &(v, _) in &adj[u] {
                in_degree[v] -= 1;
                sink.record_with(|| OrderStep {
                    from: Some(u),
                    in_degree: Some(in_degree.clone()),
                    ..OrderStep::new(
                        OrderStepKind::Decrement,
                        Some(v),
                        &order,
                        format!("Remove {u}->{v}: in-degree of {v} is now {}", in_degree[v]),
                    )
                });
                if in_degree[v] == 0 {
                    queue.push_back(v);
                    sink.record_with(|| {
                        let description = format!("{v} has in-degree 0");
                        OrderStep::new(OrderStepKind::Enqueue, Some(v), &order, description)
                    });
                }
            }
        }

        let has_cycle = order.len() < n;
        if has_cycle {
            sink.record_with(|| {
                OrderStep::new(
                    OrderStepKind::Cycle,
                    None,
                    &order,
                    format!("Only {} of {n} vertices emitted: graph has a cycle", order.len()),
                )
            });
        }
        TopoOutcome {
            order: (!has_cycle).then_some(order),
            has_cycle,
        }
    }
}

/// Reverse DFS finish order, roots tried in vertex order.
#[derive(Debug, Clone)]
pub struct DfsTopological {
    graph: WeightedGraph,
}

impl DfsTopological {
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            graph: directed(graph),
        }
    }
}

impl TracedAlgorithm for DfsTopological {
    type Step = OrderStep;
    type Outcome = TopoOutcome;

    fn name(&self) -> &'static str {
        "Topological Sort (DFS)"
    }

    fn execute<S: StepSink<OrderStep>>(&self, sink: &mut S) -> TopoOutcome {
        let n = self.graph.vertices();
        let adj = self.graph.adjacency();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut finished = Vec::with_capacity(n);
        let mut has_cycle = false;

        for root in 0..n {
            depth_first(&adj, root, &mut visited, &mut on_stack, |event| match event {
                Event::Enter { v, parent } => sink.record_with(|| OrderStep {
                    from: parent,
                    ..OrderStep::new(OrderStepKind::Enter, Some(v), &finished, format!("Enter {v}"))
                }),
                Event::Back { u, v } => {
                    has_cycle = true;
                    sink.record_with(|| OrderStep {
                        from: Some(u),
                        ..OrderStep::new(
                            OrderStepKind::BackEdge,
                            Some(v),
                            &finished,
                            format!("Back edge {u}->{v}: graph has a cycle"),
                        )
                    });
                }
                Event::Finish(v) => {
                    finished.push(v);
                    sink.record_with(|| {
                        let description = format!("Finish {v}");
                        OrderStep::new(OrderStepKind::Finish, Some(v), &finished, description)
                    });
                }
            });
        }

        finished.reverse();
        TopoOutcome {
            order: (!has_cycle).then_some(finished),
            has_cycle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SccOutcome {
    /// Components in discovery order of pass 2; members in visit order.
    pub components: Vec<Vec<usize>>,
    pub component_of: Vec<usize>,
    pub count: usize,
}

impl Summary for SccOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("count", self.count.to_string())];
        for c in &self.components {
            lines.push(("component", join(c)));
        }
        lines
    }
}

#[derive(Debug, Clone)]
pub struct Kosaraju {
    graph: WeightedGraph,
}

impl Kosaraju {
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            graph: directed(graph),
        }
    }
}

impl TracedAlgorithm for Kosaraju {
    type Step = OrderStep;
    type Outcome = SccOutcome;

    fn name(&self) -> &'static str {
        "Kosaraju"
    }

    fn execute<S: StepSink<OrderStep>>(&self, sink: &mut S) -> SccOutcome {
        let n = self.graph.vertices();
        let forward = self.graph.adjacency();
        let reverse = self.graph.reversed_adjacency();

        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut finish_order = Vec::with_capacity(n);
        for root in 0..n {
            depth_first(&forward, root, &mut visited, &mut on_stack, |event| match event {
                Event::Enter { v, parent } => sink.record_with(|| OrderStep {
                    from: parent,
                    pass: Some(1),
                    ..OrderStep::new(
                        OrderStepKind::Enter,
                        Some(v),
                        &finish_order,
                        format!("Pass 1: enter {v}"),
                    )
                }),
                Event::Finish(v) => {
                    finish_order.push(v);
                    sink.record_with(|| OrderStep {
                        pass: Some(1),
                        ..OrderStep::new(
                            OrderStepKind::Finish,
                            Some(v),
                            &finish_order,
                            format!("Pass 1: finish {v}"),
                        )
                    });
                }
                Event::Back { .. } => {}
            });
        }

        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut component_of = vec![0; n];
        let mut components: Vec<Vec<usize>> = Vec::new();
        for &root in finish_order.iter().rev() {
            if visited[root] {
                continue;
            }
            let mut members = Vec::new();
            depth_first(&reverse, root, &mut visited, &mut on_stack, |event| {
                if let Event::Enter { v, parent } = event {
                    members.push(v);
                    sink.record_with(|| OrderStep {
                        from: parent,
                        pass: Some(2),
                        ..OrderStep::new(
                            OrderStepKind::Enter,
                            Some(v),
                            &members,
                            format!("Pass 2: enter {v}"),
                        )
                    });
                }
            });
            for &v in &members {
                component_of[v] = components.len();
            }
            let id = components.len();
            sink.record_with(|| OrderStep {
                pass: Some(2),
                ..OrderStep::new(
                    OrderStepKind::Component,
                    Some(root),
                    &members,
                    format!("Component {id}: {{{}}}", join(&members)),
                )
            });
            components.push(members);
        }

        SccOutcome {
            count: components.len(),
            components,
            component_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Edge;
    use crate::Executor;

    fn dag() -> WeightedGraph {
        // 5->2, 5->0, 4->0, 4->1, 2->3, 3->1
        WeightedGraph::directed(
            6,
            vec![
                Edge::new(5, 2, 1),
                Edge::new(5, 0, 1),
                Edge::new(4, 0, 1),
                Edge::new(4, 1, 1),
                Edge::new(2, 3, 1),
                Edge::new(3, 1, 1),
            ],
        )
        .unwrap()
    }

    fn respects_edges(order: &[usize], g: &WeightedGraph) -> bool {
        let mut pos = vec![0; g.vertices()];
        for (i, &v) in order.iter().enumerate() {
            pos[v] = i;
        }
        g.edges().iter().all(|e| pos[e.from] < pos[e.to])
    }

    #[test]
    fn kahn_orders_dag() {
        let out = Executor::new(Kahn::new(dag())).run();
        assert!(!out.has_cycle);
        let order = out.order.unwrap();
        assert_eq!(order, vec![4, 5, 2, 0, 3, 1]);
        assert!(respects_edges(&order, &dag()));
    }

    #[test]
    fn dfs_topological_orders_dag() {
        let out = Executor::new(DfsTopological::new(dag())).run();
        let order = out.order.unwrap();
        assert_eq!(order.len(), 6);
        assert!(respects_edges(&order, &dag()));
    }

    #[test]
    fn both_detect_cycles() {
        let edges = vec![Edge::new(0, 1, 1), Edge::new(1, 2, 1), Edge::new(2, 0, 1)];
        let g = WeightedGraph::directed(3, edges).unwrap();
        let k = Executor::new(Kahn::new(g.clone())).run();
        let d = Executor::new(DfsTopological::new(g)).run();
        assert!(k.has_cycle && d.has_cycle);
        assert_eq!(k.order, None);
        assert_eq!(d.order, None);
    }

    #[test]
    fn kosaraju_groups_cycles() {
        let g = WeightedGraph::directed(
            5,
            vec![
                Edge::new(1, 0, 1),
                Edge::new(0, 2, 1),
                Edge::new(2, 1, 1),
                Edge::new(0, 3, 1),
                Edge::new(3, 4, 1),
            ],
        )
        .unwrap();
        let out = Executor::new(Kosaraju::new(g)).run();
        assert_eq!(out.count, 3);
        assert_eq!(out.component_of[0], out.component_of[1]);
        assert_eq!(out.component_of[1], out.component_of[2]);
        assert_ne!(out.component_of[3], out.component_of[4]);
        let mut first = out.components[0].clone();
        first.sort();
        assert_eq!(first, vec![0, 1, 2]);
    }
}
