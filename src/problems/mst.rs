//! Minimum spanning forests: Kruskal (union-find) and Prim (heap frontier).
//!
//! Both treat the graph as undirected. On a disconnected graph they return
//! one tree per component, so their total weights always agree.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::instance::{Edge, Orientation, WeightedGraph};
use crate::traits::{Describe, StepSink, Summary, TracedAlgorithm};

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`; false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    /// Number of disjoint sets.
    pub fn sets(&self) -> usize {
        self.sets
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MstStepKind {
    /// Prim: new tree started at an unvisited vertex.
    Root,
    Consider,
    Accept,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MstStep {
    pub kind: MstStepKind,
    pub edge: Option<Edge>,
    /// Forest edges accepted so far.
    pub tree: Vec<Edge>,
    pub total_weight: i64,
    pub description: String,
}

impl Describe for MstStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            MstStepKind::Root => "root",
            MstStepKind::Consider => "consider",
            MstStepKind::Accept => "accept",
            MstStepKind::Reject => "reject",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MstOutcome {
    pub edges: Vec<Edge>,
    pub total_weight: i64,
    /// Trees in the forest; 1 means a spanning tree.
    pub components: usize,
}

impl Summary for MstOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let edges: Vec<String> = self
            .edges
            .iter()
            .map(|e| format!("{}-{} ({})", e.from, e.to, e.weight))
            .collect();
        vec![
            ("edges", edges.join(", ")),
            ("totalWeight", self.total_weight.to_string()),
            ("components", self.components.to_string()),
        ]
    }
}

struct Forest<'a, S> {
    sink: &'a mut S,
    tree: Vec<Edge>,
    total: i64,
}

impl<S: StepSink<MstStep>> Forest<'_, S> {
    fn step<D: FnOnce() -> String>(&mut self, kind: MstStepKind, edge: Option<Edge>, describe: D) {
        let (tree, total) = (&self.tree, self.total);
        self.sink.record_with(|| MstStep {
            kind,
            edge,
            tree: tree.clone(),
            total_weight: total,
            description: describe(),
        });
    }

    fn accept(&mut self, e: Edge) {
        self.tree.push(e);
        self.total = self.total.saturating_add(e.weight);
        self.step(MstStepKind::Accept, Some(e), || {
            format!("Add edge {}-{} (w={})", e.from, e.to, e.weight)
        });
    }
}

#[derive(Debug, Clone)]
pub struct Kruskal {
    graph: WeightedGraph,
}

impl Kruskal {
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            graph: graph.with_orientation(Orientation::Undirected),
        }
    }
}

impl TracedAlgorithm for Kruskal {
    type Step = MstStep;
    type Outcome = MstOutcome;

    fn name(&self) -> &'static str {
        "Kruskal"
    }

    fn execute<S: StepSink<MstStep>>(&self, sink: &mut S) -> MstOutcome {
        let mut edges = self.graph.edges().to_vec();
        // stable: equal weights keep input order
        edges.sort_by_key(|e| e.weight);
        let mut uf = UnionFind::new(self.graph.vertices());
        let mut forest = Forest {
            sink,
            tree: Vec::new(),
            total: 0,
        };
        for e in edges {
            forest.step(MstStepKind::Consider, Some(e), || {
                format!("Consider edge {}-{} (w={})", e.from, e.to, e.weight)
            });
            if uf.union(e.from, e.to) {
                forest.accept(e);
            } else {
                forest.step(MstStepKind::Reject, Some(e), || {
                    format!("Reject {}-{}: endpoints already connected", e.from, e.to)
                });
            }
        }
        MstOutcome {
            edges: forest.tree,
            total_weight: forest.total,
            components: uf.sets(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prim {
    graph: WeightedGraph,
}

impl Prim {
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            graph: graph.with_orientation(Orientation::Undirected),
        }
    }
}

impl TracedAlgorithm for Prim {
    type Step = MstStep;
    type Outcome = MstOutcome;

    fn name(&self) -> &'static str {
        "Prim"
    }

    fn execute<S: StepSink<MstStep>>(&self, sink: &mut S) -> MstOutcome {
        let n = self.graph.vertices();
        let adj = self.graph.adjacency();
        let mut in_tree = vec![false; n];
        let mut forest = Forest {
            sink,
            tree: Vec::new(),
            total: 0,
        };
        let mut components = 0;
        // (weight, push order, from, to); push order breaks ties deterministically
        let mut heap: BinaryHeap<Reverse<(i64, usize, usize, usize)>> = BinaryHeap::new();
        let mut pushed = 0usize;

        for root in 0..n {
            if in_tree[root] {
                continue;
            }
            components += 1;
            in_tree[root] = true;
            forest.step(MstStepKind::Root, None, || format!("Start a tree at vertex {root}"));
            for &(v, w) in &adj[root] {
                heap.push(Reverse((w, pushed, root, v)));
                pushed += 1;
            }
            while let Some(Reverse((w, _, u, v))) = heap.pop() {
                let e = Edge::new(u, v, w);
                forest.step(MstStepKind::Consider, Some(e), || {
                    format!("Cheapest frontier edge {u}-{v} (w={w})")
                });
                if in_tree[v] {
                    forest.step(MstStepKind::Reject, Some(e), || {
                        format!("Reject {u}-{v}: {v} already in tree")
                    });
                    continue;
                }
                in_tree[v] = true;
                forest.accept(e);
                for &(x, wx) in &adj[v] {
                    if !in_tree[x] {
                        heap.push(Reverse((wx, pushed, v, x)));
                        pushed += 1;
                    }
                }
            }
        }

        MstOutcome {
            edges: forest.tree,
            total_weight: forest.total,
            components,
        }
    }
}
