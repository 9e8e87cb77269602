//! Validated problem instances.
//!
//! These are the immutable inputs the algorithms run over. Constructors
//! check structural invariants (vertex bounds, square matrices, positive
//! weights) so algorithm code can index freely.

use serde::Serialize;

use crate::error::InputError;

/// Whether edges are one-way arcs or two-way links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Directed,
    Undirected,
}

/// A weighted edge `from -> to` (or `from -- to` when undirected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(from: usize, to: usize, weight: i64) -> Self {
        Self { from, to, weight }
    }
}

/// Vertex count plus edge list; vertices are `0..vertices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedGraph {
    vertices: usize,
    edges: Vec<Edge>,
    orientation: Orientation,
}

impl WeightedGraph {
    pub fn new(
        vertices: usize,
        edges: Vec<Edge>,
        orientation: Orientation,
    ) -> Result<Self, InputError> {
        for e in &edges {
            for endpoint in [e.from, e.to] {
                if endpoint >= vertices {
                    return Err(InputError::OutOfRange {
                        what: "vertex",
                        index: endpoint as i64,
                        bound: vertices,
                    });
                }
            }
        }
        Ok(Self {
            vertices,
            edges,
            orientation,
        })
    }

    pub fn directed(vertices: usize, edges: Vec<Edge>) -> Result<Self, InputError> {
        Self::new(vertices, edges, Orientation::Directed)
    }

    pub fn undirected(vertices: usize, edges: Vec<Edge>) -> Result<Self, InputError> {
        Self::new(vertices, edges, Orientation::Undirected)
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Edges as given in the input.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Same edges, different orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Traversable arcs in input order. An undirected edge yields both
    /// directions (once for a self-loop).
    pub fn arcs(&self) -> Vec<Edge> {
        match self.orientation {
            Orientation::Directed => self.edges.clone(),
            Orientation::Undirected => {
                let mut arcs = Vec::with_capacity(self.edges.len() * 2);
                for e in &self.edges {
                    arcs.push(*e);
                    if e.from != e.to {
                        arcs.push(Edge::new(e.to, e.from, e.weight));
                    }
                }
                arcs
            }
        }
    }

    /// `adjacency[u]` = `(v, weight)` for every arc leaving `u`, input order.
    pub fn adjacency(&self) -> Vec<Vec<(usize, i64)>> {
        let mut adj = vec![Vec::new(); self.vertices];
        for arc in self.arcs() {
            adj[arc.from].push((arc.to, arc.weight));
        }
        adj
    }

    /// Adjacency of the graph with every arc reversed.
    pub fn reversed_adjacency(&self) -> Vec<Vec<(usize, i64)>> {
        let mut adj = vec![Vec::new(); self.vertices];
        for arc in self.arcs() {
            adj[arc.to].push((arc.from, arc.weight));
        }
        adj
    }

    /// Reject a start/source vertex outside the graph.
    pub fn check_vertex(&self, what: &'static str, v: usize) -> Result<(), InputError> {
        if v < self.vertices {
            Ok(())
        } else {
            Err(InputError::OutOfRange {
                what,
                index: v as i64,
                bound: self.vertices,
            })
        }
    }
}

/// Knapsack item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub value: i64,
    pub weight: u64,
}

/// Interval to schedule; `start <= finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub start: i64,
    pub finish: i64,
}

/// Unit-time job with a deadline (in slots, starting at 1) and a profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: String,
    pub deadline: usize,
    pub profit: i64,
}

/// One scripted data-structure operation such as `push 5` or `pop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub name: String,
    pub value: Option<i64>,
}

impl Operation {
    pub fn new(name: &str, value: Option<i64>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            value,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(v) => write!(f, "{} {v}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Square matrix of travel costs; `None` means no direct edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    cells: Vec<Vec<Option<i64>>>,
}

impl DistanceMatrix {
    pub fn new(cells: Vec<Vec<Option<i64>>>) -> Result<Self, InputError> {
        let n = cells.len();
        if let Some((row, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(InputError::Invalid(format!(
                "distance matrix must be square: row {row} has {} cell(s), expected {n}",
                r.len()
            )));
        }
        Ok(Self { cells })
    }

    /// Build from plain costs, every pair connected.
    pub fn complete(costs: Vec<Vec<i64>>) -> Result<Self, InputError> {
        Self::new(
            costs
                .into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Option<i64> {
        self.cells[from][to]
    }

    pub fn rows(&self) -> &[Vec<Option<i64>>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Edge> {
        vec![Edge::new(0, 1, 4), Edge::new(1, 2, 2), Edge::new(2, 2, 9)]
    }

    #[test]
    fn rejects_out_of_range_vertex() {
        let err = WeightedGraph::directed(2, sample()).unwrap_err();
        assert_eq!(
            err,
            InputError::OutOfRange {
                what: "vertex",
                index: 2,
                bound: 2
            }
        );
    }

    #[test]
    fn undirected_arcs_mirror_except_self_loops() {
        let g = WeightedGraph::undirected(3, sample()).unwrap();
        let arcs = g.arcs();
        assert_eq!(arcs.len(), 5);
        assert_eq!(arcs[1], Edge::new(1, 0, 4));
        assert_eq!(g.adjacency()[1], vec![(0, 4), (2, 2)]);
    }

    #[test]
    fn reversed_adjacency_flips_arcs() {
        let g = WeightedGraph::directed(3, sample()).unwrap();
        assert_eq!(g.reversed_adjacency()[1], vec![(0, 4)]);
        assert_eq!(g.reversed_adjacency()[0], vec![]);
    }

    #[test]
    fn matrix_must_be_square() {
        assert!(DistanceMatrix::complete(vec![vec![0, 1], vec![1]]).is_err());
        let m = DistanceMatrix::complete(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(0, 1), Some(1));
    }
}
