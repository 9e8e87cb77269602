//! Example: Dijkstra vs Bellman-Ford on the same small road map.
//!
//! Run with:
//! `cargo run --example shortest_path`

use algo_trace::{
    instance::{Edge, WeightedGraph},
    problems::shortest_path::{BellmanFord, Dijkstra, PathStepKind},
    AlgoError, Executor,
};

fn main() -> Result<(), AlgoError> {
    let edges = vec![
        Edge::new(0, 1, 4),
        Edge::new(0, 2, 1),
        Edge::new(1, 2, 2),
        Edge::new(1, 3, 5),
        Edge::new(2, 3, 8),
    ];
    let graph = WeightedGraph::undirected(4, edges)?;

    let (dijkstra, trace) = Executor::new(Dijkstra::new(graph.clone(), 0)?).run_traced();
    let relaxations = trace.iter().filter(|s| s.kind == PathStepKind::Relax).count();
    println!("Dijkstra distances: {:?} ({relaxations} relaxations)", dijkstra.distances);
    if let Some(path) = dijkstra.path_to(3) {
        println!("Route 0 -> 3: {path:?}");
    }

    let bellman = Executor::new(BellmanFord::new(graph, 0)?).run();
    println!(
        "Bellman-Ford distances: {:?} after {} round(s)",
        bellman.distances,
        bellman.rounds.unwrap_or(0)
    );
    Ok(())
}
