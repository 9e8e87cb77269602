use algo_trace::instance::{Edge, WeightedGraph};
use algo_trace::problems::shortest_path::{BellmanFord, Dijkstra, FloydWarshall, PathStepKind};
use algo_trace::Executor;
use proptest::prelude::*;

fn reference_edges() -> Vec<Edge> {
    vec![
        Edge::new(0, 1, 4),
        Edge::new(0, 2, 1),
        Edge::new(1, 2, 2),
        Edge::new(1, 3, 5),
        Edge::new(2, 3, 8),
    ]
}

/// No arc can still be relaxed once a run has settled.
fn assert_relaxed(graph: &WeightedGraph, distances: &[Option<i64>]) {
    for arc in graph.arcs() {
        if let (Some(du), Some(dv)) = (distances[arc.from], distances[arc.to]) {
            assert!(
                dv <= du + arc.weight,
                "arc {arc:?} still relaxes: {du} + {} < {dv}",
                arc.weight
            );
        }
        if distances[arc.from].is_some() {
            assert!(distances[arc.to].is_some(), "arc {arc:?} leads to an unreached vertex");
        }
    }
}

#[test]
fn dijkstra_and_bellman_ford_agree_on_reference_graph() {
    let graph = WeightedGraph::undirected(4, reference_edges()).unwrap();
    let d = Executor::new(Dijkstra::new(graph.clone(), 0).unwrap()).run();
    let b = Executor::new(BellmanFord::new(graph.clone(), 0).unwrap()).run();
    let expected = vec![Some(0), Some(3), Some(1), Some(8)];
    assert_eq!(d.distances, expected);
    assert_eq!(b.distances, expected);
    assert_eq!(b.has_negative_cycle, Some(false));
    assert_relaxed(&graph, &d.distances);
    assert_eq!(d.path_to(3), Some(vec![0, 2, 1, 3]));
}

#[test]
fn floyd_rows_match_single_source_runs() {
    let graph = WeightedGraph::directed(4, reference_edges()).unwrap();
    let all = Executor::new(FloydWarshall::new(graph.clone())).run();
    assert!(!all.has_negative_cycle);
    for source in 0..4 {
        let single = Executor::new(BellmanFord::new(graph.clone(), source).unwrap()).run();
        assert_eq!(all.distances[source], single.distances, "row {source}");
    }
}

#[test]
fn unreachable_vertices_stay_none() {
    let graph = WeightedGraph::directed(3, vec![Edge::new(0, 1, 2)]).unwrap();
    let out = Executor::new(Dijkstra::new(graph, 0).unwrap()).run();
    assert_eq!(out.distances, vec![Some(0), Some(2), None]);
    assert_eq!(out.path_to(2), None);
}

#[test]
fn negative_cycle_is_reported_with_its_vertices() {
    let edges = vec![
        Edge::new(0, 1, 1),
        Edge::new(1, 2, -3),
        Edge::new(2, 1, 1),
        Edge::new(2, 3, 2),
    ];
    let graph = WeightedGraph::directed(4, edges).unwrap();
    let (out, trace) = Executor::new(BellmanFord::new(graph, 0).unwrap()).run_traced();
    assert_eq!(out.has_negative_cycle, Some(true));
    let mut cycle = out.negative_cycle.unwrap();
    cycle.sort();
    cycle.dedup();
    assert_eq!(cycle, vec![1, 2]);
    assert!(trace.iter().any(|s| s.kind == PathStepKind::NegativeCycle));
}

#[test]
fn dijkstra_rejects_negative_weights() {
    let graph = WeightedGraph::directed(2, vec![Edge::new(0, 1, -1)]).unwrap();
    assert!(Dijkstra::new(graph, 0).is_err());
}

#[test]
fn source_out_of_range_is_rejected() {
    let graph = WeightedGraph::directed(2, vec![Edge::new(0, 1, 1)]).unwrap();
    assert!(Dijkstra::new(graph.clone(), 2).is_err());
    assert!(BellmanFord::new(graph, 5).is_err());
}

fn random_graph_with(weights: std::ops::Range<i64>) -> impl Strategy<Value = WeightedGraph> {
    (1usize..8).prop_flat_map(move |n| {
        prop::collection::vec((0..n, 0..n, weights.clone()), 0..20).prop_map(move |raw| {
            let edges = raw.into_iter().map(|(u, v, w)| Edge::new(u, v, w)).collect();
            WeightedGraph::directed(n, edges).unwrap()
        })
    })
}

fn random_graph() -> impl Strategy<Value = WeightedGraph> {
    random_graph_with(0..20)
}

proptest! {
    #[test]
    fn non_negative_graphs_agree(graph in random_graph()) {
        let d = Executor::new(Dijkstra::new(graph.clone(), 0).unwrap()).run();
        let b = Executor::new(BellmanFord::new(graph.clone(), 0).unwrap()).run();
        let f = Executor::new(FloydWarshall::new(graph.clone())).run();
        prop_assert_eq!(&d.distances, &b.distances);
        prop_assert_eq!(&d.distances, &f.distances[0]);
        assert_relaxed(&graph, &d.distances);
    }

    #[test]
    fn negative_weights_agree_with_floyd(graph in random_graph_with(-8..20)) {
        let f = Executor::new(FloydWarshall::new(graph.clone())).run();
        let rows: Vec<_> = (0..graph.vertices())
            .map(|s| Executor::new(BellmanFord::new(graph.clone(), s).unwrap()).run())
            .collect();
        // every vertex is a source, so each cycle is reachable from some run
        let any_cycle = rows.iter().any(|b| b.has_negative_cycle == Some(true));
        prop_assert_eq!(f.has_negative_cycle, any_cycle);
        if !any_cycle {
            for (source, b) in rows.iter().enumerate() {
                prop_assert_eq!(&f.distances[source], &b.distances, "row {}", source);
                assert_relaxed(&graph, &b.distances);
            }
        }
    }
}
