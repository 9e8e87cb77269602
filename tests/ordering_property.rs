use algo_trace::instance::{Edge, WeightedGraph};
use algo_trace::problems::ordering::{DfsTopological, Kahn, Kosaraju};
use algo_trace::Executor;
use proptest::prelude::*;

/// `reach[u][v]`: a directed path (possibly empty) leads from `u` to `v`.
fn reachability(graph: &WeightedGraph) -> Vec<Vec<bool>> {
    let n = graph.vertices();
    let mut reach = vec![vec![false; n]; n];
    for (u, row) in reach.iter_mut().enumerate() {
        row[u] = true;
    }
    for arc in graph.arcs() {
        reach[arc.from][arc.to] = true;
    }
    for k in 0..n {
        for i in 0..n {
            if !reach[i][k] {
                continue;
            }
            for j in 0..n {
                if reach[k][j] {
                    reach[i][j] = true;
                }
            }
        }
    }
    reach
}

fn has_cycle(graph: &WeightedGraph, reach: &[Vec<bool>]) -> bool {
    graph
        .arcs()
        .iter()
        .any(|arc| arc.from == arc.to || reach[arc.to][arc.from])
}

fn random_digraph() -> impl Strategy<Value = WeightedGraph> {
    (1usize..9).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..18).prop_map(move |raw| {
            let edges = raw.into_iter().map(|(u, v)| Edge::new(u, v, 1)).collect();
            WeightedGraph::directed(n, edges).unwrap()
        })
    })
}

fn assert_topological(graph: &WeightedGraph, order: &[usize]) {
    let mut position = vec![usize::MAX; graph.vertices()];
    for (i, &v) in order.iter().enumerate() {
        assert_eq!(position[v], usize::MAX, "{v} listed twice");
        position[v] = i;
    }
    assert_eq!(order.len(), graph.vertices());
    for arc in graph.arcs() {
        assert!(position[arc.from] < position[arc.to], "{arc:?} points backwards");
    }
}

#[test]
fn two_cycles_joined_by_a_bridge() {
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3), (5, 5)]
        .into_iter()
        .map(|(u, v)| Edge::new(u, v, 1))
        .collect();
    let graph = WeightedGraph::directed(6, edges).unwrap();
    let out = Executor::new(Kosaraju::new(graph)).run();
    assert_eq!(out.count, 3);
    let mut sizes: Vec<usize> = out.components.iter().map(Vec::len).collect();
    sizes.sort();
    assert_eq!(sizes, vec![1, 2, 3]);
}

proptest! {
    #[test]
    fn components_are_maximal_mutually_reachable_sets(graph in random_digraph()) {
        let reach = reachability(&graph);
        let out = Executor::new(Kosaraju::new(graph.clone())).run();
        let n = graph.vertices();

        prop_assert_eq!(out.count, out.components.len());
        let mut seen = vec![false; n];
        for (c, members) in out.components.iter().enumerate() {
            prop_assert!(!members.is_empty());
            for &v in members {
                prop_assert!(!seen[v], "{} in two components", v);
                seen[v] = true;
                prop_assert_eq!(out.component_of[v], c);
            }
        }
        prop_assert!(seen.iter().all(|&s| s));

        for u in 0..n {
            for v in 0..n {
                let mutual = reach[u][v] && reach[v][u];
                prop_assert_eq!(out.component_of[u] == out.component_of[v], mutual, "{} {}", u, v);
            }
        }
    }

    #[test]
    fn topological_orders_respect_every_arc(graph in random_digraph()) {
        let cyclic = has_cycle(&graph, &reachability(&graph));
        for out in [
            Executor::new(Kahn::new(graph.clone())).run(),
            Executor::new(DfsTopological::new(graph.clone())).run(),
        ] {
            prop_assert_eq!(out.has_cycle, cyclic);
            match &out.order {
                Some(order) => assert_topological(&graph, order),
                None => prop_assert!(cyclic),
            }
        }
    }
}
