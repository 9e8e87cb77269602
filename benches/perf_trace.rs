use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use algo_trace::instance::{Edge, WeightedGraph};
use algo_trace::problems::{
    shortest_path::Dijkstra,
    sorting::{SortKind, Sorter},
    string_match::{MatchKind, PatternSearch},
};
use algo_trace::Executor;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn random_array(rng: &mut StdRng, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(-10_000..10_000)).collect()
}

fn random_graph(rng: &mut StdRng, n: usize, m: usize) -> WeightedGraph {
    let edges = (0..m)
        .map(|_| Edge::new(rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_range(1..50)))
        .collect();
    WeightedGraph::undirected(n, edges).unwrap()
}

/// Silent vs traced cost of the same sort.
fn bench_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_trace_overhead");
    for kind in [SortKind::Insertion, SortKind::Quick, SortKind::Merge] {
        let mut rng = StdRng::seed_from_u64(42);
        let input = random_array(&mut rng, 512);
        let engine = Executor::new(Sorter::new(kind, input).unwrap());
        group.bench_function(format!("{}_silent", kind.name()), |b| {
            b.iter(|| black_box(engine.run()))
        });
        group.bench_function(format!("{}_traced", kind.name()), |b| {
            b.iter_batched(
                || (),
                |_| {
                    let before = rss_kib();
                    let (outcome, trace) = engine.run_traced();
                    let after = rss_kib();
                    black_box((outcome, trace.len()));
                    // memory delta goes to stderr, away from criterion output
                    eprintln!(
                        "RSS KiB delta ({} traced): {}",
                        kind.name(),
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let graph = random_graph(&mut rng, 500, 2_500);
    let engine = Executor::new(Dijkstra::new(graph, 0).unwrap());
    let mut group = c.benchmark_group("dijkstra_trace_overhead");
    group.bench_function("silent", |b| b.iter(|| black_box(engine.run())));
    group.bench_function("traced", |b| b.iter(|| black_box(engine.run_traced())));
    group.finish();
}

fn bench_matchers(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let text: String = (0..4_096).map(|_| if rng.gen_bool(0.5) { 'a' } else { 'b' }).collect();
    let pattern = "abbabab";
    let mut group = c.benchmark_group("string_match");
    for kind in [MatchKind::Naive, MatchKind::Kmp, MatchKind::RabinKarp] {
        let engine = Executor::new(PatternSearch::new(kind, &text, pattern).unwrap());
        group.bench_function(kind.name(), |b| b.iter(|| black_box(engine.run())));
    }
    group.finish();
}

criterion_group!(benches, bench_sorts, bench_dijkstra, bench_matchers);
criterion_main!(benches);
