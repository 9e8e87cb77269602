//! Name-based dispatch from positional arguments to a rendered report.
//!
//! ```
//! use algo_trace::{catalog::{self, AlgorithmId}, RunOptions};
//!
//! let id: AlgorithmId = "knapsack".parse().unwrap();
//! let args = ["50".to_string(), "60,10;100,20;120,30".to_string()];
//! let opts = RunOptions::builder().traced(false).build();
//! let json = catalog::execute(id, &args, &opts).unwrap();
//! assert!(json.contains("\"maxValue\":220"));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::builder::RunOptions;
use crate::decode::{self, Weights};
use crate::engine::Executor;
use crate::error::{InputError, Result};
use crate::instance::Orientation;
use crate::problems::knapsack::ZeroOneKnapsack;
use crate::problems::searching::{Search, SearchKind};
use crate::problems::sorting::{SortKind, Sorter};
use crate::problems::string_match::{MatchKind, PatternSearch};
use crate::problems::structures::{Structure, StructureKind};
use crate::problems::traversal::Traversal;
use crate::problems::tsp::HeldKarp;
use crate::problems::{greedy, huffman, lcs, matrix_chain, mst, ordering, shortest_path};
use crate::traits::TracedAlgorithm;

/// Upper bound on table cells (knapsack, LCS, matrix chain, Floyd-Warshall).
pub const MAX_TABLE_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    BubbleSort,
    InsertionSort,
    SelectionSort,
    QuickSort,
    MergeSort,
    HeapSort,
    CountingSort,
    RadixSort,
    LinearSearch,
    BinarySearch,
    JumpSearch,
    ExponentialSearch,
    Bfs,
    Dfs,
    Dijkstra,
    BellmanFord,
    FloydWarshall,
    Kruskal,
    Prim,
    Kahn,
    TopologicalSort,
    Kosaraju,
    Knapsack,
    Lcs,
    MatrixChain,
    Tsp,
    Naive,
    Kmp,
    RabinKarp,
    ActivitySelection,
    FractionalKnapsack,
    Huffman,
    JobSequencing,
    Stack,
    Queue,
    ArrayOps,
    LinkedList,
    Bst,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 38] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::SelectionSort,
        AlgorithmId::QuickSort,
        AlgorithmId::MergeSort,
        AlgorithmId::HeapSort,
        AlgorithmId::CountingSort,
        AlgorithmId::RadixSort,
        AlgorithmId::LinearSearch,
        AlgorithmId::BinarySearch,
        AlgorithmId::JumpSearch,
        AlgorithmId::ExponentialSearch,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
        AlgorithmId::Dijkstra,
        AlgorithmId::BellmanFord,
        AlgorithmId::FloydWarshall,
        AlgorithmId::Kruskal,
        AlgorithmId::Prim,
        AlgorithmId::Kahn,
        AlgorithmId::TopologicalSort,
        AlgorithmId::Kosaraju,
        AlgorithmId::Knapsack,
        AlgorithmId::Lcs,
        AlgorithmId::MatrixChain,
        AlgorithmId::Tsp,
        AlgorithmId::Naive,
        AlgorithmId::Kmp,
        AlgorithmId::RabinKarp,
        AlgorithmId::ActivitySelection,
        AlgorithmId::FractionalKnapsack,
        AlgorithmId::Huffman,
        AlgorithmId::JobSequencing,
        AlgorithmId::Stack,
        AlgorithmId::Queue,
        AlgorithmId::ArrayOps,
        AlgorithmId::LinkedList,
        AlgorithmId::Bst,
    ];

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        use AlgorithmId::*;
        match self {
            BubbleSort => "bubble-sort",
            InsertionSort => "insertion-sort",
            SelectionSort => "selection-sort",
            QuickSort => "quick-sort",
            MergeSort => "merge-sort",
            HeapSort => "heap-sort",
            CountingSort => "counting-sort",
            RadixSort => "radix-sort",
            LinearSearch => "linear-search",
            BinarySearch => "binary-search",
            JumpSearch => "jump-search",
            ExponentialSearch => "exponential-search",
            Bfs => "bfs",
            Dfs => "dfs",
            Dijkstra => "dijkstra",
            BellmanFord => "bellman-ford",
            FloydWarshall => "floyd-warshall",
            Kruskal => "kruskal",
            Prim => "prim",
            Kahn => "kahn",
            TopologicalSort => "topological-sort",
            Kosaraju => "kosaraju",
            Knapsack => "knapsack",
            Lcs => "lcs",
            MatrixChain => "matrix-chain",
            Tsp => "tsp",
            Naive => "naive",
            Kmp => "kmp",
            RabinKarp => "rabin-karp",
            ActivitySelection => "activity-selection",
            FractionalKnapsack => "fractional-knapsack",
            Huffman => "huffman",
            JobSequencing => "job-sequencing",
            Stack => "stack",
            Queue => "queue",
            ArrayOps => "array",
            LinkedList => "linked-list",
            Bst => "bst",
        }
    }

    pub fn family(&self) -> &'static str {
        use AlgorithmId::*;
        match self {
            BubbleSort | InsertionSort | SelectionSort | QuickSort | MergeSort | HeapSort
            | CountingSort | RadixSort => "sorting",
            LinearSearch | BinarySearch | JumpSearch | ExponentialSearch => "searching",
            Bfs | Dfs | Dijkstra | BellmanFord | FloydWarshall | Kruskal | Prim | Kahn
            | TopologicalSort | Kosaraju => "graph",
            Knapsack | Lcs | MatrixChain | Tsp => "dynamic programming",
            Naive | Kmp | RabinKarp => "string matching",
            ActivitySelection | FractionalKnapsack | Huffman | JobSequencing => "greedy",
            Stack | Queue | ArrayOps | LinkedList | Bst => "data structures",
        }
    }

    /// Positional arguments, one `<placeholder>` each.
    pub fn usage(&self) -> &'static str {
        use AlgorithmId::*;
        match self {
            BubbleSort | InsertionSort | SelectionSort | QuickSort | MergeSort | HeapSort
            | CountingSort | RadixSort => "<array>",
            LinearSearch | BinarySearch | JumpSearch | ExponentialSearch => "<array> <target>",
            Bfs | Dfs => "<vertices> <edges u,v[,w];...> <start>",
            Dijkstra | BellmanFord => "<vertices> <edges u,v,w;...> <source>",
            FloydWarshall | Kruskal | Prim => "<vertices> <edges u,v,w;...>",
            Kahn | TopologicalSort | Kosaraju => "<vertices> <edges u,v;...>",
            Knapsack | FractionalKnapsack => "<capacity> <items [n;]value,weight;...>",
            Lcs => "<first> <second>",
            Naive | Kmp | RabinKarp => "<text> <pattern>",
            MatrixChain => "<dimensions>",
            Tsp => "<matrix row;row;...>",
            Huffman => "<text>",
            ActivitySelection => "<activities [n;]start,finish;...>",
            JobSequencing => "<jobs [n;]id,deadline,profit;...>",
            Stack | Queue | ArrayOps | LinkedList | Bst => "<operations op[,value];...>",
        }
    }

    pub fn arity(&self) -> usize {
        self.usage().matches('<').count()
    }

    /// Orientation used when the caller does not override it.
    pub fn default_orientation(&self) -> Option<Orientation> {
        use AlgorithmId::*;
        match self {
            Bfs | Dfs | Dijkstra | BellmanFord | Kruskal | Prim => Some(Orientation::Undirected),
            FloydWarshall | Kahn | TopologicalSort | Kosaraju => Some(Orientation::Directed),
            _ => None,
        }
    }

    /// Whether `--directed`/`--undirected` applies.
    pub fn orientation_overridable(&self) -> bool {
        use AlgorithmId::*;
        matches!(self, Bfs | Dfs | Dijkstra | BellmanFord | FloydWarshall)
    }

    fn orientation(&self, opts: &RunOptions) -> Orientation {
        let default = self.default_orientation().unwrap_or(Orientation::Directed);
        match opts.orientation {
            Some(o) if self.orientation_overridable() => o,
            _ => default,
        }
    }

    pub fn from_name(name: &str) -> std::result::Result<Self, InputError> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| InputError::UnknownAlgorithm(name.to_string()))
    }
}

impl FromStr for AlgorithmId {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Catalog listing, one `name  usage` line per algorithm grouped by family.
pub fn listing() -> String {
    let mut out = String::new();
    let mut family = "";
    for id in AlgorithmId::ALL {
        if id.family() != family {
            family = id.family();
            out.push_str(family);
            out.push_str(":\n");
        }
        out.push_str(&format!("  {:<20} {}\n", id.name(), id.usage()));
    }
    out
}

fn render<A: TracedAlgorithm>(algorithm: A, opts: &RunOptions) -> Result<String> {
    Executor::new(algorithm)
        .report(opts.traced)
        .render(opts.format, opts.pretty)
}

fn check_cells(what: &str, cells: usize) -> std::result::Result<(), InputError> {
    if cells > MAX_TABLE_CELLS {
        return Err(InputError::Invalid(format!(
            "{what} table would have {cells} cells (limit {MAX_TABLE_CELLS})"
        )));
    }
    Ok(())
}

/// Decode `args` for `id`, run it and render the report.
pub fn execute(id: AlgorithmId, args: &[String], opts: &RunOptions) -> Result<String> {
    if args.len() != id.arity() {
        return Err(InputError::ArgumentCount {
            algorithm: id.name(),
            usage: id.usage(),
            expected: id.arity(),
            found: args.len(),
        }
        .into());
    }
    tracing::debug!(algorithm = id.name(), args = args.len(), "dispatch");
    let orientation = id.orientation(opts);

    use AlgorithmId::*;
    match id {
        BubbleSort | InsertionSort | SelectionSort | QuickSort | MergeSort | HeapSort
        | CountingSort | RadixSort => {
            let kind = match id {
                BubbleSort => SortKind::Bubble,
                InsertionSort => SortKind::Insertion,
                SelectionSort => SortKind::Selection,
                QuickSort => SortKind::Quick,
                MergeSort => SortKind::Merge,
                HeapSort => SortKind::Heap,
                CountingSort => SortKind::Counting,
                _ => SortKind::Radix,
            };
            let array = decode::int_list("array", &args[0])?;
            render(Sorter::new(kind, array)?, opts)
        }
        LinearSearch | BinarySearch | JumpSearch | ExponentialSearch => {
            let kind = match id {
                LinearSearch => SearchKind::Linear,
                BinarySearch => SearchKind::Binary,
                JumpSearch => SearchKind::Jump,
                _ => SearchKind::Exponential,
            };
            let array = decode::int_list("array", &args[0])?;
            let target = decode::number("target", &args[1])?;
            render(Search::new(kind, array, target)?, opts)
        }
        Bfs | Dfs => {
            let graph = decode::graph(&args[0], &args[1], orientation, Weights::Optional)?;
            let start = decode::index("start vertex", &args[2], graph.vertices())?;
            if id == Bfs {
                render(Traversal::bfs(graph, start)?, opts)
            } else {
                render(Traversal::dfs(graph, start)?, opts)
            }
        }
        Dijkstra | BellmanFord => {
            let graph = decode::graph(&args[0], &args[1], orientation, Weights::Required)?;
            let source = decode::index("source vertex", &args[2], graph.vertices())?;
            if id == Dijkstra {
                render(shortest_path::Dijkstra::new(graph, source)?, opts)
            } else {
                render(shortest_path::BellmanFord::new(graph, source)?, opts)
            }
        }
        FloydWarshall | Kruskal | Prim => {
            let graph = decode::graph(&args[0], &args[1], orientation, Weights::Required)?;
            match id {
                FloydWarshall => {
                    let n = graph.vertices();
                    check_cells("Floyd-Warshall", n.saturating_mul(n))?;
                    if opts.traced {
                        // one matrix snapshot per phase plus the initial one
                        let snapshots = n.saturating_mul(n).saturating_mul(n + 1);
                        check_cells("Floyd-Warshall trace", snapshots)?;
                    }
                    render(shortest_path::FloydWarshall::new(graph), opts)
                }
                Kruskal => render(mst::Kruskal::new(graph), opts),
                _ => render(mst::Prim::new(graph), opts),
            }
        }
        Kahn | TopologicalSort | Kosaraju => {
            let graph = decode::graph(&args[0], &args[1], orientation, Weights::Optional)?;
            match id {
                Kahn => render(ordering::Kahn::new(graph), opts),
                TopologicalSort => render(ordering::DfsTopological::new(graph), opts),
                _ => render(ordering::Kosaraju::new(graph), opts),
            }
        }
        Knapsack => {
            let capacity: usize = decode::number("capacity", &args[0])?;
            let items = decode::items("items", &args[1])?;
            let problem = ZeroOneKnapsack::new(items, capacity);
            check_cells("knapsack", problem.table_cells())?;
            render(problem, opts)
        }
        FractionalKnapsack => {
            let capacity: u64 = decode::number("capacity", &args[0])?;
            let items = decode::items("items", &args[1])?;
            render(greedy::FractionalKnapsack::new(items, capacity), opts)
        }
        Lcs => {
            let problem = lcs::Lcs::new(&args[0], &args[1]);
            check_cells("LCS", problem.table_cells())?;
            render(problem, opts)
        }
        MatrixChain => {
            let dims = decode::int_list("dimensions", &args[0])?
                .into_iter()
                .map(|d| {
                    u64::try_from(d).map_err(|_| {
                        InputError::Invalid(format!("dimensions: {d} is negative"))
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let n = dims.len().saturating_sub(1);
            check_cells("matrix chain", n.saturating_mul(n))?;
            render(matrix_chain::MatrixChain::new(dims)?, opts)
        }
        Tsp => {
            let matrix = decode::distance_matrix(&args[0])?;
            render(HeldKarp::new(matrix)?, opts)
        }
        Naive | Kmp | RabinKarp => {
            let kind = match id {
                Naive => MatchKind::Naive,
                Kmp => MatchKind::Kmp,
                _ => MatchKind::RabinKarp,
            };
            render(PatternSearch::new(kind, &args[0], &args[1])?, opts)
        }
        ActivitySelection => {
            let activities = decode::activities(&args[0])?;
            render(greedy::ActivitySelection::new(activities), opts)
        }
        Huffman => render(huffman::Huffman::new(&args[0])?, opts),
        JobSequencing => {
            let jobs = decode::jobs(&args[0])?;
            render(greedy::JobSequencing::new(jobs), opts)
        }
        Stack | Queue | ArrayOps | LinkedList | Bst => {
            let kind = match id {
                Stack => StructureKind::Stack,
                Queue => StructureKind::Queue,
                ArrayOps => StructureKind::Array,
                LinkedList => StructureKind::LinkedList,
                _ => StructureKind::Bst,
            };
            let script = decode::operations(&args[0])?;
            render(Structure::new(kind, &script)?, opts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn names_round_trip() {
        for id in AlgorithmId::ALL {
            assert_eq!(AlgorithmId::from_name(id.name()), Ok(id));
        }
        assert_eq!("Bellman_Ford".parse::<AlgorithmId>(), Ok(AlgorithmId::BellmanFord));
        assert!(matches!(
            AlgorithmId::from_name("bogo-sort"),
            Err(InputError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn arity_comes_from_usage() {
        assert_eq!(AlgorithmId::QuickSort.arity(), 1);
        assert_eq!(AlgorithmId::Dijkstra.arity(), 3);
        assert_eq!(AlgorithmId::Kruskal.arity(), 2);
    }

    #[test]
    fn wrong_argument_count() {
        let err = execute(AlgorithmId::Bfs, &args(&["3"]), &RunOptions::default()).unwrap_err();
        assert!(err.to_string().contains("expects 3 argument(s)"));
    }

    #[test]
    fn dijkstra_default_is_undirected() {
        let opts = RunOptions::builder().traced(false).build();
        let out = execute(
            AlgorithmId::Dijkstra,
            &args(&["4", "0,1,4;0,2,1;1,2,2;1,3,5;2,3,8", "0"]),
            &opts,
        )
        .unwrap();
        assert!(out.contains("\"distances\":[0,3,1,8]"), "{out}");
    }

    #[test]
    fn orientation_override_applies_to_shortest_paths() {
        let opts = RunOptions::builder()
            .traced(false)
            .with_orientation(Orientation::Directed)
            .build();
        let out = execute(
            AlgorithmId::BellmanFord,
            &args(&["4", "0,1,4;0,2,1;1,2,2;1,3,5;2,3,8", "0"]),
            &opts,
        )
        .unwrap();
        assert!(out.contains("\"distances\":[0,4,1,9]"), "{out}");
    }

    #[test]
    fn text_format() {
        let opts = RunOptions::builder().with_format(OutputFormat::Text).build();
        let out = execute(AlgorithmId::BubbleSort, &args(&["2,1"]), &opts).unwrap();
        assert!(out.starts_with("Algorithm: Bubble Sort\n"));
        assert!(out.contains("sorted: 1, 2\n"));
    }

    #[test]
    fn oversized_table_rejected() {
        let err = execute(
            AlgorithmId::Knapsack,
            &args(&["100000000", "1,1"]),
            &RunOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("cells"));
    }

    #[test]
    fn quadratic_tables_are_bounded() {
        let dims = vec!["2"; 2_500].join(",");
        let err = execute(AlgorithmId::MatrixChain, &args(&[&dims]), &RunOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("matrix chain table"), "{err}");

        let err = execute(AlgorithmId::FloydWarshall, &args(&["5000", ""]), &RunOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Floyd-Warshall table"), "{err}");

        let silent = RunOptions::builder().traced(false).build();
        assert!(execute(AlgorithmId::FloydWarshall, &args(&["300", ""]), &silent).is_ok());
        let err = execute(AlgorithmId::FloydWarshall, &args(&["300", ""]), &RunOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Floyd-Warshall trace"), "{err}");
    }

    #[test]
    fn structures_run_scripts() {
        let opts = RunOptions::builder().traced(false).build();
        let out = execute(AlgorithmId::Stack, &args(&["push,5;push,7;pop;top"]), &opts).unwrap();
        assert!(out.contains("\"contents\":[5]"), "{out}");
        let err = execute(AlgorithmId::Queue, &args(&["push,1"]), &opts).unwrap_err();
        assert!(err.to_string().contains("enqueue"), "{err}");
    }

    #[test]
    fn listing_covers_catalog() {
        let list = listing();
        for id in AlgorithmId::ALL {
            assert!(list.contains(id.name()));
        }
    }
}
