//! Algorithm families.
//!
//! Every module defines problem structs implementing
//! [`TracedAlgorithm`](crate::traits::TracedAlgorithm), plus their step and
//! outcome types:
//! - [`sorting`]        : eight array sorts with comparison/move counts.
//! - [`searching`]      : linear, binary, jump and exponential search.
//! - [`traversal`]      : BFS and DFS.
//! - [`shortest_path`]  : Dijkstra, Bellman-Ford, Floyd-Warshall.
//! - [`mst`]            : Kruskal and Prim (spanning forests).
//! - [`ordering`]       : Kahn, DFS topological sort, Kosaraju SCCs.
//! - [`knapsack`], [`lcs`], [`matrix_chain`], [`tsp`] : DP tables.
//! - [`string_match`]   : naive, KMP, Rabin-Karp.
//! - [`greedy`], [`huffman`] : greedy selections and prefix codes.
//! - [`structures`]     : stack, queue, array, linked list and BST scripts.

pub mod greedy;
pub mod huffman;
pub mod knapsack;
pub mod lcs;
pub mod matrix_chain;
pub mod mst;
pub mod ordering;
pub mod searching;
pub mod shortest_path;
pub mod sorting;
pub mod string_match;
pub mod structures;
pub mod traversal;
pub mod tsp;
