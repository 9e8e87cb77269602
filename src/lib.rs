//! Traced textbook algorithms.
//!
//! This crate runs classic algorithms (sorting, searching, graph traversal
//! and shortest paths, spanning trees, DP tables, string matching, greedy
//! selection, bitmask TSP, scripted data structures) over small decoded inputs and records every
//! state transition as an owned step, so a visualizer can replay the run.
//!
//! ## Core idea
//! 1. Decode the input into a validated problem instance ([`decode`],
//!    [`instance`]).
//! 2. Each algorithm implements [`TracedAlgorithm`] once, reporting steps to
//!    a [`StepSink`].
//! 3. [`Executor`] runs it silently ([`NullSink`]) or traced ([`Trace`]) and
//!    packages the outcome as a [`Report`] for JSON or text output.
//!
//! ## Quick start
//! ```
//! use algo_trace::{Executor, problems::sorting::{SortKind, Sorter}};
//!
//! let sorter = Sorter::new(SortKind::Quick, vec![5, 3, 8, 1]).unwrap();
//! let (outcome, trace) = Executor::new(sorter).run_traced();
//! assert_eq!(outcome.sorted, vec![1, 3, 5, 8]);
//! assert_eq!(trace.steps().last().map(|s| s.array.clone()), Some(vec![1, 3, 5, 8]));
//! ```
//!
//! The [`catalog`] module maps command-line names such as `dijkstra` or
//! `rabin-karp` to decoders and algorithms; the `algotrace` binary is a thin
//! shell around it.

pub mod builder;
pub mod catalog;
pub mod decode;
pub mod engine;
pub mod error;
pub mod instance;
pub mod problems;
pub mod report;
pub mod trace;
pub mod traits;
pub mod utils;

pub use crate::builder::{RunOptions, RunOptionsBuilder};
pub use crate::catalog::AlgorithmId;
pub use crate::engine::Executor;
pub use crate::error::{AlgoError, InputError, Result};
pub use crate::report::{OutputFormat, Report};
pub use crate::trace::{NullSink, Trace};
pub use crate::traits::{Describe, StepSink, Summary, TracedAlgorithm};
