//! Example: Matrix-chain multiplication.
//!
//! Run with:
//! `cargo run --example matrix_chain`

use algo_trace::{problems::matrix_chain::{ChainStepKind, MatrixChain}, Executor};

fn main() {
    // Example from CLRS:
    // Matrices A1..A6 with dimensions:
    // 30x35, 35x15, 15x5, 5x10, 10x20, 20x25
    let p = vec![30, 35, 15, 5, 10, 20, 25];

    let problem = match MatrixChain::new(p) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("matrix_chain: {err}");
            std::process::exit(1);
        }
    };
    let (outcome, trace) = Executor::new(problem).run_traced();

    println!("Optimal multiplication cost: {}", outcome.min_cost);
    println!("Parenthesization: {}", outcome.optimal_parenthesization);
    println!("Split decisions (i,j,k):");
    for s in trace.iter().filter(|s| s.kind == ChainStepKind::Cell) {
        if let Some(k) = s.k {
            println!("  Split A[{}..{}] at {}", s.i + 1, s.j + 1, k + 1);
        }
    }
}
