//! Example: Longest Common Subsequence with its DP trace.
//!
//! Run with:
//! `cargo run --example lcs`

use algo_trace::{problems::lcs::{Lcs, LcsStepKind}, Executor};

fn main() {
    let s = "ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let t = "GTCGTTCGGAATGCCGTTGCTCTGTAAA";

    let engine = Executor::new(Lcs::new(s, t));
    let (outcome, trace) = engine.run_traced();

    println!("LCS length: {}", outcome.length);
    println!("LCS: {}", outcome.lcs);
    println!("Steps recorded: {}", trace.len());

    // Walk back through the traceback steps that hit a match.
    let matches = trace
        .iter()
        .filter(|s| s.kind == LcsStepKind::Traceback && s.is_match)
        .count();
    println!("Diagonal moves during traceback: {matches}");
}
