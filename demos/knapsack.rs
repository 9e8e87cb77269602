//! Example: 0/1 knapsack, printed as the text report a terminal user sees.
//!
//! Run with:
//! `cargo run --example knapsack`

use algo_trace::{instance::Item, problems::knapsack::ZeroOneKnapsack, Executor, OutputFormat};

fn main() {
    let items = vec![
        Item { value: 60, weight: 10 },
        Item { value: 100, weight: 20 },
        Item { value: 120, weight: 30 },
    ];

    let report = Executor::new(ZeroOneKnapsack::new(items, 50)).report(true);
    match report.render(OutputFormat::Text, false) {
        Ok(text) => print!("{text}"),
        Err(err) => eprintln!("knapsack: {err}"),
    }
    println!("Best value: {}", report.outcome().max_value);
}
