//! Matrix-chain multiplication order.
//!
//! Matrix `Mi` (1-based in names, 0-based in tables) is
//! `dims[i] x dims[i + 1]`. `cost[i][j]` is the cheapest way to multiply
//! `Mi..=Mj`; the table is filled by increasing chain length, so every cell
//! only reads shorter chains. Cells below the diagonal stay 0.

use serde::Serialize;

use crate::error::InputError;
use crate::traits::{Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStepKind {
    /// One split point tried.
    Split,
    /// Cell `(i, j)` finalised.
    Cell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStep {
    pub kind: ChainStepKind,
    pub i: usize,
    pub j: usize,
    pub k: Option<usize>,
    pub chain_length: usize,
    /// Cost of splitting at `k`.
    pub cost: Option<u64>,
    /// Best cost of `(i, j)` after this step.
    pub min_cost: u64,
    pub description: String,
}

impl Describe for ChainStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            ChainStepKind::Split => "split",
            ChainStepKind::Cell => "cell",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainOutcome {
    pub dimensions: Vec<u64>,
    pub min_cost: u64,
    pub optimal_parenthesization: String,
    pub dp_table: Vec<Vec<u64>>,
    pub split_table: Vec<Vec<Option<usize>>>,
}

impl Summary for ChainOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("matrices", (self.dimensions.len() - 1).to_string()),
            ("minCost", self.min_cost.to_string()),
            ("optimalParenthesization", self.optimal_parenthesization.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct MatrixChain {
    dims: Vec<u64>,
}

impl MatrixChain {
    /// Needs at least one matrix (two dimensions), all dimensions positive.
    pub fn new(dims: Vec<u64>) -> Result<Self, InputError> {
        if dims.len() < 2 {
            return Err(InputError::Invalid(format!(
                "matrix chain needs at least 2 dimensions, found {}",
                dims.len()
            )));
        }
        if let Some(pos) = dims.iter().position(|&d| d == 0) {
            return Err(InputError::Invalid(format!("dimension {pos} is zero")));
        }
        Ok(Self { dims })
    }

    pub fn matrices(&self) -> usize {
        self.dims.len() - 1
    }
}

impl TracedAlgorithm for MatrixChain {
    type Step = ChainStep;
    type Outcome = ChainOutcome;

    fn name(&self) -> &'static str {
        "Matrix Chain Multiplication"
    }

    fn execute<S: StepSink<ChainStep>>(&self, sink: &mut S) -> ChainOutcome {
        let p = &self.dims;
        let n = self.matrices();
        let mut cost = vec![vec![0u64; n]; n];
        let mut split: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];

        for len in 2..=n {
            for i in 0..=n - len {
                let j = i + len - 1;
                let mut best = u64::MAX;
                for k in i..j {
                    let c = cost[i][k]
                        .saturating_add(cost[k + 1][j])
                        .saturating_add(p[i].saturating_mul(p[k + 1]).saturating_mul(p[j + 1]));
                    if c < best {
                        best = c;
                        split[i][j] = Some(k);
                    }
                    let (left, right) = (cost[i][k], cost[k + 1][j]);
                    sink.record_with(|| ChainStep {
                        kind: ChainStepKind::Split,
                        i,
                        j,
                        k: Some(k),
                        chain_length: len,
                        cost: Some(c),
                        min_cost: best,
                        description: format!(
                            "Split M{}..M{} at k={k}: {left} + {right} + {}*{}*{} = {c}",
                            i + 1,
                            j + 1,
                            p[i],
                            p[k + 1],
                            p[j + 1]
                        ),
                    });
                }
                cost[i][j] = best;
                let k = split[i][j];
                sink.record_with(|| ChainStep {
                    kind: ChainStepKind::Cell,
                    i,
                    j,
                    k,
                    chain_length: len,
                    cost: None,
                    min_cost: best,
                    description: format!("cost[{i}][{j}] = {best}"),
                });
            }
        }

        ChainOutcome {
            dimensions: p.clone(),
            min_cost: cost[0][n - 1],
            optimal_parenthesization: parenthesize(&split, 0, n - 1),
            dp_table: cost,
            split_table: split,
        }
    }
}

/// `((M1(M2M3))M4)` style rendering of the split table.
pub fn parenthesize(split: &[Vec<Option<usize>>], i: usize, j: usize) -> String {
    let mut out = String::new();
    write_parens(split, i, j, &mut out);
    out
}

fn write_parens(split: &[Vec<Option<usize>>], i: usize, j: usize, out: &mut String) {
    match split[i][j] {
        Some(k) if i < j => {
            out.push('(');
            write_parens(split, i, k, out);
            write_parens(split, k + 1, j, out);
            out.push(')');
        }
        _ => {
            out.push('M');
            out.push_str(&(i + 1).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Executor;

    #[test]
    fn clrs_instance() {
        let mc = MatrixChain::new(vec![30, 35, 15, 5, 10, 20, 25]).unwrap();
        let out = Executor::new(mc).run();
        assert_eq!(out.min_cost, 15125);
        assert_eq!(out.optimal_parenthesization, "((M1(M2M3))((M4M5)M6))");
    }

    #[test]
    fn single_matrix_costs_nothing() {
        let out = Executor::new(MatrixChain::new(vec![10, 20]).unwrap()).run();
        assert_eq!(out.min_cost, 0);
        assert_eq!(out.optimal_parenthesization, "M1");
    }

    #[test]
    fn rejects_short_or_zero_dimensions() {
        assert!(MatrixChain::new(vec![5]).is_err());
        assert!(MatrixChain::new(vec![5, 0, 3]).is_err());
    }

    #[test]
    fn cell_steps_replay_table() {
        let mc = MatrixChain::new(vec![40, 20, 30, 10, 30]).unwrap();
        let (out, trace) = Executor::new(mc).run_traced();
        let mut table = vec![vec![0u64; 4]; 4];
        for s in trace.iter().filter(|s| s.kind == ChainStepKind::Cell) {
            table[s.i][s.j] = s.min_cost;
        }
        assert_eq!(table, out.dp_table);
        assert_eq!(out.min_cost, 26000);
    }
}
