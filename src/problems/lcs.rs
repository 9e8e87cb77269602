//! Longest Common Subsequence over Unicode scalar values.
//!
//! Bottom-up table `dp[i][j]` = LCS length of the first `i` chars of
//! `first` and the first `j` chars of `second`. Row 0 and column 0 are the
//! empty-prefix base case and are not recorded as steps. The traceback
//! prefers the diagonal on a match, then the larger of top and left (left
//! on ties).

use serde::Serialize;

use crate::traits::{Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LcsStepKind {
    Cell,
    Traceback,
}

/// Which neighbour a cell's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Diagonal,
    Top,
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LcsStep {
    pub kind: LcsStepKind,
    pub i: usize,
    pub j: usize,
    pub char_first: char,
    pub char_second: char,
    pub is_match: bool,
    pub dp_value: usize,
    pub source: Source,
    pub description: String,
}

impl Describe for LcsStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            LcsStepKind::Cell => "cell",
            LcsStepKind::Traceback => "traceback",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LcsOutcome {
    pub first: String,
    pub second: String,
    pub lcs: String,
    pub length: usize,
    pub dp_table: Vec<Vec<usize>>,
}

impl Summary for LcsOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("first", self.first.clone()),
            ("second", self.second.clone()),
            ("lcs", self.lcs.clone()),
            ("length", self.length.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Lcs {
    first: Vec<char>,
    second: Vec<char>,
}

impl Lcs {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.chars().collect(),
            second: second.chars().collect(),
        }
    }

    pub fn table_cells(&self) -> usize {
        (self.first.len() + 1).saturating_mul(self.second.len() + 1)
    }
}

impl TracedAlgorithm for Lcs {
    type Step = LcsStep;
    type Outcome = LcsOutcome;

    fn name(&self) -> &'static str {
        "Longest Common Subsequence"
    }

    fn execute<S: StepSink<LcsStep>>(&self, sink: &mut S) -> LcsOutcome {
        let (x, y) = (&self.first, &self.second);
        let (m, n) = (x.len(), y.len());
        let mut dp = vec![vec![0usize; n + 1]; m + 1];

        for i in 1..=m {
            for j in 1..=n {
                let (cx, cy) = (x[i - 1], y[j - 1]);
                let (value, source) = if cx == cy {
                    (dp[i - 1][j - 1] + 1, Source::Diagonal)
                } else if dp[i - 1][j] >= dp[i][j - 1] {
                    (dp[i - 1][j], Source::Top)
                } else {
                    (dp[i][j - 1], Source::Left)
                };
                dp[i][j] = value;
                sink.record_with(|| LcsStep {
                    kind: LcsStepKind::Cell,
                    i,
                    j,
                    char_first: cx,
                    char_second: cy,
                    is_match: cx == cy,
                    dp_value: value,
                    source,
                    description: if cx == cy {
                        format!("'{cx}' matches: dp[{i}][{j}] = diagonal + 1 = {value}")
                    } else {
                        format!("'{cx}' != '{cy}': dp[{i}][{j}] = max(top, left) = {value}")
                    },
                });
            }
        }

        let mut lcs = Vec::with_capacity(dp[m][n]);
        let (mut i, mut j) = (m, n);
        while i > 0 && j > 0 {
            let (cx, cy) = (x[i - 1], y[j - 1]);
            let source = if cx == cy {
                Source::Diagonal
            } else if dp[i - 1][j] > dp[i][j - 1] {
                Source::Top
            } else {
                Source::Left
            };
            let (ci, cj) = (i, j);
            sink.record_with(|| LcsStep {
                kind: LcsStepKind::Traceback,
                i: ci,
                j: cj,
                char_first: cx,
                char_second: cy,
                is_match: cx == cy,
                dp_value: dp[ci][cj],
                source,
                description: match source {
                    Source::Diagonal => format!("dp[{ci}][{cj}]: '{cx}' is part of the LCS"),
                    Source::Top => format!("dp[{ci}][{cj}]: move up"),
                    Source::Left => format!("dp[{ci}][{cj}]: move left"),
                },
            });
            match source {
                Source::Diagonal => {
                    lcs.push(cx);
                    i -= 1;
                    j -= 1;
                }
                Source::Top => i -= 1,
                Source::Left => j -= 1,
            }
        }
        lcs.reverse();

        LcsOutcome {
            first: x.iter().collect(),
            second: y.iter().collect(),
            length: dp[m][n],
            lcs: lcs.into_iter().collect(),
            dp_table: dp,
        }
    }
}

/// Whether `sub` can be obtained from `s` by deleting characters.
pub fn is_subsequence(sub: &str, s: &str) -> bool {
    let mut rest = s.chars();
    sub.chars().all(|c| rest.any(|d| d == c))
}
