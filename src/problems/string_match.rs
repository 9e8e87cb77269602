//! Exact pattern matching: naive scan, Knuth–Morris–Pratt and Rabin–Karp.
//!
//! Text and pattern are compared as Unicode scalar values; offsets are char
//! offsets. All three report every (possibly overlapping) occurrence in
//! increasing order.

use serde::Serialize;

use crate::error::InputError;
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

/// Rabin–Karp radix.
pub const BASE: u64 = 256;
/// Rabin–Karp modulus. Small on purpose so collisions show up in traces.
pub const MODULUS: u64 = 101;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Naive,
    Kmp,
    RabinKarp,
}

impl MatchKind {
    pub fn name(&self) -> &'static str {
        match self {
            MatchKind::Naive => "Naive String Matching",
            MatchKind::Kmp => "Knuth-Morris-Pratt",
            MatchKind::RabinKarp => "Rabin-Karp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStepKind {
    /// KMP: one LPS entry computed.
    Lps,
    Compare,
    /// KMP: pattern index falls back along the LPS table.
    Fallback,
    /// Rabin–Karp: window hash computed.
    Hash,
    /// Rabin–Karp: equal hashes, different text.
    Collision,
    Found,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStep {
    pub kind: MatchStepKind,
    /// Alignment of the pattern start in the text.
    pub shift: Option<usize>,
    pub text_index: Option<usize>,
    pub pattern_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_hash: Option<u64>,
    pub description: String,
}

impl MatchStep {
    fn new(kind: MatchStepKind, description: String) -> Self {
        Self {
            kind,
            shift: None,
            text_index: None,
            pattern_index: None,
            is_match: None,
            window_hash: None,
            description,
        }
    }
}

impl Describe for MatchStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            MatchStepKind::Lps => "lps",
            MatchStepKind::Compare => "compare",
            MatchStepKind::Fallback => "fallback",
            MatchStepKind::Hash => "hash",
            MatchStepKind::Collision => "collision",
            MatchStepKind::Found => "found",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub text: String,
    pub pattern: String,
    pub matches: Vec<usize>,
    pub total_matches: usize,
    pub comparisons: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lps: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_hash: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collisions: Option<usize>,
}

impl Summary for MatchOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("text", self.text.clone()),
            ("pattern", self.pattern.clone()),
            ("matches", join(&self.matches)),
            ("totalMatches", self.total_matches.to_string()),
            ("comparisons", self.comparisons.to_string()),
        ];
        if let Some(lps) = &self.lps {
            lines.push(("lps", join(lps)));
        }
        if let Some(c) = self.collisions {
            lines.push(("collisions", c.to_string()));
        }
        lines
    }
}

#[derive(Debug, Clone)]
pub struct PatternSearch {
    kind: MatchKind,
    text: Vec<char>,
    pattern: Vec<char>,
}

impl PatternSearch {
    pub fn new(kind: MatchKind, text: &str, pattern: &str) -> Result<Self, InputError> {
        if pattern.is_empty() {
            return Err(InputError::Invalid("pattern must not be empty".into()));
        }
        Ok(Self {
            kind,
            text: text.chars().collect(),
            pattern: pattern.chars().collect(),
        })
    }
}

impl TracedAlgorithm for PatternSearch {
    type Step = MatchStep;
    type Outcome = MatchOutcome;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn execute<S: StepSink<MatchStep>>(&self, sink: &mut S) -> MatchOutcome {
        let mut m = Matcher {
            t: &self.text,
            p: &self.pattern,
            sink,
            comparisons: 0,
            matches: Vec::new(),
        };
        let mut outcome_lps = None;
        let mut pattern_hash = None;
        let mut collisions = None;
        match self.kind {
            MatchKind::Naive => m.naive(),
            MatchKind::Kmp => outcome_lps = Some(m.kmp()),
            MatchKind::RabinKarp => {
                let (hash, c) = m.rabin_karp();
                pattern_hash = Some(hash);
                collisions = Some(c);
            }
        }
        MatchOutcome {
            text: self.text.iter().collect(),
            pattern: self.pattern.iter().collect(),
            total_matches: m.matches.len(),
            matches: m.matches,
            comparisons: m.comparisons,
            lps: outcome_lps,
            pattern_hash,
            collisions,
        }
    }
}

struct Matcher<'a, S> {
    t: &'a [char],
    p: &'a [char],
    sink: &'a mut S,
    comparisons: usize,
    matches: Vec<usize>,
}

impl<S: StepSink<MatchStep>> Matcher<'_, S> {
    fn compare(&mut self, shift: usize, ti: usize, pi: usize) -> bool {
        self.comparisons += 1;
        let (tc, pc) = (self.t[ti], self.p[pi]);
        let equal = tc == pc;
        self.sink.record_with(|| MatchStep {
            shift: Some(shift),
            text_index: Some(ti),
            pattern_index: Some(pi),
            is_match: Some(equal),
            ..MatchStep::new(
                MatchStepKind::Compare,
                if equal {
                    format!("text[{ti}] = '{tc}' matches pattern[{pi}]")
                } else {
                    format!("text[{ti}] = '{tc}' differs from pattern[{pi}] = '{pc}'")
                },
            )
        });
        equal
    }

    fn found(&mut self, shift: usize) {
        self.matches.push(shift);
        self.sink.record_with(|| MatchStep {
            shift: Some(shift),
            ..MatchStep::new(MatchStepKind::Found, format!("Pattern found at offset {shift}"))
        });
    }

    fn naive(&mut self) {
        let (n, m) = (self.t.len(), self.p.len());
        if m > n {
            return;
        }
        for s in 0..=n - m {
            if (0..m).all(|j| self.compare(s, s + j, j)) {
                self.found(s);
            }
        }
    }

    /// Longest proper prefix that is also a suffix, for every prefix.
    fn lps_table(&mut self) -> Vec<usize> {
        let p = self.p;
        let mut lps = vec![0; p.len()];
        let mut len = 0;
        let mut i = 1;
        while i < p.len() {
            if p[i] == p[len] {
                len += 1;
                lps[i] = len;
                i += 1;
                let (at, value) = (i - 1, len);
                self.sink.record_with(|| MatchStep {
                    pattern_index: Some(at),
                    ..MatchStep::new(MatchStepKind::Lps, format!("lps[{at}] = {value}"))
                });
            } else if len > 0 {
                len = lps[len - 1];
            } else {
                lps[i] = 0;
                let at = i;
                self.sink.record_with(|| MatchStep {
                    pattern_index: Some(at),
                    ..MatchStep::new(MatchStepKind::Lps, format!("lps[{at}] = 0"))
                });
                i += 1;
            }
        }
        lps
    }

    fn kmp(&mut self) -> Vec<usize> {
        let lps = self.lps_table();
        let (n, m) = (self.t.len(), self.p.len());
        let (mut i, mut j) = (0, 0);
        while i < n {
            if self.compare(i - j, i, j) {
                i += 1;
                j += 1;
                if j == m {
                    self.found(i - j);
                    j = lps[j - 1];
                }
            } else if j > 0 {
                let to = lps[j - 1];
                self.sink.record_with(|| MatchStep {
                    text_index: Some(i),
                    pattern_index: Some(to),
                    ..MatchStep::new(
                        MatchStepKind::Fallback,
                        format!("Fall back from pattern[{j}] to pattern[{to}]"),
                    )
                });
                j = to;
            } else {
                i += 1;
            }
        }
        lps
    }

    /// Returns the pattern hash and the number of spurious hits.
    fn rabin_karp(&mut self) -> (u64, usize) {
        let (n, m) = (self.t.len(), self.p.len());
        let code = |c: char| c as u64 % MODULUS;
        let hash = |s: &[char]| s.iter().fold(0, |h, &c| (h * BASE + code(c)) % MODULUS);
        let pattern_hash = hash(self.p);
        if m > n {
            return (pattern_hash, 0);
        }
        // BASE^(m-1) mod MODULUS
        let high = (1..m).fold(1, |h, _| h * BASE % MODULUS);
        let mut window = hash(&self.t[..m]);
        let mut collisions = 0;

        for s in 0..=n - m {
            let current = window;
            self.sink.record_with(|| MatchStep {
                shift: Some(s),
                window_hash: Some(current),
                is_match: Some(current == pattern_hash),
                ..MatchStep::new(
                    MatchStepKind::Hash,
                    format!("Window at {s} hashes to {current} (pattern {pattern_hash})"),
                )
            });
            if window == pattern_hash {
                if (0..m).all(|j| self.compare(s, s + j, j)) {
                    self.found(s);
                } else {
                    collisions += 1;
                    self.sink.record_with(|| MatchStep {
                        shift: Some(s),
                        window_hash: Some(current),
                        ..MatchStep::new(
                            MatchStepKind::Collision,
                            format!("Hash collision at offset {s}: text differs"),
                        )
                    });
                }
            }
            if s + m < n {
                let drop = code(self.t[s]) * high % MODULUS;
                window = ((window + MODULUS - drop) * BASE + code(self.t[s + m])) % MODULUS;
            }
        }
        (pattern_hash, collisions)
    }
}

/// All occurrences by brute force with `str` slicing; used as an oracle.
pub fn reference_matches(text: &str, pattern: &str) -> Vec<usize> {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    if p.is_empty() || p.len() > t.len() {
        return Vec::new();
    }
    t.windows(p.len())
        .enumerate()
        .filter(|(_, w)| *w == p.as_slice())
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Executor;

    const KINDS: [MatchKind; 3] = [MatchKind::Naive, MatchKind::Kmp, MatchKind::RabinKarp];

    fn run(kind: MatchKind, text: &str, pattern: &str) -> MatchOutcome {
        Executor::new(PatternSearch::new(kind, text, pattern).unwrap()).run()
    }

    #[test]
    fn reference_example() {
        for kind in KINDS {
            let out = run(kind, "ABABDABACDABABCABAB", "ABABCABAB");
            assert_eq!(out.matches, vec![10], "{kind:?}");
            assert_eq!(out.total_matches, 1, "{kind:?}");
        }
    }

    #[test]
    fn overlapping_matches() {
        for kind in KINDS {
            assert_eq!(run(kind, "AAAAA", "AA").matches, vec![0, 1, 2, 3], "{kind:?}");
        }
    }

    #[test]
    fn pattern_longer_than_text() {
        for kind in KINDS {
            assert!(run(kind, "AB", "ABC").matches.is_empty());
        }
    }

    #[test]
    fn empty_pattern_rejected() {
        assert!(PatternSearch::new(MatchKind::Kmp, "abc", "").is_err());
    }

    #[test]
    fn kmp_lps_table() {
        let out = run(MatchKind::Kmp, "", "AABAACAABAA");
        assert_eq!(out.lps, Some(vec![0, 1, 0, 1, 2, 0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn rabin_karp_counts_collisions() {
        // 'e' is code point 101, so it hashes like '\0'
        let out = run(MatchKind::RabinKarp, "\u{0}e", "\u{0}");
        assert_eq!(out.matches, vec![0]);
        assert_eq!(out.collisions, Some(1));
    }

    #[test]
    fn unicode_offsets_are_char_offsets() {
        for kind in KINDS {
            assert_eq!(run(kind, "αβγαβ", "αβ").matches, vec![0, 3]);
        }
    }

    #[test]
    fn reference_oracle() {
        assert_eq!(reference_matches("abcabc", "bc"), vec![1, 4]);
        assert!(reference_matches("abc", "").is_empty());
    }
}
