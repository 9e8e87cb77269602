//! Huffman coding over the characters of a text.
//!
//! The tree lives in an arena (`Vec<Node>`, children by index). Leaves get
//! ids in ascending symbol order and every merge gets the next id; the heap
//! orders by `(frequency, id)`, so equal frequencies always resolve the
//! same way. The lower of the two popped nodes becomes the left child
//! (bit `0`).

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use serde::Serialize;

use crate::error::InputError;
use crate::traits::{Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone)]
struct Node {
    frequency: u64,
    symbol: Option<char>,
    children: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeapEntry {
    pub id: usize,
    /// Symbol for leaves, `None` for internal nodes.
    pub symbol: Option<char>,
    pub frequency: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HuffmanStepKind {
    Leaf,
    Merge,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HuffmanStep {
    pub kind: HuffmanStepKind,
    /// Heap contents before the step, in pop order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap: Option<Vec<HeapEntry>>,
    pub left: Option<HeapEntry>,
    pub right: Option<HeapEntry>,
    pub node: Option<HeapEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub description: String,
}

impl Describe for HuffmanStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            HuffmanStepKind::Leaf => "leaf",
            HuffmanStepKind::Merge => "merge",
            HuffmanStepKind::Code => "code",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolCode {
    pub symbol: char,
    pub frequency: u64,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HuffmanOutcome {
    /// One entry per distinct symbol, ascending by symbol.
    pub codes: Vec<SymbolCode>,
    pub encoded: String,
    /// 8 bits per input character.
    pub original_bits: u64,
    pub compressed_bits: u64,
}

impl HuffmanOutcome {
    /// Decode a bit string produced with these codes.
    pub fn decode(&self, bits: &str) -> Option<String> {
        let table: BTreeMap<&str, char> = self
            .codes
            .iter()
            .map(|c| (c.code.as_str(), c.symbol))
            .collect();
        let mut out = String::new();
        let mut pending = String::new();
        for b in bits.chars() {
            pending.push(b);
            if let Some(&c) = table.get(pending.as_str()) {
                out.push(c);
                pending.clear();
            }
        }
        pending.is_empty().then_some(out)
    }
}

impl Summary for HuffmanOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let codes: Vec<String> = self
            .codes
            .iter()
            .map(|c| format!("{:?}={} ({})", c.symbol, c.code, c.frequency))
            .collect();
        vec![
            ("codes", codes.join(", ")),
            ("encoded", self.encoded.clone()),
            ("originalBits", self.original_bits.to_string()),
            ("compressedBits", self.compressed_bits.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Huffman {
    text: String,
}

impl Huffman {
    pub fn new(text: &str) -> Result<Self, InputError> {
        if text.is_empty() {
            return Err(InputError::Invalid("Huffman coding needs a non-empty text".into()));
        }
        Ok(Self { text: text.to_string() })
    }
}

fn entry(arena: &[Node], id: usize) -> HeapEntry {
    HeapEntry {
        id,
        symbol: arena[id].symbol,
        frequency: arena[id].frequency,
    }
}

fn label(e: &HeapEntry) -> String {
    match e.symbol {
        Some(c) => format!("{c:?}:{}", e.frequency),
        None => format!("#{}:{}", e.id, e.frequency),
    }
}

impl TracedAlgorithm for Huffman {
    type Step = HuffmanStep;
    type Outcome = HuffmanOutcome;

    fn name(&self) -> &'static str {
        "Huffman Coding"
    }

    fn execute<S: StepSink<HuffmanStep>>(&self, sink: &mut S) -> HuffmanOutcome {
        let mut frequencies: BTreeMap<char, u64> = BTreeMap::new();
        for c in self.text.chars() {
            *frequencies.entry(c).or_default() += 1;
        }

        let mut arena: Vec<Node> = Vec::with_capacity(frequencies.len() * 2);
        let mut heap = BinaryHeap::new();
        for (&symbol, &frequency) in &frequencies {
            let id = arena.len();
            arena.push(Node {
                frequency,
                symbol: Some(symbol),
                children: None,
            });
            heap.push(Reverse((frequency, id)));
            let leaf = entry(&arena, id);
            sink.record_with(|| HuffmanStep {
                kind: HuffmanStepKind::Leaf,
                heap: None,
                description: format!("Leaf {}", label(&leaf)),
                node: Some(leaf),
                left: None,
                right: None,
                code: None,
            });
        }

        while heap.len() > 1 {
            let snapshot = sink.is_recording().then(|| {
                let mut entries: Vec<HeapEntry> = heap
                    .iter()
                    .map(|Reverse((_, id))| entry(&arena, *id))
                    .collect();
                entries.sort_by_key(|e| (e.frequency, e.id));
                entries
            });
            let (Some(Reverse((fl, l))), Some(Reverse((fr, r)))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let id = arena.len();
            arena.push(Node {
                frequency: fl + fr,
                symbol: None,
                children: Some((l, r)),
            });
            heap.push(Reverse((fl + fr, id)));
            let (left, right, merged) = (entry(&arena, l), entry(&arena, r), entry(&arena, id));
            sink.record_with(|| HuffmanStep {
                kind: HuffmanStepKind::Merge,
                heap: snapshot,
                description: format!(
                    "Merge {} and {} into {}",
                    label(&left),
                    label(&right),
                    label(&merged)
                ),
                left: Some(left),
                right: Some(right),
                node: Some(merged),
                code: None,
            });
        }

        let mut codes: BTreeMap<char, String> = BTreeMap::new();
        if let Some(Reverse((_, root))) = heap.pop() {
            let mut stack = vec![(root, String::new())];
            while let Some((id, prefix)) = stack.pop() {
                match (arena[id].children, arena[id].symbol) {
                    (Some((l, r)), _) => {
                        stack.push((r, format!("{prefix}1")));
                        stack.push((l, format!("{prefix}0")));
                    }
                    (None, Some(symbol)) => {
                        let code = if prefix.is_empty() { "0".to_string() } else { prefix };
                        let leaf = entry(&arena, id);
                        let shown = code.clone();
                        sink.record_with(|| HuffmanStep {
                            kind: HuffmanStepKind::Code,
                            heap: None,
                            description: format!("{symbol:?} gets code {shown}"),
                            node: Some(leaf),
                            left: None,
                            right: None,
                            code: Some(shown),
                        });
                        codes.insert(symbol, code);
                    }
                    (None, None) => {}
                }
            }
        }

        let encoded: String = self
            .text
            .chars()
            .filter_map(|c| codes.get(&c).map(String::as_str))
            .collect();
        let original_bits = 8 * self.text.chars().count() as u64;
        let compressed_bits = encoded.len() as u64;
        HuffmanOutcome {
            codes: frequencies
                .iter()
                .map(|(&symbol, &frequency)| SymbolCode {
                    symbol,
                    frequency,
                    code: codes.get(&symbol).cloned().unwrap_or_default(),
                })
                .collect(),
            encoded,
            original_bits,
            compressed_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Executor;

    fn code_of(out: &HuffmanOutcome, c: char) -> &str {
        &out.codes.iter().find(|s| s.symbol == c).unwrap().code
    }

    #[test]
    fn prefix_free_and_round_trips() {
        let text = "abracadabra";
        let out = Executor::new(Huffman::new(text).unwrap()).run();
        for a in &out.codes {
            for b in &out.codes {
                if a.symbol != b.symbol {
                    assert!(!b.code.starts_with(&a.code), "{} prefixes {}", a.code, b.code);
                }
            }
        }
        assert_eq!(out.decode(&out.encoded).as_deref(), Some(text));
        assert_eq!(code_of(&out, 'a').len(), 1);
    }

    #[test]
    fn single_symbol_gets_zero() {
        let out = Executor::new(Huffman::new("aaaa").unwrap()).run();
        assert_eq!(out.codes.len(), 1);
        assert_eq!(out.codes[0].code, "0");
        assert_eq!(out.encoded, "0000");
        assert_eq!(out.compressed_bits, 4);
    }

    #[test]
    fn ties_resolve_deterministically() {
        let a = Executor::new(Huffman::new("abcd").unwrap()).run();
        assert_eq!(code_of(&a, 'a'), "00");
        assert_eq!(code_of(&a, 'b'), "01");
        assert_eq!(code_of(&a, 'c'), "10");
        assert_eq!(code_of(&a, 'd'), "11");
    }

    #[test]
    fn empty_text_rejected() {
        assert!(Huffman::new("").is_err());
    }

    #[test]
    fn merges_one_fewer_than_symbols() {
        let (_, trace) = Executor::new(Huffman::new("hello world").unwrap()).run_traced();
        let merges = trace.iter().filter(|s| s.kind == HuffmanStepKind::Merge).count();
        assert_eq!(merges, 7);
    }
}
