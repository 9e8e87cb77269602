//! Input decoder for the delimited argument encoding.
//!
//! Records are separated by `;` and fields within a record by `,`:
//!
//! ```
//! use algo_trace::decode;
//!
//! let values = decode::int_list("array", "5,3,8,1").unwrap();
//! assert_eq!(values, vec![5, 3, 8, 1]);
//!
//! let items = decode::items("items", "3;60,10;100,20;120,30").unwrap();
//! assert_eq!(items.len(), 3);
//! ```
//!
//! A record list may start with a single-field record holding the number of
//! records that follow; when present it must match. Decoding never recovers:
//! the first malformed token aborts with an [`InputError`].

use std::str::FromStr;

use crate::error::InputError;
use crate::instance::{
    Activity, DistanceMatrix, Edge, Item, Job, Operation, Orientation, WeightedGraph,
};

pub const RECORD_SEPARATOR: char = ';';
pub const FIELD_SEPARATOR: char = ',';

/// Largest vertex count a graph argument may declare.
pub const MAX_VERTICES: usize = 100_000;

/// Split into records and fields, trimming whitespace and dropping empty
/// records (so a trailing `;` is harmless).
pub fn records(input: &str) -> Vec<Vec<&str>> {
    input
        .split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| r.split(FIELD_SEPARATOR).map(str::trim).collect())
        .collect()
}

/// Parse one numeric token.
pub fn number<T: FromStr>(field: &'static str, token: &str) -> Result<T, InputError> {
    token.trim().parse::<T>().map_err(|_| InputError::NotNumeric {
        field,
        token: token.trim().to_string(),
    })
}

/// Parse a vertex/index token and check it against `bound`.
pub fn index(what: &'static str, token: &str, bound: usize) -> Result<usize, InputError> {
    let raw: i64 = number(what, token)?;
    if raw < 0 || raw as u64 >= bound as u64 {
        return Err(InputError::OutOfRange {
            what,
            index: raw,
            bound,
        });
    }
    Ok(raw as usize)
}

/// Comma (or whitespace) separated integers. An empty string is an empty list.
pub fn int_list(field: &'static str, input: &str) -> Result<Vec<i64>, InputError> {
    input
        .split(|c: char| c == FIELD_SEPARATOR || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| number(field, t))
        .collect()
}

/// Records with `min..=max` fields each, honoring an optional leading count.
pub fn counted_records<'a>(
    field: &'static str,
    input: &'a str,
    min_fields: usize,
    max_fields: usize,
) -> Result<Vec<Vec<&'a str>>, InputError> {
    let mut recs = records(input);
    if min_fields > 1 && recs.first().is_some_and(|r| r.len() == 1) {
        let declared: usize = number(field, recs[0][0])?;
        recs.remove(0);
        if declared != recs.len() {
            return Err(InputError::CountMismatch {
                field,
                declared,
                found: recs.len(),
            });
        }
    }
    for (i, r) in recs.iter().enumerate() {
        if r.len() < min_fields || r.len() > max_fields {
            return Err(InputError::FieldCount {
                field,
                record: i,
                expected: max_fields,
                found: r.len(),
            });
        }
    }
    Ok(recs)
}

/// How edge weights are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weights {
    /// Every edge is `u,v,w`.
    Required,
    /// Edges are `u,v` or `u,v,w`; missing weights are 1.
    Optional,
}

/// Decode `vertices` and an edge list such as `0,1,4;0,2,1`.
pub fn graph(
    vertices: &str,
    edges: &str,
    orientation: Orientation,
    weights: Weights,
) -> Result<WeightedGraph, InputError> {
    let n: usize = number("vertices", vertices)?;
    if n > MAX_VERTICES {
        return Err(InputError::Invalid(format!(
            "vertices: {n} exceeds the limit of {MAX_VERTICES}"
        )));
    }
    let min_fields = match weights {
        Weights::Required => 3,
        Weights::Optional => 2,
    };
    let recs = counted_records("edges", edges, min_fields, 3)?;
    let mut parsed = Vec::with_capacity(recs.len());
    for r in recs {
        let from = index("vertex", r[0], n)?;
        let to = index("vertex", r[1], n)?;
        let weight = match r.get(2) {
            Some(w) => number("weight", w)?,
            None => 1,
        };
        parsed.push(Edge::new(from, to, weight));
    }
    tracing::trace!(vertices = n, edges = parsed.len(), "decoded graph");
    WeightedGraph::new(n, parsed, orientation)
}

/// Decode `value,weight` records. Weights must be positive.
pub fn items(field: &'static str, input: &str) -> Result<Vec<Item>, InputError> {
    counted_records(field, input, 2, 2)?
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let value: i64 = number(field, r[0])?;
            let weight: u64 = number(field, r[1])?;
            if weight == 0 {
                return Err(InputError::Invalid(format!(
                    "{field}: item {i} has zero weight"
                )));
            }
            if value < 0 {
                return Err(InputError::Invalid(format!(
                    "{field}: item {i} has negative value {value}"
                )));
            }
            Ok(Item { value, weight })
        })
        .collect()
}

/// Decode `start,finish` records.
pub fn activities(input: &str) -> Result<Vec<Activity>, InputError> {
    counted_records("activities", input, 2, 2)?
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let start: i64 = number("activities", r[0])?;
            let finish: i64 = number("activities", r[1])?;
            if finish < start {
                return Err(InputError::Invalid(format!(
                    "activities: activity {i} finishes ({finish}) before it starts ({start})"
                )));
            }
            Ok(Activity { start, finish })
        })
        .collect()
}

/// Decode `id,deadline,profit` records.
pub fn jobs(input: &str) -> Result<Vec<Job>, InputError> {
    counted_records("jobs", input, 3, 3)?
        .into_iter()
        .map(|r| {
            if r[0].is_empty() {
                return Err(InputError::Invalid("jobs: empty job id".into()));
            }
            Ok(Job {
                id: r[0].to_string(),
                deadline: number("jobs", r[1])?,
                profit: number("jobs", r[2])?,
            })
        })
        .collect()
}

/// Decode a square matrix; rows by `;`, cells by `,`. `inf`, `-` and `x`
/// mark a missing edge.
pub fn distance_matrix(input: &str) -> Result<DistanceMatrix, InputError> {
    let cells = records(input)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell.to_ascii_lowercase().as_str() {
                    "inf" | "-" | "x" => Ok(None),
                    _ => number("matrix", cell).map(Some),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    DistanceMatrix::new(cells)
}

/// Decode an operation script such as `push,5;pop;top`. Which names are
/// allowed is up to the structure running the script.
pub fn operations(input: &str) -> Result<Vec<Operation>, InputError> {
    records(input)
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            if r.len() > 2 || r[0].is_empty() {
                return Err(InputError::FieldCount {
                    field: "operations",
                    record: i,
                    expected: 2,
                    found: r.len(),
                });
            }
            let value = r.get(1).map(|v| number("operations", v)).transpose()?;
            Ok(Operation::new(r[0], value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_split_and_trim() {
        assert_eq!(
            records(" 1, 2 ; 3,4;"),
            vec![vec!["1", "2"], vec!["3", "4"]]
        );
        assert!(records("").is_empty());
    }

    #[test]
    fn int_list_accepts_empty_and_spaces() {
        assert_eq!(int_list("array", "").unwrap(), Vec::<i64>::new());
        assert_eq!(int_list("array", "4 -2,7").unwrap(), vec![4, -2, 7]);
    }

    #[test]
    fn int_list_rejects_garbage() {
        let err = int_list("array", "1,two,3").unwrap_err();
        assert_eq!(
            err,
            InputError::NotNumeric {
                field: "array",
                token: "two".into()
            }
        );
    }

    #[test]
    fn counted_records_validates_count() {
        let ok = counted_records("activities", "2;1,3;2,5", 2, 2).unwrap();
        assert_eq!(ok.len(), 2);
        let err = counted_records("activities", "3;1,3;2,5", 2, 2).unwrap_err();
        assert_eq!(
            err,
            InputError::CountMismatch {
                field: "activities",
                declared: 3,
                found: 2
            }
        );
    }

    #[test]
    fn graph_checks_vertex_bounds() {
        let err = graph("3", "0,1,4;1,3,2", Orientation::Directed, Weights::Required)
            .unwrap_err();
        assert_eq!(
            err,
            InputError::OutOfRange {
                what: "vertex",
                index: 3,
                bound: 3
            }
        );
        let err = graph("3", "0,-1,4", Orientation::Directed, Weights::Required).unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { index: -1, .. }));
    }

    #[test]
    fn graph_rejects_huge_vertex_counts() {
        let err = graph("1000000000000000000", "", Orientation::Directed, Weights::Optional)
            .unwrap_err();
        assert!(matches!(err, InputError::Invalid(ref m) if m.contains("limit")), "{err}");
        let at_limit = MAX_VERTICES.to_string();
        assert!(graph(&at_limit, "", Orientation::Directed, Weights::Optional).is_ok());
    }

    #[test]
    fn graph_optional_weights_default_to_one() {
        let g = graph("3", "0,1;1,2,5", Orientation::Directed, Weights::Optional).unwrap();
        assert_eq!(g.edges()[0].weight, 1);
        assert_eq!(g.edges()[1].weight, 5);
    }

    #[test]
    fn graph_required_weights_reject_pairs() {
        let err = graph("3", "0,1", Orientation::Directed, Weights::Required).unwrap_err();
        assert!(matches!(err, InputError::FieldCount { found: 2, .. }));
    }

    #[test]
    fn items_reject_zero_weight() {
        assert!(items("items", "10,0").is_err());
        let parsed = items("items", "60,10;100,20").unwrap();
        assert_eq!(parsed[1], Item { value: 100, weight: 20 });
    }

    #[test]
    fn matrix_with_missing_edges() {
        let m = distance_matrix("0,1,inf;1,0,-;x,2,0").unwrap();
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(2, 1), Some(2));
        assert!(distance_matrix("0,1;1").is_err());
    }

    #[test]
    fn operations_take_an_optional_value() {
        let ops = operations("Push,5; pop ;top").unwrap();
        assert_eq!(ops[0], Operation::new("push", Some(5)));
        assert_eq!(ops[1].value, None);
        assert_eq!(ops[2].to_string(), "top");
        assert!(matches!(
            operations("push,1,2"),
            Err(InputError::FieldCount { found: 3, .. })
        ));
        assert!(matches!(operations("push,x"), Err(InputError::NotNumeric { .. })));
    }

    #[test]
    fn jobs_parse_ids() {
        let j = jobs("2;A,2,100;B,1,19").unwrap();
        assert_eq!(j[0].id, "A");
        assert_eq!(j[1].deadline, 1);
    }
}
