//! Error taxonomy.
//!
//! Every failure happens before the algorithm starts: either the input could
//! not be decoded into a valid instance ([`InputError`]) or a file could not
//! be read or written ([`AlgoError::Resource`]).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{algorithm} expects {expected} argument(s) ({usage}), found {found}")]
    ArgumentCount {
        algorithm: &'static str,
        usage: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{field}: `{token}` is not a valid number")]
    NotNumeric { field: &'static str, token: String },
    #[error("{field}: record {record} has {found} field(s), expected {expected}")]
    FieldCount {
        field: &'static str,
        record: usize,
        expected: usize,
        found: usize,
    },
    #[error("{field}: declared {declared} record(s) but found {found}")]
    CountMismatch {
        field: &'static str,
        declared: usize,
        found: usize,
    },
    #[error("{what} {index} is out of range (expected 0..{bound})")]
    OutOfRange {
        what: &'static str,
        index: i64,
        bound: usize,
    },
    #[error("{0}")]
    Invalid(String),
    #[error("unknown algorithm `{0}` (run `algotrace list`)")]
    UnknownAlgorithm(String),
}

#[derive(Debug, Error)]
pub enum AlgoError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("cannot access `{path}`: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = AlgoError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        let e = InputError::OutOfRange {
            what: "vertex",
            index: 7,
            bound: 4,
        };
        assert_eq!(e.to_string(), "vertex 7 is out of range (expected 0..4)");

        let e = InputError::NotNumeric {
            field: "array",
            token: "x".into(),
        };
        assert_eq!(e.to_string(), "array: `x` is not a valid number");
    }

    #[test]
    fn input_errors_convert() {
        let e: AlgoError = InputError::Invalid("bad".into()).into();
        assert!(matches!(e, AlgoError::Input(_)));
        assert_eq!(e.to_string(), "bad");
    }
}
