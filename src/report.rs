//! Result serializer.
//!
//! A [`Report`] pairs an outcome with the (optional) trace of the run that
//! produced it and renders both as JSON or as a line-oriented text report.
//! Rendering is pure formatting: field order follows the declaration order of
//! the outcome struct, so the JSON shape is stable for consumers:
//!
//! ```text
//! {"algorithm": ..., <outcome fields>..., "steps": [...]}
//! ```

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AlgoError;
use crate::trace::Trace;
use crate::traits::{Describe, Summary};

/// Output flavour of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unknown format '{other}'")),
        }
    }
}

/// Final answer of one run plus its trace, if one was recorded.
#[derive(Debug, Clone)]
pub struct Report<O, S> {
    algorithm: &'static str,
    outcome: O,
    trace: Option<Trace<S>>,
}

#[derive(Serialize)]
struct JsonView<'a, O, S> {
    algorithm: &'a str,
    #[serde(flatten)]
    outcome: &'a O,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<&'a [S]>,
}

impl<O, S> Report<O, S> {
    pub fn new(algorithm: &'static str, outcome: O, trace: Option<Trace<S>>) -> Self {
        Self {
            algorithm,
            outcome,
            trace,
        }
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn outcome(&self) -> &O {
        &self.outcome
    }

    pub fn trace(&self) -> Option<&Trace<S>> {
        self.trace.as_ref()
    }

    /// Split into the outcome and the trace, if one was recorded.
    pub fn into_parts(self) -> (O, Option<Trace<S>>) {
        (self.outcome, self.trace)
    }
}

impl<O: Serialize, S: Serialize> Report<O, S> {
    fn view(&self) -> JsonView<'_, O, S> {
        JsonView {
            algorithm: self.algorithm,
            outcome: &self.outcome,
            steps: self.trace.as_ref().map(|t| t.steps()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.view())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.view())
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.view())
    }
}

impl<O: Summary, S: Describe> Report<O, S> {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Algorithm: {}", self.algorithm);
        for (key, value) in self.outcome.summary() {
            let _ = writeln!(out, "{key}: {value}");
        }
        if let Some(trace) = &self.trace {
            let _ = writeln!(out, "Steps: {}", trace.len());
            for (n, step) in trace.iter().enumerate() {
                let _ = writeln!(out, "  {}. [{}] {}", n + 1, step.kind(), step.description());
            }
        }
        out
    }
}

impl<O, S> Report<O, S>
where
    O: Serialize + Summary,
    S: Serialize + Describe,
{
    pub fn render(&self, format: OutputFormat, pretty: bool) -> Result<String, AlgoError> {
        Ok(match format {
            OutputFormat::Json if pretty => self.to_json_pretty()?,
            OutputFormat::Json => self.to_json()?,
            OutputFormat::Text => self.to_text(),
        })
    }
}

/// `{"error": "..."}` object emitted when a run aborts in JSON mode.
pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
