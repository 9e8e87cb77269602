use crate::instance::Orientation;
use crate::report::OutputFormat;

/// Per-invocation settings shared by the catalog and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub traced: bool,
    pub pretty: bool,
    /// Overrides the default orientation of traversal and shortest-path
    /// graphs. Ignored by algorithms with a fixed orientation.
    pub orientation: Option<Orientation>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            traced: true,
            pretty: false,
            orientation: None,
        }
    }
}

impl RunOptions {
    pub fn builder() -> RunOptionsBuilder {
        RunOptionsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct RunOptionsBuilder {
    format: Option<OutputFormat>,
    traced: Option<bool>,
    pretty: Option<bool>,
    orientation: Option<Orientation>,
}

impl RunOptionsBuilder {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
    pub fn traced(mut self, traced: bool) -> Self {
        self.traced = Some(traced);
        self
    }
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
    pub fn build(self) -> RunOptions {
        let defaults = RunOptions::default();
        RunOptions {
            format: self.format.unwrap_or(defaults.format),
            traced: self.traced.unwrap_or(defaults.traced),
            pretty: self.pretty.unwrap_or(defaults.pretty),
            orientation: self.orientation.or(defaults.orientation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_trace_as_compact_json() {
        let opts = RunOptions::builder().build();
        assert_eq!(opts, RunOptions::default());
        assert!(opts.traced);
        assert_eq!(opts.format, OutputFormat::Json);
    }

    #[test]
    fn overrides_apply() {
        let opts = RunOptions::builder()
            .with_format(OutputFormat::Text)
            .traced(false)
            .with_orientation(Orientation::Directed)
            .build();
        assert_eq!(opts.format, OutputFormat::Text);
        assert!(!opts.traced);
        assert_eq!(opts.orientation, Some(Orientation::Directed));
    }
}
