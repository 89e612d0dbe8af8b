//! Configuration schema definitions.
//!
//! All sections default field by field so a partial file is a valid config.

use serde::{Deserialize, Serialize};

use crate::format::Level;

/// Root configuration for a logger.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Line and timestamp templates.
    pub format: FormatConfig,

    /// Caller resolution settings.
    pub caller: CallerConfig,

    /// Output sink and level.
    pub output: OutputConfig,
}

/// Templates used to render each line.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    /// Line template with `%name%` placeholders. Empty selects the default.
    pub line_template: String,

    /// strftime layout for `%time%`. Empty selects `%Y-%m-%d %H:%M:%S`.
    pub timestamp_format: String,
}

/// Caller resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CallerConfig {
    /// Record the package (module path) of the call site.
    pub package: bool,

    /// Record the file base name of the call site.
    pub file: bool,

    /// Record the line number of the call site.
    pub line: bool,

    /// Frames to skip before the walk when the event has fields.
    pub stack_jump: usize,

    /// Frames to skip before the walk when the event has no fields.
    pub fieldless_stack_jump: usize,

    /// Maximum internal frames skipped before giving up.
    pub max_frames: usize,

    /// Use the event's callsite metadata when the stack cannot be resolved.
    pub metadata_fallback: bool,

    /// Extra module paths whose frames count as logging internals.
    pub internal_markers: Vec<String>,
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            package: true,
            file: true,
            line: true,
            // tracing-subscriber 0.3: the inspector's capture frame precedes
            // the formatter chain whether or not the event has fields.
            stack_jump: 1,
            fieldless_stack_jump: 1,
            max_frames: 64,
            metadata_fallback: true,
            internal_markers: Vec::new(),
        }
    }
}

/// Standard stream used when no file is configured.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    Stdout,
    #[default]
    Stderr,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Minimum level that is written.
    pub level: Level,

    /// Stream used when `file` is unset.
    pub target: OutputTarget,

    /// Append log lines to this file instead of a stream. Empty means unset.
    pub file: Option<String>,

    /// Extra `EnvFilter` directives, e.g. `"hyper=warn"`. Empty means unset.
    pub filter: Option<String>,
}

impl OutputConfig {
    /// The configured log file, if one is set and non-blank.
    pub fn file_path(&self) -> Option<&str> {
        non_blank(self.file.as_deref())
    }

    /// The configured filter directives, if set and non-blank.
    pub fn filter_directives(&self) -> Option<&str> {
        non_blank(self.filter.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            target: OutputTarget::Stderr,
            file: None,
            filter: None,
        }
    }
}
