//! Call-site resolution.

use std::collections::HashMap;

use crate::caller::name::{base_name, has_path_prefix, split_function_name};
use crate::caller::stack::{BacktraceInspector, RawFrame, StackInspector};
use crate::config::schema::CallerConfig;
use crate::format::entry::FieldValue;

pub const FUNCTION_KEY: &str = "function";
pub const PACKAGE_KEY: &str = "package";
pub const FILE_KEY: &str = "file";
pub const LINE_KEY: &str = "line";

/// Frames added by this crate between the capture and the engine:
/// [`CallerResolver::resolve`] and the runtime formatter.
pub const WRAPPER_DEPTH: usize = 2;

/// Module paths whose frames never count as the call site.
pub const BUILTIN_MARKERS: &[&str] = &[
    "tracing",
    "tracing_core",
    "tracing_subscriber",
    "backtrace",
    "std",
    "core",
    "alloc",
    concat!(env!("CARGO_CRATE_NAME"), "::caller"),
    concat!(env!("CARGO_CRATE_NAME"), "::format"),
    concat!(env!("CARGO_CRATE_NAME"), "::logger"),
    concat!(env!("CARGO_CRATE_NAME"), "::facade"),
];

/// Where a log call came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerInfo {
    pub function: String,
    pub package: String,
    pub file: String,
    /// Decimal line number, empty when line reporting is off.
    pub line: String,
}

impl CallerInfo {
    /// Fields to inject into an entry. `function` is always present, the
    /// others only when their reporting flag is on.
    pub fn into_fields(self, config: &CallerConfig) -> HashMap<String, FieldValue> {
        let mut fields = HashMap::with_capacity(4);
        fields.insert(FUNCTION_KEY.to_string(), FieldValue::Str(self.function));
        if config.line {
            fields.insert(LINE_KEY.to_string(), FieldValue::Str(self.line));
        }
        if config.package {
            fields.insert(PACKAGE_KEY.to_string(), FieldValue::Str(self.package));
        }
        if config.file {
            fields.insert(FILE_KEY.to_string(), FieldValue::Str(self.file));
        }
        fields
    }
}

/// Callsite metadata recorded by the engine, used when the stack is opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSite<'a> {
    pub module_path: Option<&'a str>,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
}

/// Finds the first stack frame outside the logging machinery.
#[derive(Debug, Clone)]
pub struct CallerResolver<I = BacktraceInspector> {
    inspector: I,
    config: CallerConfig,
    markers: Vec<String>,
}

impl CallerResolver<BacktraceInspector> {
    pub fn new(config: CallerConfig) -> Self {
        Self::with_inspector(BacktraceInspector::new(), config)
    }
}

impl<I: StackInspector> CallerResolver<I> {
    pub fn with_inspector(inspector: I, config: CallerConfig) -> Self {
        let markers = BUILTIN_MARKERS
            .iter()
            .map(|m| m.to_string())
            .chain(config.internal_markers.iter().cloned())
            .collect();
        Self {
            inspector,
            config,
            markers,
        }
    }

    pub fn config(&self) -> &CallerConfig {
        &self.config
    }

    /// Returns true when `function` belongs to the logging machinery.
    pub fn is_internal(&self, function: &str) -> bool {
        self.markers.iter().any(|m| has_path_prefix(function, m))
    }

    /// Resolve the call site of the event being formatted.
    ///
    /// Never fails: when no frame outside the markers is found within
    /// `max_frames`, the engine's callsite metadata is used (if enabled) or
    /// every field is left empty.
    #[inline(never)]
    pub fn resolve(&self, has_fields: bool, call_site: &CallSite<'_>) -> CallerInfo {
        let jump = if has_fields {
            self.config.stack_jump
        } else {
            self.config.fieldless_stack_jump
        };
        let skip = jump + WRAPPER_DEPTH;
        let frames = self.inspector.frames(skip + self.config.max_frames);

        let found = frames
            .iter()
            .skip(skip)
            .take(self.config.max_frames)
            .find(|frame| !self.is_internal(&frame.function));

        let resolved = found
            .filter(|frame| !frame.function.is_empty())
            .and_then(|frame| self.trusted(frame, call_site));

        match resolved {
            Some(info) => info,
            None if self.config.metadata_fallback => self.from_call_site(call_site),
            None => CallerInfo::default(),
        }
    }

    /// Check the frame against the event's callsite.
    ///
    /// Events emitted by this crate on the caller's behalf keep the frame's
    /// own location. Otherwise the frame must live in the crate that emitted
    /// the event; a frame from any other crate means the real caller was
    /// inlined away.
    fn trusted(&self, frame: &RawFrame, call_site: &CallSite<'_>) -> Option<CallerInfo> {
        let Some(module_path) = call_site.module_path else {
            return Some(self.from_frame(frame, call_site));
        };
        if self.is_internal(module_path) {
            return Some(self.from_frame(frame, &CallSite::default()));
        }
        let (package, _) = split_function_name(&frame.function);
        if crate_root(package) != crate_root(module_path) {
            return None;
        }
        Some(self.from_frame(frame, call_site))
    }

    /// Function and package come from the frame. File and line come from the
    /// event's callsite when it has them: the frame's own location points
    /// into the engine's macro expansion.
    fn from_frame(&self, frame: &RawFrame, call_site: &CallSite<'_>) -> CallerInfo {
        let (package, function) = split_function_name(&frame.function);
        let file = call_site.file.unwrap_or(&frame.file);
        let line = call_site.line.unwrap_or(frame.line);
        CallerInfo {
            function: function.to_string(),
            package: package.to_string(),
            file: if self.config.file {
                base_name(file).to_string()
            } else {
                String::new()
            },
            line: if self.config.line && line > 0 {
                line.to_string()
            } else {
                String::new()
            },
        }
    }

    fn from_call_site(&self, call_site: &CallSite<'_>) -> CallerInfo {
        CallerInfo {
            function: String::new(),
            package: call_site.module_path.unwrap_or_default().to_string(),
            file: match call_site.file {
                Some(file) if self.config.file => base_name(file).to_string(),
                _ => String::new(),
            },
            line: match call_site.line {
                Some(line) if self.config.line => line.to_string(),
                _ => String::new(),
            },
        }
    }
}

/// First path segment, ignoring a leading `<` from trait-impl symbols.
fn crate_root(path: &str) -> &str {
    let path = path.trim_start_matches('<');
    let end = path.find([':', '<', ' ']).unwrap_or(path.len());
    &path[..end]
}
