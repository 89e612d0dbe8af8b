//! Stack capture.

use std::path::Path;

use crate::caller::name::has_path_prefix;

/// One logical stack frame. Inlined calls show up as frames of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    /// Demangled function name without the hash suffix. Empty if unresolved.
    pub function: String,
    /// Source file path. Empty if unknown.
    pub file: String,
    /// Source line, 0 if unknown.
    pub line: u32,
}

impl RawFrame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }
}

/// Source of stack frames for the caller resolver.
pub trait StackInspector: Send + Sync + std::fmt::Debug {
    /// Capture up to `limit` frames, innermost first.
    ///
    /// Frame 0 is the capture function itself. Frames of whatever library
    /// performs the unwinding are not included.
    fn frames(&self, limit: usize) -> Vec<RawFrame>;
}

/// Walks the live stack with the `backtrace` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceInspector;

impl BacktraceInspector {
    pub fn new() -> Self {
        Self
    }
}

impl StackInspector for BacktraceInspector {
    #[inline(never)]
    fn frames(&self, limit: usize) -> Vec<RawFrame> {
        let mut frames = Vec::new();
        let mut in_capture = true;

        backtrace::trace(|frame| {
            let mut resolved = Vec::new();
            backtrace::resolve_frame(frame, |symbol| {
                resolved.push(RawFrame {
                    function: symbol.name().map(|n| format!("{n:#}")).unwrap_or_default(),
                    file: symbol
                        .filename()
                        .map(Path::display)
                        .map(|p| p.to_string())
                        .unwrap_or_default(),
                    line: symbol.lineno().unwrap_or(0),
                });
            });
            if resolved.is_empty() {
                resolved.push(RawFrame::default());
            }

            for raw in resolved {
                // unwinder entry points and the backtrace crate come first
                if in_capture
                    && (has_path_prefix(&raw.function, "backtrace") || !raw.function.contains("::"))
                {
                    continue;
                }
                in_capture = false;
                frames.push(raw);
            }
            frames.len() < limit
        });

        frames.truncate(limit);
        frames
    }
}

/// Fixed frame list, for tests and replay.
#[derive(Debug, Clone, Default)]
pub struct FixedStack(pub Vec<RawFrame>);

impl StackInspector for FixedStack {
    fn frames(&self, limit: usize) -> Vec<RawFrame> {
        self.0.iter().take(limit).cloned().collect()
    }
}
