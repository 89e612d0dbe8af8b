//! Log line formatting.
//!
//! # Data Flow
//! ```text
//! tracing event
//!     → runtime.rs (collect fields, resolve caller, merge)
//!     → LogEntry (timestamp, level, message, fields)
//!     → template.rs (placeholder substitution)
//!     → sink writer
//! ```
//!
//! # Design Decisions
//! - Template strings are fixed once a formatter is built
//! - Event fields win over injected caller metadata on key collisions
//! - Panic/fatal severities ride on error events as a reserved field

pub mod entry;
pub mod runtime;
pub mod template;

pub use entry::{FieldValue, Level, LogEntry};
pub use runtime::RuntimeFormatter;
pub use template::{TemplateError, TemplateFormatter};

/// Reserved field carrying a severity the engine has no level for.
pub const SEVERITY_FIELD: &str = "log.severity";
