//! Shared helpers for integration tests.

use caller_format::config::LoggerConfig;
use caller_format::logger::{Logger, Sink};
use caller_format::Level;

/// A debug-level logger rendering `template` into memory.
pub fn memory_logger(template: &str) -> Logger {
    let mut config = LoggerConfig::default();
    config.format.line_template = template.to_string();
    config.output.level = Level::Debug;
    Logger::with_sink(config, Sink::Memory(Vec::new())).expect("valid test config")
}

/// Returns true for `YYYY-MM-DD HH:MM:SS`.
#[allow(dead_code)]
pub fn is_default_timestamp(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}
