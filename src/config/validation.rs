//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the timestamp layout and filter directives before a logger exists
//! - Validate value ranges (`max_frames > 0`, non-empty markers)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Runs before a logger is built from the config

use thiserror::Error;
use tracing_subscriber::filter::EnvFilter;

use crate::config::schema::LoggerConfig;
use crate::format::template::is_valid_timestamp_format;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("format.timestamp_format {0:?} contains an invalid strftime item")]
    TimestampFormat(String),

    #[error("caller.max_frames must be greater than zero")]
    MaxFrames,

    #[error("caller.internal_markers contains an empty entry")]
    EmptyMarker,

    #[error("output.filter is invalid: {0}")]
    Filter(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let timestamp_format = &config.format.timestamp_format;
    if !timestamp_format.is_empty() && !is_valid_timestamp_format(timestamp_format) {
        errors.push(ValidationError::TimestampFormat(timestamp_format.clone()));
    }

    if config.caller.max_frames == 0 {
        errors.push(ValidationError::MaxFrames);
    }

    if config.caller.internal_markers.iter().any(|m| m.trim().is_empty()) {
        errors.push(ValidationError::EmptyMarker);
    }

    if let Some(directives) = config.output.filter_directives() {
        if let Err(e) = EnvFilter::builder().parse(directives) {
            errors.push(ValidationError::Filter(e.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
