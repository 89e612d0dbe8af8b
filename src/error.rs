//! Logger setup errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::format::TemplateError;

/// Errors that can occur while building or reconfiguring a logger.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file's parent directory could not be created.
    #[error("could not create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be opened for appending.
    #[error("could not open log file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A template was rejected.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// `EnvFilter` directives did not parse.
    #[error("invalid filter directives: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// The level could not be swapped because the subscriber is gone.
    #[error("level reload failed: {0}")]
    Reload(#[from] tracing_subscriber::reload::Error),

    /// Another global tracing subscriber is already installed.
    #[error("a global tracing subscriber is already installed")]
    SubscriberInstalled,

    /// [`facade::init`](crate::facade::init) was called twice.
    #[error("global logger already initialized")]
    AlreadyInitialized,

    /// A facade function was called before [`facade::init`](crate::facade::init).
    #[error("global logger not initialized")]
    NotInitialized,

    /// Writing to or flushing the sink failed.
    #[error("log sink error: {0}")]
    Sink(#[source] io::Error),
}

/// Result alias used by the logger and facade.
pub type LogResult<T> = Result<T, LogError>;
