//! Logger handles.
//!
//! # Responsibilities
//! - Assemble the subscriber: level filter, optional directives, formatter
//! - Own the output sink and switch it to a file and back
//! - Change the level at runtime
//!
//! # Design Decisions
//! - A `Logger` is an explicit handle; the global facade is one installed handle
//! - Loggers derived with [`Logger::with_level`] share the sink and templates
//! - Setup failures are returned, never turned into process exits

pub mod sink;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::Dispatch;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{reload, Registry};

use crate::config::loader::ConfigError;
use crate::config::schema::LoggerConfig;
use crate::config::validation::validate_config;
use crate::error::{LogError, LogResult};
use crate::format::{Level, RuntimeFormatter, TemplateFormatter};

pub use sink::{SharedSink, Sink};

/// A configured logging pipeline writing to a shared sink.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    sink: SharedSink,
    level: reload::Handle<LevelFilter, Registry>,
    config: Arc<LoggerConfig>,
}

impl Logger {
    /// Build a logger writing to the file or stream named in `config`.
    pub fn new(config: LoggerConfig) -> LogResult<Self> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let sink = match config.output.file_path() {
            Some(path) => Sink::open_file(path)?,
            None => Sink::from(config.output.target),
        };
        let level = config.output.level;
        Self::build(Arc::new(config), SharedSink::new(sink), level)
    }

    /// Build a logger writing to `sink`, ignoring the configured output.
    pub fn with_sink(config: LoggerConfig, sink: Sink) -> LogResult<Self> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let level = config.output.level;
        Self::build(Arc::new(config), SharedSink::new(sink), level)
    }

    fn build(config: Arc<LoggerConfig>, sink: SharedSink, level: Level) -> LogResult<Self> {
        let template = TemplateFormatter::new(
            config.format.line_template.clone(),
            config.format.timestamp_format.clone(),
        )?;
        let formatter = RuntimeFormatter::new(config.caller.clone(), template);

        // Targets the directives do not name stay under the level filter.
        let directives = match config.output.filter_directives() {
            Some(directives) => Some(
                EnvFilter::builder()
                    .parse(directives)?
                    .add_directive(LevelFilter::TRACE.into()),
            ),
            None => None,
        };

        let (level_layer, level) = reload::Layer::new(level.to_filter());
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(sink.clone())
            .event_format(formatter);

        let subscriber = Registry::default()
            .with(level_layer)
            .with(directives)
            .with(fmt_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            sink,
            level,
            config,
        })
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Make this logger the process-wide default.
    pub fn install(&self) -> LogResult<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LogError::SubscriberInstalled)
    }

    /// Run `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// A logger sharing this one's sink and templates with its own level.
    pub fn with_level(&self, level: Level) -> LogResult<Self> {
        Self::build(self.config.clone(), self.sink.clone(), level)
    }

    pub fn set_level(&self, level: Level) -> LogResult<()> {
        self.level.reload(level.to_filter())?;
        Ok(())
    }

    /// Current threshold. `OFF` if the subscriber has been dropped.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.clone_current().unwrap_or(LevelFilter::OFF)
    }

    pub fn is_level_enabled(&self, level: Level) -> bool {
        level.to_tracing() <= self.level_filter()
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_level_enabled(Level::Debug)
    }

    /// Redirect output to `path`, appending and creating parent directories.
    pub fn set_file_logging(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let sink = Sink::open_file(path)?;
        drop(self.sink.replace(sink));
        self.in_scope(|| tracing::info!("Logging started"));
        Ok(())
    }

    /// Release the log file, if any, and fall back to the configured stream.
    pub fn close(&self) -> LogResult<()> {
        self.in_scope(|| tracing::info!("Closing log file"));
        if !self.sink.lock().is_file() {
            return Ok(());
        }
        let previous = self.sink.replace(Sink::from(self.config.output.target));
        if let Sink::File { mut file, .. } = previous {
            file.flush().map_err(LogError::Sink)?;
        }
        Ok(())
    }

    pub fn flush(&self) -> LogResult<()> {
        self.sink.flush().map_err(LogError::Sink)
    }

    /// Drain everything written so far to a [`Sink::Memory`] sink.
    pub fn take_output(&self) -> String {
        self.sink.take_memory()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level_filter())
            .field("file", &self.sink.file_path())
            .finish_non_exhaustive()
    }
}
