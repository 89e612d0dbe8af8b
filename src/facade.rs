//! Process-wide logger.
//!
//! # Lifecycle
//! - [`init`] builds a [`Logger`] from a config and installs it as the
//!   global tracing subscriber. It can succeed once per process.
//! - The `log_*!` macros emit through whatever subscriber is current, so
//!   they also work inside [`Logger::in_scope`].
//! - [`close`] releases a file sink and falls back to the configured stream.
//!
//! ```no_run
//! use caller_format::config::LoggerConfig;
//! use caller_format::{facade, log_info, log_warn};
//!
//! facade::init(LoggerConfig::default())?;
//! facade::set_file_logging("/var/log/app/app.log")?;
//! log_info!("listening on {}", 8080);
//! log_warn!(peer = "10.0.0.7", "slow client");
//! facade::close()?;
//! # Ok::<(), caller_format::LogError>(())
//! ```

use std::path::Path;
use std::sync::OnceLock;

use crate::config::schema::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::format::Level;
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Build the global logger from `config` and install it.
pub fn init(config: LoggerConfig) -> LogResult<&'static Logger> {
    if GLOBAL.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    let logger = Logger::new(config)?;
    logger.install()?;
    Ok(GLOBAL.get_or_init(|| logger))
}

/// The global logger, if [`init`] has run.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}

fn require() -> LogResult<&'static Logger> {
    global().ok_or(LogError::NotInitialized)
}

/// A logger sharing the global sink and templates with its own level.
pub fn get_logger(level: Level) -> LogResult<Logger> {
    require()?.with_level(level)
}

/// Redirect global output to `path`, creating parent directories.
pub fn set_file_logging(path: impl AsRef<Path>) -> LogResult<()> {
    require()?.set_file_logging(path)
}

/// Release the global log file, if any.
pub fn close() -> LogResult<()> {
    require()?.close()
}

pub fn set_level(level: Level) -> LogResult<()> {
    require()?.set_level(level)
}

/// False when the global logger is not initialized.
pub fn is_level_enabled(level: Level) -> bool {
    global().is_some_and(|l| l.is_level_enabled(level))
}

pub fn is_debug_enabled() -> bool {
    is_level_enabled(Level::Debug)
}

/// Flush the global sink and exit with status 1. Used by [`log_fatal!`](crate::log_fatal).
#[doc(hidden)]
pub fn exit_fatal() -> ! {
    if let Some(logger) = global() {
        let _ = logger.flush();
    }
    std::process::exit(1)
}

/// Log at trace level.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)+) => {
        $crate::__private::tracing::trace!($($arg)+)
    };
}

/// Log at debug level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__private::tracing::debug!($($arg)+)
    };
}

/// Log at info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__private::tracing::info!($($arg)+)
    };
}

/// Log at warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::__private::tracing::warn!($($arg)+)
    };
}

/// Log at error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__private::tracing::error!($($arg)+)
    };
}

/// Log at fatal level, flush, and exit the process with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {{
        $crate::__private::tracing::error!(log.severity = "fatal", $($arg)+);
        $crate::facade::exit_fatal()
    }};
}

/// Log at panic level, then panic with the same message.
///
/// Fields go before the format string as `key = value`, `key = %value` or
/// `key = ?value`. The panic payload is the formatted message alone.
#[macro_export]
macro_rules! log_panic {
    (@fields [$($fields:tt)*] $($key:ident).+ = %$value:expr, $($rest:tt)+) => {
        $crate::log_panic!(@fields [$($fields)* $($key).+ = %$value,] $($rest)+)
    };
    (@fields [$($fields:tt)*] $($key:ident).+ = ?$value:expr, $($rest:tt)+) => {
        $crate::log_panic!(@fields [$($fields)* $($key).+ = ?$value,] $($rest)+)
    };
    (@fields [$($fields:tt)*] $($key:ident).+ = $value:expr, $($rest:tt)+) => {
        $crate::log_panic!(@fields [$($fields)* $($key).+ = $value,] $($rest)+)
    };
    (@fields [$($fields:tt)*] $($msg:tt)+) => {{
        let message = ::std::format!($($msg)+);
        $crate::__private::tracing::error!($($fields)* log.severity = "panic", "{}", message);
        ::std::panic!("{}", message)
    }};
    ($($arg:tt)+) => {
        $crate::log_panic!(@fields [] $($arg)+)
    };
}
