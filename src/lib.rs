//! Caller-aware template formatter for `tracing`.
//!
//! Renders each event through a line template such as
//!
//! ```text
//! %time% - %level% - [%package%::%file%::%function%::%line%] - %msg%
//! ```
//!
//! where `package`, `file`, `function` and `line` are recovered from the
//! call stack at formatting time, skipping frames that belong to the
//! logging machinery.
//!
//! # Architecture Overview
//!
//! ```text
//!   log_info!(..) / tracing::info!(..)
//!          │
//!          ▼
//!   ┌──────────────┐   ┌─────────────────────┐   ┌─────────────┐
//!   │   logger     │──▶│  format::runtime    │──▶│   caller    │
//!   │ level filter │   │  collect + merge    │◀──│ stack walk  │
//!   └──────────────┘   └─────────┬───────────┘   └─────────────┘
//!                                ▼
//!                      ┌─────────────────────┐   ┌─────────────┐
//!                      │  format::template   │──▶│ logger::sink│
//!                      └─────────────────────┘   └─────────────┘
//! ```

pub mod caller;
pub mod config;
pub mod error;
pub mod facade;
pub mod format;
pub mod logger;

pub use config::LoggerConfig;
pub use error::{LogError, LogResult};
pub use format::{Level, LogEntry, TemplateFormatter};
pub use logger::Logger;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
