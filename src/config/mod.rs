//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerConfig (validated, immutable)
//!     → Logger::new builds the subscriber from it
//! ```
//!
//! # Design Decisions
//! - Templates are immutable once a logger is built; only the level changes
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{CallerConfig, FormatConfig, LoggerConfig, OutputConfig, OutputTarget};
pub use validation::ValidationError;
