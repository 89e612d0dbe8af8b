//! Caller resolution subsystem.
//!
//! # Data Flow
//! ```text
//! format_event (inside the engine)
//!     → stack.rs (capture frames, innermost first)
//!     → resolver.rs (skip base depth, skip internal frames, bounded)
//!     → name.rs (package/function split, file base name)
//!     → CallerInfo
//! ```
//!
//! # Design Decisions
//! - Frame skipping combines a configured base depth with module-path markers
//! - The walk is bounded by `max_frames`
//! - Resolution never fails; unknown parts come back empty

pub mod name;
pub mod resolver;
pub mod stack;

pub use resolver::{CallSite, CallerInfo, CallerResolver};
pub use stack::{BacktraceInspector, FixedStack, RawFrame, StackInspector};
