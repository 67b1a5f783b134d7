//! Core types, traits, and utilities for callstat
//!
//! This crate provides the error type, the call log domain types, server-side
//! filters, usage aggregation, and billing period helpers shared by the other
//! callstat crates.

pub mod aggregation;
pub mod error;
pub mod filters;
pub mod period;
pub mod source;
pub mod timezone;
pub mod types;

// Re-export commonly used types
pub use error::{CallstatError, Result};
pub use filters::CallLogFilter;
pub use period::TimeWindow;
pub use types::{CallKind, CallLogEntry, Usage, UsageBucket};
