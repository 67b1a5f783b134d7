//! Error types for callstat
//!
//! This module defines the error type used throughout the callstat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! End-of-data is not represented here: a drained call log reader yields
//! `Ok(None)`, never an error.
//!
//! # Example
//!
//! ```
//! use callstat_core::error::{CallstatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert serde_json::Error to CallstatError
//!     let _value: serde_json::Value = serde_json::from_str("{}")?;
//!     Ok(())
//! }
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Main error type for callstat operations
///
/// Transport failures, decode failures, and the bad-filter condition are
/// distinct variants so that callers can decide which of them to retry.
#[derive(Error, Debug)]
pub enum CallstatError {
    /// Transport error while talking to the remote service
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A call log page could not be decoded
    #[error("Failed to decode call log page {page}: {source}")]
    Decode {
        /// The 1-based page number that failed to decode
        page: u32,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// The server reported no pages for a filtered query
    ///
    /// The filter values are invalid. Correct the filter and read again.
    #[error("Bad filter: the server reported no pages for the requested filter")]
    BadFilter,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A time window whose end lies before its start
    #[error("Invalid time window: {start} is after {end}")]
    InvalidWindow {
        /// Window start
        start: DateTime<Utc>,
        /// Window end
        end: DateTime<Utc>,
    },

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CallstatError {
    /// Whether the caller can recover by adjusting the request and reading again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BadFilter)
    }
}

/// Convenience type alias for Results in callstat
///
/// # Example
///
/// ```
/// use callstat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CallstatError>;
