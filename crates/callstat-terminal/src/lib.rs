//! Terminal output formatting for callstat
//!
//! This crate provides table and JSON formatters for usage reports and the
//! duration and cost display helpers they share.

pub mod output;

pub use output::{
    JsonFormatter, OutputFormatter, TableFormatter, format_cost, format_duration, format_minutes,
    get_formatter,
};
