//! Quota pricing and usage estimation for callstat
//!
//! This crate turns aggregated [`Usage`](callstat_core::Usage) into billable
//! minutes and overage cost against a monthly quota, projects a partial
//! observation to a full billing period, and classifies how close a bucket
//! is to its quota.

pub mod cost_calculator;
pub mod estimator;
pub mod report;
pub mod severity;

pub use cost_calculator::{CategoryCost, CostBreakdown, CostCalculator, QuotaConfig};
pub use estimator::Estimator;
pub use report::{CurrentMonthReport, MonthReport};
pub use severity::Severity;
