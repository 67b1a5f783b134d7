//! callstat - Report easyBell call minutes against monthly quotas
//!
//! This library provides functionality to:
//! - Read the easyBell call log page by page for a time window
//! - Aggregate call durations into national, mobile, and other usage
//! - Price usage beyond the included minutes and project it to month end
//! - Render reports as tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use callstat::report::{Reporter, with_session};
//! use callstat_core::timezone::TimezoneConfig;
//! use callstat_pricing::{CostCalculator, QuotaConfig};
//! use callstat_provider_easybell::Session;
//!
//! #[tokio::main]
//! async fn main() -> callstat::Result<()> {
//!     let session = Session::new()?;
//!     let reporter = Reporter::new(
//!         &session,
//!         TimezoneConfig::default(),
//!         CostCalculator::new(QuotaConfig::new(1000, 100)),
//!     );
//!
//!     let report = with_session(
//!         &session,
//!         "12345",
//!         "secret",
//!         reporter.last_month(chrono::Utc::now()),
//!     )
//!     .await?;
//!     println!("total cost {:.2}", report.cost.total_cost);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod report;

// Re-export commonly used types
pub use callstat_core::{CallstatError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
