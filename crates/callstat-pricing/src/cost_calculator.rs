//! Cost calculator for quota overage
//!
//! Minutes are billed per started minute, so every duration is rounded up
//! before it is compared with the quota. Only the national and mobile
//! buckets carry a quota and a price; usage in the `other` bucket is
//! reported but never priced.
//!
//! # Examples
//!
//! ```
//! use callstat_core::types::Usage;
//! use callstat_pricing::{CostCalculator, QuotaConfig};
//! use std::time::Duration;
//!
//! let calculator = CostCalculator::new(QuotaConfig::new(10, 10));
//! let usage = Usage::new(
//!     Duration::from_secs(600),
//!     Duration::from_secs(900),
//!     Duration::from_secs(120),
//! );
//!
//! let breakdown = calculator.calculate(&usage);
//! assert_eq!(breakdown.national.overage_minutes, 0);
//! assert_eq!(breakdown.mobile.overage_minutes, 5);
//! assert!((breakdown.total_cost - 0.412).abs() < 1e-9);
//! assert!(breakdown.has_unpriced);
//! ```

use crate::severity::Severity;
use callstat_core::types::{Usage, UsageBucket, ceil_minutes};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default overage price for national calls, per minute
pub const DEFAULT_NATIONAL_PRICE: f64 = 0.0083;
/// Default overage price for mobile calls, per minute
pub const DEFAULT_MOBILE_PRICE: f64 = 0.0824;

/// Included minutes and overage prices of a tariff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Included national minutes per billing period
    pub national_minutes: u64,
    /// Included mobile minutes per billing period
    pub mobile_minutes: u64,
    /// Price per national minute beyond the quota
    pub national_price: f64,
    /// Price per mobile minute beyond the quota
    pub mobile_price: f64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl QuotaConfig {
    /// Quotas with the default prices
    pub fn new(national_minutes: u64, mobile_minutes: u64) -> Self {
        Self {
            national_minutes,
            mobile_minutes,
            national_price: DEFAULT_NATIONAL_PRICE,
            mobile_price: DEFAULT_MOBILE_PRICE,
        }
    }

    /// Override the per-minute prices
    pub fn with_prices(mut self, national_price: f64, mobile_price: f64) -> Self {
        self.national_price = national_price;
        self.mobile_price = mobile_price;
        self
    }

    /// Included minutes of a priced bucket; `None` for `other`
    pub fn quota(&self, bucket: UsageBucket) -> Option<u64> {
        match bucket {
            UsageBucket::National => Some(self.national_minutes),
            UsageBucket::Mobile => Some(self.mobile_minutes),
            UsageBucket::Other => None,
        }
    }

    /// Overage price of a priced bucket; `None` for `other`
    pub fn price(&self, bucket: UsageBucket) -> Option<f64> {
        match bucket {
            UsageBucket::National => Some(self.national_price),
            UsageBucket::Mobile => Some(self.mobile_price),
            UsageBucket::Other => None,
        }
    }
}

/// Billing result for one priced bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryCost {
    /// Exact usage
    #[serde(skip)]
    pub usage: Duration,
    /// Usage in started minutes
    pub minutes: u64,
    /// Included minutes
    pub quota_minutes: u64,
    /// Started minutes beyond the quota
    pub overage_minutes: u64,
    /// Overage cost
    pub cost: f64,
    /// Distance to the quota
    pub severity: Severity,
}

/// Billing result for a whole [`Usage`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub national: CategoryCost,
    pub mobile: CategoryCost,
    /// Started minutes in the unpriced bucket
    pub other_minutes: u64,
    /// Whether any usage fell outside the priced buckets
    pub has_unpriced: bool,
    /// Sum of national and mobile overage cost
    pub total_cost: f64,
}

/// Applies a [`QuotaConfig`] to usage
#[derive(Debug, Clone, Default)]
pub struct CostCalculator {
    config: QuotaConfig,
}

impl CostCalculator {
    /// Create a calculator for the given tariff
    pub fn new(config: QuotaConfig) -> Self {
        Self { config }
    }

    /// The tariff in use
    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    /// Started minutes beyond `quota_minutes`
    ///
    /// # Examples
    /// ```
    /// use callstat_pricing::CostCalculator;
    /// use std::time::Duration;
    ///
    /// // one second over a 100 minute quota is a full extra minute
    /// assert_eq!(CostCalculator::overage_minutes(Duration::from_secs(6001), 100), 1);
    /// assert_eq!(CostCalculator::overage_minutes(Duration::from_secs(6000), 100), 0);
    /// ```
    pub fn overage_minutes(usage: Duration, quota_minutes: u64) -> u64 {
        ceil_minutes(usage).saturating_sub(quota_minutes)
    }

    fn category(usage: Duration, quota_minutes: u64, price: f64) -> CategoryCost {
        let overage_minutes = Self::overage_minutes(usage, quota_minutes);
        CategoryCost {
            usage,
            minutes: ceil_minutes(usage),
            quota_minutes,
            overage_minutes,
            cost: overage_minutes as f64 * price,
            severity: Severity::classify(usage, quota_minutes),
        }
    }

    /// Price a usage value against the tariff
    pub fn calculate(&self, usage: &Usage) -> CostBreakdown {
        let national = Self::category(
            usage.national,
            self.config.national_minutes,
            self.config.national_price,
        );
        let mobile = Self::category(
            usage.mobile,
            self.config.mobile_minutes,
            self.config.mobile_price,
        );
        let total_cost = national.cost + mobile.cost;

        debug!(
            national_overage = national.overage_minutes,
            mobile_overage = mobile.overage_minutes,
            total_cost,
            "calculated overage cost"
        );

        CostBreakdown {
            national,
            mobile,
            other_minutes: ceil_minutes(usage.other),
            has_unpriced: usage.has_unpriced(),
            total_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(national: u64, mobile: u64, other: u64) -> Usage {
        Usage::new(
            Duration::from_secs(national),
            Duration::from_secs(mobile),
            Duration::from_secs(other),
        )
    }

    #[test]
    fn test_default_prices() {
        let config = QuotaConfig::default();
        assert_eq!(config.national_price, 0.0083);
        assert_eq!(config.mobile_price, 0.0824);
        assert_eq!(config.quota(UsageBucket::Other), None);
        assert_eq!(config.price(UsageBucket::Mobile), Some(0.0824));
    }

    #[test]
    fn test_partial_minute_over_quota_is_billed() {
        // 100.1 minutes against a 100 minute quota
        let calculator = CostCalculator::new(QuotaConfig::new(100, 0));
        let breakdown = calculator.calculate(&usage(6006, 0, 0));
        assert_eq!(breakdown.national.minutes, 101);
        assert_eq!(breakdown.national.overage_minutes, 1);
        assert!((breakdown.total_cost - 0.0083).abs() < 1e-12);
    }

    #[test]
    fn test_inside_quota_costs_nothing() {
        let calculator = CostCalculator::new(QuotaConfig::new(100, 100));
        let breakdown = calculator.calculate(&usage(3000, 5999, 0));
        assert_eq!(breakdown.total_cost, 0.0);
        assert_eq!(breakdown.mobile.minutes, 100);
        assert!(!breakdown.has_unpriced);
    }

    #[test]
    fn test_month_report_example() {
        let calculator = CostCalculator::new(QuotaConfig::new(10, 10));
        let breakdown = calculator.calculate(&usage(600, 900, 120));

        assert_eq!(breakdown.national.minutes, 10);
        assert_eq!(breakdown.national.overage_minutes, 0);
        assert_eq!(breakdown.national.severity, Severity::Warning);
        assert_eq!(breakdown.mobile.minutes, 15);
        assert_eq!(breakdown.mobile.overage_minutes, 5);
        assert_eq!(breakdown.mobile.severity, Severity::Attention);
        assert!((breakdown.mobile.cost - 0.412).abs() < 1e-9);
        assert!((breakdown.total_cost - 0.412).abs() < 1e-9);
        assert_eq!(breakdown.other_minutes, 2);
        assert!(breakdown.has_unpriced);
    }

    #[test]
    fn test_custom_prices() {
        let config = QuotaConfig::new(0, 0).with_prices(1.0, 2.0);
        let breakdown = CostCalculator::new(config).calculate(&usage(60, 61, 0));
        assert_eq!(breakdown.total_cost, 1.0 + 2.0 * 2.0);
    }

    #[test]
    fn test_sub_second_projection_rounds_up() {
        let calculator = CostCalculator::new(QuotaConfig::new(0, 0));
        let projected = Usage::new(Duration::from_millis(60_001), Duration::ZERO, Duration::ZERO);
        assert_eq!(calculator.calculate(&projected).national.overage_minutes, 2);
    }
}
