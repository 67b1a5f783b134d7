//! Month-end projection
//!
//! An [`Estimator`] extrapolates usage observed over a short window to a
//! full billing period by linear scaling. One factor,
//! `full period / observation`, is applied to every bucket, and nothing is
//! rounded until the result is priced or displayed.

use callstat_core::error::{CallstatError, Result};
use callstat_core::types::Usage;
use std::time::Duration;
use tracing::debug;

/// Linear projection from an observation window to a billing period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimator {
    full_period: Duration,
    observation: Duration,
}

impl Estimator {
    /// Create an estimator
    ///
    /// Fails when the observation window is empty, or so short against the
    /// full period that the factor would not be finite.
    pub fn new(full_period: Duration, observation: Duration) -> Result<Self> {
        if observation.is_zero() {
            return Err(CallstatError::InvalidArgument(
                "observation window must not be empty".to_string(),
            ));
        }
        let estimator = Self {
            full_period,
            observation,
        };
        if !estimator.factor().is_finite() {
            return Err(CallstatError::InvalidArgument(format!(
                "observation window {observation:?} too short for {full_period:?}"
            )));
        }
        Ok(estimator)
    }

    /// Length of the billing period projected to
    pub fn full_period(&self) -> Duration {
        self.full_period
    }

    /// Length of the observation window
    pub fn observation(&self) -> Duration {
        self.observation
    }

    /// Scaling factor applied to every bucket
    pub fn factor(&self) -> f64 {
        self.full_period.as_secs_f64() / self.observation.as_secs_f64()
    }

    /// Project observed usage to the full period
    ///
    /// Fails when a projected bucket would not fit in a [`Duration`].
    ///
    /// # Examples
    /// ```
    /// use callstat_core::types::Usage;
    /// use callstat_pricing::Estimator;
    /// use std::time::Duration;
    ///
    /// const DAY: u64 = 24 * 3600;
    /// let estimator = Estimator::new(
    ///     Duration::from_secs(30 * DAY),
    ///     Duration::from_secs(10 * DAY),
    /// ).unwrap();
    ///
    /// let observed = Usage::new(Duration::from_secs(100), Duration::ZERO, Duration::from_secs(1));
    /// let projected = estimator.project(&observed).unwrap();
    /// assert_eq!(projected.national, Duration::from_secs(300));
    /// assert_eq!(projected.other, Duration::from_secs(3));
    /// ```
    pub fn project(&self, usage: &Usage) -> Result<Usage> {
        let factor = self.factor();
        debug!(factor, "projecting usage to full period");
        usage.scale(factor)
    }
}
