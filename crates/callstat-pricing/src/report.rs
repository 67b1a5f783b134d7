//! Priced usage reports
//!
//! Plain values combining a window, its aggregated usage, and the cost
//! breakdown. Fetching the usage is the caller's job; these types only
//! price and project it.

use crate::cost_calculator::{CostBreakdown, CostCalculator};
use crate::estimator::Estimator;
use callstat_core::error::Result;
use callstat_core::period::TimeWindow;
use callstat_core::types::Usage;
use std::time::Duration;

/// Actual usage of a closed billing period
#[derive(Debug, Clone)]
pub struct MonthReport {
    pub window: TimeWindow,
    pub usage: Usage,
    pub cost: CostBreakdown,
}

impl MonthReport {
    /// Price the usage of `window`
    pub fn new(window: TimeWindow, usage: Usage, calculator: &CostCalculator) -> Self {
        Self {
            window,
            cost: calculator.calculate(&usage),
            usage,
        }
    }
}

/// Usage so far in the running period plus a month-end projection
#[derive(Debug, Clone)]
pub struct CurrentMonthReport {
    /// Actual usage of the running month
    pub actual: MonthReport,
    /// Window the projection is based on
    pub observation: TimeWindow,
    /// Usage inside the observation window
    pub observed: Usage,
    /// Observed usage projected to the full month
    pub estimated: Usage,
    /// Cost of the projected usage
    pub estimated_cost: CostBreakdown,
}

impl CurrentMonthReport {
    /// Price the actual usage and project the observation to the month length
    pub fn new(
        month: TimeWindow,
        actual: Usage,
        observation: TimeWindow,
        observed: Usage,
        calculator: &CostCalculator,
    ) -> Result<Self> {
        let estimator = Estimator::new(month.duration(), observation.duration())?;
        let estimated = estimator.project(&observed)?;
        Ok(Self {
            actual: MonthReport::new(month, actual, calculator),
            observation,
            observed,
            estimated_cost: calculator.calculate(&estimated),
            estimated,
        })
    }

    /// Length of the observation window the projection is based on
    pub fn observation_length(&self) -> Duration {
        self.observation.duration()
    }
}
