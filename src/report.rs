//! Report orchestration
//!
//! A [`Reporter`] reads the call log for the report windows through one
//! [`CallLogReader`], aggregates it, and prices the result.
//! [`with_session`] wraps a report run in a portal login and logout.

use callstat_core::error::{CallstatError, Result};
use callstat_core::filters::CallLogFilter;
use callstat_core::period::TimeWindow;
use callstat_core::source::CallLogSource;
use callstat_core::timezone::TimezoneConfig;
use callstat_pricing::{CostCalculator, CurrentMonthReport, MonthReport};
use callstat_provider_easybell::{CallLogReader, Session};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Shortest observation window accepted for estimates
pub const MIN_OBSERVATION: Duration = Duration::from_secs(24 * 3600);

/// Builds usage reports from a call log source
pub struct Reporter<S> {
    source: S,
    tz: TimezoneConfig,
    calculator: CostCalculator,
    filter: CallLogFilter,
    page_size: Option<u32>,
}

impl<S: CallLogSource> Reporter<S> {
    /// Create a reporter counting connected outbound calls
    pub fn new(source: S, tz: TimezoneConfig, calculator: CostCalculator) -> Self {
        Self {
            source,
            tz,
            calculator,
            filter: CallLogFilter::successful_outbound(),
            page_size: None,
        }
    }

    /// Request call log pages of a given size
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Count calls matching a different filter
    pub fn with_filter(mut self, filter: CallLogFilter) -> Self {
        self.filter = filter;
        self
    }

    fn reader(&self, window: TimeWindow) -> CallLogReader<&S> {
        let reader = CallLogReader::new(&self.source, window).with_filter(self.filter.clone());
        match self.page_size {
            Some(size) => reader.with_page_size(size),
            None => reader,
        }
    }

    /// Usage and cost of the calendar month before `now`
    pub async fn last_month(&self, now: DateTime<Utc>) -> Result<MonthReport> {
        let window = TimeWindow::previous_month(now, &self.tz)?;
        info!(start = %window.start(), end = %window.end(), "reading last month");

        let usage = self.reader(window).read_usage().await?;
        Ok(MonthReport::new(window, usage, &self.calculator))
    }

    /// Usage so far in the month of `now` and its month-end estimate
    ///
    /// The estimate projects the usage of the `observation` long window
    /// ending at `now` to the length of the month.
    pub async fn current_month(
        &self,
        now: DateTime<Utc>,
        observation: Duration,
    ) -> Result<CurrentMonthReport> {
        if observation <= MIN_OBSERVATION {
            return Err(CallstatError::InvalidArgument(format!(
                "observation window must be longer than one day, got {observation:?}"
            )));
        }

        let month = TimeWindow::month_of(now, &self.tz)?;
        info!(start = %month.start(), end = %month.end(), "reading current month");
        let mut reader = self.reader(month);
        let actual = reader.read_usage().await?;

        let observation = TimeWindow::trailing(now, observation)?;
        info!(start = %observation.start(), end = %observation.end(), "reading observation window");
        reader.reset(observation);
        let observed = reader.read_usage().await?;

        CurrentMonthReport::new(month, actual, observation, observed, &self.calculator)
    }
}

/// Log in, run `report`, and log out again
///
/// Logout is attempted whether or not the report succeeded. A logout
/// failure is returned only when the report itself succeeded; otherwise it
/// is logged and the report error is returned.
pub async fn with_session<T, F>(
    session: &Session,
    username: &str,
    password: &str,
    report: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    session.login(username, password).await?;

    let result = report.await;
    let logout = session.logout().await;
    if logout.is_ok() {
        info!("logged out");
    }

    match (result, logout) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(logout_error)) => {
            warn!(error = %logout_error, "logout failed after report error");
            Err(e)
        }
    }
}
