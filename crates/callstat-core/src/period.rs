//! Time windows and billing periods
//!
//! A [`TimeWindow`] is the half-open interval `[start, end)` a call log
//! query covers. Billing periods are calendar months in the configured
//! timezone; their boundaries are computed as local midnights and then
//! stored as instants, so a window length is exact across DST changes.

use crate::error::{CallstatError, Result};
use crate::timezone::TimezoneConfig;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Half-open time interval `[start, end)`
///
/// # Examples
/// ```
/// use callstat_core::period::TimeWindow;
/// use callstat_core::timezone::TimezoneConfig;
/// use chrono::{TimeZone, Utc};
///
/// let tz = TimezoneConfig::from_cli(None, true).unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
///
/// let month = TimeWindow::month_of(now, &tz).unwrap();
/// assert_eq!(month.start(), Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
/// assert_eq!(month.end(), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
/// assert_eq!(month.duration().as_secs(), 29 * 24 * 3600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window, rejecting an end before the start
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(CallstatError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `now` in the configured timezone
    pub fn month_of(now: DateTime<Utc>, tz: &TimezoneConfig) -> Result<Self> {
        let local = now.with_timezone(&tz.tz);
        let (year, month) = (local.year(), local.month());
        let (next_year, next_month) = next_month(year, month);
        Self::new(
            local_midnight(&tz.tz, year, month)?,
            local_midnight(&tz.tz, next_year, next_month)?,
        )
    }

    /// The calendar month before the one containing `now`
    pub fn previous_month(now: DateTime<Utc>, tz: &TimezoneConfig) -> Result<Self> {
        let local = now.with_timezone(&tz.tz);
        let (year, month) = (local.year(), local.month());
        let (prev_year, prev_month) = previous_month(year, month);
        Self::new(
            local_midnight(&tz.tz, prev_year, prev_month)?,
            local_midnight(&tz.tz, year, month)?,
        )
    }

    /// The window of the given length that ends at `now`
    pub fn trailing(now: DateTime<Utc>, length: Duration) -> Result<Self> {
        let length = chrono::Duration::from_std(length).map_err(|_| {
            CallstatError::InvalidArgument(format!("window length {length:?} is out of range"))
        })?;
        let start = now.checked_sub_signed(length).ok_or_else(|| {
            CallstatError::InvalidArgument("window start is out of range".to_string())
        })?;
        Self::new(start, now)
    }

    /// Inclusive start
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Start as epoch seconds, as sent to the remote service
    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    /// End as epoch seconds, as sent to the remote service
    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }

    /// Exact length of the window
    pub fn duration(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or_default()
    }

    /// Whether an instant falls inside `[start, end)`
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Midnight on the first day of a month, resolved in `tz`
///
/// When midnight does not exist locally (a DST gap), the first valid
/// instant of that day is used.
fn local_midnight(tz: &Tz, year: i32, month: u32) -> Result<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CallstatError::InvalidArgument(format!("invalid month {year}-{month}")))?;

    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            CallstatError::InvalidArgument(format!(
                "no valid local time on {date} in {}",
                tz.name()
            ))
        })
}
