//! Near-quota classification
//!
//! Given minutes `m` against a quota `q`:
//!
//! - `m == 0` or `m <= 0.9 q` is [`Severity::Good`]
//! - above that, `m <= q` or `m < 1.1 q` is [`Severity::Warning`]
//! - anything else is [`Severity::Attention`]
//!
//! The same rule applies to actual and projected usage. Minutes are exact
//! (not rounded up) so a few seconds do not move a bucket across a boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How close usage is to its quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Comfortably inside the quota
    Good,
    /// Close to the quota or slightly over it
    Warning,
    /// Clearly over the quota
    Attention,
}

impl Severity {
    /// Classify `usage` against `quota_minutes`
    ///
    /// # Examples
    /// ```
    /// use callstat_pricing::Severity;
    /// use std::time::Duration;
    ///
    /// assert_eq!(Severity::classify(Duration::from_secs(54 * 60), 60), Severity::Good);
    /// assert_eq!(Severity::classify(Duration::from_secs(60 * 60), 60), Severity::Warning);
    /// assert_eq!(Severity::classify(Duration::from_secs(70 * 60), 60), Severity::Attention);
    /// ```
    pub fn classify(usage: Duration, quota_minutes: u64) -> Self {
        // integer nanoseconds times ten keep 0.9 and 1.1 exact
        let used = usage.as_nanos() * 10;
        let quota = u128::from(quota_minutes) * 60 * 1_000_000_000;

        if usage.is_zero() || used <= 9 * quota {
            Self::Good
        } else if used <= 10 * quota || used < 11 * quota {
            Self::Warning
        } else {
            Self::Attention
        }
    }

    /// Lowercase name as used in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Attention => "attention",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
