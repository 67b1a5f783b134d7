//! Core domain types for callstat
//!
//! This module contains the fundamental types used throughout the callstat
//! crates: the tariff categories and filter codes of the remote call log,
//! a decoded call record, and the per-category [`Usage`] accumulator.
//!
//! Code values that the remote service may extend (direction, call type,
//! call kind) are modelled as enums with an `Other` variant so that unknown
//! values survive decoding and are never silently dropped.

use crate::error::{CallstatError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::time::Duration;

/// Tariff category of a call
///
/// # Examples
/// ```
/// use callstat_core::types::CallKind;
///
/// assert_eq!(CallKind::from("mobile"), CallKind::Mobile);
/// assert_eq!(CallKind::from("satellite"), CallKind::Other("satellite".into()));
/// assert_eq!(CallKind::National.as_str(), "national");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallKind {
    /// Wildcard value, only meaningful as a filter
    Any,
    /// Calls into the national fixed network
    National,
    /// Calls to mobile numbers
    Mobile,
    /// Calls abroad
    International,
    /// Any value the service returns that is not known here
    Other(String),
}

impl CallKind {
    /// Remote code for this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::National => "national",
            Self::Mobile => "mobile",
            Self::International => "international",
            Self::Other(value) => value,
        }
    }

    /// Usage bucket that calls of this kind are accounted in
    pub fn bucket(&self) -> UsageBucket {
        match self {
            Self::National => UsageBucket::National,
            Self::Mobile => UsageBucket::Mobile,
            Self::Any | Self::International | Self::Other(_) => UsageBucket::Other,
        }
    }
}

impl From<&str> for CallKind {
    fn from(value: &str) -> Self {
        match value {
            "*" => Self::Any,
            "national" => Self::National,
            "mobile" => Self::Mobile,
            "international" => Self::International,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CallKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CallKind> for String {
    fn from(kind: CallKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction code of a call, combined with its outcome
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallDirection {
    /// Wildcard value
    Any,
    /// Outbound, regardless of outcome
    AnyOutbound,
    /// Inbound, regardless of outcome
    AnyInbound,
    /// Outbound calls that were connected
    SuccessfulOutbound,
    /// Inbound calls that were connected
    SuccessfulInbound,
    /// Outbound calls that failed
    FailedOutbound,
    /// Inbound calls that failed
    FailedInbound,
    /// Unknown direction code
    Other(String),
}

impl CallDirection {
    /// Remote code for this direction
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::AnyOutbound => "1",
            Self::AnyInbound => "2",
            Self::SuccessfulOutbound => "11",
            Self::SuccessfulInbound => "21",
            Self::FailedOutbound => "12",
            Self::FailedInbound => "22",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for CallDirection {
    fn from(value: &str) -> Self {
        match value {
            "*" => Self::Any,
            "1" => Self::AnyOutbound,
            "2" => Self::AnyInbound,
            "11" => Self::SuccessfulOutbound,
            "21" => Self::SuccessfulInbound,
            "12" => Self::FailedOutbound,
            "22" => Self::FailedInbound,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CallDirection {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CallDirection> for String {
    fn from(direction: CallDirection) -> Self {
        direction.as_str().to_string()
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Call or media type of a call log record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallType {
    /// Wildcard value
    Any,
    /// Forwarded call
    Forward,
    /// Regular voice call
    Regular,
    /// Voice box
    Voicebox,
    /// Fax delivered by mail
    Fax2Mail,
    /// Text message
    Sms,
    /// Conference call
    Conference,
    /// Unknown type
    Other(String),
}

impl CallType {
    /// Remote code for this type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Forward => "forward",
            Self::Regular => "call",
            Self::Voicebox => "voicebox",
            Self::Fax2Mail => "fax2mail",
            Self::Sms => "sms",
            Self::Conference => "conference",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for CallType {
    fn from(value: &str) -> Self {
        match value {
            "*" => Self::Any,
            "forward" => Self::Forward,
            "call" => Self::Regular,
            "voicebox" => Self::Voicebox,
            "fax2mail" => Self::Fax2Mail,
            "sms" => Self::Sms,
            "conference" => Self::Conference,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CallType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CallType> for String {
    fn from(call_type: CallType) -> Self {
        call_type.as_str().to_string()
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One call record as returned by the call log
///
/// The timestamp is the wall-clock time reported by the service; it carries
/// no offset. Fax fields are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLogEntry {
    /// Record identifier
    pub id: String,
    /// Deletion marker as reported by the service
    pub deleted: String,
    /// Start of the call
    pub time: NaiveDateTime,
    /// Billed duration in whole seconds
    pub duration: Duration,
    /// Own number involved in the call
    pub number: String,
    /// Direction code
    pub direction: CallDirection,
    /// Remote party number
    pub partner: String,
    /// Call or media type
    pub call_type: CallType,
    /// Call status
    pub status: String,
    /// Tariff category
    pub kind: CallKind,
    /// Fax delivery status
    pub fax_status: String,
    /// Fax failure reason
    pub fax_error_reason: String,
}

/// The three buckets that call durations are accounted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageBucket {
    National,
    Mobile,
    /// International calls and every unrecognized kind
    Other,
}

/// Accumulated call durations per tariff bucket
///
/// # Examples
/// ```
/// use callstat_core::types::Usage;
/// use std::time::Duration;
///
/// let usage = Usage::new(
///     Duration::from_secs(600),
///     Duration::from_secs(900),
///     Duration::from_secs(120),
/// );
/// assert_eq!(usage.total(), Duration::from_secs(1620));
/// assert!(usage.has_unpriced());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Usage {
    /// National fixed-network calls
    pub national: Duration,
    /// Calls to mobile numbers
    pub mobile: Duration,
    /// International calls and calls of unknown kind
    pub other: Duration,
}

impl Usage {
    /// Create a new Usage
    pub fn new(national: Duration, mobile: Duration, other: Duration) -> Self {
        Self {
            national,
            mobile,
            other,
        }
    }

    /// Total duration across all buckets
    pub fn total(&self) -> Duration {
        self.national + self.mobile + self.other
    }

    /// Duration accounted in a single bucket
    pub fn get(&self, bucket: UsageBucket) -> Duration {
        match bucket {
            UsageBucket::National => self.national,
            UsageBucket::Mobile => self.mobile,
            UsageBucket::Other => self.other,
        }
    }

    /// Add a duration to one bucket
    pub fn add(&mut self, bucket: UsageBucket, duration: Duration) {
        match bucket {
            UsageBucket::National => self.national += duration,
            UsageBucket::Mobile => self.mobile += duration,
            UsageBucket::Other => self.other += duration,
        }
    }

    /// Whether any usage fell into the unpriced `other` bucket
    pub fn has_unpriced(&self) -> bool {
        !self.other.is_zero()
    }

    /// Scale every bucket by the same factor, keeping sub-second precision
    ///
    /// Fails when the factor is negative or not finite, or when a scaled
    /// bucket does not fit in a [`Duration`].
    pub fn scale(&self, factor: f64) -> Result<Self> {
        let scale = |duration: Duration| {
            Duration::try_from_secs_f64(duration.as_secs_f64() * factor).map_err(|e| {
                CallstatError::InvalidArgument(format!(
                    "cannot scale {duration:?} by {factor}: {e}"
                ))
            })
        };
        Ok(Self {
            national: scale(self.national)?,
            mobile: scale(self.mobile)?,
            other: scale(self.other)?,
        })
    }
}

impl Add for Usage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            national: self.national + other.national,
            mobile: self.mobile + other.mobile,
            other: self.other + other.other,
        }
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, other: Self) {
        self.national += other.national;
        self.mobile += other.mobile;
        self.other += other.other;
    }
}

/// Whole minutes of a duration, rounded up
///
/// Partial minutes are billed, so this never rounds down.
///
/// # Examples
/// ```
/// use callstat_core::types::ceil_minutes;
/// use std::time::Duration;
///
/// assert_eq!(ceil_minutes(Duration::from_secs(60)), 1);
/// assert_eq!(ceil_minutes(Duration::from_secs(61)), 2);
/// assert_eq!(ceil_minutes(Duration::from_millis(1)), 1);
/// assert_eq!(ceil_minutes(Duration::ZERO), 0);
/// ```
pub fn ceil_minutes(duration: Duration) -> u64 {
    const NANOS_PER_MINUTE: u128 = 60 * 1_000_000_000;
    duration.as_nanos().div_ceil(NANOS_PER_MINUTE) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_kind_round_trip_codes() {
        for code in ["*", "national", "mobile", "international", "premium"] {
            assert_eq!(CallKind::from(code).as_str(), code);
        }
    }

    #[test]
    fn test_call_kind_buckets() {
        assert_eq!(CallKind::National.bucket(), UsageBucket::National);
        assert_eq!(CallKind::Mobile.bucket(), UsageBucket::Mobile);
        assert_eq!(CallKind::International.bucket(), UsageBucket::Other);
        assert_eq!(CallKind::from("").bucket(), UsageBucket::Other);
        assert_eq!(CallKind::from("service").bucket(), UsageBucket::Other);
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(CallDirection::SuccessfulOutbound.as_str(), "11");
        assert_eq!(CallDirection::from("22"), CallDirection::FailedInbound);
        assert_eq!(
            CallDirection::from("99"),
            CallDirection::Other("99".to_string())
        );
    }

    #[test]
    fn test_call_type_codes() {
        assert_eq!(CallType::from("call"), CallType::Regular);
        assert_eq!(CallType::Fax2Mail.to_string(), "fax2mail");
    }

    #[test]
    fn test_kind_deserializes_from_string() {
        let kind: CallKind = serde_json::from_str("\"international\"").unwrap();
        assert_eq!(kind, CallKind::International);
        let unknown: CallKind = serde_json::from_str("\"shared-cost\"").unwrap();
        assert_eq!(unknown, CallKind::Other("shared-cost".to_string()));
    }

    #[test]
    fn test_usage_add_and_total() {
        let mut usage = Usage::default();
        Usage::add(&mut usage, UsageBucket::National, Duration::from_secs(30));
        Usage::add(&mut usage, UsageBucket::Mobile, Duration::from_secs(45));
        Usage::add(&mut usage, UsageBucket::National, Duration::from_secs(15));
        assert_eq!(usage.national, Duration::from_secs(45));
        assert_eq!(usage.total(), Duration::from_secs(90));
        assert!(!usage.has_unpriced());
    }

    #[test]
    fn test_usage_arithmetic() {
        let a = Usage::new(
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
        );
        let mut b = a + a;
        assert_eq!(b.other, Duration::from_secs(6));
        b += a;
        assert_eq!(b.total(), Duration::from_secs(18));
    }

    #[test]
    fn test_usage_scale_keeps_sub_second_precision() {
        let usage = Usage::new(Duration::from_secs(1), Duration::ZERO, Duration::ZERO);
        let scaled = usage.scale(1.5).unwrap();
        assert_eq!(scaled.national, Duration::from_millis(1500));
        assert_eq!(scaled.mobile, Duration::ZERO);
    }

    #[test]
    fn test_usage_scale_rejects_overflow_and_bad_factors() {
        let usage = Usage::new(Duration::from_secs(10_000), Duration::ZERO, Duration::ZERO);
        for factor in [1e20, f64::INFINITY, f64::NAN, -1.0] {
            assert!(matches!(
                usage.scale(factor),
                Err(CallstatError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_ceil_minutes_one_second_over() {
        // 100 minutes and 6 seconds
        assert_eq!(ceil_minutes(Duration::from_secs(6006)), 101);
        assert_eq!(ceil_minutes(Duration::from_secs(6000)), 100);
    }
}
