//! Usage aggregation
//!
//! Buckets call durations by tariff category. National and mobile calls go
//! to their own buckets; international calls and every unrecognized kind
//! are accounted in `other`, so no duration is ever dropped.
//!
//! # Examples
//!
//! ```
//! use callstat_core::aggregation::UsageAggregator;
//! use callstat_core::types::{CallKind, Usage};
//! use std::time::Duration;
//!
//! let mut aggregator = UsageAggregator::new();
//! aggregator.record(&CallKind::National, Duration::from_secs(90));
//! aggregator.record(&CallKind::from("premium"), Duration::from_secs(30));
//!
//! let usage: Usage = aggregator.finish();
//! assert_eq!(usage.national, Duration::from_secs(90));
//! assert_eq!(usage.other, Duration::from_secs(30));
//! ```

use crate::error::Result;
use crate::types::{CallKind, CallLogEntry, Usage};
use futures::stream::{Stream, StreamExt};
use std::time::Duration;
use tracing::trace;

/// Running per-bucket totals for one window
#[derive(Debug, Default, Clone)]
pub struct UsageAggregator {
    usage: Usage,
    calls: u64,
}

impl UsageAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one call's duration to the bucket matching its kind
    pub fn record(&mut self, kind: &CallKind, duration: Duration) {
        self.usage.add(kind.bucket(), duration);
        self.calls += 1;
    }

    /// Add one call log entry
    pub fn push(&mut self, entry: &CallLogEntry) {
        trace!(id = %entry.id, kind = %entry.kind, secs = entry.duration.as_secs(), "aggregating call");
        self.record(&entry.kind, entry.duration);
    }

    /// Number of calls aggregated so far
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Totals aggregated so far
    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Consume the aggregator and return the final usage
    pub fn finish(self) -> Usage {
        self.usage
    }

    /// Aggregate an in-memory sequence of entries
    pub fn aggregate<'a, I>(entries: I) -> Usage
    where
        I: IntoIterator<Item = &'a CallLogEntry>,
    {
        let mut aggregator = Self::new();
        for entry in entries {
            aggregator.push(entry);
        }
        aggregator.finish()
    }

    /// Aggregate a fallible stream of entries
    ///
    /// Stops at the first error and returns it unchanged.
    pub async fn aggregate_stream<S>(entries: S) -> Result<Usage>
    where
        S: Stream<Item = Result<CallLogEntry>>,
    {
        let mut aggregator = Self::new();
        futures::pin_mut!(entries);
        while let Some(entry) = entries.next().await {
            aggregator.push(&entry?);
        }
        Ok(aggregator.finish())
    }
}
