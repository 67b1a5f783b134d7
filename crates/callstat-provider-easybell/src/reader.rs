//! Paginated call log reader
//!
//! [`CallLogReader`] walks the pages of one time window, one fetch at a
//! time, and hands out records in server order.
//!
//! The server's `last_page` value is not trusted for filtered queries, so
//! the reader stops on the first page that comes back without records. A
//! `last_page` of zero together with a non-empty filter means the server
//! rejected the filter values and is reported as
//! [`CallstatError::BadFilter`] instead of an empty result.
//!
//! # Examples
//!
//! ```no_run
//! use callstat_core::{CallLogFilter, TimeWindow};
//! use callstat_provider_easybell::{CallLogReader, Session};
//! use chrono::Utc;
//! use std::time::Duration;
//!
//! # async fn run() -> callstat_core::Result<()> {
//! let session = Session::new()?;
//! session.login("user", "secret").await?;
//!
//! let window = TimeWindow::trailing(Utc::now(), Duration::from_secs(7 * 24 * 3600))?;
//! let mut reader = CallLogReader::new(&session, window)
//!     .with_filter(CallLogFilter::successful_outbound());
//! while let Some(entry) = reader.read().await? {
//!     println!("{} {}s", entry.partner, entry.duration.as_secs());
//! }
//! # Ok(())
//! # }
//! ```

use async_stream::try_stream;
use callstat_core::aggregation::UsageAggregator;
use callstat_core::error::{CallstatError, Result};
use callstat_core::filters::CallLogFilter;
use callstat_core::period::TimeWindow;
use callstat_core::source::{CallLogSource, PageRequest};
use callstat_core::types::{CallLogEntry, Usage};
use futures::stream::Stream;
use std::collections::VecDeque;
use tracing::debug;

/// Forward-only cursor over the call log of one window
pub struct CallLogReader<S> {
    source: S,
    window: TimeWindow,
    filter: CallLogFilter,
    page_size: Option<u32>,
    /// Next page to fetch, 1-based
    next_page: u32,
    buffer: VecDeque<CallLogEntry>,
    exhausted: bool,
}

impl<S: CallLogSource> CallLogReader<S> {
    /// Create a reader over `window` with no filter
    pub fn new(source: S, window: TimeWindow) -> Self {
        Self {
            source,
            window,
            filter: CallLogFilter::default(),
            page_size: None,
            next_page: 1,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Apply a server-side filter
    pub fn with_filter(mut self, filter: CallLogFilter) -> Self {
        self.set_filter(filter);
        self
    }

    /// Request pages of a specific size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Window currently being read
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Filter currently applied
    pub fn filter(&self) -> &CallLogFilter {
        &self.filter
    }

    /// Replace the filter and restart the current window at page 1
    pub fn set_filter(&mut self, filter: CallLogFilter) {
        self.filter = filter;
        self.rewind();
    }

    /// Rebind to a new window and restart at page 1
    ///
    /// Buffered records of the previous window are discarded.
    pub fn reset(&mut self, window: TimeWindow) {
        debug!(start = %window.start(), end = %window.end(), "resetting call log reader");
        self.window = window;
        self.rewind();
    }

    fn rewind(&mut self) {
        self.next_page = 1;
        self.buffer.clear();
        self.exhausted = false;
    }

    /// Whether the window has been read to the end
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }

    /// Next record, or `None` once the window is drained
    pub async fn read(&mut self) -> Result<Option<CallLogEntry>> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Ok(Some(entry));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_next_page().await?;
        }
    }

    async fn fetch_next_page(&mut self) -> Result<()> {
        let request = PageRequest {
            window: &self.window,
            page: self.next_page,
            page_size: self.page_size,
            filter: &self.filter,
        };
        let page = self.source.fetch_page(&request).await?;

        if page.last_page == 0 && !self.filter.is_empty() {
            debug!(page = self.next_page, filter = ?self.filter, "server reported no pages for filter");
            return Err(CallstatError::BadFilter);
        }

        if page.entries.is_empty() {
            debug!(page = self.next_page, "empty page, call log drained");
            self.exhausted = true;
        } else {
            debug!(page = self.next_page, records = page.entries.len(), "buffered call log page");
            self.buffer.extend(page.entries);
            self.next_page += 1;
        }
        Ok(())
    }

    /// Drain the window and return the aggregated usage
    pub async fn read_usage(&mut self) -> Result<Usage> {
        let mut aggregator = UsageAggregator::new();
        while let Some(entry) = self.read().await? {
            aggregator.push(&entry);
        }
        debug!(calls = aggregator.calls(), "aggregated call log window");
        Ok(aggregator.finish())
    }

    /// Turn the reader into a stream of records
    pub fn into_stream(mut self) -> impl Stream<Item = Result<CallLogEntry>> {
        try_stream! {
            while let Some(entry) = self.read().await? {
                yield entry;
            }
        }
    }
}
