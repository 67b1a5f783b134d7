//! Page source trait for call log readers
//!
//! This module defines the `CallLogSource` trait that a paginated call log
//! backend implements. The reader only depends on this trait, so paging and
//! termination logic can run against the remote service or an in-memory
//! fixture alike.

use crate::error::Result;
use crate::filters::CallLogFilter;
use crate::period::TimeWindow;
use crate::types::CallLogEntry;
use async_trait::async_trait;

/// Parameters of a single page fetch
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    /// Window the query covers
    pub window: &'a TimeWindow,
    /// 1-based page number
    pub page: u32,
    /// Requested page size; the server default applies when `None`
    pub page_size: Option<u32>,
    /// Server-side filter
    pub filter: &'a CallLogFilter,
}

/// One decoded page of call records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallLogPage {
    /// Last page number as declared by the server
    ///
    /// Not reliable for filtered queries; only a value of zero carries
    /// meaning (see [`CallstatError::BadFilter`](crate::error::CallstatError::BadFilter)).
    pub last_page: u32,
    /// Records on this page, in server order
    pub entries: Vec<CallLogEntry>,
}

/// A backend that serves call log pages
#[async_trait]
pub trait CallLogSource: Send + Sync {
    /// Fetch one page of records
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CallLogPage>;
}

#[async_trait]
impl<T: CallLogSource + ?Sized> CallLogSource for &T {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CallLogPage> {
        (**self).fetch_page(request).await
    }
}
