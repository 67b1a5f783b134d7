//! Common test utilities and helpers for callstat tests
//!
//! Record builders, an in-memory paged source, and a mock portal built on
//! wiremock.

#![allow(dead_code)]

use async_trait::async_trait;
use callstat_core::error::Result;
use callstat_core::source::{CallLogPage, CallLogSource, PageRequest};
use callstat_core::types::{CallDirection, CallKind, CallLogEntry, CallType};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builder for creating test CallLogEntry instances
pub struct CallLogEntryBuilder {
    id: String,
    time: NaiveDateTime,
    duration_secs: u64,
    partner: String,
    kind: CallKind,
}

impl CallLogEntryBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            id: "1".to_string(),
            time: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            duration_secs: 60,
            partner: "030123456".to_string(),
            kind: CallKind::National,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_duration(mut self, secs: u64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<CallKind>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_partner(mut self, partner: &str) -> Self {
        self.partner = partner.to_string();
        self
    }

    pub fn build(self) -> CallLogEntry {
        CallLogEntry {
            id: self.id,
            deleted: "0".to_string(),
            time: self.time,
            duration: Duration::from_secs(self.duration_secs),
            number: "04012345".to_string(),
            direction: CallDirection::SuccessfulOutbound,
            partner: self.partner,
            call_type: CallType::Regular,
            status: String::new(),
            kind: self.kind,
            fax_status: String::new(),
            fax_error_reason: String::new(),
        }
    }

    /// The record as the portal sends it
    pub fn build_json(self) -> Value {
        json!({
            "ID": self.id,
            "DELETED": "0",
            "DATUM": self.time.format("%d.%m.%Y %H:%M:%S").to_string(),
            "DAUER": self.duration_secs,
            "RUFNUMMER": "04012345",
            "RICHTUNG": "11",
            "PARTNER": self.partner,
            "TYPE": "call",
            "STATUS": "",
            "ART": self.kind.as_str(),
            "FAXSTATUS": null,
            "FAXERRORREASON": null,
        })
    }
}

impl Default for CallLogEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory source serving fixed pages regardless of window
pub struct PagedSource {
    pages: Vec<Vec<CallLogEntry>>,
    requested: Mutex<Vec<u32>>,
}

impl PagedSource {
    pub fn new(pages: Vec<Vec<CallLogEntry>>) -> Self {
        Self {
            pages,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Page numbers requested so far
    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallLogSource for PagedSource {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CallLogPage> {
        self.requested.lock().unwrap().push(request.page);
        let entries = self
            .pages
            .get(request.page as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(CallLogPage {
            // the portal keeps claiming a single page for filtered queries
            last_page: 1,
            entries,
        })
    }
}

/// Mount login and logout handlers answering with `status`
pub async fn mount_auth(server: &MockServer, login_status: u16, logout_status: u16) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(login_status).insert_header("set-cookie", "PHPSESSID=test; Path=/"),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(logout_status))
        .mount(server)
        .await;
}

/// Mount one call log page
pub async fn mount_page(server: &MockServer, page: u32, last_page: u32, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/call-log/ajax"))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "last_page": last_page,
                "data": records,
            })),
        )
        .mount(server)
        .await;
}
