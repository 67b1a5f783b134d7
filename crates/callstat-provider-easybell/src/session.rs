//! Authenticated session against the easyBell customer portal
//!
//! Login sets a session cookie that the underlying client keeps and sends
//! on every later request. A [`Session`] is a [`CallLogSource`], so it can
//! back a [`CallLogReader`](crate::reader::CallLogReader) directly.

use crate::wire;
use async_trait::async_trait;
use callstat_core::error::{CallstatError, Result};
use callstat_core::source::{CallLogPage, CallLogSource, PageRequest};
use std::time::Duration;
use tracing::{debug, info};

/// Production portal address
pub const DEFAULT_BASE_URL: &str = "https://login.easybell.de";

const LOGIN_PATH: &str = "/login";
const LOGOUT_PATH: &str = "/logout";
const CALL_LOG_PATH: &str = "/call-log/ajax";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a [`Session`]
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Portal address without trailing path, e.g. [`DEFAULT_BASE_URL`]
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Use a different portal address
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// A cookie-carrying HTTP session
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    base_url: String,
}

impl Session {
    /// Create a session against the production portal
    pub fn new() -> Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with explicit settings
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Portal address this session talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in with portal credentials
    ///
    /// Any non-success status is reported as a network error.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        debug!(base_url = %self.base_url, "logging in");
        self.client
            .post(self.url(LOGIN_PATH))
            .form(&[("id", username), ("password", password)])
            .send()
            .await?
            .error_for_status()?;
        info!("logged in to {}", self.base_url);
        Ok(())
    }

    /// End the server-side session
    pub async fn logout(&self) -> Result<()> {
        debug!("logging out");
        self.client
            .get(self.url(LOGOUT_PATH))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Query parameters of one page request, ordered by key
pub fn page_query(request: &PageRequest<'_>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("s", request.window.start_timestamp().to_string()),
        ("e", request.window.end_timestamp().to_string()),
        ("page", request.page.to_string()),
    ];
    if let Some(size) = request.page_size.filter(|size| *size > 0) {
        query.push(("size", size.to_string()));
    }
    query.extend(request.filter.query_pairs());
    query.sort_by_key(|(key, _)| *key);
    query
}

#[async_trait]
impl CallLogSource for Session {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<CallLogPage> {
        let query = page_query(request);
        debug!(page = request.page, ?query, "fetching call log page");

        let body = self
            .client
            .get(self.url(CALL_LOG_PATH))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let page = wire::decode_page(&body).map_err(|source| CallstatError::Decode {
            page: request.page,
            source,
        })?;
        debug!(
            page = request.page,
            last_page = page.last_page,
            records = page.entries.len(),
            "decoded call log page"
        );
        Ok(page)
    }
}
