//! Collection source backed by an HTTP site.
//!
//! # Invariants
//! - Any non-success status is a [`FetchError::Status`]; bodies of failed
//!   responses are never decoded.
//! - With cache busting on, every request carries a fresh `v=<unix millis>`
//!   query parameter so intermediaries never serve a stale collection.

use super::{CollectionSource, FetchError, FetchResult};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Whole-request deadline for one collection.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches collections relative to a site base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
    cache_bust: bool,
}

impl HttpSource {
    /// Creates a source with [`DEFAULT_REQUEST_TIMEOUT`] and cache busting enabled.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a source whose requests fail once `timeout` elapses.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cache_bust: true,
        }
    }

    /// Enables or disables the `v=<millis>` cache-busting parameter.
    pub fn cache_bust(mut self, enabled: bool) -> Self {
        self.cache_bust = enabled;
        self
    }

    fn collection_url(&self, path: &str, now_millis: i64) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if self.cache_bust {
            let separator = if url.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str(&format!("v={now_millis}"));
        }
        url
    }
}

#[async_trait]
impl CollectionSource for HttpSource {
    async fn fetch_collection(&self, path: &str) -> FetchResult<String> {
        let url = self.collection_url(path, Utc::now().timestamp_millis());
        debug!("event=collection_fetch module=source status=start path={}", path);

        let transport = |source: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            source,
        };
        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}
