//! HTTP metrics source backed by `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::MetricsSource;
use crate::types::MetricsSnapshot;
use crate::{CachedashError, Result};

/// Default base URL of the metrics API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Fixed path of the metrics endpoint.
pub const DEFAULT_ENDPOINT: &str = "/api/metrics";

/// Fetches the snapshot with a single plain `GET`.
///
/// No query string, no body, no auth headers, no timeout. Any non-2xx
/// status is a failure and the body is not looked at.
#[derive(Clone)]
pub struct HttpMetricsSource {
    http: Client,
    url: String,
}

impl HttpMetricsSource {
    /// Source for `{base_url}/api/metrics`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_endpoint(base_url, DEFAULT_ENDPOINT)
    }

    /// Source for a custom endpoint path under `base_url`.
    pub fn with_endpoint(base_url: impl AsRef<str>, endpoint: impl AsRef<str>) -> Self {
        Self {
            http: Client::new(),
            url: join_url(base_url.as_ref(), endpoint.as_ref()),
        }
    }

    /// Full URL requested on fetch.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpMetricsSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<MetricsSnapshot> {
        info!(url = %self.url, "fetching metrics snapshot");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CachedashError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CachedashError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CachedashError::Decode(e.to_string()))?;
        debug!(url = %self.url, "metrics body decoded");

        MetricsSnapshot::from_body(&body)
    }
}

/// Join a base URL and a path without doubling or dropping the slash.
fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    format!("{base}/{endpoint}")
}
