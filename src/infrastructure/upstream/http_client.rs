//! `reqwest` implementation of the upstream client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use super::{UpstreamClient, UpstreamError};

/// HTTP client bound to one upstream base URL.
///
/// Every request carries the same timeout; a request that exceeds it fails
/// with [`UpstreamError::Timeout`]. Non-2xx answers become
/// [`UpstreamError::Status`] carrying the upstream status code.
#[derive(Clone)]
pub struct HttpUpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstreamClient {
    /// Creates a client for `base_url` (e.g. `https://jsonplaceholder.typicode.com`).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turns a response into its JSON body, or an error for non-2xx statuses.
    async fn read_body(response: reqwest::Response) -> Result<Option<Value>, UpstreamError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Upstream request failed");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok((!body.is_null()).then_some(body))
    }

    async fn send_with_body(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<Value, UpstreamError> {
        let response = request.send().await?;
        Self::read_body(response)
            .await?
            .ok_or_else(|| UpstreamError::Decode(format!("empty body from {path}")))
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn get(&self, path: &str) -> Result<Option<Value>, UpstreamError> {
        debug!(path, "Upstream GET");
        let response = self.client.get(self.url(path)).send().await?;
        Self::read_body(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, UpstreamError> {
        debug!(path, "Upstream POST");
        self.send_with_body(self.client.post(self.url(path)).json(&body), path)
            .await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, UpstreamError> {
        debug!(path, "Upstream PUT");
        self.send_with_body(self.client.put(self.url(path)).json(&body), path)
            .await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, UpstreamError> {
        debug!(path, "Upstream PATCH");
        self.send_with_body(self.client.patch(self.url(path)).json(&body), path)
            .await
    }

    async fn delete(&self, path: &str) -> Result<(), UpstreamError> {
        debug!(path, "Upstream DELETE");
        let response = self.client.delete(self.url(path)).send().await?;
        Self::read_body(response).await.map(|_| ())
    }
}

impl std::fmt::Debug for HttpUpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUpstreamClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
