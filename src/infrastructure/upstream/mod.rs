//! Client for the third-party REST service the gateway mirrors.
//!
//! Provides an [`UpstreamClient`] trait and its HTTP implementation
//! [`HttpUpstreamClient`]. Bodies travel as [`serde_json::Value`]; services
//! decode them into the typed upstream records they expect.

mod http_client;

pub use http_client::HttpUpstreamClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by the upstream client.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// No answer within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection-level failure.
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// The body could not be decoded into the expected shape.
    #[error("upstream returned an unexpected body: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// HTTP status received from the upstream, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// HTTP access to the upstream REST service.
///
/// Paths are relative to the configured base URL and may carry a query
/// string (`users/1/todos?_limit=20`).
///
/// # Implementations
///
/// - [`HttpUpstreamClient`] - `reqwest` implementation with a fixed timeout
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetches a resource.
    ///
    /// Returns `Ok(None)` when the upstream answered 2xx without a body
    /// (empty or `null`).
    async fn get(&self, path: &str) -> Result<Option<Value>, UpstreamError>;

    /// Creates a resource and returns the echoed record.
    async fn post(&self, path: &str, body: Value) -> Result<Value, UpstreamError>;

    /// Replaces a resource and returns the echoed record.
    async fn put(&self, path: &str, body: Value) -> Result<Value, UpstreamError>;

    /// Partially updates a resource and returns the echoed record.
    async fn patch(&self, path: &str, body: Value) -> Result<Value, UpstreamError>;

    /// Deletes a resource.
    async fn delete(&self, path: &str) -> Result<(), UpstreamError>;
}

/// Decodes an upstream body into a typed record.
///
/// # Errors
///
/// Returns [`UpstreamError::Decode`] if the body does not match `T`.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(body).map_err(|e| UpstreamError::Decode(e.to_string()))
}
