//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key under which the upstream snapshot of one scope is cached,
/// e.g. `todo_7` or `photo_12`.
pub fn resource_key(resource: &str, scope_id: i64) -> String {
    format!("{}_{}", resource, scope_id)
}

/// Key under which an authenticated principal is cached.
pub fn session_key(username: &str) -> String {
    format!("user_{}", username)
}

/// String key-value store with TTL.
///
/// Values are opaque strings; callers serialize with `serde_json`. Entries are
/// written whole and never updated in place.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process `moka` cache
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Reads a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value.
    ///
    /// # Arguments
    ///
    /// - `key` - Cache key
    /// - `value` - Serialized value
    /// - `ttl_seconds` - TTL override; `None` applies the store default
    ///
    /// # Errors
    ///
    /// Should not propagate backend errors to callers. Implementations log them
    /// and return `Ok(())` so a cache outage only costs extra upstream calls.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend could not remove the entry.
    /// Unlike [`get`](Self::get) and [`set`](Self::set), this is not fail-open.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;

    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
