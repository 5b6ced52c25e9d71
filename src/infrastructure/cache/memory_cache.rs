//! In-process cache implementation backed by `moka`.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires every entry after its own TTL.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// A cache local to this process.
///
/// Used when Redis is not configured or unavailable at startup, and as the
/// cache in tests. Entries are bounded by `max_capacity` and expire after the
/// TTL they were written with.
pub struct MemoryCache {
    entries: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new(max_capacity: u64, default_ttl_seconds: u64) -> Self {
        debug!(max_capacity, default_ttl_seconds, "Using in-memory cache");

        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            entries,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(10_000, 3600)
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let hit = self.entries.get(key).await.map(|entry| entry.value);
        debug!(key, hit = hit.is_some(), "Cache GET");
        Ok(hit)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let ttl = ttl_seconds
            .map(Duration::from_secs)
            .unwrap_or(self.default_ttl);

        self.entries
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
