//! Fetch-and-reconcile synchronization of upstream collections.
//!
//! A sync pulls a small snapshot of a collection from the upstream service,
//! caches it, drops every item whose title already exists locally
//! (case-insensitively) and bulk-inserts the rest under the requesting scope.
//!
//! # Flow
//!
//! 1. Acquire the per-scope lease for `{resource}_{scope}`
//! 2. Reuse the cached snapshot, or fetch and cache a new one
//! 3. Dedup against local titles
//! 4. Insert survivors with the scope id attached
//!
//! An empty upstream answer (`[]`, `null`, no body) ends the sync early with
//! nothing cached and nothing written.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, resource_key};
use crate::infrastructure::upstream::{UpstreamClient, decode};

/// Number of items requested from the upstream per sync (`?_limit=20`).
pub const SYNC_PAGE_LIMIT: usize = 20;

const NO_NEW_DATA: &str = "No new data to fetch";

/// A record the upstream returns for a synchronized collection.
pub trait Syncable: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Local-insertable form, without the upstream id.
    type Local: Send + 'static;

    /// Resource name used in the cache key (`todo`, `album`, `photo`).
    const RESOURCE: &'static str;

    fn title(&self) -> &str;

    /// Maps into the local-insertable form, attaching the owning scope.
    fn into_local(self, scope_id: i64) -> Self::Local;
}

/// Local storage a sync reconciles against.
#[async_trait]
pub trait SyncTarget<T: Syncable>: Send + Sync {
    /// Titles of every local record in the scope.
    async fn existing_titles(&self, scope_id: i64) -> Result<Vec<String>, AppError>;

    /// Inserts records in one statement; returns the number inserted.
    async fn insert_many(&self, records: Vec<T::Local>) -> Result<u64, AppError>;
}

/// Outcome of a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub added: u64,
    pub message: String,
}

impl SyncReport {
    fn nothing_new() -> Self {
        Self {
            added: 0,
            message: NO_NEW_DATA.to_string(),
        }
    }

    fn added(added: u64) -> Self {
        if added == 0 {
            return Self::nothing_new();
        }
        Self {
            added,
            message: format!("Success fetch {added} data"),
        }
    }
}

/// In-process async locks keyed by scope.
///
/// Entries nobody holds or waits on are pruned on the next acquire.
#[derive(Debug, Default)]
pub struct ScopeLeases {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ScopeLeases {
    /// Waits for the lease on `key`; released when the guard drops.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Runs syncs for every synchronized resource.
pub struct SyncReconciler {
    cache: Arc<dyn CacheService>,
    upstream: Arc<dyn UpstreamClient>,
    leases: ScopeLeases,
}

impl SyncReconciler {
    pub fn new(cache: Arc<dyn CacheService>, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            cache,
            upstream,
            leases: ScopeLeases::default(),
        }
    }

    /// Synchronizes the collection at `upstream_path` into `target` for `scope_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the fetch fails or returns an
    /// unexpected body; nothing is cached or written in that case.
    /// Store errors propagate after the snapshot was cached, so a retry
    /// reuses it.
    pub async fn reconcile<T: Syncable>(
        &self,
        scope_id: i64,
        upstream_path: &str,
        target: &dyn SyncTarget<T>,
    ) -> Result<SyncReport, AppError> {
        let key = resource_key(T::RESOURCE, scope_id);
        let _lease = self.leases.acquire(&key).await;

        let snapshot = match self.cached_snapshot::<T>(&key).await? {
            Some(snapshot) => snapshot,
            None => {
                let Some(body) = self.upstream.get(upstream_path).await? else {
                    debug!(key = %key, "Upstream returned no body");
                    return Ok(SyncReport::nothing_new());
                };
                let items: Vec<T> = decode(body)?;
                if items.is_empty() {
                    debug!(key = %key, "Upstream returned an empty collection");
                    return Ok(SyncReport::nothing_new());
                }

                let encoded = serde_json::to_string(&items).map_err(|e| {
                    AppError::internal("Failed to encode snapshot", json!({ "reason": e.to_string() }))
                })?;
                self.cache.set(&key, &encoded, None).await?;
                items
            }
        };

        let existing: HashSet<String> = target
            .existing_titles(scope_id)
            .await?
            .into_iter()
            .map(|title| title.to_lowercase())
            .collect();

        let fresh: Vec<T::Local> = snapshot
            .into_iter()
            .filter(|item| !existing.contains(&item.title().to_lowercase()))
            .map(|item| item.into_local(scope_id))
            .collect();

        if fresh.is_empty() {
            return Ok(SyncReport::nothing_new());
        }

        let added = target.insert_many(fresh).await?;
        info!(resource = T::RESOURCE, scope_id, added, "Synchronized upstream data");

        Ok(SyncReport::added(added))
    }

    async fn cached_snapshot<T: Syncable>(&self, key: &str) -> Result<Option<Vec<T>>, AppError> {
        let Some(raw) = self.cache.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                debug!(key, items = items.len(), "Reusing cached snapshot");
                Ok(Some(items))
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cached snapshot");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::MemoryCache;
    use crate::infrastructure::upstream::{MockUpstreamClient, UpstreamError};
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Item {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        title: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct NewItem {
        scope_id: i64,
        title: String,
    }

    impl Syncable for Item {
        type Local = NewItem;
        const RESOURCE: &'static str = "todo";

        fn title(&self) -> &str {
            &self.title
        }

        fn into_local(self, scope_id: i64) -> NewItem {
            NewItem {
                scope_id,
                title: self.title,
            }
        }
    }

    #[derive(Default)]
    struct FakeTarget {
        titles: Mutex<Vec<String>>,
        inserted: Mutex<Vec<NewItem>>,
        fail_insert: bool,
    }

    impl FakeTarget {
        fn with_titles(titles: &[&str]) -> Self {
            Self {
                titles: Mutex::new(titles.iter().map(|t| t.to_string()).collect()),
                ..Default::default()
            }
        }

        fn inserted_titles(&self) -> Vec<String> {
            self.inserted
                .lock()
                .unwrap()
                .iter()
                .map(|i| i.title.clone())
                .collect()
        }
    }

    #[async_trait]
    impl SyncTarget<Item> for FakeTarget {
        async fn existing_titles(&self, _scope_id: i64) -> Result<Vec<String>, AppError> {
            Ok(self.titles.lock().unwrap().clone())
        }

        async fn insert_many(&self, records: Vec<NewItem>) -> Result<u64, AppError> {
            if self.fail_insert {
                return Err(AppError::internal("Database error", Value::Null));
            }
            let count = records.len() as u64;
            let mut titles = self.titles.lock().unwrap();
            titles.extend(records.iter().map(|r| r.title.clone()));
            self.inserted.lock().unwrap().extend(records);
            Ok(count)
        }
    }

    fn upstream_returning(body: Option<Value>, times: usize) -> MockUpstreamClient {
        let mut upstream = MockUpstreamClient::new();
        upstream
            .expect_get()
            .withf(|path| path == "users/1/todos?_limit=20")
            .times(times)
            .returning(move |_| Ok(body.clone()));
        upstream
    }

    fn reconciler(upstream: MockUpstreamClient) -> (SyncReconciler, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::default());
        let reconciler = SyncReconciler::new(cache.clone(), Arc::new(upstream));
        (reconciler, cache)
    }

    #[tokio::test]
    async fn test_reconcile_dedups_case_insensitively() {
        let upstream = upstream_returning(
            Some(json!([{ "id": 1, "title": "Foo" }, { "id": 2, "title": "bar" }])),
            1,
        );
        let (reconciler, _) = reconciler(upstream);
        let target = FakeTarget::with_titles(&["FOO"]);

        let report = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.message, "Success fetch 1 data");
        assert_eq!(
            *target.inserted.lock().unwrap(),
            vec![NewItem {
                scope_id: 1,
                title: "bar".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_reconcile_inserts_snapshot_minus_overlap() {
        let upstream = upstream_returning(
            Some(json!([
                { "id": 1, "title": "alpha" },
                { "id": 2, "title": "Beta" },
                { "id": 3, "title": "gamma" },
                { "id": 4, "title": "delta" },
                { "id": 5, "title": "Epsilon" },
            ])),
            1,
        );
        let (reconciler, _) = reconciler(upstream);
        let target = FakeTarget::with_titles(&["beta", "EPSILON", "unrelated"]);

        let report = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();

        assert_eq!(report.added, 3);
        assert_eq!(target.inserted_titles(), vec!["alpha", "gamma", "delta"]);
    }

    #[tokio::test]
    async fn test_reconcile_empty_collection_touches_nothing() {
        let upstream = upstream_returning(Some(json!([])), 1);
        let (reconciler, cache) = reconciler(upstream);
        let target = FakeTarget::default();

        let report = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();

        assert_eq!(report.added, 0);
        assert_eq!(report.message, "No new data to fetch");
        assert!(target.inserted_titles().is_empty());
        assert_eq!(cache.get("todo_1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reconcile_missing_body_touches_nothing() {
        let upstream = upstream_returning(None, 1);
        let (reconciler, cache) = reconciler(upstream);
        let target = FakeTarget::default();

        let report = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();

        assert_eq!(report.message, "No new data to fetch");
        assert_eq!(cache.get("todo_1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_second_reconcile_reuses_cached_snapshot() {
        let upstream = upstream_returning(Some(json!([{ "id": 1, "title": "Foo" }])), 1);
        let (reconciler, _) = reconciler(upstream);
        let target = FakeTarget::default();

        let first = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();
        let second = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();

        assert_eq!(first.added, 1);
        assert_eq!(second.added, 0);
        assert_eq!(second.message, "No new data to fetch");
    }

    #[tokio::test]
    async fn test_concurrent_reconciles_of_one_scope_serialize() {
        let upstream = upstream_returning(Some(json!([{ "id": 1, "title": "Foo" }])), 1);
        let (reconciler, _) = reconciler(upstream);
        let target = FakeTarget::default();

        let (a, b) = tokio::join!(
            reconciler.reconcile::<Item>(1, "users/1/todos?_limit=20", &target),
            reconciler.reconcile::<Item>(1, "users/1/todos?_limit=20", &target),
        );

        assert_eq!(a.unwrap().added + b.unwrap().added, 1);
        assert_eq!(target.inserted_titles(), vec!["Foo"]);
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_is_a_miss() {
        let upstream = upstream_returning(Some(json!([{ "id": 1, "title": "Foo" }])), 1);
        let (reconciler, cache) = reconciler(upstream);
        cache.set("todo_1", "not json", None).await.unwrap();
        let target = FakeTarget::default();

        let report = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await
            .unwrap();

        assert_eq!(report.added, 1);
        let cached = cache.get("todo_1").await.unwrap().unwrap();
        assert!(cached.contains("Foo"));
    }

    #[tokio::test]
    async fn test_upstream_failure_caches_nothing() {
        let mut upstream = MockUpstreamClient::new();
        upstream.expect_get().times(1).returning(|_| {
            Err(UpstreamError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
        });
        let (reconciler, cache) = reconciler(upstream);
        let target = FakeTarget::default();

        let result = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Upstream {
                status: Some(503),
                ..
            })
        ));
        assert_eq!(cache.get("todo_1").await.unwrap(), None);
        assert!(target.inserted_titles().is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_keeps_cached_snapshot() {
        let upstream = upstream_returning(Some(json!([{ "id": 1, "title": "Foo" }])), 1);
        let (reconciler, cache) = reconciler(upstream);
        let target = FakeTarget {
            fail_insert: true,
            ..Default::default()
        };

        let result = reconciler
            .reconcile::<Item>(1, "users/1/todos?_limit=20", &target)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert!(cache.get("todo_1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_leases_are_pruned_after_release() {
        let leases = ScopeLeases::default();

        {
            let _guard = leases.acquire("todo_1").await;
            assert_eq!(leases.len(), 1);
        }
        let _other = leases.acquire("album_1").await;

        assert_eq!(leases.len(), 1);
    }
}
