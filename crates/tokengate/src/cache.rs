//! Bounded, TTL'd record of already-validated token strings

use std::time::Duration;

use moka::future::Cache;

/// Presence-only cache keyed by the raw token string.
///
/// An entry's presence means that exact token string previously passed
/// signature, audience, and issuer validation. Entries expire `ttl` after
/// insertion, and the cache never holds more than `capacity` entries; the
/// eviction tie-break beyond that bound is the backing cache's policy.
///
/// Safe for concurrent readers and writers without external locking, with
/// per-key linearizability provided by the backing cache.
#[derive(Clone)]
pub struct ValidationCache {
    entries: Cache<String, ()>,
}

impl ValidationCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { entries }
    }

    /// Whether `token` is recorded as validated. Expired entries read as
    /// absent.
    pub async fn contains(&self, token: &str) -> bool {
        self.entries.get(token).await.is_some()
    }

    /// Record `token` as validated.
    pub async fn insert(&self, token: &str) {
        self.entries.insert(token.to_string(), ()).await;
    }

    /// Clear all entries. Used for test isolation and operational reset.
    pub async fn purge(&self) {
        self.entries.invalidate_all();
    }

    /// Number of live entries, counted after pending maintenance has run.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
