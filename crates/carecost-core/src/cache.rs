//! In-memory TTL caching.
//!
//! Each data source owns its own independently configured cache instance
//! (geography 30 days, marketplace plans 24 hours, drug lookups 7 days).
//! One global cache with per-entry TTL overrides would couple unrelated
//! subsystems' eviction policies, so there isn't one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Size snapshot returned by [`TtlCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheInner<V> {
    map: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

/// Thread-safe map-backed cache with a fixed per-instance TTL.
///
/// Stale-read protection: a lookup that finds an expired entry deletes it
/// and reports a miss, so `stats().size` reflects the removal. Stale data
/// is never returned.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    inner: Arc<tokio::sync::RwLock<CacheInner<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                map: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Get a cached value if it exists and hasn't outlived the TTL.
    ///
    /// Expired entries are removed during the lookup (delete-on-read).
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let inner = self.inner.read().await;
            match inner.map.get(key) {
                Some(entry) if entry.inserted_at.elapsed() <= inner.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // The entry was expired under the read lock. Re-check under the
        // write lock: a concurrent insert may have refreshed it.
        let mut inner = self.inner.write().await;
        let fresh = match inner.map.get(key) {
            Some(entry) if entry.inserted_at.elapsed() <= inner.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => None,
            None => return None,
        };

        match fresh {
            Some(value) => Some(value),
            None => {
                inner.map.remove(key);
                None
            }
        }
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let mut inner = self.inner.write().await;
        inner.map.insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.map.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        CacheStats {
            size: inner.map.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn basic_insert_and_get() {
        let cache = TtlCache::new(Duration::from_secs(60));

        assert!(cache.get("key1").await.is_none());

        cache.insert("key1", String::from("value1")).await;
        assert_eq!(cache.get("key1").await, Some(String::from("value1")));

        cache.insert("key1", String::from("value2")).await;
        assert_eq!(cache.get("key1").await, Some(String::from("value2")));
        assert_eq!(cache.stats().await.size, 1);
    }

    #[tokio::test]
    async fn expired_lookup_is_a_miss_and_deletes_the_entry() {
        let cache = TtlCache::new(Duration::from_millis(50));

        cache.insert("key1", 7_u32).await;
        assert_eq!(cache.get("key1").await, Some(7));
        assert_eq!(cache.stats().await.size, 1);

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(cache.get("key1").await.is_none());
        assert_eq!(cache.stats().await.size, 0, "delete-on-read must shrink the map");
    }

    #[tokio::test]
    async fn independent_instances_do_not_share_entries() {
        let short = TtlCache::new(Duration::from_millis(50));
        let long = TtlCache::new(Duration::from_secs(60));

        short.insert("k", 1_u32).await;
        long.insert("k", 2_u32).await;

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(short.get("k").await.is_none());
        assert_eq!(long.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1_u32).await;
        cache.insert("b", 2_u32).await;
        assert_eq!(cache.stats().await.size, 2);

        cache.clear().await;
        assert_eq!(cache.stats().await.size, 0);
    }
}
