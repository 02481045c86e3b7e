use crate::shared::errors::AppResult;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cached response with TTL support
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Keyed store of server responses
///
/// Keys are arrays of strings, for example `["advancedSettings", courseId]`.
/// Invalidating a prefix drops every key that starts with it, which is how a
/// successful mutation forces the next read to go back to the server.
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Arc<DashMap<Vec<String>, CacheEntry>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    pub fn key(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    pub fn get(&self, key: &[String]) -> Option<Value> {
        let hit = self.entries.get(key).and_then(|entry| {
            if entry.is_expired(self.ttl) {
                None
            } else {
                Some(entry.data.clone())
            }
        });

        match hit {
            Some(data) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Query cache hit for {:?}", key);
                Some(data)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.entries.remove_if(key, |_, entry| entry.is_expired(self.ttl));
                None
            }
        }
    }

    pub fn insert(&self, key: Vec<String>, data: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                created_at: Instant::now(),
            },
        );
    }

    /// Cached value for `key`, or the result of `fetch` stored under it
    pub async fn get_or_fetch<T, F, Fut>(&self, key: Vec<String>, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(cached) = self.get(&key) {
            match serde_json::from_value(cached) {
                Ok(value) => return Ok(value),
                Err(e) => debug!("Discarding unreadable cache entry {:?}: {}", key, e),
            }
        }

        let value = fetch().await?;
        self.insert(key, serde_json::to_value(&value)?);
        Ok(value)
    }

    /// Drop one exact key
    pub fn invalidate(&self, key: &[String]) {
        self.entries.remove(key);
    }

    /// Drop every key that starts with `prefix`
    pub fn invalidate_prefix(&self, prefix: &[String]) {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        debug!(
            "Invalidated {} cached queries under {:?}",
            before.saturating_sub(self.entries.len()),
            prefix
        );
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_and_miss() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryCache::key(&["advancedSettings", "course-v1:A+B+C"]);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), json!({"a": 1}));
        assert_eq!(cache.get(&key), Some(json!({"a": 1})));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries_count, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = QueryCache::new(Duration::ZERO);
        let key = QueryCache::key(&["courseDetails", "x"]);
        cache.insert(key.clone(), json!(1));
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().entries_count, 0);
    }

    #[test]
    fn test_invalidate_prefix() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert(QueryCache::key(&["advancedSettings", "c1"]), json!(1));
        cache.insert(QueryCache::key(&["advancedSettings", "c2"]), json!(2));
        cache.insert(QueryCache::key(&["courseDetails", "c1"]), json!(3));

        cache.invalidate_prefix(&QueryCache::key(&["advancedSettings"]));

        assert!(cache.get(&QueryCache::key(&["advancedSettings", "c1"])).is_none());
        assert!(cache.get(&QueryCache::key(&["advancedSettings", "c2"])).is_none());
        assert_eq!(
            cache.get(&QueryCache::key(&["courseDetails", "c1"])),
            Some(json!(3))
        );
    }

    #[tokio::test]
    async fn test_get_or_fetch_only_fetches_once() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryCache::key(&["blockLimits"]);

        let first: u64 = cache.get_or_fetch(key.clone(), || async { Ok(20) }).await.unwrap();
        let second: u64 = cache
            .get_or_fetch(key.clone(), || async {
                Err(crate::shared::errors::AppError::InternalError("should not fetch".to_string()))
            })
            .await
            .unwrap();

        assert_eq!(first, 20);
        assert_eq!(second, 20);
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_errors() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryCache::key(&["blockLimits"]);

        let failed: AppResult<u64> = cache
            .get_or_fetch(key.clone(), || async {
                Err(crate::shared::errors::AppError::NotFound("limits".to_string()))
            })
            .await;
        assert!(failed.is_err());
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_invalidate_exact_key() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryCache::key(&["migrationInfo", "c1"]);
        cache.insert(key.clone(), json!([]));
        cache.invalidate(&key);
        assert!(cache.get(&key).is_none());
    }
}
