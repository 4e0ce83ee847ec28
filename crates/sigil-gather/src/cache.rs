// crates/sigil-gather/src/cache.rs
//
// In-memory TTL cache with in-flight request deduplication. Concurrent
// callers for the same missing key share one load; the TTL is chosen per
// value so conclusive results can outlive degraded ones.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OnceCell, RwLock};
use tokio::time::Instant;

struct Entry<V> {
    value: V,
    expires: Instant,
}

/// String-keyed TTL cache.
#[derive(Clone)]
pub struct TtlCache<V: Clone + Send + Sync + 'static> {
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
    pending: Arc<Mutex<HashMap<String, Arc<OnceCell<V>>>>>,
}

impl<V: Clone + Send + Sync + 'static> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the cached value for `key` if present and unexpired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| e.expires > Instant::now())
            .map(|e| e.value.clone())
    }

    /// Insert a value with an explicit TTL.
    pub async fn insert(&self, key: &str, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires: Instant::now() + ttl,
            },
        );
    }

    /// Return the cached value for `key`, or run `load` to produce it.
    ///
    /// Concurrent callers for the same missing key share a single load; the
    /// extra loaders are dropped unused. `ttl_for` picks the TTL from the
    /// loaded value, so callers can cache failures for a shorter window.
    pub async fn get_or_load<F, Fut>(
        &self,
        key: &str,
        ttl_for: impl Fn(&V) -> Duration,
        load: F,
    ) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(key).await {
            return value;
        }

        let cell = {
            let mut pending = self.pending.lock().await;
            pending
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let value = cell.get_or_init(|| async move { load().await }).await.clone();

        // Only the caller that observes the pending slot writes the entry.
        let mut pending = self.pending.lock().await;
        if pending.remove(key).is_some() {
            let ttl = ttl_for(&value);
            drop(pending);
            self.insert(key, value.clone(), ttl).await;
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn concurrent_misses_share_one_load() {
        let cache: TtlCache<String> = TtlCache::new();
        let loads = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let loads = loads.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_load(
                        "alice.eth",
                        |_| Duration::from_secs(300),
                        || async move {
                            loads.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            "0xabc".to_string()
                        },
                    )
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), "0xabc");
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_their_ttl() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.insert("k", 7, Duration::from_secs(120)).await;
        assert_eq!(cache.get("k").await, Some(7));

        tokio::time::advance(Duration::from_secs(121)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn ttl_is_chosen_from_the_loaded_value() {
        let cache: TtlCache<Option<u32>> = TtlCache::new();
        let short_for_none =
            |v: &Option<u32>| {
                if v.is_some() {
                    Duration::from_secs(300)
                } else {
                    Duration::from_secs(120)
                }
            };

        cache
            .get_or_load("missing", short_for_none, || async { None })
            .await;
        tokio::time::advance(Duration::from_secs(121)).await;

        // The negative entry expired, so the loader runs again.
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        cache
            .get_or_load("missing", short_for_none, || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(1)
            })
            .await;
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
