//! In-memory LRU blob cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;

use bytes::Bytes;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::ports::{BlobCachePort, CacheResult};

/// Default maximum number of blobs to cache in memory.
pub const DEFAULT_CACHE_ENTRIES: usize = 64;

/// In-memory LRU cache for raw photo bytes.
/// Thread-safe and optimized for frequent reads.
pub struct MemoryBlobCache {
    cache: Arc<RwLock<LruCache<String, Bytes>>>,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl MemoryBlobCache {
    /// Creates a new cache with the specified entry capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(RwLock::new(LruCache::new(cap))),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed);
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Current number of cached entries.
    ///
    /// Best-effort estimate; concurrent modifications may change it
    /// before the caller uses the value.
    #[must_use]
    pub fn len(&self) -> usize {
        let cache = self.cache.try_read();
        cache.map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBlobCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached entries.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl BlobCachePort for MemoryBlobCache {
    async fn get(&self, key: &str) -> Option<Bytes> {
        let mut cache = self.cache.write().await;
        if let Some(bytes) = cache.get(key) {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache hit");
            Some(bytes.clone())
        } else {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache miss");
            None
        }
    }

    async fn put(&self, key: &str, bytes: Bytes) -> CacheResult<()> {
        let mut cache = self.cache.write().await;
        debug!(key = %key, size = bytes.len(), "Storing blob in memory cache");
        cache.put(key.to_owned(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) {
        let mut cache = self.cache.write().await;
        if cache.pop(key).is_some() {
            debug!(key = %key, "Evicted blob from memory cache");
        }
    }

    async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
        debug!("Cleared memory blob cache");
    }
}
