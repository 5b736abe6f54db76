//! Two-tier cache combining the memory and disk implementations.

use bytes::Bytes;
use tracing::warn;

use crate::domain::ports::{BlobCachePort, CacheResult};
use crate::infrastructure::cache::{DiskBlobCache, MemoryBlobCache};

/// Read-through cache layered over memory and disk.
///
/// Lookups try memory first, then disk; disk hits are promoted into
/// memory so repeat reads stay cheap. Writes land in both tiers.
pub struct TieredBlobCache {
    memory: MemoryBlobCache,
    disk: DiskBlobCache,
}

impl TieredBlobCache {
    /// Creates a tiered cache from its two layers.
    #[must_use]
    pub fn new(memory: MemoryBlobCache, disk: DiskBlobCache) -> Self {
        Self { memory, disk }
    }

    /// The memory tier.
    #[must_use]
    pub fn memory(&self) -> &MemoryBlobCache {
        &self.memory
    }

    /// The disk tier.
    #[must_use]
    pub fn disk(&self) -> &DiskBlobCache {
        &self.disk
    }
}

#[async_trait::async_trait]
impl BlobCachePort for TieredBlobCache {
    async fn get(&self, key: &str) -> Option<Bytes> {
        if let Some(bytes) = self.memory.get(key).await {
            return Some(bytes);
        }
        if let Some(bytes) = self.disk.get(key).await {
            // Promote so the next lookup stops at the memory tier.
            let _ = self.memory.put(key, bytes.clone()).await;
            return Some(bytes);
        }
        None
    }

    async fn put(&self, key: &str, bytes: Bytes) -> CacheResult<()> {
        let _ = self.memory.put(key, bytes.clone()).await;
        if let Err(e) = self.disk.put(key, bytes).await {
            warn!(key = %key, error = %e, "Disk tier write failed");
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) {
        self.memory.delete(key).await;
        self.disk.delete(key).await;
    }

    async fn clear(&self) {
        self.memory.clear().await;
        self.disk.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_tiered(capacity: usize) -> (TieredBlobCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let disk = DiskBlobCache::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        (
            TieredBlobCache::new(MemoryBlobCache::new(capacity), disk),
            temp_dir,
        )
    }

    #[tokio::test]
    async fn test_put_reaches_both_tiers() {
        let (cache, _temp) = create_tiered(8).await;
        let key = "https://example.com/1.jpg";

        cache.put(key, Bytes::from_static(b"data")).await.unwrap();

        assert_eq!(cache.memory().len(), 1);
        assert!(cache.disk().contains(key).await);
    }

    #[tokio::test]
    async fn test_memory_hit_skips_disk() {
        let (cache, _temp) = create_tiered(8).await;
        let key = "https://example.com/1.jpg";
        let data = Bytes::from_static(b"data");

        cache.put(key, data.clone()).await.unwrap();
        // Removing the disk copy must not affect memory-tier reads.
        cache.disk().delete(key).await;

        assert_eq!(cache.get(key).await, Some(data));
    }

    #[tokio::test]
    async fn test_disk_hit_promotes_to_memory() {
        let temp_dir = TempDir::new().unwrap();
        let key = "https://example.com/1.jpg";
        let data = Bytes::from_static(b"data");

        let disk = DiskBlobCache::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        disk.put(key, data.clone()).await.unwrap();

        let cache = TieredBlobCache::new(MemoryBlobCache::new(8), disk);
        assert_eq!(cache.memory().len(), 0);

        assert_eq!(cache.get(key).await, Some(data.clone()));
        assert_eq!(cache.memory().len(), 1);

        // Second read is served by memory.
        assert_eq!(cache.get(key).await, Some(data));
        assert_eq!(cache.memory().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_full_miss() {
        let (cache, _temp) = create_tiered(8).await;

        assert!(cache.get("https://example.com/absent.jpg").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_from_both_tiers() {
        let (cache, _temp) = create_tiered(8).await;
        let key = "https://example.com/1.jpg";

        cache.put(key, Bytes::from_static(b"data")).await.unwrap();
        cache.delete(key).await;

        assert!(cache.get(key).await.is_none());
        assert!(!cache.disk().contains(key).await);
    }

    #[tokio::test]
    async fn test_clear_empties_both_tiers() {
        let (cache, _temp) = create_tiered(8).await;

        cache
            .put("https://example.com/1.jpg", Bytes::from_static(b"a"))
            .await
            .unwrap();
        cache
            .put("https://example.com/2.jpg", Bytes::from_static(b"b"))
            .await
            .unwrap();

        cache.clear().await;

        assert!(cache.memory().is_empty());
        assert_eq!(cache.disk().len().await, 0);
    }
}
