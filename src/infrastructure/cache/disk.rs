//! Disk-based blob cache for persistence across sessions.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::ports::{BlobCachePort, CacheError, CacheResult};

/// File extension for cached blobs.
const CACHE_EXT: &str = "bin";

/// Disk-based cache that persists raw photo bytes.
///
/// Keys of arbitrary shape (URLs, mostly) are mapped to filenames by
/// hashing, so the key never has to be filesystem-safe. Entries stay
/// on disk until explicitly deleted or cleared.
pub struct DiskBlobCache {
    cache_dir: PathBuf,
    current_size: AtomicU64,
    item_count: AtomicUsize,
}

impl DiskBlobCache {
    /// Creates a new disk cache in the specified directory.
    ///
    /// Existing entries are scanned so size and count reflect what is
    /// already on disk.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be created or read.
    pub async fn new(cache_dir: PathBuf) -> CacheResult<Self> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| CacheError::io(format!("Failed to create cache dir: {e}")))?;
        let mut total_size = 0u64;
        let mut count = 0usize;

        let mut entries = fs::read_dir(&cache_dir)
            .await
            .map_err(|e| CacheError::io(format!("Failed to read cache dir: {e}")))?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == CACHE_EXT)
                && let Ok(meta) = entry.metadata().await
            {
                total_size += meta.len();
                count += 1;
            }
        }

        Ok(Self {
            cache_dir,
            current_size: AtomicU64::new(total_size),
            item_count: AtomicUsize::new(count),
        })
    }

    /// Creates a cache in the default location (~/.cache/revfeed/photos/).
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be created.
    pub async fn default_location() -> CacheResult<Self> {
        Self::new(dirs_cache_path()).await
    }

    /// Returns the path for a cached blob.
    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.cache_dir.join(format!("{digest}.{CACHE_EXT}"))
    }

    /// Returns the current cache size in bytes.
    #[allow(clippy::unused_async)]
    pub async fn current_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    /// Returns the number of cached files.
    #[allow(clippy::unused_async)]
    pub async fn len(&self) -> usize {
        self.item_count.load(Ordering::Relaxed)
    }

    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Checks if a blob is cached.
    pub async fn contains(&self, key: &str) -> bool {
        let path = self.entry_path(key);
        fs::try_exists(&path).await.unwrap_or(false)
    }
}

/// Returns the default cache directory path.
fn dirs_cache_path() -> PathBuf {
    directories::ProjectDirs::from("com", "linuxmobile", "revfeed").map_or_else(
        || {
            std::env::temp_dir()
                .join("revfeed")
                .join("cache")
                .join("photos")
        },
        |dirs| dirs.cache_dir().join("photos"),
    )
}

#[async_trait::async_trait]
impl BlobCachePort for DiskBlobCache {
    async fn get(&self, key: &str) -> Option<Bytes> {
        let path = self.entry_path(key);
        if let Ok(bytes) = fs::read(&path).await {
            trace!(key = %key, path = %path.display(), "Disk cache hit");
            Some(Bytes::from(bytes))
        } else {
            trace!(key = %key, "Disk cache miss");
            None
        }
    }

    async fn put(&self, key: &str, bytes: Bytes) -> CacheResult<()> {
        let path = self.entry_path(key);
        let old_size = fs::metadata(&path).await.map(|m| m.len()).ok();

        // Write to a temp file in the same directory, then rename into
        // place, so readers never observe a half-written entry.
        let dir = self.cache_dir.clone();
        let dest = path.clone();
        let payload = bytes.clone();
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            use std::io::Write;

            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&payload)?;
            tmp.flush()?;
            tmp.persist(&dest).map_err(|e| e.error)?;
            Ok(())
        })
        .await;

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(CacheError::io(format!("Failed to write cache file: {e}")));
            }
            Err(e) => {
                return Err(CacheError::io(format!("Cache write task failed: {e}")));
            }
        }

        let new_size = bytes.len() as u64;
        if let Some(old) = old_size {
            if new_size > old {
                self.current_size
                    .fetch_add(new_size - old, Ordering::Relaxed);
            } else {
                self.current_size
                    .fetch_sub(old - new_size, Ordering::Relaxed);
            }
        } else {
            self.current_size.fetch_add(new_size, Ordering::Relaxed);
            self.item_count.fetch_add(1, Ordering::Relaxed);
        }

        debug!(key = %key, path = %path.display(), size = bytes.len(), "Stored blob in disk cache");

        Ok(())
    }

    async fn delete(&self, key: &str) {
        let path = self.entry_path(key);
        let size = fs::metadata(&path).await.map(|m| m.len()).ok();
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key = %key, error = %e, "Failed to evict from disk cache");
            }
        } else if let Some(s) = size {
            self.current_size.fetch_sub(s, Ordering::Relaxed);
            self.item_count.fetch_sub(1, Ordering::Relaxed);
            debug!(key = %key, "Evicted from disk cache");
        }
    }

    async fn clear(&self) {
        let Ok(mut entries) = fs::read_dir(&self.cache_dir).await else {
            warn!(dir = %self.cache_dir.display(), "Failed to read cache dir for clear");
            return;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == CACHE_EXT)
                && fs::remove_file(&path).await.is_err()
            {
                warn!(path = %path.display(), "Failed to remove cache file");
            }
        }
        self.current_size.store(0, Ordering::Relaxed);
        self.item_count.store(0, Ordering::Relaxed);
        debug!("Cleared disk cache");
    }
}
