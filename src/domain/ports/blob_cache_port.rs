//! Port definition for the byte cache store.

use bytes::Bytes;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// I/O error while persisting or reading an entry.
    #[error("cache io error: {0}")]
    Io(String),
}

impl CacheError {
    /// Creates an I/O error from anything displayable.
    #[must_use]
    pub fn io(message: impl std::fmt::Display) -> Self {
        Self::Io(message.to_string())
    }
}

/// Port for key → blob cache stores.
///
/// Keys are raw resource identifiers (typically URL strings); values are the
/// raw fetched bytes. Implementations must be safe for concurrent use from
/// many in-flight resolutions.
#[async_trait::async_trait]
pub trait BlobCachePort: Send + Sync {
    /// Attempts to read a cached blob. Returns `None` on a miss.
    async fn get(&self, key: &str) -> Option<Bytes>;

    /// Stores a blob under the key.
    ///
    /// # Errors
    /// Returns `CacheError::Io` when persistence fails.
    async fn put(&self, key: &str, bytes: Bytes) -> CacheResult<()>;

    /// Removes the entry for the key, if present.
    async fn delete(&self, key: &str);

    /// Removes every entry.
    async fn clear(&self);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory cache mock with scripted persistence failures.
    #[derive(Default)]
    pub struct MockBlobCache {
        entries: Mutex<HashMap<String, Bytes>>,
        fail_puts: AtomicBool,
        gets: AtomicUsize,
        puts: AtomicUsize,
    }

    impl MockBlobCache {
        /// Creates an empty mock.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-seeds an entry.
        pub fn seed(&self, key: impl Into<String>, bytes: Bytes) {
            self.entries.lock().insert(key.into(), bytes);
        }

        /// Makes every subsequent `put` fail.
        pub fn fail_puts(&self) {
            self.fail_puts.store(true, Ordering::SeqCst);
        }

        /// Number of `get` calls seen.
        pub fn get_count(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        /// Number of `put` calls seen.
        pub fn put_count(&self) -> usize {
            self.puts.load(Ordering::SeqCst)
        }

        /// Returns the stored bytes for a key, if any.
        pub fn stored(&self, key: &str) -> Option<Bytes> {
            self.entries.lock().get(key).cloned()
        }
    }

    #[async_trait::async_trait]
    impl BlobCachePort for MockBlobCache {
        async fn get(&self, key: &str) -> Option<Bytes> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.entries.lock().get(key).cloned()
        }

        async fn put(&self, key: &str, bytes: Bytes) -> CacheResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.fail_puts.load(Ordering::SeqCst) {
                return Err(CacheError::io("mock persistence failure"));
            }
            self.entries.lock().insert(key.to_string(), bytes);
            Ok(())
        }

        async fn delete(&self, key: &str) {
            self.entries.lock().remove(key);
        }

        async fn clear(&self) {
            self.entries.lock().clear();
        }
    }
}
