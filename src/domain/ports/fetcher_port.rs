//! Port definition for single-resource fetching.

use bytes::Bytes;

use crate::domain::errors::FetchError;

/// Port for fetching one resource by URL.
///
/// Implementations apply a bounded per-fetch wait and never retry — retry
/// policy belongs to the caller. They must be safely callable concurrently
/// for distinct URLs.
#[async_trait::async_trait]
pub trait FetcherPort: Send + Sync {
    /// Fetches the resource body.
    ///
    /// # Errors
    /// Returns a [`FetchError`] describing the URL, timeout, transport or
    /// empty-body failure.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted fetcher mock that counts invocations per URL.
    #[derive(Default)]
    pub struct MockFetcher {
        responses: Mutex<HashMap<String, Result<Bytes, FetchError>>>,
        calls: Mutex<HashMap<String, usize>>,
        total_calls: AtomicUsize,
    }

    impl MockFetcher {
        /// Creates a mock with no scripted responses.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Scripts a successful response for a URL.
        pub fn respond(&self, url: impl Into<String>, bytes: Bytes) {
            self.responses.lock().insert(url.into(), Ok(bytes));
        }

        /// Scripts a failure for a URL.
        pub fn fail(&self, url: impl Into<String>, error: FetchError) {
            self.responses.lock().insert(url.into(), Err(error));
        }

        /// Total number of fetch calls across all URLs.
        pub fn total_calls(&self) -> usize {
            self.total_calls.load(Ordering::SeqCst)
        }

        /// Number of fetch calls for one URL.
        pub fn calls_for(&self, url: &str) -> usize {
            self.calls.lock().get(url).copied().unwrap_or(0)
        }
    }

    #[async_trait::async_trait]
    impl FetcherPort for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
            self.total_calls.fetch_add(1, Ordering::SeqCst);
            *self.calls.lock().entry(url.to_string()).or_insert(0) += 1;
            self.responses
                .lock()
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::transport("unscripted url")))
        }
    }
}
