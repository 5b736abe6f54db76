//! Concurrent photo resolution pipeline.
//!
//! Resolves photo URLs to decoded images through a two-tier lookup:
//! cache first, network second, with decoded results fanned back in
//! input order.

use std::sync::Arc;

use bytes::Bytes;
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{DecodedPhoto, PhotoState};
use crate::domain::ports::{BlobCachePort, FetcherPort};

/// Default maximum number of concurrently resolving photos.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Resolves batches of photo URLs into terminal [`PhotoState`]s.
///
/// Each URL in a batch gets its own task; a semaphore bounds how many
/// run at once. Results come back in input order, one per input URL,
/// and every entry is terminal: a panicked or failed resolution maps
/// to [`PhotoState::Failure`] rather than poisoning the batch.
#[derive(Clone)]
pub struct ImagePipeline {
    cache: Arc<dyn BlobCachePort>,
    fetcher: Arc<dyn FetcherPort>,
    slots: Arc<Semaphore>,
}

impl ImagePipeline {
    /// Creates a pipeline over a cache and a fetcher.
    #[must_use]
    pub fn new(
        cache: Arc<dyn BlobCachePort>,
        fetcher: Arc<dyn FetcherPort>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            cache,
            fetcher,
            slots: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Resolves every URL in the batch to a terminal state.
    ///
    /// The output has exactly one entry per input URL, in input order.
    /// Duplicate URLs each get their own entry.
    pub async fn resolve_all(&self, urls: &[String]) -> Vec<PhotoState> {
        if urls.is_empty() {
            return Vec::new();
        }

        let tasks: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let pipeline = self.clone();
                tokio::spawn(async move { pipeline.resolve(&url).await })
            })
            .collect();

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(state) => state,
                Err(e) => {
                    error!(error = %e, "Photo resolution task panicked");
                    PhotoState::Failure
                }
            })
            .collect()
    }

    /// Resolves a single URL: cache, then network, then decode.
    pub async fn resolve(&self, url: &str) -> PhotoState {
        let Ok(_permit) = self.slots.acquire().await else {
            return PhotoState::Failure;
        };

        if let Some(cached) = self.cache.get(url).await {
            if let Some(photo) = decode(cached).await {
                trace!(url = %url, source = "cache", "Photo resolved");
                return PhotoState::Success(photo);
            }
            // Undecodable cached bytes fall through to a fresh fetch;
            // a successful resolve overwrites them.
            warn!(url = %url, "Cached photo bytes undecodable, refetching");
        }

        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(url = %url, error = %e, "Photo fetch failed");
                return PhotoState::Failure;
            }
        };

        let Some(photo) = decode(bytes.clone()).await else {
            return PhotoState::Failure;
        };

        let cache = self.cache.clone();
        let key = url.to_owned();
        tokio::spawn(async move {
            if let Err(e) = cache.put(&key, bytes).await {
                warn!(key = %key, error = %e, "Failed to cache photo bytes");
            }
        });

        trace!(url = %url, source = "network", "Photo resolved");
        PhotoState::Success(photo)
    }
}

impl std::fmt::Debug for ImagePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePipeline")
            .field("available_slots", &self.slots.available_permits())
            .finish_non_exhaustive()
    }
}

/// Decodes image bytes off the async runtime.
async fn decode(bytes: Bytes) -> Option<DecodedPhoto> {
    let result = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;
    match result {
        Ok(Ok(img)) => Some(Arc::new(img)),
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to decode photo");
            None
        }
        Err(e) => {
            error!(error = %e, "Decode task panicked");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockBlobCache, MockFetcher};
    use std::time::Duration;

    fn png_bytes() -> Bytes {
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn pipeline_over(cache: Arc<MockBlobCache>, fetcher: Arc<MockFetcher>) -> ImagePipeline {
        ImagePipeline::new(cache, fetcher, DEFAULT_MAX_CONCURRENT)
    }

    async fn eventually(mut cond: impl FnMut() -> bool) {
        for _ in 0..100 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not met in time");
    }

    #[tokio::test]
    async fn test_every_url_gets_a_terminal_state_in_order() {
        let cache = Arc::new(MockBlobCache::new());
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.respond("https://example.com/ok.png", png_bytes());
        fetcher.fail(
            "https://example.com/broken.png",
            crate::domain::errors::FetchError::Timeout,
        );

        let pipeline = pipeline_over(cache, fetcher);
        let urls = vec![
            "https://example.com/ok.png".to_owned(),
            "https://example.com/broken.png".to_owned(),
            "https://example.com/ok.png".to_owned(),
        ];
        let states = pipeline.resolve_all(&urls).await;

        assert_eq!(states.len(), 3);
        assert!(states[0].is_success());
        assert!(states[1].is_failure());
        assert!(states[2].is_success());
        assert!(states.iter().all(PhotoState::is_terminal));
    }

    #[tokio::test]
    async fn test_empty_batch_resolves_to_empty() {
        let pipeline = pipeline_over(Arc::new(MockBlobCache::new()), Arc::new(MockFetcher::new()));

        let states = pipeline.resolve_all(&[]).await;
        assert!(states.is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let cache = Arc::new(MockBlobCache::new());
        cache.seed("https://example.com/cached.png", png_bytes());
        let fetcher = Arc::new(MockFetcher::new());

        let pipeline = pipeline_over(cache, fetcher.clone());
        let state = pipeline.resolve("https://example.com/cached.png").await;

        assert!(state.is_success());
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_network_success_writes_back_to_cache() {
        let cache = Arc::new(MockBlobCache::new());
        let fetcher = Arc::new(MockFetcher::new());
        let body = png_bytes();
        fetcher.respond("https://example.com/new.png", body.clone());

        let pipeline = pipeline_over(cache.clone(), fetcher);
        let state = pipeline.resolve("https://example.com/new.png").await;
        assert!(state.is_success());

        // The write-back is fire-and-forget, so give it a moment.
        eventually(|| cache.stored("https://example.com/new.png") == Some(body.clone())).await;
    }

    #[tokio::test]
    async fn test_repeat_resolve_fetches_once() {
        let cache = Arc::new(MockBlobCache::new());
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.respond("https://example.com/once.png", png_bytes());

        let pipeline = pipeline_over(cache.clone(), fetcher.clone());
        assert!(pipeline.resolve("https://example.com/once.png").await.is_success());
        eventually(|| cache.stored("https://example.com/once.png").is_some()).await;

        assert!(pipeline.resolve("https://example.com/once.png").await.is_success());
        assert_eq!(fetcher.calls_for("https://example.com/once.png"), 1);
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_falls_through_to_network() {
        let cache = Arc::new(MockBlobCache::new());
        cache.seed(
            "https://example.com/stale.png",
            Bytes::from_static(b"not an image"),
        );
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.respond("https://example.com/stale.png", png_bytes());

        let pipeline = pipeline_over(cache, fetcher.clone());
        let state = pipeline.resolve("https://example.com/stale.png").await;

        assert!(state.is_success());
        assert_eq!(fetcher.calls_for("https://example.com/stale.png"), 1);
    }

    #[tokio::test]
    async fn test_undecodable_download_is_failure() {
        let cache = Arc::new(MockBlobCache::new());
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.respond(
            "https://example.com/garbage.png",
            Bytes::from_static(b"definitely not an image"),
        );

        let pipeline = pipeline_over(cache.clone(), fetcher);
        let state = pipeline.resolve("https://example.com/garbage.png").await;

        assert!(state.is_failure());
        // Failed decodes are not written back.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.stored("https://example.com/garbage.png").is_none());
    }

    #[tokio::test]
    async fn test_failed_cache_write_does_not_affect_result() {
        let cache = Arc::new(MockBlobCache::new());
        cache.fail_puts();
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.respond("https://example.com/flaky.png", png_bytes());

        let pipeline = pipeline_over(cache, fetcher);
        let state = pipeline.resolve("https://example.com/flaky.png").await;

        assert!(state.is_success());
    }

    #[tokio::test]
    async fn test_success_carries_decoded_dimensions() {
        let cache = Arc::new(MockBlobCache::new());
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.respond("https://example.com/tiny.png", png_bytes());

        let pipeline = pipeline_over(cache, fetcher);
        let state = pipeline.resolve("https://example.com/tiny.png").await;

        let photo = state.photo().expect("decoded photo");
        assert_eq!((photo.width(), photo.height()), (2, 2));
    }
}
