//! Fixture-backed review provider that simulates a remote source.

use std::path::PathBuf;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::ReviewPage;
use crate::domain::errors::PageError;
use crate::domain::ports::ReviewsProviderPort;

use super::dto::ReviewsResponseDto;

/// Reviews payload compiled into the binary.
const BUNDLED_FIXTURE: &str = include_str!("../../../assets/reviews.json");

/// Default simulated network latency per request.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Where the provider reads its payload from.
enum FixtureSource {
    /// The payload bundled with the binary.
    Bundled,
    /// An external JSON file, re-read on every request.
    Path(PathBuf),
}

/// Review provider backed by a JSON fixture.
///
/// Every request reads and decodes the full payload as a remote source
/// would, sleeps for the configured latency, and answers with the slice
/// starting at the requested offset. In-flight requests can be aborted
/// as a group via [`ReviewsProviderPort::cancel_all`].
pub struct FixtureReviewsProvider {
    source: FixtureSource,
    page_size: usize,
    latency: Duration,
    active: Mutex<Vec<AbortHandle>>,
}

impl FixtureReviewsProvider {
    /// Creates a provider over the bundled payload.
    #[must_use]
    pub fn bundled(page_size: usize, latency: Duration) -> Self {
        Self {
            source: FixtureSource::Bundled,
            page_size: page_size.max(1),
            latency,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Creates a provider over an external JSON file.
    #[must_use]
    pub fn from_path(path: PathBuf, page_size: usize, latency: Duration) -> Self {
        Self {
            source: FixtureSource::Path(path),
            page_size: page_size.max(1),
            latency,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Reads the raw payload from the configured source.
    async fn read_raw(&self) -> Result<String, PageError> {
        match &self.source {
            FixtureSource::Bundled => Ok(BUNDLED_FIXTURE.to_owned()),
            FixtureSource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| PageError::unavailable(format!("Failed to read fixture: {e}"))),
        }
    }

    /// Reads, decodes, and slices one page out of the payload.
    async fn load_page(&self, offset: usize) -> Result<ReviewPage, PageError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let raw = self.read_raw().await?;
        let payload: ReviewsResponseDto = serde_json::from_str(&raw)
            .map_err(|e| PageError::decode(format!("Malformed reviews payload: {e}")))?;

        let total = payload.count;
        let available = payload.items.len();
        let items = if offset >= available {
            Vec::new()
        } else {
            let end = offset.saturating_add(self.page_size).min(available);
            payload.items[offset..end]
                .iter()
                .cloned()
                .map(Into::into)
                .collect()
        };

        trace!(offset, returned = items.len(), total, "Served review page");
        Ok(ReviewPage::new(items, total, offset))
    }
}

#[async_trait::async_trait]
impl ReviewsProviderPort for FixtureReviewsProvider {
    async fn get_page(&self, offset: usize) -> Result<ReviewPage, PageError> {
        let (handle, registration) = AbortHandle::new_pair();
        self.active.lock().push(handle);

        match Abortable::new(self.load_page(offset), registration).await {
            Ok(result) => result,
            Err(_aborted) => {
                debug!(offset, "Review page request aborted");
                Err(PageError::unavailable("request cancelled"))
            }
        }
    }

    fn cancel_all(&self) {
        let mut active = self.active.lock();
        let count = active.len();
        for handle in active.drain(..) {
            handle.abort();
        }
        if count > 0 {
            debug!(count, "Cancelled outstanding review page requests");
        }
    }
}
