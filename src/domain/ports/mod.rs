//! Port definitions: the seams where infrastructure is injected.

mod blob_cache_port;
mod fetcher_port;
mod reviews_port;

pub use blob_cache_port::{BlobCachePort, CacheError, CacheResult};
pub use fetcher_port::FetcherPort;
pub use reviews_port::ReviewsProviderPort;

#[cfg(test)]
pub mod mocks {
    pub use super::blob_cache_port::mock::MockBlobCache;
    pub use super::fetcher_port::mock::MockFetcher;
    pub use super::reviews_port::mock::{MockReviewsProvider, plain_review};
}
