//! HTTP transport adapters.

mod fetcher;

pub use fetcher::{DEFAULT_TIMEOUT_SECS, HttpFetcher};
