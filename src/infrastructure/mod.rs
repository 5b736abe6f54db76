//! Infrastructure layer with external service adapters.

/// Blob caches (memory, disk, tiered).
pub mod cache;
/// Application configuration.
pub mod config;
/// HTTP transport.
pub mod http;
/// Photo resolution pipeline.
pub mod image;
/// Review source adapters.
pub mod reviews;

pub use cache::{CacheStats, DiskBlobCache, MemoryBlobCache, TieredBlobCache};
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use http::HttpFetcher;
pub use image::ImagePipeline;
pub use reviews::FixtureReviewsProvider;
