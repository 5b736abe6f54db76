//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{PhotoState, Review, ReviewPage};
pub use errors::{FetchError, PageError};
pub use ports::{BlobCachePort, FetcherPort, ReviewsProviderPort};
