//! Review source adapters.

mod dto;
mod fixture;

pub use dto::{ReviewDto, ReviewsResponseDto};
pub use fixture::{DEFAULT_LATENCY, FixtureReviewsProvider};
