//! Wire representation of the reviews feed payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{Rating, Review, ReviewId};

/// Top-level reviews payload: one batch of items plus the total count
/// available at the source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponseDto {
    /// Review records in source order.
    pub items: Vec<ReviewDto>,
    /// Total number of reviews the source holds.
    pub count: usize,
}

/// A single review record as found on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    /// Stable review identifier.
    pub id: Uuid,
    /// Author first name.
    pub first_name: String,
    /// Author last name.
    pub last_name: String,
    /// Star rating, nominally 1 to 5.
    pub rating: u8,
    /// Review body text.
    pub text: String,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Photo URLs attached to the review, if any.
    #[serde(default)]
    pub photo_urls: Option<Vec<String>>,
}

impl From<ReviewDto> for Review {
    fn from(dto: ReviewDto) -> Self {
        Self {
            id: ReviewId(dto.id),
            first_name: dto.first_name,
            last_name: dto.last_name,
            rating: Rating::new(dto.rating),
            text: dto.text,
            created: dto.created,
            photo_urls: dto.photo_urls.unwrap_or_default(),
        }
    }
}
