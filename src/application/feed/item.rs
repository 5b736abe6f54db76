//! Render-ready feed entries.

use crate::domain::entities::{PhotoState, Review, ReviewId};

/// One review as the presentation layer sees it.
///
/// Carries the review itself, one photo slot per declared URL, and the
/// truncation flag. Only the feed machine mutates items; observers get
/// clones inside snapshots.
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// The underlying review record.
    pub review: Review,
    /// Photo slot states, parallel to `review.photo_urls`.
    pub photos: Vec<PhotoState>,
    /// Whether the full review text is shown (truncation lifted).
    pub expanded: bool,
}

impl FeedItem {
    /// Wraps a review with every photo slot in `Loading`.
    #[must_use]
    pub fn new(review: Review) -> Self {
        let photos = vec![PhotoState::Loading; review.photo_urls.len()];
        Self {
            review,
            photos,
            expanded: false,
        }
    }

    /// The item's stable identity.
    #[must_use]
    pub fn id(&self) -> ReviewId {
        self.review.id
    }

    /// True once every photo slot reached a terminal state.
    ///
    /// Items without photos are settled from the start.
    #[must_use]
    pub fn photos_settled(&self) -> bool {
        self.photos.iter().all(PhotoState::is_terminal)
    }

    /// The state of one photo slot, if the index is valid.
    #[must_use]
    pub fn photo(&self, index: usize) -> Option<&PhotoState> {
        self.photos.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Rating;
    use chrono::Utc;
    use uuid::Uuid;

    fn review_with_photos(count: usize) -> Review {
        Review {
            id: ReviewId(Uuid::from_u128(7)),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            rating: Rating::new(4),
            text: "Nice.".to_string(),
            created: Utc::now(),
            photo_urls: (0..count)
                .map(|i| format!("https://example.com/p/{i}.jpg"))
                .collect(),
        }
    }

    #[test]
    fn new_item_has_one_loading_slot_per_url() {
        let item = FeedItem::new(review_with_photos(3));

        assert_eq!(item.photos.len(), 3);
        assert!(item.photos.iter().all(PhotoState::is_loading));
        assert!(!item.expanded);
        assert!(!item.photos_settled());
    }

    #[test]
    fn item_without_photos_is_settled() {
        let item = FeedItem::new(review_with_photos(0));

        assert!(item.photos.is_empty());
        assert!(item.photos_settled());
    }

    #[test]
    fn photo_lookup_is_bounds_checked() {
        let item = FeedItem::new(review_with_photos(1));

        assert!(item.photo(0).is_some());
        assert!(item.photo(1).is_none());
    }
}
