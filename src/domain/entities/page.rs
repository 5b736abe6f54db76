//! A bounded slice of the review collection.

use super::Review;

/// One fetched page: an ordered run of reviews plus collection-level hints.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPage {
    /// Reviews in collection order.
    pub items: Vec<Review>,
    /// Total number of reviews in the collection.
    pub total: usize,
    /// Whether further pages exist past this one.
    pub has_more: bool,
}

impl ReviewPage {
    /// Creates a page, deriving `has_more` from the consumed range.
    #[must_use]
    pub fn new(items: Vec<Review>, total: usize, offset: usize) -> Self {
        let consumed = offset.saturating_add(items.len());
        Self {
            has_more: consumed < total,
            items,
            total,
        }
    }

    /// Returns the number of reviews on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page carries no reviews.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Rating, ReviewId};
    use chrono::Utc;
    use uuid::Uuid;

    fn reviews(n: usize) -> Vec<Review> {
        (0..n)
            .map(|i| Review {
                id: ReviewId(Uuid::from_u128(i as u128)),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                rating: Rating::new(3),
                text: String::new(),
                created: Utc::now(),
                photo_urls: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn has_more_derived_from_consumed_range() {
        assert!(ReviewPage::new(reviews(20), 45, 0).has_more);
        assert!(ReviewPage::new(reviews(20), 45, 20).has_more);
        assert!(!ReviewPage::new(reviews(5), 45, 40).has_more);
    }

    #[test]
    fn empty_page_past_the_end_has_no_more() {
        let page = ReviewPage::new(Vec::new(), 45, 60);
        assert!(page.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.total, 45);
    }
}
