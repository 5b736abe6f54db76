//! Core review records as decoded from a page source.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique identifier for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId(pub Uuid);

impl ReviewId {
    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ReviewId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Creates a rating, clamping the value into 1..=5.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(if value < 1 {
            1
        } else if value > 5 {
            5
        } else {
            value
        })
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Renders the rating as a five-character star strip, e.g. `★★★☆☆`.
    #[must_use]
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let mut out = String::with_capacity(5 * '★'.len_utf8());
        for _ in 0..filled {
            out.push('★');
        }
        for _ in filled..5 {
            out.push('☆');
        }
        out
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stars())
    }
}

/// One review record from the page source.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Stable identity, unique within the collection.
    pub id: ReviewId,
    /// Author's first name.
    pub first_name: String,
    /// Author's last name.
    pub last_name: String,
    /// Star rating.
    pub rating: Rating,
    /// Review body text.
    pub text: String,
    /// When the review was written.
    pub created: DateTime<Utc>,
    /// Photo URLs attached to the review; empty when none were declared.
    pub photo_urls: Vec<String>,
}

impl Review {
    /// Returns the author display name, `"<first> <last>"`.
    #[must_use]
    pub fn author(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the review declares at least one photo.
    #[must_use]
    pub fn has_photos(&self) -> bool {
        !self.photo_urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_clamps_out_of_range_values() {
        assert_eq!(Rating::new(0).value(), 1);
        assert_eq!(Rating::new(3).value(), 3);
        assert_eq!(Rating::new(9).value(), 5);
    }

    #[test]
    fn rating_renders_stars() {
        assert_eq!(Rating::new(4).stars(), "★★★★☆");
        assert_eq!(Rating::new(1).stars(), "★☆☆☆☆");
        assert_eq!(Rating::new(5).stars(), "★★★★★");
    }

    #[test]
    fn author_joins_names() {
        let review = Review {
            id: ReviewId(Uuid::nil()),
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            rating: Rating::new(5),
            text: String::new(),
            created: Utc::now(),
            photo_urls: Vec::new(),
        };
        assert_eq!(review.author(), "Maria Santos");
        assert!(!review.has_photos());
    }
}
