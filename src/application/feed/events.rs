//! Messages in and out of the feed machine.

use super::snapshot::FeedSnapshot;
use crate::domain::entities::{DecodedPhoto, ReviewId};

/// User-facing commands sent into the feed.
#[derive(Debug, Clone)]
pub enum FeedIntent {
    /// Request the first page (screen appeared).
    Load,
    /// Pull-to-refresh: drop everything and reload from the top.
    Refresh,
    /// The list scrolled near its end; load the next page if allowed.
    ScrollNearEnd,
    /// Lift the truncation on one review's text.
    ShowMore(ReviewId),
    /// A photo was tapped; asks for the decoded image to be presented.
    PhotoTapped {
        /// The owning review.
        review: ReviewId,
        /// Index into the review's photo slots.
        photo_index: usize,
    },
    /// Restart photo resolution for one review.
    ReloadPhotos(ReviewId),
}

/// Events the feed publishes to its observer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A fresh immutable view of the feed.
    Snapshot(FeedSnapshot),
    /// A decoded photo ready to present at full size.
    OpenPhoto(DecodedPhoto),
}
