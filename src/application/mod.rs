//! Application layer: the feed state machine and its message surface.

/// The review feed.
pub mod feed;

pub use feed::{
    FeedConfig, FeedEvent, FeedHandle, FeedIntent, FeedItem, FeedPhase, FeedSnapshot, ReviewsFeed,
};
