//! The review feed: state machine, snapshots, and the message surface.

/// Intents in, events out.
pub mod events;
/// Render-ready feed entries.
pub mod item;
/// The state machine and its handle.
pub mod machine;
/// Immutable feed views.
pub mod snapshot;
/// Internal state and the scroll trigger heuristic.
pub mod state;

pub use events::{FeedEvent, FeedIntent};
pub use item::FeedItem;
pub use machine::{FeedConfig, FeedHandle, ReviewsFeed};
pub use snapshot::FeedSnapshot;
pub use state::{FeedPhase, FeedState, should_load_next_page};
