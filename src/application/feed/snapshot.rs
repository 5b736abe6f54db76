//! Immutable feed views handed to observers.

use super::item::FeedItem;
use super::state::{FeedPhase, FeedState};

/// A consistent, fully-settled view of the feed at one point in time.
///
/// This is the only channel the presentation layer observes; it never
/// sees the mutable state behind it.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Items in display order.
    pub items: Vec<FeedItem>,
    /// Footer label (`"<N> reviews"`), absent before the first
    /// successful load.
    pub footer_text: Option<String>,
    /// Whether the full-screen loader should be visible.
    pub show_loader: bool,
    /// Whether a further page could be requested right now.
    pub can_load_more: bool,
    /// Feed lifecycle phase at capture time.
    pub phase: FeedPhase,
}

impl FeedSnapshot {
    /// Captures the current state.
    pub(crate) fn capture(state: &FeedState) -> Self {
        Self {
            items: state.items.clone(),
            footer_text: state.footer.clone(),
            show_loader: state.phase == FeedPhase::LoadingFirstPage,
            can_load_more: state.should_load,
            phase: state.phase,
        }
    }

    /// Number of items in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the snapshot holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
