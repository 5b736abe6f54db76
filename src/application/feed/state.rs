//! Internal feed state and the scroll trigger heuristic.

use super::item::FeedItem;
use crate::domain::entities::ReviewId;

/// Lifecycle phase of the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedPhase {
    /// No request in flight.
    #[default]
    Idle,
    /// The first page is loading; the full-screen loader is up.
    LoadingFirstPage,
    /// A further page is loading behind existing content.
    LoadingNextPage,
    /// A refresh is in flight.
    Refreshing,
    /// The last page request failed; the next trigger retries.
    Error,
}

impl FeedPhase {
    /// True while any page request is outstanding.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(
            self,
            Self::LoadingFirstPage | Self::LoadingNextPage | Self::Refreshing
        )
    }
}

/// Mutable feed state, owned exclusively by the feed machine.
#[derive(Debug)]
pub struct FeedState {
    /// Items in display order.
    pub items: Vec<FeedItem>,
    /// Offset cursor for the next page request; always a multiple of
    /// `page_size`.
    pub offset: usize,
    /// Reviews requested per page.
    pub page_size: usize,
    /// Gate for page requests; false while one is outstanding or when
    /// the source is exhausted.
    pub should_load: bool,
    /// Current lifecycle phase.
    pub phase: FeedPhase,
    /// Footer label, set after the first successful load.
    pub footer: Option<String>,
}

impl FeedState {
    /// Creates an empty state ready to load the first page.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            page_size: page_size.max(1),
            should_load: true,
            phase: FeedPhase::Idle,
            footer: None,
        }
    }

    /// Drops all items and rewinds the cursor, re-arming the gate.
    pub fn reset(&mut self) {
        self.items.clear();
        self.offset = 0;
        self.should_load = true;
        self.footer = None;
    }

    /// Finds an item by id.
    pub fn find_item_mut(&mut self, id: ReviewId) -> Option<&mut FeedItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// True if an item with this id is already present.
    #[must_use]
    pub fn contains(&self, id: ReviewId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Recomputes the footer label from the current item count.
    pub fn update_footer(&mut self) {
        self.footer = Some(format!("{} reviews", self.items.len()));
    }
}

/// Near-end scroll heuristic.
///
/// Fires when the content remaining below the target scroll position is
/// at most `screens_to_preload` viewport heights.
#[must_use]
pub fn should_load_next_page(
    content_height: f64,
    viewport_height: f64,
    target_offset_y: f64,
    screens_to_preload: f64,
) -> bool {
    let trigger_distance = viewport_height * screens_to_preload;
    let remaining_distance = content_height - viewport_height - target_offset_y;
    remaining_distance <= trigger_distance
}
