//! The feed state machine and its intent/event surface.
//!
//! One task owns all feed state. Intents arrive on a channel, page loads
//! and photo resolutions are spawned off, and their completions come back
//! as actions on an internal channel. Every mutation and every snapshot
//! emission happens on the owner task, so observers always see a fully
//! settled view.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::entities::{PhotoState, ReviewId, ReviewPage};
use crate::domain::errors::PageError;
use crate::domain::ports::ReviewsProviderPort;
use crate::infrastructure::image::ImagePipeline;

use super::events::{FeedEvent, FeedIntent};
use super::item::FeedItem;
use super::snapshot::FeedSnapshot;
use super::state::{FeedPhase, FeedState, should_load_next_page};

/// Tunables for the feed machine.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Reviews requested per page.
    pub page_size: usize,
    /// Screen heights of remaining content under which the next page
    /// is requested.
    pub screens_to_preload: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            screens_to_preload: 2.5,
        }
    }
}

/// Completions reported back to the owner task by spawned work.
#[derive(Debug)]
enum FeedAction {
    /// A page request finished.
    PageLoaded {
        generation: u64,
        refresh: bool,
        result: Result<ReviewPage, PageError>,
    },
    /// A batch of photo resolutions for one review settled.
    PhotosResolved {
        generation: u64,
        id: ReviewId,
        resolved: Vec<(usize, PhotoState)>,
    },
}

/// Clonable sender half for driving the feed.
///
/// The presentation layer holds one of these and nothing else; it has no
/// access to the state behind the machine. Sends to a stopped machine are
/// silently dropped.
#[derive(Clone)]
pub struct FeedHandle {
    intent_tx: mpsc::UnboundedSender<FeedIntent>,
    screens_to_preload: f64,
}

impl FeedHandle {
    /// Requests the first page (screen appeared).
    pub fn load_initial(&self) {
        let _ = self.intent_tx.send(FeedIntent::Load);
    }

    /// Drops everything and reloads from the top.
    pub fn refresh(&self) {
        let _ = self.intent_tx.send(FeedIntent::Refresh);
    }

    /// Reports a finished scroll; requests the next page when the target
    /// position lands close enough to the end of the content.
    pub fn scroll_ended(&self, content_height: f64, viewport_height: f64, target_offset_y: f64) {
        if should_load_next_page(
            content_height,
            viewport_height,
            target_offset_y,
            self.screens_to_preload,
        ) {
            let _ = self.intent_tx.send(FeedIntent::ScrollNearEnd);
        }
    }

    /// Lifts the truncation on one review's text.
    pub fn show_more(&self, id: ReviewId) {
        let _ = self.intent_tx.send(FeedIntent::ShowMore(id));
    }

    /// Restarts resolution for a review's failed photos.
    pub fn reload_photos(&self, id: ReviewId) {
        let _ = self.intent_tx.send(FeedIntent::ReloadPhotos(id));
    }

    /// Asks for one resolved photo to be presented at full size.
    pub fn photo_tapped(&self, review: ReviewId, photo_index: usize) {
        let _ = self.intent_tx.send(FeedIntent::PhotoTapped {
            review,
            photo_index,
        });
    }
}

impl std::fmt::Debug for FeedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedHandle")
            .field("screens_to_preload", &self.screens_to_preload)
            .finish_non_exhaustive()
    }
}

/// The review feed state machine.
///
/// Owns the item list, the pagination cursor, and the request gate.
/// Page loads go through the injected provider; photo URLs are handed to
/// the pipeline one review at a time, and results are patched back in as
/// they settle. A generation counter bumped on refresh tags spawned work
/// so superseded completions are discarded on arrival.
pub struct ReviewsFeed {
    state: FeedState,
    generation: u64,
    provider: Arc<dyn ReviewsProviderPort>,
    pipeline: ImagePipeline,
    intent_rx: mpsc::UnboundedReceiver<FeedIntent>,
    action_tx: mpsc::UnboundedSender<FeedAction>,
    action_rx: mpsc::UnboundedReceiver<FeedAction>,
    event_tx: mpsc::UnboundedSender<FeedEvent>,
}

impl ReviewsFeed {
    /// Creates a feed over a review source and a photo pipeline.
    ///
    /// Returns the machine itself (run it with [`ReviewsFeed::spawn`]),
    /// the handle for sending intents, and the event receiver.
    #[must_use]
    pub fn new(
        provider: Arc<dyn ReviewsProviderPort>,
        pipeline: ImagePipeline,
        config: &FeedConfig,
    ) -> (Self, FeedHandle, mpsc::UnboundedReceiver<FeedEvent>) {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let machine = Self {
            state: FeedState::new(config.page_size),
            generation: 0,
            provider,
            pipeline,
            intent_rx,
            action_tx,
            action_rx,
            event_tx,
        };
        let handle = FeedHandle {
            intent_tx,
            screens_to_preload: config.screens_to_preload,
        };

        (machine, handle, event_rx)
    }

    /// Runs the owner loop on its own task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// The owner loop: intents and completions in, snapshots out.
    ///
    /// Exits once every handle has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                intent = self.intent_rx.recv() => {
                    match intent {
                        Some(intent) => self.handle_intent(intent),
                        None => {
                            debug!("All feed handles dropped, stopping feed loop");
                            break;
                        }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }
        }
    }

    fn handle_intent(&mut self, intent: FeedIntent) {
        match intent {
            FeedIntent::Load | FeedIntent::ScrollNearEnd => {
                if self.state.should_load && !self.state.phase.is_loading() {
                    self.request_page(false);
                }
            }
            FeedIntent::Refresh => {
                self.provider.cancel_all();
                self.generation += 1;
                self.request_page(true);
            }
            FeedIntent::ShowMore(id) => {
                if let Some(item) = self.state.find_item_mut(id) {
                    item.expanded = true;
                    self.emit_snapshot();
                } else {
                    debug!(id = %id, "ShowMore for unknown review ignored");
                }
            }
            FeedIntent::ReloadPhotos(id) => self.reload_photos(id),
            FeedIntent::PhotoTapped {
                review,
                photo_index,
            } => {
                let photo = self
                    .state
                    .items
                    .iter()
                    .find(|item| item.id() == review)
                    .and_then(|item| item.photo(photo_index))
                    .and_then(PhotoState::photo)
                    .cloned();
                if let Some(photo) = photo {
                    self.emit(FeedEvent::OpenPhoto(photo));
                }
            }
        }
    }

    fn handle_action(&mut self, action: FeedAction) {
        match action {
            FeedAction::PageLoaded {
                generation,
                refresh,
                result,
            } => {
                if generation != self.generation {
                    debug!(generation, "Dropping superseded page result");
                    return;
                }
                self.apply_page(refresh, result);
            }
            FeedAction::PhotosResolved {
                generation,
                id,
                resolved,
            } => {
                if generation != self.generation {
                    debug!(generation, id = %id, "Dropping superseded photo results");
                    return;
                }
                let Some(item) = self.state.find_item_mut(id) else {
                    debug!(id = %id, "Photo results for a vanished review ignored");
                    return;
                };
                for (index, state) in resolved {
                    if let Some(slot) = item.photos.get_mut(index) {
                        *slot = state;
                    }
                }
                self.emit_snapshot();
            }
        }
    }

    /// Closes the gate, flips the phase, and spawns one page request.
    fn request_page(&mut self, refresh: bool) {
        let offset = if refresh { 0 } else { self.state.offset };
        self.state.should_load = false;
        self.state.phase = if refresh {
            FeedPhase::Refreshing
        } else if offset == 0 {
            FeedPhase::LoadingFirstPage
        } else {
            FeedPhase::LoadingNextPage
        };
        self.emit_snapshot();

        debug!(offset, refresh, "Requesting review page");
        let provider = self.provider.clone();
        let action_tx = self.action_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = provider.get_page(offset).await;
            let _ = action_tx.send(FeedAction::PageLoaded {
                generation,
                refresh,
                result,
            });
        });
    }

    /// Folds a page completion into the state and emits the result.
    fn apply_page(&mut self, refresh: bool, result: Result<ReviewPage, PageError>) {
        if refresh {
            // The old list stays visible while the refresh is in flight;
            // it is dropped only once the answer is in.
            self.state.reset();
        }

        match result {
            Ok(page) => {
                let mut appended = Vec::new();
                for review in page.items {
                    if self.state.contains(review.id) {
                        warn!(id = %review.id, "Skipping duplicate review id from source");
                        continue;
                    }
                    let item = FeedItem::new(review);
                    appended.push((item.id(), item.review.photo_urls.clone()));
                    self.state.items.push(item);
                }

                self.state.offset += self.state.page_size;
                self.state.should_load = page.has_more;
                self.state.phase = FeedPhase::Idle;
                self.state.update_footer();
                self.emit_snapshot();

                for (id, urls) in appended {
                    self.resolve_photos(id, urls.into_iter().enumerate().collect());
                }
            }
            Err(e) => {
                warn!(error = %e, refresh, "Review page load failed");
                self.state.phase = FeedPhase::Error;
                self.state.should_load = true;
                self.emit_snapshot();
            }
        }
    }

    /// Flips a review's failed slots back to `Loading` and re-resolves them.
    fn reload_photos(&mut self, id: ReviewId) {
        let Some(item) = self.state.find_item_mut(id) else {
            debug!(id = %id, "ReloadPhotos for unknown review ignored");
            return;
        };

        let mut slots = Vec::new();
        for (index, state) in item.photos.iter_mut().enumerate() {
            if state.is_failure() {
                *state = PhotoState::Loading;
                slots.push((index, item.review.photo_urls[index].clone()));
            }
        }
        if slots.is_empty() {
            return;
        }

        debug!(id = %id, count = slots.len(), "Reloading failed photos");
        self.emit_snapshot();
        self.resolve_photos(id, slots);
    }

    /// Spawns resolution for the given photo slots of one review.
    fn resolve_photos(&self, id: ReviewId, slots: Vec<(usize, String)>) {
        if slots.is_empty() {
            return;
        }
        let pipeline = self.pipeline.clone();
        let action_tx = self.action_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let urls: Vec<String> = slots.iter().map(|(_, url)| url.clone()).collect();
            let states = pipeline.resolve_all(&urls).await;
            let resolved = slots
                .into_iter()
                .map(|(index, _)| index)
                .zip(states)
                .collect();
            let _ = action_tx.send(FeedAction::PhotosResolved {
                generation,
                id,
                resolved,
            });
        });
    }

    fn emit_snapshot(&self) {
        self.emit(FeedEvent::Snapshot(FeedSnapshot::capture(&self.state)));
    }

    fn emit(&self, event: FeedEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Feed event receiver dropped");
        }
    }
}

impl std::fmt::Debug for ReviewsFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewsFeed")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
