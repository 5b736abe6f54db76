//! Photo resolution states.

use std::sync::Arc;

/// A decoded, render-ready photo.
pub type DecodedPhoto = Arc<image::DynamicImage>;

/// Resolution state of one photo URL on one review.
///
/// Transitions are monotonic: `Loading` moves to exactly one terminal state
/// and a terminal state only returns to `Loading` through an explicit reload
/// request.
#[derive(Debug, Clone, Default)]
pub enum PhotoState {
    /// Resolution has been requested and has not settled yet.
    #[default]
    Loading,
    /// The photo was fetched (or read from cache) and decoded.
    Success(DecodedPhoto),
    /// Fetching or decoding failed; the slot stays failed until reloaded.
    Failure,
}

impl PhotoState {
    /// Returns true while the photo is unresolved.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the photo resolved to a decoded image.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if resolution failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Returns true once the state will no longer change on its own.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Returns the decoded photo for a successful resolution.
    #[must_use]
    pub fn photo(&self) -> Option<&DecodedPhoto> {
        match self {
            Self::Success(photo) => Some(photo),
            Self::Loading | Self::Failure => None,
        }
    }
}

impl std::fmt::Display for PhotoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Success(_) => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}
