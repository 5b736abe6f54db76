//! Port definition for the paginated review source.

use crate::domain::entities::ReviewPage;
use crate::domain::errors::PageError;

/// Port for fetching review pages by offset.
///
/// A real backend and the bundled fixture implement the same interface;
/// callers never see the difference. Outstanding requests are cancellable
/// as a group, which the refresh path relies on.
#[async_trait::async_trait]
pub trait ReviewsProviderPort: Send + Sync {
    /// Fetches the page starting at `offset`.
    ///
    /// # Errors
    /// Returns [`PageError::SourceUnavailable`] when the source cannot be
    /// read and [`PageError::Decode`] when the payload is malformed.
    async fn get_page(&self, offset: usize) -> Result<ReviewPage, PageError>;

    /// Cancels every outstanding page request.
    ///
    /// Cancellation is cooperative: callers that already gave up must also
    /// discard any result that still arrives.
    fn cancel_all(&self);
}
