//! Domain error types.

mod fetch_error;
mod page_error;

pub use fetch_error::FetchError;
pub use page_error::PageError;
