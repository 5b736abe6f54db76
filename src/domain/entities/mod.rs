//! Domain entity definitions.

mod page;
mod photo;
mod review;

pub use page::ReviewPage;
pub use photo::{DecodedPhoto, PhotoState};
pub use review::{Rating, Review, ReviewId};
