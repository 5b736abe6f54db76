//! Photo resolution infrastructure.

mod pipeline;

pub use pipeline::{DEFAULT_MAX_CONCURRENT, ImagePipeline};
