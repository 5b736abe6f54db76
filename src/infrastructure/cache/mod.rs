//! Blob cache implementations: memory, disk, and the tiered composite.

mod disk;
mod memory;
mod tiered;

pub use disk::DiskBlobCache;
pub use memory::{CacheStats, DEFAULT_CACHE_ENTRIES, MemoryBlobCache};
pub use tiered::TieredBlobCache;
