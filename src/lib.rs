//! revfeed - a headless paginated review-feed engine.
//!
//! Pages of reviews come from a swappable provider, per-review photos are
//! resolved through a two-tier byte cache with network fall-through, and a
//! single-writer state machine publishes immutable render snapshots over a
//! channel. Rendering itself is the consumer's business.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the feed state machine.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for caches, HTTP, and sources.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "revfeed";
