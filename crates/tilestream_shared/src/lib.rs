//! # Tilestream Shared
//!
//! Value types used by both the streaming engine and the exploration client.
//!
//! Positions travel as named types instead of raw float pairs so an `x`
//! can never be read as a `y` by accident.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CHUNK_SIZE, DEFAULT_PREFETCH_RADIUS, DEFAULT_TICK_MILLIS,
    DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH,
};
pub use math::{TilePos, WorldPos};
