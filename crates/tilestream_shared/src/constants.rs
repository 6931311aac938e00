//! # Engine Defaults
//!
//! Values used when a config file leaves a field out.
//!
//! Every one of these can be overridden at startup; none can change while
//! the process is running.

// =============================================================================
// CHUNKS
// =============================================================================

/// Side length of a square chunk, in tiles.
pub const DEFAULT_CHUNK_SIZE: u32 = 64;

/// Number of chunks the cache tries to keep resident.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

// =============================================================================
// VIEWPORT
// =============================================================================

/// Visible width of the viewport, in tiles.
pub const DEFAULT_VIEW_WIDTH: u32 = 56;

/// Visible height of the viewport, in tiles.
pub const DEFAULT_VIEW_HEIGHT: u32 = 42;

/// Extra ring of chunks streamed around the visible ones.
pub const DEFAULT_PREFETCH_RADIUS: u32 = 3;

// =============================================================================
// CLIENT
// =============================================================================

/// Milliseconds between two ticks of the exploration loop (~30 FPS).
pub const DEFAULT_TICK_MILLIS: u64 = 33;
