//! # Tilestream Procedural
//!
//! Deterministic generation and streaming of an unbounded 2D tile world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same world
//! 2. **Chunked**: World is generated in fixed-size square chunks
//! 3. **Bounded**: An LRU cache keeps memory flat as the camera wanders
//! 4. **Safe eviction**: Chunks the viewport needs are pinned and never evicted
//!
//! ## Core Components
//!
//! - `NoiseField`: seeded lattice gradient noise and fbm
//! - `TerrainThresholds`: height to tile classification
//! - `ChunkGenerator`: produces chunks from noise
//! - `ChunkKey`: 64-bit chunk addressing plus floor division helpers
//! - `ChunkCache`: bounded LRU arena with pinning
//! - `ViewportTracker`: camera to required chunk keys
//! - `StreamingController`: the per-tick loop tying it together
//!
//! ## Example
//!
//! ```rust
//! use tilestream_procedural::{StreamingConfig, StreamingController, WorldSeed};
//! use tilestream_shared::WorldPos;
//!
//! let mut world = StreamingController::new(WorldSeed::new(42), &StreamingConfig::default())?;
//!
//! let report = world.tick(WorldPos::new(0.0, 0.0));
//! assert_eq!(report.required, 64);
//! assert!(world.tile_at_world(0, 0).is_some());
//! # Ok::<(), tilestream_procedural::ConfigError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod chunk;
pub mod config;
pub mod coords;
pub mod error;
pub mod noise;
pub mod streaming;
pub mod terrain;
pub mod viewport;

pub use cache::{CacheStats, ChunkCache, PinSet};
pub use chunk::{Chunk, ChunkGenerator, MAX_CHUNK_SIZE};
pub use config::StreamingConfig;
pub use coords::{floor_div, floor_mod, ChunkCoord, ChunkKey};
pub use error::{ConfigError, ConfigResult};
pub use noise::{FractalParams, NoiseField, WorldSeed};
pub use streaming::{StreamingController, TickReport};
pub use terrain::{classify, TerrainThresholds, TileType};
pub use viewport::{ChunkRange, ViewRect, ViewportTracker, MAX_REQUIRED_CHUNKS};
