//! # Streaming Controller
//!
//! Per-tick orchestration of the world stream:
//!
//! ```text
//! camera ─► ViewportTracker ─► required keys R
//!                                   │
//!              ┌────────────────────┘
//!              ▼
//!   for key in R: cache.get_or_generate(key)   (generates + touches)
//!              │
//!              ▼
//!   cache.evict_to_capacity(pinned = R)
//! ```
//!
//! Every required chunk is touched **before** eviction runs. Reversing the
//! two steps could evict a chunk and regenerate it within the same tick.

use tracing::{debug, warn};

use tilestream_shared::WorldPos;

use crate::cache::{ChunkCache, PinSet};
use crate::chunk::{Chunk, ChunkGenerator};
use crate::config::StreamingConfig;
use crate::coords::{ChunkCoord, ChunkKey};
use crate::error::ConfigResult;
use crate::noise::WorldSeed;
use crate::terrain::TileType;
use crate::viewport::ViewportTracker;

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks required (visible plus prefetch).
    pub required: usize,
    /// Chunks generated this tick.
    pub generated: usize,
    /// Chunks evicted this tick.
    pub evicted: usize,
    /// Chunks resident after the tick.
    pub resident: usize,
    /// More chunks are pinned than the cache capacity allows.
    pub over_capacity: bool,
}

/// Owns the generator, the viewport tracker and the cache.
pub struct StreamingController {
    generator: ChunkGenerator,
    tracker: ViewportTracker,
    cache: ChunkCache,
    ticks: u64,
}

impl StreamingController {
    /// Builds a controller from a seed and a validated-on-entry config.
    ///
    /// # Errors
    ///
    /// Returns the config's first validation failure.
    pub fn new(seed: WorldSeed, config: &StreamingConfig) -> ConfigResult<Self> {
        config.validate()?;

        let tracker = ViewportTracker::new(
            config.view_width,
            config.view_height,
            config.prefetch_radius,
            config.chunk_size,
        )?;
        let cache = ChunkCache::new(config.cache_capacity)?;
        let generator =
            ChunkGenerator::with_params(seed, config.chunk_size, config.fractal, config.terrain);

        Ok(Self {
            generator,
            tracker,
            cache,
            ticks: 0,
        })
    }

    /// The world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.generator.seed()
    }

    /// Chunk side length in tiles.
    #[must_use]
    pub const fn chunk_size(&self) -> u32 {
        self.generator.chunk_size()
    }

    /// The viewport tracker, for renderers that need the visible rectangle.
    #[must_use]
    pub const fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// The chunk cache, read-only.
    #[must_use]
    pub const fn cache(&self) -> &ChunkCache {
        &self.cache
    }

    /// Number of ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Streams the world around `camera`.
    pub fn tick(&mut self, camera: WorldPos) -> TickReport {
        let required = self.tracker.required_keys(camera);
        let generated_before = self.cache.stats().generated;

        for &key in &required {
            let generator = &self.generator;
            self.cache
                .get_or_generate(key, |k| generator.generate(ChunkCoord::from(k)));
        }

        let generated = (self.cache.stats().generated - generated_before) as usize;
        let pinned: PinSet = required.iter().collect();
        let evicted = self.cache.evict_to_capacity(&pinned);
        let over_capacity = pinned.len() > self.cache.capacity();
        self.ticks += 1;

        if over_capacity {
            warn!(
                pinned = pinned.len(),
                capacity = self.cache.capacity(),
                "viewport needs more chunks than the cache holds; running over capacity"
            );
        }

        let report = TickReport {
            required: required.len(),
            generated,
            evicted,
            resident: self.cache.len(),
            over_capacity,
        };

        if report.generated > 0 || report.evicted > 0 {
            debug!(
                tick = self.ticks,
                camera_x = camera.x,
                camera_y = camera.y,
                generated = report.generated,
                evicted = report.evicted,
                resident = report.resident,
                "streamed chunks"
            );
        }

        report
    }

    /// Resident chunk with the given key.
    #[must_use]
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.cache.get(key)
    }

    /// Tile at a world position, if its chunk is resident.
    ///
    /// `None` means "not streamed yet".
    #[must_use]
    pub fn tile_at_world(&self, world_x: i32, world_y: i32) -> Option<TileType> {
        let size = self.chunk_size();
        let coord = ChunkCoord::from_world(world_x, world_y, size);
        let (lx, ly) = ChunkCoord::local_offset(world_x, world_y, size);
        self.cache.get(coord.key())?.tile_at(lx, ly)
    }
}
