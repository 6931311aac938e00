//! # Chunk System
//!
//! The world is organized into fixed-size square chunks:
//! - Only chunks near the camera are resident
//! - Each chunk is generated once, on first need, and never modified
//! - Regeneration from the seed is always possible, so nothing is saved
//!
//! ## Chunk Format
//!
//! Chunks are `size x size` tiles (64x64 by default), stored row-major:
//! the tile at local `(x, y)` lives at index `y * size + x`.

use tracing::debug;

use crate::coords::ChunkCoord;
use crate::noise::{FractalParams, NoiseField, WorldSeed};
use crate::terrain::{TerrainThresholds, TileType};
use tilestream_shared::DEFAULT_CHUNK_SIZE;

/// Largest accepted chunk side length, in tiles.
pub const MAX_CHUNK_SIZE: u32 = 4096;

/// A chunk of world data.
///
/// Immutable after construction: there is no way to change a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    seed: WorldSeed,
    size: u32,
    tiles: Box<[TileType]>,
}

impl Chunk {
    /// One-off generation with default fractal octaves and thresholds.
    ///
    /// Builds a fresh noise field on every call. Anything generating more
    /// than one chunk should hold a [`ChunkGenerator`] instead.
    #[must_use]
    pub fn generate(
        seed: WorldSeed,
        chunk_x: i32,
        chunk_y: i32,
        size: u32,
        base_frequency: f64,
    ) -> Self {
        let fractal = FractalParams {
            base_frequency,
            ..FractalParams::default()
        };
        ChunkGenerator::with_params(seed, size, fractal, TerrainThresholds::default())
            .generate(ChunkCoord::new(chunk_x, chunk_y))
    }

    /// Chunk position in the world.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Seed this chunk was generated from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Side length in tiles.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Gets the tile at local coordinates.
    ///
    /// Returns `None` outside `[0, size) x [0, size)`.
    #[inline]
    #[must_use]
    pub fn tile_at(&self, local_x: u32, local_y: u32) -> Option<TileType> {
        if local_x < self.size && local_y < self.size {
            Some(self.tiles[self.index(local_x, local_y)])
        } else {
            None
        }
    }

    /// All tiles, row-major.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Counts tiles of each type, indexed by discriminant.
    #[must_use]
    pub fn histogram(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for &tile in self.tiles.iter() {
            counts[tile as usize] += 1;
        }
        counts
    }

    #[inline]
    fn index(&self, local_x: u32, local_y: u32) -> usize {
        local_y as usize * self.size as usize + local_x as usize
    }
}

/// Chunk generator using fractal noise.
///
/// Builds the noise field once per seed and reuses it for every chunk.
pub struct ChunkGenerator {
    seed: WorldSeed,
    noise: NoiseField,
    size: u32,
    fractal: FractalParams,
    thresholds: TerrainThresholds,
}

impl ChunkGenerator {
    /// Creates a generator with default chunk size, fractal and thresholds.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self::with_params(
            seed,
            DEFAULT_CHUNK_SIZE,
            FractalParams::default(),
            TerrainThresholds::default(),
        )
    }

    /// Creates a generator with explicit parameters.
    ///
    /// `size` is expected to be in `1..=MAX_CHUNK_SIZE`; `StreamingConfig`
    /// validates that before it gets here.
    #[must_use]
    pub fn with_params(
        seed: WorldSeed,
        size: u32,
        fractal: FractalParams,
        thresholds: TerrainThresholds,
    ) -> Self {
        Self {
            seed,
            noise: NoiseField::new(seed),
            size,
            fractal,
            thresholds,
        }
    }

    /// The world seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Chunk side length in tiles.
    #[inline]
    #[must_use]
    pub const fn chunk_size(&self) -> u32 {
        self.size
    }

    /// Height sample at a world tile, before classification.
    #[inline]
    #[must_use]
    pub fn height_at(&self, world_x: i64, world_y: i64) -> f64 {
        self.fractal
            .height_at(&self.noise, world_x as f64, world_y as f64)
    }

    /// Tile type at a world tile, computed directly from noise.
    ///
    /// Always agrees with the tile of the generated chunk containing it.
    #[inline]
    #[must_use]
    pub fn tile_at_world(&self, world_x: i64, world_y: i64) -> TileType {
        self.thresholds.classify(self.height_at(world_x, world_y))
    }

    /// Generates the chunk at the given coordinates.
    ///
    /// Cost is `O(size^2 * octaves)`, independent of where in the world the
    /// chunk is.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let size = self.size as usize;
        let origin_x = coord.origin_x(self.size);
        let origin_y = coord.origin_y(self.size);

        let mut tiles = Vec::with_capacity(size * size);
        for j in 0..i64::from(self.size) {
            for i in 0..i64::from(self.size) {
                tiles.push(self.tile_at_world(origin_x + i, origin_y + j));
            }
        }

        debug!(chunk = %coord, seed = %self.seed, "generated chunk");

        Chunk {
            coord,
            seed: self.seed,
            size: self.size,
            tiles: tiles.into_boxed_slice(),
        }
    }
}
