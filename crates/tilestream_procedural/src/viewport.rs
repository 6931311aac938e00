//! # Viewport Tracking
//!
//! Turns a camera position into the set of chunks that must be resident:
//!
//! 1. World rectangle centred on the camera, half-open on both axes
//! 2. Chunk range covering it (inclusive, upper bound from `x1 - 1`)
//! 3. Range grown by the prefetch radius on every side
//! 4. Every chunk in the grown range, row-major, packed to keys
//!
//! Nothing is remembered between calls. A skipped tick simply means the
//! next call computes a range further away.

use tilestream_shared::WorldPos;

use crate::coords::{floor_div, ChunkCoord, ChunkKey};
use crate::error::{ConfigError, ConfigResult};

/// Most chunks a single tick may require, prefetch ring included.
pub const MAX_REQUIRED_CHUNKS: u64 = 65_536;

/// Upper bound on the required chunk count for any camera position.
///
/// A view `w` tiles wide touches at most `ceil(w / size) + 1` chunk
/// columns, depending on alignment. Saturates instead of overflowing.
#[must_use]
pub fn worst_case_required(
    view_width: u32,
    view_height: u32,
    prefetch_radius: u32,
    chunk_size: u32,
) -> u64 {
    let size = u64::from(chunk_size.max(1));
    let ring = 2 * u64::from(prefetch_radius);
    let span = |extent: u32| u64::from(extent).div_ceil(size) + 1 + ring;
    span(view_width).saturating_mul(span(view_height))
}

/// Half-open rectangle of world tiles: `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewRect {
    /// First column inside the rectangle.
    pub x0: i32,
    /// First row inside the rectangle.
    pub y0: i32,
    /// First column past the rectangle.
    pub x1: i32,
    /// First row past the rectangle.
    pub y1: i32,
}

impl ViewRect {
    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.x1.abs_diff(self.x0)
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.y1.abs_diff(self.y0)
    }

    /// Returns true if world tile `(x, y)` lies inside.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }
}

/// Inclusive rectangle of chunk coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRange {
    /// Lowest corner (inclusive).
    pub min: ChunkCoord,
    /// Highest corner (inclusive).
    pub max: ChunkCoord,
}

impl ChunkRange {
    /// Chunks covering a world rectangle of the given chunk size.
    #[must_use]
    pub fn covering(rect: ViewRect, chunk_size: u32) -> Self {
        let size = chunk_size as i32;
        Self {
            min: ChunkCoord::new(floor_div(rect.x0, size), floor_div(rect.y0, size)),
            max: ChunkCoord::new(
                floor_div(rect.x1.saturating_sub(1), size),
                floor_div(rect.y1.saturating_sub(1), size),
            ),
        }
    }

    /// Grows the range by `radius` chunks on all four sides.
    #[must_use]
    pub fn expand(self, radius: u32) -> Self {
        let r = radius.min(i32::MAX as u32) as i32;
        Self {
            min: ChunkCoord::new(self.min.x.saturating_sub(r), self.min.y.saturating_sub(r)),
            max: ChunkCoord::new(self.max.x.saturating_add(r), self.max.y.saturating_add(r)),
        }
    }

    /// Columns in the range.
    #[must_use]
    pub fn width(&self) -> usize {
        (i64::from(self.max.x) - i64::from(self.min.x) + 1) as usize
    }

    /// Rows in the range.
    #[must_use]
    pub fn height(&self) -> usize {
        (i64::from(self.max.y) - i64::from(self.min.y) + 1) as usize
    }

    /// Number of chunks in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always false: a range holds at least one chunk.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `coord` lies inside the range.
    #[must_use]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.y..=self.max.y).contains(&coord.y)
    }

    /// Chunk coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> {
        let (x0, x1) = (self.min.x, self.max.x);
        (self.min.y..=self.max.y).flat_map(move |y| (x0..=x1).map(move |x| ChunkCoord::new(x, y)))
    }
}

/// Derives the chunks a camera needs from fixed view parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportTracker {
    view_width: u32,
    view_height: u32,
    prefetch_radius: u32,
    chunk_size: u32,
}

impl ViewportTracker {
    /// Creates a tracker.
    ///
    /// # Errors
    ///
    /// Fails on a zero view extent, a zero chunk size, or a view and
    /// prefetch ring needing more than [`MAX_REQUIRED_CHUNKS`] chunks.
    pub fn new(
        view_width: u32,
        view_height: u32,
        prefetch_radius: u32,
        chunk_size: u32,
    ) -> ConfigResult<Self> {
        if view_width == 0 || view_height == 0 {
            return Err(ConfigError::ZeroViewExtent {
                width: view_width,
                height: view_height,
            });
        }
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        let required = worst_case_required(view_width, view_height, prefetch_radius, chunk_size);
        if required > MAX_REQUIRED_CHUNKS {
            return Err(ConfigError::PrefetchTooLarge { required });
        }

        Ok(Self {
            view_width,
            view_height,
            prefetch_radius,
            chunk_size,
        })
    }

    /// Visible width in tiles.
    #[must_use]
    pub const fn view_width(&self) -> u32 {
        self.view_width
    }

    /// Visible height in tiles.
    #[must_use]
    pub const fn view_height(&self) -> u32 {
        self.view_height
    }

    /// Prefetch ring in chunks.
    #[must_use]
    pub const fn prefetch_radius(&self) -> u32 {
        self.prefetch_radius
    }

    /// Chunk side length in tiles.
    #[must_use]
    pub const fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// World rectangle visible from `camera`.
    #[must_use]
    pub fn world_rect(&self, camera: WorldPos) -> ViewRect {
        let x0 = (camera.x - f64::from(self.view_width) * 0.5).floor() as i32;
        let y0 = (camera.y - f64::from(self.view_height) * 0.5).floor() as i32;
        ViewRect {
            x0,
            y0,
            x1: x0.saturating_add_unsigned(self.view_width),
            y1: y0.saturating_add_unsigned(self.view_height),
        }
    }

    /// Chunks overlapping the visible rectangle, without prefetch.
    #[must_use]
    pub fn visible_range(&self, camera: WorldPos) -> ChunkRange {
        ChunkRange::covering(self.world_rect(camera), self.chunk_size)
    }

    /// Visible chunks plus the prefetch ring.
    #[must_use]
    pub fn required_range(&self, camera: WorldPos) -> ChunkRange {
        self.visible_range(camera).expand(self.prefetch_radius)
    }

    /// Keys of every required chunk, row-major, without duplicates.
    #[must_use]
    pub fn required_keys(&self, camera: WorldPos) -> Vec<ChunkKey> {
        let range = self.required_range(camera);
        let mut keys = Vec::with_capacity(range.len());
        keys.extend(range.iter().map(ChunkCoord::key));
        keys
    }
}
