//! Coordinate types shared by the engine and the client.

use serde::{Deserialize, Serialize};

/// Continuous 2D position in world space, measured in tiles.
///
/// The camera lives here. Tile `(3, 4)` covers the square
/// `[3, 4) x [4, 5)` of world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    /// X component (grows to the right)
    pub x: f64,
    /// Y component (grows downward)
    pub y: f64,
}

impl WorldPos {
    /// Creates a new position
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The world origin
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Returns the tile containing this position.
    #[must_use]
    pub fn tile(self) -> TilePos {
        TilePos::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Offsets the position by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::ops::Add for WorldPos {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for WorldPos {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl From<TilePos> for WorldPos {
    fn from(tile: TilePos) -> Self {
        Self::new(f64::from(tile.x), f64::from(tile.y))
    }
}

/// Integer tile coordinate in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    /// Tile column
    pub x: i32,
    /// Tile row
    pub y: i32,
}

impl TilePos {
    /// Creates a new tile coordinate
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring tile `(dx, dy)` away.
    #[must_use]
    pub const fn step(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}

impl std::fmt::Display for TilePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
