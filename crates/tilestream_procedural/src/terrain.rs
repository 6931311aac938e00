//! # Terrain Classification
//!
//! Maps a continuous height sample onto a discrete tile type.
//!
//! ```text
//!   -1.0        water        rock       snow        1.0
//!    |-----------|-----------|-----------|-----------|
//!        Sea         Grass       Rock        Snow
//! ```
//!
//! Boundaries are deliberately asymmetric: a height exactly on the water or
//! rock threshold is Grass, a height exactly on the snow threshold is Snow.

use serde::{Deserialize, Serialize};

/// Terrain category of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileType {
    /// Lowland, walkable.
    #[default]
    Grass = 0,
    /// Open water.
    Sea = 1,
    /// Highland rock.
    Rock = 2,
    /// Peaks.
    Snow = 3,
}

impl TileType {
    /// All tile types, in discriminant order.
    pub const ALL: [Self; 4] = [Self::Grass, Self::Sea, Self::Rock, Self::Snow];
}

/// Height thresholds separating the tile types.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainThresholds {
    /// Heights strictly below this are Sea.
    pub water: f64,
    /// Heights strictly above this (and below `snow`) are Rock.
    pub rock: f64,
    /// Heights at or above this are Snow.
    pub snow: f64,
}

impl TerrainThresholds {
    /// Default sea threshold.
    pub const DEFAULT_WATER: f64 = -0.12;
    /// Default rock threshold.
    pub const DEFAULT_ROCK: f64 = 0.3;
    /// Default snow threshold.
    pub const DEFAULT_SNOW: f64 = 0.55;

    /// Creates thresholds from explicit values.
    #[must_use]
    pub const fn new(water: f64, rock: f64, snow: f64) -> Self {
        Self { water, rock, snow }
    }

    /// Classifies a height sample.
    #[inline]
    #[must_use]
    pub fn classify(&self, height: f64) -> TileType {
        if height < self.water {
            TileType::Sea
        } else if height >= self.snow {
            TileType::Snow
        } else if height > self.rock {
            TileType::Rock
        } else {
            TileType::Grass
        }
    }

    /// Returns true when `water < rock < snow`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.water < self.rock && self.rock < self.snow
    }
}

impl Default for TerrainThresholds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WATER, Self::DEFAULT_ROCK, Self::DEFAULT_SNOW)
    }
}

/// Classifies a height using the default thresholds.
#[inline]
#[must_use]
pub fn classify(height: f64) -> TileType {
    TerrainThresholds::default().classify(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_scenario() {
        assert_eq!(classify(-0.2), TileType::Sea);
        assert_eq!(classify(0.32), TileType::Rock);
        assert_eq!(classify(0.55), TileType::Snow);
        assert_eq!(classify(0.0), TileType::Grass);
    }

    #[test]
    fn test_boundary_tie_breaks() {
        // Exactly on water: not below it, so Grass
        assert_eq!(classify(-0.12), TileType::Grass);
        // Exactly on rock: not above it, so Grass
        assert_eq!(classify(0.3), TileType::Grass);
        // Exactly on snow: Snow
        assert_eq!(classify(0.55), TileType::Snow);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(-1.0), TileType::Sea);
        assert_eq!(classify(1.0), TileType::Snow);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = TerrainThresholds::new(0.0, 0.5, 0.9);
        assert_eq!(t.classify(-0.01), TileType::Sea);
        assert_eq!(t.classify(0.25), TileType::Grass);
        assert_eq!(t.classify(0.6), TileType::Rock);
        assert_eq!(t.classify(0.95), TileType::Snow);
    }

    #[test]
    fn test_ordering_check() {
        assert!(TerrainThresholds::default().is_ordered());
        assert!(!TerrainThresholds::new(0.3, 0.3, 0.5).is_ordered());
        assert!(!TerrainThresholds::new(-0.1, 0.6, 0.5).is_ordered());
        assert!(!TerrainThresholds::new(f64::NAN, 0.3, 0.5).is_ordered());
    }
}
