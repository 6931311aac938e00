//! # Streaming Configuration
//!
//! Construction-time settings for the streaming engine, loaded once from
//! TOML. Every field has a default, so an empty file is a valid config.
//!
//! ```toml
//! view_width = 56
//! view_height = 42
//! prefetch_radius = 3
//! cache_capacity = 64
//! chunk_size = 64
//!
//! [fractal]
//! octaves = 5
//! lacunarity = 2.0
//! gain = 0.5
//! base_frequency = 0.0125
//!
//! [terrain]
//! water = -0.12
//! rock = 0.3
//! snow = 0.55
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tilestream_shared::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CHUNK_SIZE, DEFAULT_PREFETCH_RADIUS, DEFAULT_VIEW_HEIGHT,
    DEFAULT_VIEW_WIDTH,
};

use crate::chunk::MAX_CHUNK_SIZE;
use crate::error::{ConfigError, ConfigResult};
use crate::noise::FractalParams;
use crate::terrain::TerrainThresholds;
use crate::viewport::{worst_case_required, MAX_REQUIRED_CHUNKS};

/// Everything the streaming engine needs besides the seed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Visible width in tiles.
    pub view_width: u32,
    /// Visible height in tiles.
    pub view_height: u32,
    /// Extra ring of chunks kept around the visible ones.
    pub prefetch_radius: u32,
    /// Number of chunks the cache aims to hold.
    pub cache_capacity: usize,
    /// Chunk side length in tiles.
    pub chunk_size: u32,
    /// Fractal noise parameters.
    pub fractal: FractalParams,
    /// Height thresholds for tile classification.
    pub terrain: TerrainThresholds,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            prefetch_radius: DEFAULT_PREFETCH_RADIUS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            fractal: FractalParams::default(),
            terrain: TerrainThresholds::default(),
        }
    }
}

impl StreamingConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or the first
    /// validation failure.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise
    /// as [`StreamingConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Rejects settings that would make streaming meaningless.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.view_width == 0 || self.view_height == 0 {
            return Err(ConfigError::ZeroViewExtent {
                width: self.view_width,
                height: self.view_height,
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge(self.chunk_size));
        }
        let required = worst_case_required(
            self.view_width,
            self.view_height,
            self.prefetch_radius,
            self.chunk_size,
        );
        if required > MAX_REQUIRED_CHUNKS {
            return Err(ConfigError::PrefetchTooLarge { required });
        }
        if self.fractal.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        for (name, value) in [
            ("lacunarity", self.fractal.lacunarity),
            ("gain", self.fractal.gain),
            ("base_frequency", self.fractal.base_frequency),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidFractalParam { name, value });
            }
        }
        if !self.terrain.is_ordered() {
            return Err(ConfigError::UnorderedThresholds {
                water: self.terrain.water,
                rock: self.terrain.rock,
                snow: self.terrain.snow,
            });
        }
        Ok(())
    }
}
