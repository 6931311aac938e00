//! # Streaming Error Types
//!
//! Nothing in steady-state streaming can fail: noise, classification, key
//! packing and cache lookups are total. The only errors are configuration
//! mistakes, and those are rejected at construction time.

use thiserror::Error;

/// Errors raised while building or loading a streaming configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The cache could never hold a single chunk.
    #[error("cache capacity must be at least 1 chunk")]
    ZeroCapacity,

    /// The viewport has no area.
    #[error("view extent must be non-zero: got {width}x{height}")]
    ZeroViewExtent {
        /// Configured width in tiles.
        width: u32,
        /// Configured height in tiles.
        height: u32,
    },

    /// Chunks must contain at least one tile.
    #[error("chunk size must be at least 1 tile")]
    ZeroChunkSize,

    /// Chunk size too large for 32-bit world coordinates to stay meaningful.
    #[error("chunk size {0} exceeds the maximum of {max}", max = crate::chunk::MAX_CHUNK_SIZE)]
    ChunkSizeTooLarge(u32),

    /// The view plus prefetch ring spans too many chunks to stream per tick.
    #[error(
        "view and prefetch radius may require {required} chunks per tick, more than the maximum of {max}",
        max = crate::viewport::MAX_REQUIRED_CHUNKS
    )]
    PrefetchTooLarge {
        /// Worst-case chunks required by the rejected settings.
        required: u64,
    },

    /// Fractal noise needs at least one octave.
    #[error("fractal noise needs at least 1 octave")]
    ZeroOctaves,

    /// A fractal parameter is zero, negative, NaN or infinite.
    #[error("fractal parameter `{name}` must be finite and positive, got {value}")]
    InvalidFractalParam {
        /// Parameter name as written in the config file.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Terrain thresholds must satisfy `water < rock < snow`.
    #[error("terrain thresholds out of order: water {water}, rock {rock}, snow {snow}")]
    UnorderedThresholds {
        /// Sea below this height.
        water: f64,
        /// Rock above this height.
        rock: f64,
        /// Snow at or above this height.
        snow: f64,
    },

    /// The config file could not be parsed.
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
