//! Explorer error types.

use thiserror::Error;
use tilestream_procedural::ConfigError;

/// Errors that stop the explorer.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Streaming settings were rejected.
    #[error("streaming config: {0}")]
    Streaming(#[from] ConfigError),

    /// Explorer config file was not valid TOML.
    #[error("failed to parse explorer config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Keep probability outside `[0, 1]`.
    #[error("keep_probability must be within [0, 1], got {0}")]
    InvalidKeepProbability(f64),

    /// All direction weights are zero.
    #[error("direction weights must not all be zero")]
    ZeroDirectionWeights,

    /// Tick interval of zero milliseconds.
    #[error("tick_millis must be at least 1")]
    ZeroTickInterval,

    /// Reading config or writing frames failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;
