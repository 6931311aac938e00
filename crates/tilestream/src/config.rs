//! # Explorer Configuration
//!
//! One TOML file drives the whole client. The `[streaming]` table is handed
//! to the engine unchanged; everything else shapes the agent and the loop.
//!
//! ```toml
//! seed = 42
//! tick_millis = 33
//! keep_probability = 0.55
//! spawn = { x = 1, y = 1 }
//!
//! [direction_weights]
//! right = 2
//! left = 1
//! down = 2
//! up = 2
//!
//! [streaming]
//! cache_capacity = 64
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tilestream_procedural::StreamingConfig;
use tilestream_shared::{TilePos, DEFAULT_TICK_MILLIS};

use crate::agent::DirWeights;
use crate::error::{ExplorerError, ExplorerResult};

/// Client settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Fixed world seed. `None` picks one from the clock at startup.
    pub seed: Option<u64>,
    /// Milliseconds between ticks.
    pub tick_millis: u64,
    /// Chance the agent keeps its last direction.
    pub keep_probability: f64,
    /// Relative odds of each direction when not keeping the last one.
    pub direction_weights: DirWeights,
    /// Where the agent starts.
    pub spawn: TilePos,
    /// Engine settings.
    pub streaming: StreamingConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_millis: DEFAULT_TICK_MILLIS,
            keep_probability: 0.55,
            direction_weights: DirWeights::default(),
            spawn: TilePos::new(1, 1),
            streaming: StreamingConfig::default(),
        }
    }
}

impl ExplorerConfig {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Parse failures and anything [`ExplorerConfig::validate`] rejects.
    pub fn from_toml_str(text: &str) -> ExplorerResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// [`ExplorerError::Io`] if the file cannot be read, otherwise as
    /// [`ExplorerConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ExplorerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the client fields, then the streaming table.
    ///
    /// # Errors
    ///
    /// The first invalid setting.
    pub fn validate(&self) -> ExplorerResult<()> {
        if self.tick_millis == 0 {
            return Err(ExplorerError::ZeroTickInterval);
        }
        if !(0.0..=1.0).contains(&self.keep_probability) {
            return Err(ExplorerError::InvalidKeepProbability(self.keep_probability));
        }
        if self.direction_weights.sum() == 0 {
            return Err(ExplorerError::ZeroDirectionWeights);
        }
        self.streaming.validate()?;
        Ok(())
    }

    /// Tick interval as a duration.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}
