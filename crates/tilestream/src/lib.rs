//! # Tilestream Explorer
//!
//! A terminal client for the streamed tile world: an agent wanders at
//! random, the camera follows it, and the world streams in around the
//! camera one tick at a time.
//!
//! ```text
//!  ┌──────────┐ move  ┌──────────┐ follow ┌──────────┐ tick  ┌─────────────────────┐
//!  │  Agent   │──────>│ TilePos  │───────>│  Camera  │──────>│ StreamingController │
//!  └──────────┘       └──────────┘        └──────────┘       └──────────┬──────────┘
//!       ^  passable?                                                    │
//!       └───────────────────────────────────────────────────────────────┤
//!                                                                       v
//!                                                              ┌─────────────────┐
//!                                                              │ FrameRenderer   │──> stdout
//!                                                              └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `agent`: biased random walk with one owned RNG
//! - `camera`: the view centre
//! - `config`: TOML settings for the client and the engine
//! - `game_loop`: tick orchestration and cadence
//! - `render`: glyphs and frame output

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod agent;
pub mod camera;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod render;

pub use agent::{Agent, Dir, DirWeights, AGENT_STREAM};
pub use camera::Camera;
pub use config::ExplorerConfig;
pub use error::{ExplorerError, ExplorerResult};
pub use game_loop::{is_passable, Cadence, Explorer, RunSummary, MAX_CATCH_UP_TICKS};
pub use render::{draw_view, glyph, FrameRenderer};
