//! # Explorer Loop
//!
//! ```text
//! Tick N:
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. MOVE     agent.try_move(passable)                         │
//! │ 2. FOLLOW   camera snaps onto the agent                      │
//! │ 3. STREAM   world.tick(camera)  (generate, pin, evict)       │
//! │ 4. RENDER   frame to stdout                                  │
//! │ 5. WAIT     sleep until the next tick boundary               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tick boundaries sit on a fixed grid. A late tick runs the next one
//! immediately instead of sleeping, so short stalls are caught up. A
//! stall longer than [`MAX_CATCH_UP_TICKS`] restarts the grid from now.

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use tilestream_procedural::{StreamingController, TickReport, TileType, WorldSeed};
use tilestream_shared::TilePos;

use crate::agent::Agent;
use crate::camera::Camera;
use crate::config::ExplorerConfig;
use crate::error::ExplorerResult;
use crate::render::FrameRenderer;

/// How many ticks behind the loop may fall before it stops catching up.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Whether the agent may stand on a tile.
///
/// Sea is impassable, and so is anything not streamed in yet.
#[must_use]
pub fn is_passable(world: &StreamingController, tile: TilePos) -> bool {
    matches!(world.tile_at_world(tile.x, tile.y), Some(t) if t != TileType::Sea)
}

/// Fixed-interval schedule with bounded catch-up.
#[derive(Clone, Copy, Debug)]
pub struct Cadence {
    interval: Duration,
    next: Instant,
}

impl Cadence {
    /// First boundary is one interval after `start`.
    #[must_use]
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start + interval,
        }
    }

    /// Next tick boundary.
    #[must_use]
    pub const fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Called after a tick finished at `now`.
    ///
    /// Returns how long to sleep, or `None` if the tick ran late and the
    /// next one should start right away.
    pub fn advance(&mut self, now: Instant) -> Option<Duration> {
        let deadline = self.next;
        self.next += self.interval;

        if now < deadline {
            return Some(deadline - now);
        }

        let behind = now - deadline;
        if behind > self.interval * MAX_CATCH_UP_TICKS {
            warn!(
                behind_ms = behind.as_millis() as u64,
                "explorer fell too far behind; resetting tick schedule"
            );
            self.next = now + self.interval;
        }
        None
    }
}

/// Totals for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Ticks in which the agent moved.
    pub moves: u64,
    /// Ticks in which the agent was boxed in.
    pub blocked: u64,
    /// Ticks that finished after their deadline.
    pub late: u64,
}

/// The whole client: world, agent, camera, renderer.
pub struct Explorer {
    world: StreamingController,
    agent: Agent,
    camera: Camera,
    renderer: FrameRenderer,
    tick_interval: Duration,
    summary: RunSummary,
}

impl Explorer {
    /// Builds the explorer and streams in the spawn area.
    ///
    /// # Errors
    ///
    /// Any config validation failure.
    pub fn new(config: &ExplorerConfig, seed: WorldSeed) -> ExplorerResult<Self> {
        config.validate()?;

        let mut world = StreamingController::new(seed, &config.streaming)?;
        let agent = Agent::new(
            config.spawn,
            seed,
            config.keep_probability,
            config.direction_weights,
        );
        let mut camera = Camera::default();
        camera.follow(agent.pos());
        let initial = world.tick(camera.pos());

        info!(
            seed = %seed,
            spawn = %config.spawn,
            chunks = initial.resident,
            "explorer ready"
        );

        Ok(Self {
            world,
            agent,
            camera,
            renderer: FrameRenderer::new(),
            tick_interval: config.tick_interval(),
            summary: RunSummary::default(),
        })
    }

    /// The streamed world.
    #[must_use]
    pub const fn world(&self) -> &StreamingController {
        &self.world
    }

    /// The agent.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Counters so far.
    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Moves the agent, follows it with the camera and streams the world.
    pub fn step(&mut self) -> TickReport {
        let world = &self.world;
        let moved = self.agent.try_move(|tile| is_passable(world, tile));
        if moved {
            self.summary.moves += 1;
        } else {
            self.summary.blocked += 1;
            debug!(pos = %self.agent.pos(), "agent boxed in");
        }

        self.camera.follow(self.agent.pos());
        self.summary.ticks += 1;
        self.world.tick(self.camera.pos())
    }

    /// Renders the current state.
    ///
    /// # Errors
    ///
    /// Write failures on `out`.
    pub fn draw<W: Write + ?Sized>(&mut self, out: &mut W) -> ExplorerResult<()> {
        self.renderer
            .render(out, &self.world, self.camera.pos(), self.agent.pos())?;
        Ok(())
    }

    /// Runs the loop, drawing to `out`, until `max_ticks` (forever if `None`).
    ///
    /// # Errors
    ///
    /// Stops at the first failed write.
    pub fn run<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        max_ticks: Option<u64>,
    ) -> ExplorerResult<RunSummary> {
        let mut cadence = Cadence::new(self.tick_interval, Instant::now());
        let start = self.summary.ticks;

        while max_ticks.map_or(true, |limit| self.summary.ticks - start < limit) {
            self.step();
            self.draw(out)?;

            match cadence.advance(Instant::now()) {
                Some(wait) => std::thread::sleep(wait),
                None => self.summary.late += 1,
            }
        }

        let stats = self.world.cache().stats();
        info!(
            ticks = self.summary.ticks,
            moves = self.summary.moves,
            blocked = self.summary.blocked,
            late = self.summary.late,
            generated = stats.generated,
            evicted = stats.evicted,
            "explorer stopped"
        );
        Ok(self.summary)
    }
}
