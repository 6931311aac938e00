//! # Wandering Agent
//!
//! A biased random walk over the tile grid:
//!
//! 1. With probability `keep_probability` the agent keeps its last heading
//! 2. Otherwise it draws a heading from the direction weights
//! 3. Candidates are tried in order: choice, its opposite, then the rest
//!    in the fixed order Right, Left, Down, Up
//! 4. The first passable neighbour wins; if none is, the agent stays put
//!
//! The agent owns a single seeded RNG that it advances in place, so a
//! given seed always produces the same walk over the same world.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tilestream_procedural::WorldSeed;
use tilestream_shared::TilePos;

/// Purpose tag mixed into the world seed for the agent's RNG stream.
pub const AGENT_STREAM: u64 = 0x4147_454E_545F_5741;

/// A grid heading. Y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    /// +x
    Right,
    /// -x
    Left,
    /// +y
    Down,
    /// -y
    Up,
}

impl Dir {
    /// Every heading, in the fixed fallback order.
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Unit step `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// The reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

/// Relative odds of each heading in a weighted draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirWeights {
    /// Weight of [`Dir::Right`].
    pub right: u32,
    /// Weight of [`Dir::Left`].
    pub left: u32,
    /// Weight of [`Dir::Down`].
    pub down: u32,
    /// Weight of [`Dir::Up`].
    pub up: u32,
}

impl Default for DirWeights {
    fn default() -> Self {
        Self {
            right: 2,
            left: 1,
            down: 2,
            up: 2,
        }
    }
}

impl DirWeights {
    /// Total weight.
    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.right + self.left + self.down + self.up
    }

    /// Draws a heading in proportion to the weights.
    ///
    /// All-zero weights fall back to a uniform draw.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Dir {
        let total = self.sum();
        if total == 0 {
            return Dir::ALL[rng.gen_range(0..Dir::ALL.len())];
        }

        let mut r = rng.gen_range(0..total);
        for (dir, weight) in [
            (Dir::Right, self.right),
            (Dir::Left, self.left),
            (Dir::Down, self.down),
        ] {
            if r < weight {
                return dir;
            }
            r -= weight;
        }
        Dir::Up
    }
}

/// The wandering agent.
#[derive(Clone, Debug)]
pub struct Agent {
    pos: TilePos,
    last_dir: Dir,
    keep_probability: f64,
    weights: DirWeights,
    rng: ChaCha8Rng,
}

impl Agent {
    /// Spawns an agent at `spawn`, its RNG derived from the world seed.
    ///
    /// The starting heading is drawn uniformly.
    #[must_use]
    pub fn new(spawn: TilePos, seed: WorldSeed, keep_probability: f64, weights: DirWeights) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(AGENT_STREAM).value());
        let last_dir = Dir::ALL[rng.gen_range(0..Dir::ALL.len())];
        Self {
            pos: spawn,
            last_dir,
            keep_probability,
            weights,
            rng,
        }
    }

    /// Current tile.
    #[inline]
    #[must_use]
    pub const fn pos(&self) -> TilePos {
        self.pos
    }

    /// Heading of the last successful move (or the starting heading).
    #[inline]
    #[must_use]
    pub const fn last_dir(&self) -> Dir {
        self.last_dir
    }

    /// Draws this step's candidate order. Advances the RNG.
    pub fn try_order(&mut self) -> [Dir; 4] {
        let first = if self.rng.gen::<f64>() < self.keep_probability {
            self.last_dir
        } else {
            self.weights.pick(&mut self.rng)
        };
        let second = first.opposite();

        let mut order = [first, second, first, first];
        let mut rest = Dir::ALL.into_iter().filter(|&d| d != first && d != second);
        for slot in &mut order[2..] {
            if let Some(d) = rest.next() {
                *slot = d;
            }
        }
        order
    }

    /// Steps to the first passable neighbour in [`Agent::try_order`].
    ///
    /// Returns false, leaving the agent in place, when boxed in.
    pub fn try_move<F>(&mut self, mut is_passable: F) -> bool
    where
        F: FnMut(TilePos) -> bool,
    {
        for dir in self.try_order() {
            let (dx, dy) = dir.delta();
            let next = self.pos.step(dx, dy);
            if is_passable(next) {
                self.pos = next;
                self.last_dir = dir;
                return true;
            }
        }
        false
    }
}
