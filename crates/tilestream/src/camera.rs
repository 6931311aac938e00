//! Camera that tracks the agent.

use tilestream_shared::{TilePos, WorldPos};

/// The point the view is centred on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pos: WorldPos,
}

impl Camera {
    /// Creates a camera looking at `pos`.
    #[must_use]
    pub const fn new(pos: WorldPos) -> Self {
        Self { pos }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn pos(&self) -> WorldPos {
        self.pos
    }

    /// Moves to an arbitrary position.
    pub fn set(&mut self, pos: WorldPos) {
        self.pos = pos;
    }

    /// Snaps onto a tile.
    pub fn follow(&mut self, tile: TilePos) {
        self.pos = WorldPos::from(tile);
    }
}
