//! # Terminal Renderer
//!
//! Draws the camera's view rectangle as text, one glyph per tile:
//!
//! | Tile        | Glyph |
//! |-------------|-------|
//! | Grass       | `.`   |
//! | Sea         | `~`   |
//! | Rock        | `^`   |
//! | Snow        | `*`   |
//! | not streamed| ` `   |
//! | agent       | `@`   |
//!
//! The screen is cleared once, before the first frame. Every frame after
//! that homes the cursor and overwrites the previous one in place.

use std::io::{self, Write};

use tilestream_procedural::{StreamingController, TileType};
use tilestream_shared::{TilePos, WorldPos};

/// ANSI: clear the whole screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// ANSI: move the cursor to the top-left corner.
pub const CURSOR_HOME: &str = "\x1b[H";
/// ANSI: erase from the cursor to the end of the line.
const ERASE_LINE: &str = "\x1b[K";

/// Glyph drawn on the agent's tile.
pub const AGENT_GLYPH: char = '@';
/// Glyph for tiles whose chunk is not resident.
pub const UNSTREAMED_GLYPH: char = ' ';

/// Glyph for a tile type.
#[must_use]
pub const fn glyph(tile: TileType) -> char {
    match tile {
        TileType::Grass => '.',
        TileType::Sea => '~',
        TileType::Rock => '^',
        TileType::Snow => '*',
    }
}

/// Builds the tile grid for the view around `camera`.
///
/// Returns `view_height` lines of `view_width` glyphs, each ending in `\n`.
#[must_use]
pub fn draw_view(world: &StreamingController, camera: WorldPos, agent: TilePos) -> String {
    let rect = world.tracker().world_rect(camera);
    let mut out = String::with_capacity((rect.width() as usize + 1) * rect.height() as usize);

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let ch = if agent == TilePos::new(x, y) {
                AGENT_GLYPH
            } else {
                world.tile_at_world(x, y).map_or(UNSTREAMED_GLYPH, glyph)
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Stateful frame writer.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    frames: u64,
}

impl FrameRenderer {
    /// Creates a renderer that has not drawn anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: 0 }
    }

    /// Frames written so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Full frame text: control prefix, tile grid, status lines.
    #[must_use]
    pub fn compose(&self, world: &StreamingController, camera: WorldPos, agent: TilePos) -> String {
        let mut frame = String::new();
        if self.frames == 0 {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(CURSOR_HOME);
        frame.push_str(&draw_view(world, camera, agent));

        let cache = world.cache();
        let stats = cache.stats();
        frame.push_str(&format!("Seed: {}{ERASE_LINE}\n", world.seed()));
        frame.push_str(&format!("Agent: {agent}{ERASE_LINE}\n"));
        frame.push_str(&format!(
            "Chunks: {}/{} resident, {} generated, {} evicted{ERASE_LINE}\n",
            cache.len(),
            cache.capacity(),
            stats.generated,
            stats.evicted,
        ));
        frame
    }

    /// Writes one frame and flushes.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn render<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        world: &StreamingController,
        camera: WorldPos,
        agent: TilePos,
    ) -> io::Result<()> {
        let frame = self.compose(world, camera, agent);
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestream_procedural::{StreamingConfig, WorldSeed};

    fn world() -> StreamingController {
        let mut world =
            StreamingController::new(WorldSeed::new(42), &StreamingConfig::default()).unwrap();
        world.tick(WorldPos::ORIGIN);
        world
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph(TileType::Grass), '.');
        assert_eq!(glyph(TileType::Sea), '~');
        assert_eq!(glyph(TileType::Rock), '^');
        assert_eq!(glyph(TileType::Snow), '*');
    }

    #[test]
    fn test_view_dimensions_and_agent() {
        let world = world();
        let view = draw_view(&world, WorldPos::ORIGIN, TilePos::new(0, 0));
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines.len(), 42);
        assert!(lines.iter().all(|l| l.chars().count() == 56));

        // Rect starts at (-28, -21), so the origin is row 21, column 28
        assert_eq!(lines[21].chars().nth(28), Some(AGENT_GLYPH));
        assert_eq!(view.matches(AGENT_GLYPH).count(), 1);
    }

    #[test]
    fn test_view_matches_world_tiles() {
        let world = world();
        let view = draw_view(&world, WorldPos::ORIGIN, TilePos::new(1000, 1000));

        for (row, line) in view.lines().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let x = -28 + col as i32;
                let y = -21 + row as i32;
                let tile = world.tile_at_world(x, y).unwrap();
                assert_eq!(ch, glyph(tile));
            }
        }
    }

    #[test]
    fn test_unstreamed_tiles_are_blank() {
        let world = world();
        let view = draw_view(&world, WorldPos::new(100_000.0, 0.0), TilePos::new(0, 0));
        assert!(view.lines().all(|l| l.chars().all(|c| c == UNSTREAMED_GLYPH)));
    }

    #[test]
    fn test_status_lines_follow_grid() {
        let world = world();
        let frame = FrameRenderer::new().compose(&world, WorldPos::ORIGIN, TilePos::new(1, 1));
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), 42 + 3);
        assert_eq!(lines[42], "Seed: 42\x1b[K");
        assert_eq!(lines[43], "Agent: (1, 1)\x1b[K");
        assert_eq!(
            lines[44],
            "Chunks: 64/64 resident, 64 generated, 0 evicted\x1b[K"
        );
        assert!(frame.ends_with("\x1b[K\n"));
    }

    #[test]
    fn test_first_frame_clears_screen_once() {
        let world = world();
        let mut renderer = FrameRenderer::new();
        let mut out = Vec::new();

        renderer
            .render(&mut out, &world, WorldPos::ORIGIN, TilePos::new(1, 1))
            .unwrap();
        let first = String::from_utf8(out.clone()).unwrap();
        assert!(first.starts_with("\x1b[2J\x1b[H"));
        assert!(first.contains("Seed: 42"));
        assert!(first.contains("Agent: (1, 1)"));
        assert!(first.contains("Chunks: 64/64 resident, 64 generated, 0 evicted"));

        out.clear();
        renderer
            .render(&mut out, &world, WorldPos::ORIGIN, TilePos::new(1, 1))
            .unwrap();
        let second = String::from_utf8(out).unwrap();
        assert!(second.starts_with("\x1b[H"));
        assert!(!second.contains("\x1b[2J"));
        assert_eq!(renderer.frames(), 2);
    }
}
