//! # Terrain Seam Test
//!
//! Chunks are generated independently; the world must still read as one
//! continuous field across chunk borders.

use tilestream_procedural::{
    Chunk, ChunkCoord, ChunkGenerator, FractalParams, TerrainThresholds, TileType, WorldSeed,
};

/// Test: Generation order does not change a chunk's tiles.
#[test]
fn test_generation_order_independent() {
    let gen = ChunkGenerator::new(WorldSeed::new(42));
    let coords = [
        ChunkCoord::new(0, 0),
        ChunkCoord::new(1, 0),
        ChunkCoord::new(0, 1),
        ChunkCoord::new(-1, -1),
    ];

    let forward: Vec<Chunk> = coords.iter().map(|&c| gen.generate(c)).collect();
    let backward: Vec<Chunk> = coords.iter().rev().map(|&c| gen.generate(c)).collect();

    for (a, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(a.coord(), b.coord());
        assert_eq!(a.tiles(), b.tiles());
    }
}

/// Test: Every tile of a chunk matches the world-space lookup, including the
/// edges shared with neighbours.
#[test]
fn test_chunk_tiles_match_world_lookup() {
    let gen = ChunkGenerator::new(WorldSeed::new(7));
    let size = gen.chunk_size();

    for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-1, 0), ChunkCoord::new(3, -5)] {
        let chunk = gen.generate(coord);
        for ly in 0..size {
            for lx in 0..size {
                let wx = coord.origin_x(size) + i64::from(lx);
                let wy = coord.origin_y(size) + i64::from(ly);
                assert_eq!(chunk.tile_at(lx, ly), Some(gen.tile_at_world(wx, wy)));
            }
        }
    }
}

/// Test: Heights on both sides of a border are close, so terrain has no cliffs
/// at chunk edges.
#[test]
fn test_heights_continuous_across_border() {
    let gen = ChunkGenerator::new(WorldSeed::new(42));
    let mut worst = 0.0f64;

    for y in -200..200i64 {
        // x = -1 | 0 is the border between chunk -1 and chunk 0
        let step = (gen.height_at(0, y) - gen.height_at(-1, y)).abs();
        worst = worst.max(step);
    }

    assert!(worst < 0.25, "border step too large: {worst}");
}

/// Test: A chunk size that does not divide the view still tiles seamlessly.
#[test]
fn test_odd_chunk_size_seamless() {
    let seed = WorldSeed::new(3);
    let small = ChunkGenerator::with_params(
        seed,
        17,
        FractalParams::default(),
        TerrainThresholds::default(),
    );
    let large = ChunkGenerator::new(seed);

    for wy in -40..40i64 {
        for wx in -40..40i64 {
            assert_eq!(small.tile_at_world(wx, wy), large.tile_at_world(wx, wy));
        }
    }
}

/// Test: The default world mixes land and sea over a wide area.
#[test]
fn test_default_world_has_land_and_sea() {
    let gen = ChunkGenerator::new(WorldSeed::new(42));
    let mut totals = [0usize; 4];

    for cy in -6..6 {
        for cx in -6..6 {
            let hist = gen.generate(ChunkCoord::new(cx, cy)).histogram();
            for (total, count) in totals.iter_mut().zip(hist) {
                *total += count;
            }
        }
    }

    for tile in [TileType::Grass, TileType::Sea] {
        assert!(totals[tile as usize] > 0, "no {tile:?} in 144 chunks");
    }
}
