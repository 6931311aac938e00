//! # Explorer Walk Integration Test
//!
//! Drives the full client (agent, camera, streaming, renderer) for long
//! runs and checks the world it leaves behind.

use tilestream::{is_passable, Explorer, ExplorerConfig, ExplorerError};
use tilestream_procedural::{ChunkGenerator, ConfigError, TileType, WorldSeed};

fn fast_config() -> ExplorerConfig {
    ExplorerConfig {
        tick_millis: 1,
        ..ExplorerConfig::default()
    }
}

/// Test: A long wander keeps the cache at capacity and the agent on land.
#[test]
fn test_long_wander_stays_bounded() {
    let mut explorer = Explorer::new(&fast_config(), WorldSeed::new(2024)).unwrap();
    let gen = ChunkGenerator::new(WorldSeed::new(2024));

    for _ in 0..5_000 {
        let report = explorer.step();
        assert!(!report.over_capacity);
        assert!(report.resident <= 64);

        let pos = explorer.agent().pos();
        let tile = explorer.world().tile_at_world(pos.x, pos.y);
        assert!(tile.is_some(), "agent at {pos} on an unstreamed tile");
        if explorer.summary().moves > 0 {
            assert_ne!(gen.tile_at_world(i64::from(pos.x), i64::from(pos.y)), TileType::Sea);
        }
    }

    let summary = explorer.summary();
    assert_eq!(summary.ticks, 5_000);
    println!(
        "moves: {}, blocked: {}, generated: {}",
        summary.moves,
        summary.blocked,
        explorer.world().cache().stats().generated
    );
}

/// Test: The agent's neighbours are judged against the live world.
#[test]
fn test_passability_follows_stream() {
    let explorer = Explorer::new(&fast_config(), WorldSeed::new(5)).unwrap();
    let pos = explorer.agent().pos();

    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let n = pos.step(dx, dy);
        let tile = explorer.world().tile_at_world(n.x, n.y).unwrap();
        assert_eq!(is_passable(explorer.world(), n), tile != TileType::Sea);
    }
}

/// Test: Running with a tick limit writes one frame per tick.
#[test]
fn test_run_writes_frames() {
    let mut explorer = Explorer::new(&fast_config(), WorldSeed::new(42)).unwrap();
    let mut out = Vec::new();
    let summary = explorer.run(&mut out, Some(20)).unwrap();

    assert_eq!(summary.ticks, 20);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("Seed: 42").count(), 20);
    assert_eq!(text.matches('@').count(), 20);
}

/// Test: A config file drives the whole client.
#[test]
fn test_config_file_round() {
    let path = std::env::temp_dir().join("tilestream_explorer_walk_test.toml");
    std::fs::write(
        &path,
        "seed = 77\ntick_millis = 1\nspawn = { x = 500, y = -500 }\n\n[streaming]\nprefetch_radius = 1\ncache_capacity = 20\n",
    )
    .unwrap();

    let config = ExplorerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let seed = WorldSeed::new(config.seed.unwrap());
    let mut explorer = Explorer::new(&config, seed).unwrap();
    assert_eq!(explorer.world().cache().len(), 16);

    for _ in 0..200 {
        let report = explorer.step();
        assert!(report.required <= 16);
        assert!(report.resident <= 20);
    }
}

/// Test: Invalid settings are rejected before anything runs.
#[test]
fn test_invalid_config_rejected() {
    let config = ExplorerConfig {
        keep_probability: -0.1,
        ..ExplorerConfig::default()
    };
    assert!(matches!(
        Explorer::new(&config, WorldSeed::new(1)),
        Err(ExplorerError::InvalidKeepProbability(_))
    ));
}

/// Test: A prefetch ring too large to stream fails at construction, not on the first tick.
#[test]
fn test_oversized_prefetch_rejected() {
    let err = ExplorerConfig::from_toml_str("[streaming]\nprefetch_radius = 4294967295\n").unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::Streaming(ConfigError::PrefetchTooLarge { .. })
    ));

    let mut config = fast_config();
    config.streaming.prefetch_radius = 200;
    assert!(matches!(
        Explorer::new(&config, WorldSeed::new(1)),
        Err(ExplorerError::Streaming(ConfigError::PrefetchTooLarge { .. }))
    ));
}
