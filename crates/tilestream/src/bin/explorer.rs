//! # Tilestream Explorer
//!
//! Watches an agent wander an endless generated world.
//!
//! ```bash
//! # Random world, runs until Ctrl-C
//! explorer
//!
//! # Reproducible run of 1000 ticks with debug logs kept out of the frame
//! RUST_LOG=debug explorer --seed 42 --ticks 1000 2> explorer.log
//!
//! # Settings from a file
//! explorer --config explorer.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use tilestream::{Explorer, ExplorerConfig, ExplorerResult};
use tilestream_procedural::WorldSeed;

/// Command line.
#[derive(Parser, Debug)]
#[command(name = "explorer", version, about = "Explore an endless streamed tile world")]
struct Cli {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()))
}

fn run(cli: Cli) -> ExplorerResult<()> {
    let config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    let seed = WorldSeed::new(cli.seed.or(config.seed).unwrap_or_else(clock_seed));

    let mut explorer = Explorer::new(&config, seed)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    explorer.run(&mut out, cli.ticks)?;
    Ok(())
}

fn main() -> ExitCode {
    // Stdout carries the frame; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "explorer failed");
            eprintln!("explorer: {e}");
            ExitCode::FAILURE
        }
    }
}
