#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Pixel Adventure experience.

mod config;
mod game;
mod input;
mod terminal;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use pixel_adventure_rendering::RenderingBackend;
use pixel_adventure_system_bootstrap::Bootstrap;
use pixel_adventure_world::query;

use crate::{config::GameConfig, game::Game, input::parse_script, terminal::TerminalBackend};

/// Explore a generated tile map from the terminal.
#[derive(Debug, Parser)]
#[command(name = "pixel-adventure", version)]
struct CliArgs {
    /// TOML file with game settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for map generation and encounter rolls.
    #[arg(long)]
    seed: Option<u64>,
    /// Map width in tiles.
    #[arg(long)]
    width: Option<u32>,
    /// Map height in tiles.
    #[arg(long)]
    height: Option<u32>,
    /// Held keys per poll tick, e.g. `ddw[wd]..`; read from stdin when absent.
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,
    /// Print the generated map as JSON and exit.
    #[arg(long)]
    dump_map: bool,
}

impl CliArgs {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.map.width = width;
        }
        if let Some(height) = self.height {
            config.map.height = height;
        }
    }
}

/// Entry point for the Pixel Adventure command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut config = GameConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let mut game = Game::start(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.dump_map {
        let grid = query::tile_grid(game.world()).context("no map has been generated")?;
        serde_json::to_writer_pretty(&mut out, grid).context("failed to write map")?;
        writeln!(out)?;
        return Ok(());
    }

    let script = match args.moves {
        Some(script) => script,
        None => io::read_to_string(io::stdin()).context("failed to read moves from stdin")?,
    };
    let frames = parse_script(&script).context("invalid move script")?;

    writeln!(out, "{}", Bootstrap.welcome_banner(game.world()))?;
    let presentation = game.presentation()?;
    TerminalBackend::new(frames, config.poll_interval(), out).run(
        presentation,
        move |elapsed, keys, presentation| {
            if let Some(outcome) = game.tick(elapsed, keys, presentation)? {
                if let Some(reason) = outcome.rejection {
                    tracing::info!(?reason, position = %outcome.position, "move refused");
                }
            }
            Ok(())
        },
    )
}
