//! Tiktaktoe - terminal tic-tac-toe against humans or the computer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod simulate;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use std::path::{Path, PathBuf};
use tiktaktoe_core::PlayerKind;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tiktaktoe=debug,tiktaktoe_core=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play {
            player_x,
            player_o,
            seed,
            log_file,
        } => run_play(config, player_x, player_o, seed, log_file).await,
        Command::Simulate {
            games,
            seed,
            smart_probability,
        } => run_simulate(config, games, seed, smart_probability),
    }
}

/// Run the terminal UI.
async fn run_play(
    mut config: AppConfig,
    player_x: Option<PlayerKind>,
    player_o: Option<PlayerKind>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    if let Some(kind) = player_x {
        config = config.with_player_x(kind);
    }
    if let Some(kind) = player_o {
        config = config.with_player_o(kind);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(path) = log_file {
        config = config.with_log_file(path);
    }

    initialize_file_tracing(config.log_file())?;
    info!(?config, "Configuration resolved");
    tui::run_tui(config).await
}

/// Run headless computer-vs-computer games and print the tally.
#[instrument(skip(config))]
fn run_simulate(
    mut config: AppConfig,
    games: u32,
    seed: Option<u64>,
    smart_probability: Option<f64>,
) -> Result<()> {
    initialize_stderr_tracing();

    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(probability) = smart_probability {
        anyhow::ensure!(
            (0.0..=1.0).contains(&probability),
            "smart probability must be between 0 and 1, got {probability}"
        );
        config = config.with_smart_probability(probability);
    }

    let summary = simulate::simulate(games, config.policy());
    println!("{summary}");
    Ok(())
}

/// Logs to a file so output never lands on the UI's terminal.
fn initialize_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn initialize_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
