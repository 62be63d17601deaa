//! Command-line interface for tiktaktoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tiktaktoe_core::PlayerKind;

/// Tiktaktoe - tic-tac-toe in the terminal against humans or the computer
#[derive(Parser, Debug)]
#[command(name = "tiktaktoe")]
#[command(about = "Terminal tic-tac-toe with a beatable computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "tiktaktoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Controller of X (human or computer)
        #[arg(short = 'x', long)]
        player_x: Option<PlayerKind>,

        /// Controller of O (human or computer)
        #[arg(short = 'o', long)]
        player_o: Option<PlayerKind>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Log file (the terminal is taken by the UI)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Play computer-vs-computer games without a UI and print the tally
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Override the smart-branch probability (0.0-1.0)
        #[arg(long)]
        smart_probability: Option<f64>,
    },
}
