//! Win counts that survive across games.

use crate::types::Side;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Wins per side plus draws.
///
/// Only a win is credited to a side; draws are tallied separately for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins for the given side.
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::X => self.x_wins,
            Side::O => self.o_wins,
        }
    }

    /// Credits a win to `side`.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, side: Side) {
        match side {
            Side::X => self.x_wins += 1,
            Side::O => self.o_wins += 1,
        }
        info!(x = self.x_wins, o = self.o_wins, "Score updated");
    }

    /// Counts a drawn game.
    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    /// Zeroes every count.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
