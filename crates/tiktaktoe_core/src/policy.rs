//! Computer move selection.
//!
//! The computer is deliberately beatable. Most turns go through the smart
//! branch (win, block, then center/corner/edge preference), and the rest pick
//! a uniformly random empty cell.

use crate::rules;
use crate::types::{Board, Position, Side};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace};

/// Chance that a computer turn uses the smart branch.
pub const SMART_MOVE_PROBABILITY: f64 = 0.75;

/// Which branch produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Branch {
    /// Heuristic play.
    Smart,
    /// Uniform pick among empty cells.
    Random,
}

/// Heuristic move policy with its own random source.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    smart_probability: f64,
    rng: StdRng,
}

impl HeuristicPolicy {
    /// Creates a policy seeded from OS entropy.
    #[instrument]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Creates a policy with a fixed seed, for reproducible play.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            smart_probability: SMART_MOVE_PROBABILITY,
            rng,
        }
    }

    /// Overrides the smart-branch probability. Values are clamped to [0, 1].
    pub fn with_smart_probability(mut self, probability: f64) -> Self {
        self.smart_probability = if probability.is_nan() {
            SMART_MOVE_PROBABILITY
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Returns the smart-branch probability.
    pub fn smart_probability(&self) -> f64 {
        self.smart_probability
    }

    /// Picks a cell for `side`.
    ///
    /// Returns `None` only when the board has no empty cell, which callers
    /// treat as a draw.
    #[instrument(skip(self, board), fields(%side))]
    pub fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            debug!("No empty cells, nothing to select");
            return None;
        }

        let branch = if self.rng.random_bool(self.smart_probability) {
            Branch::Smart
        } else {
            Branch::Random
        };
        let choice = match branch {
            Branch::Smart => self.smart_move(board, side),
            Branch::Random => self.random_move(board),
        };
        debug!(%branch, position = ?choice, "Computer move selected");
        choice
    }

    /// Heuristic branch: opening, win, block, then strategic fallback.
    #[instrument(skip(self, board), fields(%side))]
    pub fn smart_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return None;
        }

        if empty.len() == 9 {
            trace!("Opening move");
            return Position::OPENINGS.choose(&mut self.rng).copied();
        }

        if let Some(pos) = rules::winning_cell(board, side) {
            trace!(position = pos.label(), "Winning move");
            return Some(pos);
        }

        if let Some(pos) = rules::winning_cell(board, side.opponent()) {
            trace!(position = pos.label(), "Blocking move");
            return Some(pos);
        }

        self.strategic_move(&empty)
    }

    /// Uniform pick among empty cells.
    #[instrument(skip(self, board))]
    pub fn random_move(&mut self, board: &Board) -> Option<Position> {
        board.empty_positions().choose(&mut self.rng).copied()
    }

    /// Center, then a random free corner, then a random free edge.
    fn strategic_move(&mut self, empty: &[Position]) -> Option<Position> {
        if empty.contains(&Position::Center) {
            return Some(Position::Center);
        }

        let free = |group: &[Position]| -> Vec<Position> {
            group.iter().copied().filter(|p| empty.contains(p)).collect()
        };

        let corners = free(&Position::CORNERS);
        if let Some(pos) = corners.choose(&mut self.rng) {
            return Some(*pos);
        }

        free(&Position::EDGES).choose(&mut self.rng).copied()
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}
