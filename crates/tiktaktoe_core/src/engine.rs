//! Board/turn engine.
//!
//! [`GameState`] owns the board, the side to move and the active flag. A turn
//! is three explicit steps: [`GameState::apply_move`] writes the mark,
//! [`GameState::check_terminal`] inspects the result, and either
//! [`GameState::finish`] or [`GameState::advance_turn`] closes it out.

use crate::error::{MoveError, MoveErrorKind};
use crate::rules;
use crate::types::{Board, Cell, Position, Side};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of evaluating the board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// No line completed and empty cells remain.
    #[display("in progress")]
    Ongoing,
    /// The side completed a line.
    #[display("{_0} wins!")]
    Win(Side),
    /// Board full without a completed line.
    #[display("Draw!")]
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    to_move: Side,
    active: bool,
    history: Vec<Position>,
}

impl GameState {
    /// Creates a fresh game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Side::X,
            active: true,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side whose turn it is.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Whether moves are still accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Positions played so far, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Writes the side to move into the cell at `index`.
    ///
    /// The turn is not advanced; call [`check_terminal`](Self::check_terminal)
    /// first and then [`advance_turn`](Self::advance_turn) or
    /// [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Rejects out-of-range indices, occupied cells and moves on an inactive
    /// game. The board is untouched on error.
    #[instrument(skip(self), fields(side = %self.to_move))]
    pub fn apply_move(&mut self, index: usize) -> Result<Position, MoveError> {
        if !self.active {
            return Err(MoveError::new(MoveErrorKind::Inactive));
        }
        let pos = Position::from_index(index)
            .ok_or_else(|| MoveError::new(MoveErrorKind::OutOfRange(index)))?;
        if !self.board.is_empty(pos) {
            return Err(MoveError::new(MoveErrorKind::Occupied(pos)));
        }

        self.board.set(pos, Cell::Occupied(self.to_move));
        self.history.push(pos);
        debug!(position = pos.label(), "Mark placed");
        Ok(pos)
    }

    /// Evaluates the board for the side that just moved.
    ///
    /// A win is checked before a draw, so a full board with a completed line
    /// is a win.
    #[instrument(skip(self), fields(side = %self.to_move))]
    pub fn check_terminal(&self) -> Outcome {
        if rules::completes_line(&self.board, self.to_move) {
            Outcome::Win(self.to_move)
        } else if rules::is_draw(&self.board) {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Hands the turn to the other side.
    #[instrument(skip(self))]
    pub fn advance_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    /// Marks the game as over. No further moves are accepted.
    #[instrument(skip(self))]
    pub fn finish(&mut self, outcome: Outcome) {
        debug!(%outcome, "Game finished");
        self.active = false;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
