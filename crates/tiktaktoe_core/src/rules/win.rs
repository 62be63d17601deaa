//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Position, Side};
use tracing::instrument;

/// The eight lines that win the game: three rows, three columns, two diagonals.
pub const WIN_PATTERNS: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks whether `side` holds all three cells of any win pattern.
#[instrument(level = "trace")]
pub fn completes_line(board: &Board, side: Side) -> bool {
    let mark = Cell::Occupied(side);
    WIN_PATTERNS
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == mark))
}

/// Returns the side holding a complete line, if any.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Side> {
    [Side::X, Side::O]
        .into_iter()
        .find(|&side| completes_line(board, side))
}

/// Finds an empty cell where `side` would complete a line.
///
/// Cells are scanned in index order and the first hit is returned.
#[instrument(level = "trace")]
pub fn winning_cell(board: &Board, side: Side) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|&pos| completes_line(&board.with_mark(pos, side), side))
}
