//! Move rejection errors.

use crate::types::Position;
use derive_more::{Display, Error};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveErrorKind {
    /// Index outside 0..=8.
    #[display("index {_0} is off the board")]
    OutOfRange(usize),
    /// The cell already holds a mark.
    #[display("{} is already occupied", _0.label())]
    Occupied(Position),
    /// The game has already ended.
    #[display("game is not active")]
    Inactive,
}

/// An illegal move, with the location that rejected it.
#[derive(Debug, Clone, Display, Error)]
#[display("Illegal move: {} at {}:{}", kind, file, line)]
pub struct MoveError {
    /// What made the move illegal.
    pub kind: MoveErrorKind,
    /// Line number where the move was rejected.
    pub line: u32,
    /// Source file where the move was rejected.
    pub file: &'static str,
}

impl MoveError {
    /// Creates a new move error with caller location tracking.
    #[track_caller]
    pub fn new(kind: MoveErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
