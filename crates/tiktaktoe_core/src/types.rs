//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// One of the two sides in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Side {
    /// Side X (always moves first).
    X,
    /// Side O.
    O,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell holds a side's mark.
    Occupied(Side),
}

/// A position on the board, row-major from the top-left corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// The four corners.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// The four edge midpoints.
    pub const EDGES: [Position; 4] = [
        Position::TopCenter,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::BottomCenter,
    ];

    /// Corners plus the center, the preferred cells for an opening move.
    pub const OPENINGS: [Position; 5] = [
        Position::TopLeft,
        Position::TopRight,
        Position::Center,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Converts a board index (0-8) to a position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Returns the board index (0-8) of this position.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks whether the position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::iter().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Returns a copy of this board with `side` placed at `pos`.
    pub fn with_mark(&self, pos: Position, side: Side) -> Self {
        let mut board = *self;
        board.set(pos, Cell::Occupied(side));
        board
    }
}

impl std::fmt::Display for Board {
    /// Renders the board with empty cells numbered 1-9.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Empty => write!(f, "{}", i + 1)?,
                Cell::Occupied(side) => write!(f, "{}", side)?,
            }
            if i % 3 < 2 {
                write!(f, "|")?;
            } else if i < 8 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error returned when a board string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board {input:?}: {reason}")]
pub struct BoardParseError {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells written as `X`, `O`, `.` or `_`; whitespace and `|` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| BoardParseError {
            input: s.to_string(),
            reason,
        };
        let mut cells = [Cell::Empty; 9];
        let mut count = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let cell = match ch {
                'X' | 'x' => Cell::Occupied(Side::X),
                'O' | 'o' => Cell::Occupied(Side::O),
                '.' | '_' => Cell::Empty,
                _ => return Err(fail("unexpected character")),
            };
            if count == 9 {
                return Err(fail("more than nine cells"));
            }
            cells[count] = cell;
            count += 1;
        }
        if count != 9 {
            return Err(fail("fewer than nine cells"));
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_index_roundtrip() {
        for (i, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "XX. O.. ...".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Cell::Occupied(Side::X));
        assert_eq!(board.get(Position::MiddleLeft), Cell::Occupied(Side::O));
        assert_eq!(board.empty_positions().len(), 6);
    }

    #[test]
    fn test_parse_board_rejects_short_input() {
        assert!("XO".parse::<Board>().is_err());
        assert!("XO.......X".parse::<Board>().is_err());
        assert!("XO.......?".parse::<Board>().is_err());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = Board::new().with_mark(Position::Center, Side::O);
        assert_eq!(board.to_string(), "1|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
