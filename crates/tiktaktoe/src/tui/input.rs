//! Keyboard and pointer input handling.

use derive_new::new;
use std::time::{Duration, Instant};
use tiktaktoe_core::Position;
use tracing::trace;

/// Direction keys for moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

/// Moves the cursor one cell, stopping at the board edge.
pub fn move_cursor(cursor: Position, direction: Direction) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => ((row + 1).min(2), col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, (col + 1).min(2)),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Maps a digit key `1`-`9` to the corresponding cell.
pub fn digit_to_position(c: char) -> Option<Position> {
    let digit = c.to_digit(10)? as usize;
    digit.checked_sub(1).and_then(Position::from_index)
}

/// Turns pointer press/release pairs into single taps.
///
/// A release counts as a tap only when it lands on the pressed cell within
/// the threshold. Drags and slow presses are discarded, and each press yields
/// at most one tap.
#[derive(Debug, Clone, new)]
pub struct TapTracker {
    threshold: Duration,
    #[new(default)]
    pressed: Option<(Position, Instant)>,
}

impl TapTracker {
    /// Records a press on `cell`.
    pub fn press(&mut self, cell: Position, at: Instant) {
        self.pressed = Some((cell, at));
    }

    /// Completes the gesture, returning the tapped cell if it qualifies.
    pub fn release(&mut self, cell: Option<Position>, at: Instant) -> Option<Position> {
        let (pressed_cell, pressed_at) = self.pressed.take()?;
        let held = at.saturating_duration_since(pressed_at);
        if cell != Some(pressed_cell) {
            trace!(?pressed_cell, ?cell, "Released off the pressed cell");
            return None;
        }
        if held >= self.threshold {
            trace!(?held, "Press too long for a tap");
            return None;
        }
        Some(pressed_cell)
    }

    /// Abandons the current gesture.
    pub fn cancel(&mut self) {
        self.pressed = None;
    }
}
