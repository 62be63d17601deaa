//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). They never mutate state, so
//! the engine and the move policy share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_PATTERNS, check_winner, completes_line, winning_cell};
