//! Tic-tac-toe turn engine and a beatable computer opponent.
//!
//! # Architecture
//!
//! - **Engine**: [`GameState`] owns the board, side to move and active flag,
//!   and rejects illegal moves with a [`MoveError`].
//! - **Rules**: pure win/draw checks over a [`Board`].
//! - **Policy**: [`HeuristicPolicy`] picks computer moves, mostly by heuristic
//!   and sometimes at random.
//! - **Session**: [`GameSession`] ties the engine to a [`Scoreboard`], the
//!   [`Players`] assignment and deferred [`ScheduledTask`]s.
//!
//! # Example
//!
//! ```
//! use tiktaktoe_core::{GameSession, HeuristicPolicy, PlayerKind, Players};
//!
//! let players = Players::new(PlayerKind::Human, PlayerKind::Computer);
//! let mut session = GameSession::new(players, HeuristicPolicy::seeded(7));
//!
//! // X (human) takes the center; the computer reply comes back as a task.
//! let report = session.request_move(4);
//! let task = report.tasks()[0];
//! let reply = session.fire(task);
//! assert!(!reply.events().is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod players;
mod policy;
pub mod rules;
mod schedule;
mod scoreboard;
mod session;
mod types;

pub use engine::{GameState, Outcome};
pub use error::{MoveError, MoveErrorKind};
pub use players::{PlayerKind, Players};
pub use policy::{Branch, HeuristicPolicy, SMART_MOVE_PROBABILITY};
pub use schedule::{COMPUTER_MOVE_DELAY, Epoch, GAME_OVER_DELAY, ScheduledTask, TaskAction};
pub use scoreboard::Scoreboard;
pub use session::{GameEvent, GameSession, SessionStatus, SessionTiming, TurnReport};
pub use types::{Board, BoardParseError, Cell, Position, Side};
