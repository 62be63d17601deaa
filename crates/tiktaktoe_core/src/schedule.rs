//! Deferred work requested by the session.
//!
//! The session never sleeps. It hands back [`ScheduledTask`]s and the host
//! runs each one after its delay by passing it to
//! [`GameSession::fire`](crate::GameSession::fire). Every task carries the
//! epoch of the game that created it, so a task that outlives a reset is
//! recognised and dropped. Tasks are also numbered, which lets the session
//! run a given computer move at most once.

use derive_getters::Getters;
use derive_more::Display;
use std::time::Duration;

/// Default pause before the computer answers, so the previous mark renders first.
pub const COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(500);

/// How long the outcome message stays up before a new game starts.
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(2000);

/// Generation number of a game instance. Bumped on every reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct Epoch(pub u64);

impl Epoch {
    /// The following epoch.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TaskAction {
    /// Let the move policy play for the computer side.
    ComputerMove,
    /// Dismiss the outcome and start the next game.
    NewGame,
}

/// A task to run after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ScheduledTask {
    action: TaskAction,
    epoch: Epoch,
    seq: u64,
    delay: Duration,
}

impl ScheduledTask {
    /// Creates task number `seq` bound to `epoch`.
    pub fn new(action: TaskAction, epoch: Epoch, seq: u64, delay: Duration) -> Self {
        Self {
            action,
            epoch,
            seq,
            delay,
        }
    }
}
