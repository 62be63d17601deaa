//! Game session: engine, scoreboard, players and the turn pipeline.

use crate::engine::{GameState, Outcome};
use crate::players::{PlayerKind, Players};
use crate::policy::HeuristicPolicy;
use crate::rules;
use crate::schedule::{COMPUTER_MOVE_DELAY, Epoch, GAME_OVER_DELAY, ScheduledTask, TaskAction};
use crate::scoreboard::Scoreboard;
use crate::types::{Position, Side};
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Re-entrancy state of the session.
///
/// `Processing` covers a turn being resolved and a computer reply that has
/// been scheduled but has not fired yet. Move requests are dropped while in
/// this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum SessionStatus {
    /// Waiting for a human move, or the game is over.
    #[default]
    Idle,
    /// A turn is in flight.
    Processing,
}

/// Notifications for the render surface and score display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A side's mark was written to a cell.
    MarkPlaced {
        /// Cell that was played.
        position: Position,
        /// Who played it.
        side: Side,
    },
    /// The board was reset for a new game.
    BoardCleared,
    /// The game reached a terminal state.
    GameOver {
        /// Win or draw.
        outcome: Outcome,
        /// Message to show, e.g. "X wins!".
        message: String,
    },
    /// Scores changed.
    ScoresChanged(Scoreboard),
}

/// What a session call produced: events to render and tasks to schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct TurnReport {
    events: Vec<GameEvent>,
    tasks: Vec<ScheduledTask>,
}

impl TurnReport {
    /// True when the call was a no-op.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.tasks.is_empty()
    }

    /// Splits the report into events and tasks.
    pub fn into_parts(self) -> (Vec<GameEvent>, Vec<ScheduledTask>) {
        (self.events, self.tasks)
    }

    fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn task(&mut self, task: ScheduledTask) {
        self.tasks.push(task);
    }

    fn extend(&mut self, other: TurnReport) {
        self.events.extend(other.events);
        self.tasks.extend(other.tasks);
    }
}

/// Delays attached to scheduled tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    /// Pause before the computer replies.
    pub computer_delay: Duration,
    /// How long the outcome message is shown before the next game.
    pub game_over_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            computer_delay: COMPUTER_MOVE_DELAY,
            game_over_delay: GAME_OVER_DELAY,
        }
    }
}

/// An owned game session.
///
/// All mutation goes through [`request_move`](Self::request_move) for human
/// input and [`fire`](Self::fire) for scheduled work, so turns are processed
/// one at a time.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    state: GameState,
    scoreboard: Scoreboard,
    players: Players,
    status: SessionStatus,
    epoch: Epoch,
    timing: SessionTiming,
    #[getter(skip)]
    policy: HeuristicPolicy,
    #[getter(skip)]
    next_seq: u64,
    /// Sequence number of the computer move still waiting to fire.
    #[getter(skip)]
    pending_move: Option<u64>,
}

impl GameSession {
    /// Creates a session with a fresh board and zeroed scores.
    ///
    /// If X is computer-controlled, call [`reset`](Self::reset) to get the
    /// opening move scheduled.
    #[instrument(skip(policy))]
    pub fn new(players: Players, policy: HeuristicPolicy) -> Self {
        info!("Creating game session");
        Self {
            state: GameState::new(),
            scoreboard: Scoreboard::new(),
            players,
            status: SessionStatus::Idle,
            epoch: Epoch::default(),
            timing: SessionTiming::default(),
            policy,
            next_seq: 0,
            pending_move: None,
        }
    }

    /// Replaces the task delays.
    pub fn with_timing(mut self, timing: SessionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Whether the input source may submit a move right now.
    pub fn accepts_human_move(&self) -> bool {
        self.status == SessionStatus::Idle
            && self.state.is_active()
            && !self.players.is_computer(self.state.to_move())
    }

    /// Handles a human move request for cell `index`.
    ///
    /// Requests that arrive while a turn is in flight, after the game ended,
    /// or on a computer-controlled turn are dropped. Illegal moves are
    /// rejected without touching the board. Both cases return an empty report.
    #[instrument(skip(self), fields(epoch = %self.epoch, status = %self.status))]
    pub fn request_move(&mut self, index: usize) -> TurnReport {
        if self.status == SessionStatus::Processing {
            debug!("Turn in flight, request dropped");
            return TurnReport::default();
        }
        if !self.state.is_active() {
            debug!("Game over, request dropped");
            return TurnReport::default();
        }
        let side = self.state.to_move();
        if self.players.is_computer(side) {
            debug!(%side, "Computer to move, request dropped");
            return TurnReport::default();
        }

        self.status = SessionStatus::Processing;
        match self.state.apply_move(index) {
            Ok(pos) => self.resolve_turn(pos, side),
            Err(e) => {
                debug!(error = %e, "Illegal move ignored");
                self.status = SessionStatus::Idle;
                TurnReport::default()
            }
        }
    }

    /// Runs a scheduled task.
    ///
    /// Tasks from an earlier epoch are discarded, and a computer move runs
    /// only for the task that scheduled it, once.
    #[instrument(skip(self), fields(epoch = %self.epoch))]
    pub fn fire(&mut self, task: ScheduledTask) -> TurnReport {
        if *task.epoch() != self.epoch {
            debug!(task_epoch = %task.epoch(), "Stale task discarded");
            return TurnReport::default();
        }
        match task.action() {
            TaskAction::ComputerMove if self.pending_move == Some(*task.seq()) => {
                self.pending_move = None;
                self.computer_turn()
            }
            TaskAction::ComputerMove => {
                debug!(seq = *task.seq(), "Computer move already played, task ignored");
                TurnReport::default()
            }
            TaskAction::NewGame if !self.state.is_active() => self.reset(),
            TaskAction::NewGame => {
                debug!("Game already running, new-game task ignored");
                TurnReport::default()
            }
        }
    }

    /// Starts a new game. Scores and players are kept.
    #[instrument(skip(self), fields(epoch = %self.epoch))]
    pub fn reset(&mut self) -> TurnReport {
        self.epoch = self.epoch.next();
        self.state = GameState::new();
        self.status = SessionStatus::Idle;
        self.pending_move = None;
        info!(epoch = %self.epoch, x = %self.players.x, o = %self.players.o, "New game");

        let mut report = TurnReport::default();
        report.event(GameEvent::BoardCleared);
        self.schedule_computer_if_due(&mut report);
        report
    }

    /// Assigns a controller to `side` and starts a new game.
    #[instrument(skip(self))]
    pub fn set_player(&mut self, side: Side, kind: PlayerKind) -> TurnReport {
        self.players.set(side, kind);
        self.reset()
    }

    /// Zeroes the scoreboard.
    #[instrument(skip(self))]
    pub fn clear_scores(&mut self) -> TurnReport {
        self.scoreboard.clear();
        let mut report = TurnReport::default();
        report.event(GameEvent::ScoresChanged(self.scoreboard));
        report
    }

    /// Plays for the computer side if the game is still waiting on it.
    fn computer_turn(&mut self) -> TurnReport {
        if !self.state.is_active() {
            debug!("Game over before computer move fired");
            self.status = SessionStatus::Idle;
            return TurnReport::default();
        }
        let side = self.state.to_move();
        if !self.players.is_computer(side) {
            debug!(%side, "Side is no longer computer-controlled");
            self.status = SessionStatus::Idle;
            return TurnReport::default();
        }

        self.status = SessionStatus::Processing;
        if rules::is_full(self.state.board()) {
            return self.conclude(Outcome::Draw);
        }
        let Some(pos) = self.policy.select_move(self.state.board(), side) else {
            return self.conclude(Outcome::Draw);
        };
        match self.state.apply_move(pos.to_index()) {
            Ok(pos) => self.resolve_turn(pos, side),
            Err(e) => {
                warn!(error = %e, "Computer move rejected");
                self.status = SessionStatus::Idle;
                TurnReport::default()
            }
        }
    }

    /// Finishes the turn that just placed `side` at `pos`.
    fn resolve_turn(&mut self, pos: Position, side: Side) -> TurnReport {
        let mut report = TurnReport::default();
        report.event(GameEvent::MarkPlaced {
            position: pos,
            side,
        });

        let outcome = self.state.check_terminal();
        if outcome.is_terminal() {
            report.extend(self.conclude(outcome));
            return report;
        }

        self.state.advance_turn();
        self.status = SessionStatus::Idle;
        self.schedule_computer_if_due(&mut report);
        report
    }

    /// Applies the terminal side effects for `outcome`.
    fn conclude(&mut self, outcome: Outcome) -> TurnReport {
        self.state.finish(outcome);
        self.status = SessionStatus::Idle;
        match outcome {
            Outcome::Win(winner) => self.scoreboard.record_win(winner),
            Outcome::Draw => self.scoreboard.record_draw(),
            Outcome::Ongoing => {}
        }
        info!(%outcome, "Game over");

        let mut report = TurnReport::default();
        report.event(GameEvent::ScoresChanged(self.scoreboard));
        report.event(GameEvent::GameOver {
            outcome,
            message: outcome.to_string(),
        });
        let seq = self.take_seq();
        report.task(ScheduledTask::new(
            TaskAction::NewGame,
            self.epoch,
            seq,
            self.timing.game_over_delay,
        ));
        report
    }

    fn schedule_computer_if_due(&mut self, report: &mut TurnReport) {
        if self.state.is_active() && self.players.is_computer(self.state.to_move()) {
            debug!(side = %self.state.to_move(), "Scheduling computer move");
            self.status = SessionStatus::Processing;
            let seq = self.take_seq();
            self.pending_move = Some(seq);
            report.task(ScheduledTask::new(
                TaskAction::ComputerMove,
                self.epoch,
                seq,
                self.timing.computer_delay,
            ));
        }
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer_o() -> GameSession {
        GameSession::new(
            Players::new(PlayerKind::Human, PlayerKind::Computer),
            HeuristicPolicy::seeded(5),
        )
    }

    /// Plays `moves` straight into the engine, alternating sides, without
    /// any terminal check.
    fn play_raw(session: &mut GameSession, moves: &[usize]) {
        for &index in moves {
            session.state.apply_move(index).unwrap();
            session.state.advance_turn();
        }
    }

    fn pending_computer_move(session: &mut GameSession) -> ScheduledTask {
        let mut report = TurnReport::default();
        session.schedule_computer_if_due(&mut report);
        let (_, tasks) = report.into_parts();
        assert_eq!(tasks.len(), 1, "{tasks:?}");
        tasks[0]
    }

    #[test]
    fn test_full_board_on_computer_turn_is_a_draw() {
        let mut s = computer_o();
        // X O X / X O O / O X X, no line, O left to move.
        play_raw(&mut s, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(s.state.to_move(), Side::O);
        assert!(s.state.is_active());
        let task = pending_computer_move(&mut s);

        let report = s.fire(task);

        assert!(report.events().contains(&GameEvent::GameOver {
            outcome: Outcome::Draw,
            message: "Draw!".to_string(),
        }));
        assert!(
            !report
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::MarkPlaced { .. }))
        );
        assert_eq!(s.state.history().len(), 9);
        assert!(!s.state.is_active());
        assert_eq!(s.status, SessionStatus::Idle);
        assert_eq!(*s.scoreboard.draws(), 1);
    }

    #[test]
    fn test_computer_move_after_game_over_does_nothing() {
        let mut s = computer_o();
        play_raw(&mut s, &[4]);
        let task = pending_computer_move(&mut s);
        s.state.finish(Outcome::Draw);
        let before = s.state.clone();

        assert!(s.fire(task).is_empty());
        assert_eq!(s.state, before);
        assert_eq!(s.status, SessionStatus::Idle);
    }

    #[test]
    fn test_computer_move_for_side_now_human_does_nothing() {
        let mut s = computer_o();
        let (_, tasks) = s.request_move(4).into_parts();
        assert_eq!(s.status, SessionStatus::Processing);
        s.players.set(Side::O, PlayerKind::Human);
        let before = s.state.clone();

        assert!(s.fire(tasks[0]).is_empty());
        assert_eq!(s.state, before);
        assert_eq!(s.status, SessionStatus::Idle);
        assert!(s.accepts_human_move());
    }
}
