//! Application state and input dispatch.

use super::input::{self, Direction, TapTracker};
use crate::config::AppConfig;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{self, Rect};
use std::time::Instant;
use tiktaktoe_core::{GameEvent, GameSession, Position, ScheduledTask, Side, TurnReport};
use tracing::{debug, info, instrument};

/// What the event loop should do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the UI.
    Quit,
}

/// Main application state.
///
/// Owns the game session plus the purely visual state around it: cursor,
/// outcome popup, status line and the screen areas of the cells.
#[derive(Debug)]
pub struct App {
    session: GameSession,
    cursor: Position,
    popup: Option<String>,
    status_message: String,
    taps: TapTracker,
    cell_areas: [Rect; 9],
    scheduled: Vec<ScheduledTask>,
}

impl App {
    /// Creates the app and starts the first game.
    #[instrument(skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        let session = GameSession::new(config.players(), config.policy()).with_timing(config.timing());
        let mut app = Self {
            session,
            cursor: Position::Center,
            popup: None,
            status_message: String::new(),
            taps: TapTracker::new(config.tap_threshold()),
            cell_areas: [Rect::default(); 9],
            scheduled: Vec::new(),
        };
        let report = app.session.reset();
        app.apply(report);
        app
    }

    /// Gets the game session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Gets the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the outcome popup text, while one is shown.
    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Records where each cell was drawn, for mouse hit-testing.
    pub fn set_cell_areas(&mut self, areas: [Rect; 9]) {
        self.cell_areas = areas;
    }

    /// Takes the tasks the host still has to schedule.
    pub fn take_scheduled(&mut self) -> Vec<ScheduledTask> {
        std::mem::take(&mut self.scheduled)
    }

    /// Runs a task whose delay has elapsed.
    #[instrument(skip(self))]
    pub fn fire(&mut self, task: ScheduledTask) {
        let report = self.session.fire(task);
        self.apply(report);
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, code: KeyCode) -> Control {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Control::Quit;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = input::digit_to_position(c) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            KeyCode::Up => self.cursor = input::move_cursor(self.cursor, Direction::Up),
            KeyCode::Down => self.cursor = input::move_cursor(self.cursor, Direction::Down),
            KeyCode::Left => self.cursor = input::move_cursor(self.cursor, Direction::Left),
            KeyCode::Right => self.cursor = input::move_cursor(self.cursor, Direction::Right),
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            KeyCode::Char('x') | KeyCode::Char('X') => self.toggle_player(Side::X),
            KeyCode::Char('o') | KeyCode::Char('O') => self.toggle_player(Side::O),
            KeyCode::Char('r') => {
                let report = self.session.reset();
                self.apply(report);
            }
            KeyCode::Char('c') => {
                let report = self.session.clear_scores();
                self.apply(report);
            }
            _ => {}
        }
        Control::Continue
    }

    /// Handles a mouse event; a quick press and release on one cell plays it.
    pub fn handle_mouse(&mut self, event: MouseEvent, at: Instant) {
        let cell = self.cell_at(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => match cell {
                Some(cell) if self.session.accepts_human_move() => {
                    self.cursor = cell;
                    self.taps.press(cell, at);
                }
                _ => self.taps.cancel(),
            },
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(cell) = self.taps.release(cell, at) {
                    self.play(cell);
                }
            }
            MouseEventKind::Drag(_) => self.taps.cancel(),
            _ => {}
        }
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let point = layout::Position::new(column, row);
        self.cell_areas
            .iter()
            .position(|area| area.contains(point))
            .and_then(Position::from_index)
    }

    /// Submits a move for the human side, if it is a human's turn.
    fn play(&mut self, pos: Position) {
        if !self.session.accepts_human_move() {
            debug!(position = pos.label(), "Not accepting a human move now");
            return;
        }
        let report = self.session.request_move(pos.to_index());
        self.apply(report);
    }

    fn toggle_player(&mut self, side: Side) {
        let kind = self.session.players().kind(side).toggle();
        info!(%side, %kind, "Player changed");
        let report = self.session.set_player(side, kind);
        self.apply(report);
    }

    /// Applies session events to the visual state and queues its tasks.
    fn apply(&mut self, report: TurnReport) {
        let (events, tasks) = report.into_parts();
        for event in events {
            debug!(?event, "Handling game event");
            match event {
                GameEvent::MarkPlaced { position, side } => {
                    self.status_message = format!("{} played {}", side, position.label());
                }
                GameEvent::BoardCleared => {
                    self.popup = None;
                    self.taps.cancel();
                    self.status_message = "New game. X moves first.".to_string();
                }
                GameEvent::GameOver { message, .. } => {
                    self.status_message = message.clone();
                    self.popup = Some(message);
                }
                GameEvent::ScoresChanged(_) => {}
            }
        }
        self.scheduled.extend(tasks);
    }
}
