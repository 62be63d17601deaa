//! Terminal UI for tiktaktoe.

mod app;
mod input;
mod ui;

use crate::config::AppConfig;
use anyhow::Result;
use app::{App, Control};
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Instant;
use tiktaktoe_core::ScheduledTask;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument, warn};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// How long to wait for terminal input before checking timers again.
const INPUT_POLL: Duration = Duration::from_millis(30);

/// Runs the terminal UI until the user quits.
#[instrument(skip_all)]
pub async fn run_tui(config: AppConfig) -> Result<()> {
    info!("Starting tiktaktoe TUI");

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let res = run_game(&mut terminal, &config).await;
    drop(terminal);
    drop(guard);

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Keeps the terminal in raw mode with the alternate screen and mouse
/// capture on. Dropping it restores the terminal, including on early return
/// or panic.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        debug!("Restoring terminal");
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "Failed to leave raw mode");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show) {
            warn!(error = %err, "Failed to restore terminal screen");
        }
    }
}

/// Event loop: draw, read input, run due tasks.
async fn run_game(terminal: &mut Term, config: &AppConfig) -> Result<()> {
    let (task_tx, mut task_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config);

    loop {
        for task in app.take_scheduled() {
            schedule(task, &task_tx);
        }

        let mut cells = Default::default();
        terminal.draw(|f| cells = ui::draw(f, &app))?;
        app.set_cell_areas(cells);

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code) == Control::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        while let Ok(task) = task_rx.try_recv() {
            app.fire(task);
        }

        // Yield so timer tasks get to run on the runtime.
        tokio::task::yield_now().await;
    }
}

/// Hands `task` back to the event loop once its delay has passed.
fn schedule(task: ScheduledTask, tx: &mpsc::UnboundedSender<ScheduledTask>) {
    debug!(?task, "Scheduling task");
    let tx = tx.clone();
    tokio::spawn(async move {
        sleep(*task.delay()).await;
        if tx.send(task).is_err() {
            debug!("Event loop gone, task dropped");
        }
    });
}
