//! Headless computer-vs-computer games.

use derive_getters::Getters;
use derive_more::Display;
use tiktaktoe_core::{
    GameSession, HeuristicPolicy, PlayerKind, Players, ScheduledTask, Side, TaskAction,
};
use tracing::{debug, info, instrument};

/// Tally of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Display)]
#[display("{games} games: X won {x_wins}, O won {o_wins}, {draws} draws")]
pub struct SimulationSummary {
    games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

/// Plays `games` computer-vs-computer games, firing every task immediately.
#[instrument(skip(policy))]
pub fn simulate(games: u32, policy: HeuristicPolicy) -> SimulationSummary {
    info!(smart_probability = policy.smart_probability(), "Starting simulation");
    let mut session = GameSession::new(
        Players::new(PlayerKind::Computer, PlayerKind::Computer),
        policy,
    );

    for game in 0..games {
        let mut pending: Vec<ScheduledTask> = session.reset().into_parts().1;
        while let Some(task) = pending.pop() {
            if *task.action() == TaskAction::NewGame {
                break;
            }
            pending.extend(session.fire(task).into_parts().1);
        }
        debug!(game, history = ?session.state().history(), "Game finished");
    }

    let scores = session.scoreboard();
    let summary = SimulationSummary {
        games,
        x_wins: scores.wins(Side::X),
        o_wins: scores.wins(Side::O),
        draws: *scores.draws(),
    };
    info!(%summary, "Simulation complete");
    summary
}
