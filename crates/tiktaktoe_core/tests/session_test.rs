//! Tests for the game session turn pipeline.

use tiktaktoe_core::{
    Cell, GameEvent, GameSession, HeuristicPolicy, Outcome, PlayerKind, Players, Position,
    ScheduledTask, SessionStatus, Side, TaskAction,
};

fn session(x: PlayerKind, o: PlayerKind) -> GameSession {
    GameSession::new(Players::new(x, o), HeuristicPolicy::seeded(3))
}

fn humans() -> GameSession {
    session(PlayerKind::Human, PlayerKind::Human)
}

fn only_task(tasks: &[ScheduledTask]) -> ScheduledTask {
    assert_eq!(tasks.len(), 1, "{tasks:?}");
    tasks[0]
}

#[test]
fn test_human_move_places_mark_and_advances() {
    let mut s = humans();
    let report = s.request_move(4);

    assert_eq!(
        report.events(),
        &vec![GameEvent::MarkPlaced {
            position: Position::Center,
            side: Side::X
        }]
    );
    assert!(report.tasks().is_empty());
    assert_eq!(s.state().to_move(), Side::O);
    assert_eq!(*s.status(), SessionStatus::Idle);
}

#[test]
fn test_illegal_moves_are_silent_noops() {
    let mut s = humans();
    s.request_move(4);
    let before = s.state().clone();

    assert!(s.request_move(4).is_empty());
    assert!(s.request_move(42).is_empty());
    assert_eq!(s.state(), &before);
    assert_eq!(*s.status(), SessionStatus::Idle);
}

#[test]
fn test_win_scores_and_schedules_new_game() {
    let mut s = humans();
    for index in [0, 3, 1, 4] {
        s.request_move(index);
    }
    let report = s.request_move(2);

    assert!(!s.state().is_active());
    assert_eq!(s.scoreboard().wins(Side::X), 1);
    assert_eq!(s.scoreboard().wins(Side::O), 0);
    assert!(report.events().contains(&GameEvent::GameOver {
        outcome: Outcome::Win(Side::X),
        message: "X wins!".to_string(),
    }));
    let task = only_task(report.tasks());
    assert_eq!(*task.action(), TaskAction::NewGame);

    // Further input is dropped until the new game starts.
    assert!(s.request_move(8).is_empty());
    assert!(s.state().board().is_empty(Position::BottomRight));

    let report = s.fire(task);
    assert!(report.events().contains(&GameEvent::BoardCleared));
    assert!(s.state().is_active());
    assert_eq!(s.state().to_move(), Side::X);
    assert_eq!(s.scoreboard().wins(Side::X), 1);
}

#[test]
fn test_draw_message_and_no_score() {
    let mut s = humans();
    let mut last = None;
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        last = Some(s.request_move(index));
    }
    let report = last.unwrap();

    assert!(report.events().contains(&GameEvent::GameOver {
        outcome: Outcome::Draw,
        message: "Draw!".to_string(),
    }));
    assert_eq!(s.scoreboard().wins(Side::X), 0);
    assert_eq!(s.scoreboard().wins(Side::O), 0);
    assert_eq!(*s.scoreboard().draws(), 1);
}

#[test]
fn test_computer_reply_is_scheduled_and_fired() {
    let mut s = session(PlayerKind::Human, PlayerKind::Computer);
    let report = s.request_move(0);

    let task = only_task(report.tasks());
    assert_eq!(*task.action(), TaskAction::ComputerMove);
    assert_eq!(*s.status(), SessionStatus::Processing);

    // Human input while the computer is pending is dropped.
    assert!(s.request_move(1).is_empty());
    assert!(s.state().board().is_empty(Position::TopCenter));

    let reply = s.fire(task);
    let placed: Vec<_> = reply
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::MarkPlaced { position, side } => Some((*position, *side)),
            _ => None,
        })
        .collect();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].1, Side::O);
    assert_eq!(s.state().board().get(placed[0].0), Cell::Occupied(Side::O));
    assert_eq!(s.state().to_move(), Side::X);
    assert_eq!(*s.status(), SessionStatus::Idle);
}

#[test]
fn test_requests_on_computer_turn_are_dropped() {
    let mut s = session(PlayerKind::Computer, PlayerKind::Human);
    let report = s.reset();
    assert_eq!(*only_task(report.tasks()).action(), TaskAction::ComputerMove);

    assert!(!s.accepts_human_move());
    assert!(s.request_move(4).is_empty());
    assert!(s.state().history().is_empty());
}

#[test]
fn test_stale_computer_task_discarded_after_reset() {
    let mut s = session(PlayerKind::Human, PlayerKind::Computer);
    let stale = only_task(s.request_move(0).tasks());

    s.reset();
    assert!(s.fire(stale).is_empty());
    assert!(s.state().history().is_empty());
    assert_eq!(s.state().to_move(), Side::X);
}

#[test]
fn test_stale_new_game_task_discarded_after_config_change() {
    let mut s = humans();
    let mut report = Default::default();
    for index in [0, 3, 1, 4, 2] {
        report = s.request_move(index);
    }
    let stale = only_task(report.tasks());

    // Switching O to computer resets immediately; the pending new-game must not reset again.
    s.set_player(Side::O, PlayerKind::Computer);
    s.request_move(4);
    assert!(s.fire(stale).is_empty());
    assert_eq!(s.state().history(), &[Position::Center]);
}

#[test]
fn test_set_player_resets_and_schedules_for_computer_x() {
    let mut s = humans();
    s.request_move(4);
    let report = s.set_player(Side::X, PlayerKind::Computer);

    assert!(report.events().contains(&GameEvent::BoardCleared));
    assert!(s.state().history().is_empty());
    assert!(s.state().is_active());
    assert_eq!(*only_task(report.tasks()).action(), TaskAction::ComputerMove);
    assert_eq!(s.players().kind(Side::X), PlayerKind::Computer);
}

#[test]
fn test_scores_survive_reset_and_clear() {
    let mut s = humans();
    for index in [0, 3, 1, 4, 2] {
        s.request_move(index);
    }
    s.reset();
    assert_eq!(s.scoreboard().wins(Side::X), 1);

    let report = s.clear_scores();
    assert_eq!(s.scoreboard().wins(Side::X), 0);
    assert!(matches!(report.events()[0], GameEvent::ScoresChanged(_)));
}

#[test]
fn test_computer_vs_computer_runs_to_completion() {
    let mut s = session(PlayerKind::Computer, PlayerKind::Computer);
    let mut pending = s.reset().into_parts().1;
    let mut turns = 0;

    while let Some(task) = pending.pop() {
        if *task.action() == TaskAction::NewGame {
            break;
        }
        pending.extend(s.fire(task).into_parts().1);
        turns += 1;
        assert!(turns <= 9);
    }

    assert!(!s.state().is_active());
    let sb = s.scoreboard();
    assert_eq!(s.scoreboard().wins(Side::X) + s.scoreboard().wins(Side::O) + sb.draws(), 1);
}

#[test]
fn test_computer_move_task_fires_only_once() {
    let mut s = session(PlayerKind::Computer, PlayerKind::Computer);
    let first = only_task(s.reset().tasks());

    let report = s.fire(first);
    assert_eq!(s.state().history().len(), 1);
    let second = only_task(report.tasks());
    assert_ne!(second.seq(), first.seq());

    // Replaying the first task must not play O's move.
    assert!(s.fire(first).is_empty());
    assert_eq!(s.state().history().len(), 1);
    assert_eq!(s.state().to_move(), Side::O);

    s.fire(second);
    assert_eq!(s.state().history().len(), 2);
}

#[test]
fn test_epoch_advances_on_reset() {
    let mut s = humans();
    let first = *s.epoch();
    s.reset();
    assert_eq!(*s.epoch(), first.next());
}
