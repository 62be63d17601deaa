//! Tests for the computer move policy.

use tiktaktoe_core::{Board, HeuristicPolicy, Position, SMART_MOVE_PROBABILITY, Side};

fn smart(seed: u64) -> HeuristicPolicy {
    HeuristicPolicy::seeded(seed).with_smart_probability(1.0)
}

fn random(seed: u64) -> HeuristicPolicy {
    HeuristicPolicy::seeded(seed).with_smart_probability(0.0)
}

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

#[test]
fn test_default_probability() {
    assert_eq!(HeuristicPolicy::seeded(0).smart_probability(), SMART_MOVE_PROBABILITY);
    assert_eq!(SMART_MOVE_PROBABILITY, 0.75);
}

#[test]
fn test_probability_is_clamped() {
    assert_eq!(HeuristicPolicy::seeded(0).with_smart_probability(3.0).smart_probability(), 1.0);
    assert_eq!(HeuristicPolicy::seeded(0).with_smart_probability(-1.0).smart_probability(), 0.0);
}

#[test]
fn test_smart_blocks_opponent_line() {
    let b = board("XX. ... ...");
    for seed in 0..20 {
        assert_eq!(smart(seed).select_move(&b, Side::O), Some(Position::TopRight));
    }
}

#[test]
fn test_smart_prefers_win_over_block() {
    let b = board("XX. OO. ...");
    for seed in 0..20 {
        assert_eq!(smart(seed).select_move(&b, Side::X), Some(Position::TopRight));
        assert_eq!(smart(seed).select_move(&b, Side::O), Some(Position::MiddleRight));
    }
}

#[test]
fn test_smart_opening_is_corner_or_center() {
    let b = Board::new();
    for seed in 0..50 {
        let pos = smart(seed).select_move(&b, Side::X).unwrap();
        assert!(Position::OPENINGS.contains(&pos), "{pos:?}");
    }
}

#[test]
fn test_smart_takes_free_center() {
    let b = board("X.. ... ...");
    for seed in 0..20 {
        assert_eq!(smart(seed).select_move(&b, Side::O), Some(Position::Center));
    }
}

#[test]
fn test_smart_falls_back_to_corner_then_edge() {
    // Center taken, no threats: a free corner is chosen.
    let b = board("... .X. ...");
    for seed in 0..20 {
        let pos = smart(seed).select_move(&b, Side::O).unwrap();
        assert!(Position::CORNERS.contains(&pos), "{pos:?}");
    }

    // X O X / . X . / O X O: no threats for either side and only edges remain.
    let b = board("XOX .X. OXO");
    for seed in 0..20 {
        let pos = smart(seed).select_move(&b, Side::O).unwrap();
        assert!(Position::EDGES.contains(&pos), "{pos:?}");
    }
}

#[test]
fn test_never_selects_occupied_cell() {
    let b = board("XO. .X. O..");
    for seed in 0..200 {
        let mut policy = HeuristicPolicy::seeded(seed);
        let pos = policy.select_move(&b, Side::O).unwrap();
        assert!(b.is_empty(pos), "seed {seed} picked {pos:?}");
    }
}

#[test]
fn test_single_empty_cell_always_selected() {
    let b = board("XOX XOO OX.");
    for seed in 0..50 {
        assert_eq!(smart(seed).select_move(&b, Side::X), Some(Position::BottomRight));
        assert_eq!(random(seed).select_move(&b, Side::X), Some(Position::BottomRight));
        assert_eq!(
            HeuristicPolicy::seeded(seed).select_move(&b, Side::X),
            Some(Position::BottomRight)
        );
    }
}

#[test]
fn test_full_board_yields_none() {
    let b = board("XOX XOO OXX");
    assert_eq!(smart(1).select_move(&b, Side::O), None);
    assert_eq!(random(1).select_move(&b, Side::O), None);
}

#[test]
fn test_random_branch_covers_empty_cells() {
    let b = board("X.. ... ...");
    let mut policy = random(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(policy.select_move(&b, Side::O).unwrap());
    }
    assert_eq!(seen.len(), 8);
    assert!(!seen.contains(&Position::TopLeft));
}

#[test]
fn test_seeded_policy_is_reproducible() {
    let b = board("X.. ... ..O");
    let picks = |seed| {
        let mut policy = HeuristicPolicy::seeded(seed);
        (0..20)
            .map(|_| policy.select_move(&b, Side::X))
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(9), picks(9));
}
