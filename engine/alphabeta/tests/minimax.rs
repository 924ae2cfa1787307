//! Alpha-beta must agree with plain minimax on deterministic games.

use alphabeta::{AlphaBeta, AlphaBetaConfig};
use engine_core::{value_for, GameAction, GameState, PlayerId};
use games_toy::{Nim, NimEvaluator};

fn minimax(state: &Nim, depth: u32, root: PlayerId) -> f64 {
    if depth == 0 || state.is_terminal() {
        return value_for(&NimEvaluator, state, root);
    }
    let values = state.legal_actions().into_iter().map(|action| {
        let mut child = state.clone();
        action.apply_seeded(&mut child, 0);
        minimax(&child, depth - 1, root)
    });
    if state.acting_player() == root {
        values.fold(f64::NEG_INFINITY, f64::max)
    } else {
        values.fold(f64::INFINITY, f64::min)
    }
}

fn engine(use_tt: bool) -> AlphaBeta<Nim, NimEvaluator> {
    let config = AlphaBetaConfig::for_testing().with_transposition_table(use_tt);
    AlphaBeta::new(config, NimEvaluator).with_seed(11)
}

#[test]
fn test_full_depth_matches_minimax_with_and_without_table() {
    for pile in 1..=12 {
        let state = Nim::new(pile);
        let expected = minimax(&state, pile, 0);

        let without = engine(false).evaluate_to_depth(&state, pile).unwrap();
        let with = engine(true).evaluate_to_depth(&state, pile).unwrap();

        assert!((without - expected).abs() < 1e-12, "pile {pile}: {without} vs {expected}");
        assert!((with - expected).abs() < 1e-12, "pile {pile}: {with} vs {expected}");
    }
}

#[test]
fn test_depth_limited_matches_minimax_without_table() {
    for pile in [7, 10, 13] {
        let state = Nim::new(pile);
        for depth in 1..=5 {
            let expected = minimax(&state, depth, 0);
            let value = engine(false).evaluate_to_depth(&state, depth).unwrap();
            assert!(
                (value - expected).abs() < 1e-12,
                "pile {pile} depth {depth}: {value} vs {expected}"
            );
        }
    }
}

#[test]
fn test_depth_limited_matches_minimax_with_table() {
    // Within four plies a Nim transposition is always met first at the
    // deeper ply, so the later visit finds an entry searched to a smaller
    // depth and must search it again rather than trust it.
    for pile in [7, 10, 13] {
        let state = Nim::new(pile);
        for depth in 1..=4 {
            let expected = minimax(&state, depth, 0);
            let mut engine = engine(true);
            let value = engine.evaluate_to_depth(&state, depth).unwrap();
            assert!(
                (value - expected).abs() < 1e-12,
                "pile {pile} depth {depth}: {value} vs {expected}"
            );
            assert!(!engine.transposition_table().is_empty());
        }
    }
}

#[test]
fn test_shallow_entries_are_not_trusted() {
    // A table holding only depth-1 results must not leak them into a
    // deeper search of the same position.
    let state = Nim::new(6);
    let mut warm = engine(true);
    let shallow = warm.evaluate_to_depth(&state, 1).unwrap();
    let deep = warm.evaluate_to_depth(&state, 6).unwrap();

    assert!((shallow - minimax(&state, 1, 0)).abs() < 1e-12);
    assert!((deep - minimax(&state, 6, 0)).abs() < 1e-12);
    assert!((shallow - deep).abs() > 1e-6);
}

#[test]
fn test_iterative_deepening_matches_minimax() {
    for pile in [5, 9, 10] {
        let state = Nim::new(pile);
        let expected = minimax(&state, pile, 0);

        let config = AlphaBetaConfig::for_testing().with_max_depth(pile);
        let result = AlphaBeta::new(config, NimEvaluator)
            .with_seed(5)
            .search(&state, None)
            .unwrap();

        assert_eq!(result.depth, pile);
        assert!((result.value - expected).abs() < 1e-12);
    }
}

#[test]
fn test_table_survives_repeated_searches() {
    // A warm table from earlier, shallower searches must not change the
    // full-depth answer.
    let mut engine = engine(true);
    let state = Nim::new(11);
    for depth in 1..=4 {
        engine.evaluate_to_depth(&state, depth).unwrap();
    }
    let value = engine.evaluate_to_depth(&state, 11).unwrap();
    assert!((value - minimax(&state, 11, 0)).abs() < 1e-12);
}
