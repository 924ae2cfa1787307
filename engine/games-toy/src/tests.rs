use super::*;
use engine_core::{Evaluator, GameAction, GameState, ZobristTable};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_nim_legal_actions() {
    assert_eq!(
        Nim::new(5).legal_actions(),
        vec![NimAction::Take(1), NimAction::Take(2), NimAction::Take(3)]
    );
    assert_eq!(Nim::new(2).legal_actions().len(), 2);
    assert!(Nim::new(0).legal_actions().is_empty());
    assert_eq!(Nim::with_gamble(2).legal_actions().last(), Some(&NimAction::Gamble));
}

#[test]
fn test_nim_last_take_wins() {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let mut state = Nim::new(4);
    NimAction::Take(1).apply(&mut state, &mut rng);
    assert_eq!(state.acting_player(), 1);

    NimAction::Take(3).apply(&mut state, &mut rng);
    assert!(state.is_terminal());
    assert_eq!(state.winner(), Some(1));
    assert_eq!(state.acting_player(), 1);
    assert!((NimEvaluator.evaluate(&state) - 1.0).abs() < 1e-12);
}

#[test]
fn test_nim_gamble_never_overdraws() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    for _ in 0..50 {
        let mut state = Nim::with_gamble(1);
        NimAction::Gamble.apply(&mut state, &mut rng);
        assert_eq!(state.pile(), 0);
        assert_eq!(state.winner(), Some(0));
    }
}

#[test]
fn test_nim_evaluator_heuristic() {
    assert!((NimEvaluator.evaluate(&Nim::new(8)) - 0.25).abs() < 1e-12);
    assert!((NimEvaluator.evaluate(&Nim::new(9)) - 0.75).abs() < 1e-12);
}

#[test]
fn test_nim_transpositions_hash_equal() {
    let table = ZobristTable::for_state::<Nim>();
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    let mut a = Nim::new(12);
    NimAction::Take(1).apply(&mut a, &mut rng);
    NimAction::Take(3).apply(&mut a, &mut rng);
    let mut b = Nim::new(12);
    NimAction::Take(3).apply(&mut b, &mut rng);
    NimAction::Take(1).apply(&mut b, &mut rng);

    assert_eq!(a, b);
    assert_eq!(a, Nim::new(8));
    assert_eq!(table.hash(&a), table.hash(&b));
}

#[test]
fn test_nim_hash_distinguishes_player() {
    let table = ZobristTable::for_state::<Nim>();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let mut moved = Nim::new(9);
    NimAction::Take(1).apply(&mut moved, &mut rng);

    assert_eq!(moved.pile(), Nim::new(8).pile());
    assert_ne!(table.hash(&moved), table.hash(&Nim::new(8)));
}

#[test]
fn test_fork_orders() {
    let win_first = Fork::win_first();
    assert_eq!(win_first.legal_actions()[win_first.winning_index()], ForkAction::Win);

    let lose_first = Fork::lose_first();
    assert_eq!(lose_first.winning_index(), 1);
    assert_eq!(lose_first.legal_actions()[1], ForkAction::Win);
}

#[test]
fn test_fork_outcomes() {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let mut won = Fork::lose_first();
    ForkAction::Win.apply(&mut won, &mut rng);
    assert!(won.is_terminal());
    assert_eq!(won.acting_player(), 0);
    assert!((ForkEvaluator.evaluate(&won) - 1.0).abs() < 1e-12);

    let mut lost = Fork::win_first();
    ForkAction::Lose.apply(&mut lost, &mut rng);
    assert_eq!(lost.outcome(), Some(false));
    assert!(ForkEvaluator.evaluate(&lost).abs() < 1e-12);
}
