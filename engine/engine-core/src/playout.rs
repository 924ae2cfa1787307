//! Uniformly random playouts.

use rand::Rng;

use crate::selector::SearchError;
use crate::state::{GameAction, GameState};

/// Upper bound on the length of any playout. A collaborator whose game does
/// not end within this many plies is treated as non-terminating.
pub const MAX_PLAYOUT_PLIES: u32 = 10_000;

/// Play uniformly random legal actions on `state` until it is terminal or
/// `max_plies` actions were applied (`None` plays to the end).
///
/// Returns the number of plies played. A non-terminal state without legal
/// actions is a contract violation and is reported as an error.
pub fn random_rollout<S, R>(
    state: &mut S,
    max_plies: Option<u32>,
    rng: &mut R,
) -> Result<u32, SearchError>
where
    S: GameState,
    R: Rng + ?Sized,
{
    let limit = max_plies.unwrap_or(MAX_PLAYOUT_PLIES).min(MAX_PLAYOUT_PLIES);
    let mut plies = 0;
    while plies < limit && !state.is_terminal() {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::ContractViolation(
                "non-terminal state has no legal actions".into(),
            ));
        }
        let index = rng.gen_range(0..actions.len());
        actions[index].apply(state, rng);
        plies += 1;
    }
    Ok(plies)
}

/// Estimate how many more decisions `root`'s acting player will face.
///
/// Runs `playouts` full random games from clones of `root`, counts the
/// states where the root player had to choose among more than zero actions,
/// and averages. Never returns less than one.
pub fn estimate_remaining_decisions<S, R>(
    root: &S,
    playouts: u32,
    rng: &mut R,
) -> Result<f64, SearchError>
where
    S: GameState,
    R: Rng + ?Sized,
{
    if playouts == 0 {
        return Ok(1.0);
    }

    let player = root.acting_player();
    let mut total = 0u64;
    for _ in 0..playouts {
        let mut state = root.clone();
        let mut plies = 0;
        while plies < MAX_PLAYOUT_PLIES && !state.is_terminal() {
            let actions = state.legal_actions();
            if actions.is_empty() {
                return Err(SearchError::ContractViolation(
                    "non-terminal state has no legal actions".into(),
                ));
            }
            if state.acting_player() == player {
                total += 1;
            }
            let index = rng.gen_range(0..actions.len());
            actions[index].apply(&mut state, rng);
            plies += 1;
        }
    }

    Ok((total as f64 / playouts as f64).max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Countdown;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_rollout_to_terminal() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut state = Countdown::new(30);
        let plies = random_rollout(&mut state, None, &mut rng).unwrap();

        assert!(state.is_terminal());
        assert!(plies >= 10 && plies <= 30);
    }

    #[test]
    fn test_rollout_respects_depth() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut state = Countdown::new(1000);
        let plies = random_rollout(&mut state, Some(4), &mut rng).unwrap();

        assert_eq!(plies, 4);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_rollout_zero_depth_is_noop() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut state = Countdown::new(5);
        assert_eq!(random_rollout(&mut state, Some(0), &mut rng).unwrap(), 0);
        assert_eq!(state.remaining, 5);
    }

    #[test]
    fn test_estimate_counts_root_player_decisions() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let root = Countdown::new(40);
        let estimate = estimate_remaining_decisions(&root, 3, &mut rng).unwrap();

        // Each ply removes 1..=3, players alternate: between ~7 and 20.
        assert!(estimate >= 6.0 && estimate <= 20.0, "estimate = {estimate}");
    }

    #[test]
    fn test_estimate_is_at_least_one() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let root = Countdown::new(0);
        let estimate = estimate_remaining_decisions(&root, 3, &mut rng).unwrap();
        assert!((estimate - 1.0).abs() < 1e-12);
    }
}
