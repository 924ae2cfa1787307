//! The move-selection interface every engine exposes.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::state::GameState;

/// Errors that can occur while choosing a move.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Game contract violated: {0}")]
    ContractViolation(String),
}

/// Something that picks an action for the state's acting player.
///
/// The returned value is an index into `state.legal_actions()`.
/// `time_remaining` is the player's remaining game clock, if known.
pub trait MoveSelector<S: GameState>: Send {
    fn name(&self) -> &str;

    fn select_action(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<usize, SearchError>;
}

/// Baseline player: a uniformly random legal action.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: ChaCha20Rng,
}

impl RandomSelector {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self { rng }
    }
}

impl<S: GameState> MoveSelector<S> for RandomSelector {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(
        &mut self,
        state: &S,
        _time_remaining: Option<Duration>,
    ) -> Result<usize, SearchError> {
        let count = state.legal_actions().len();
        if count == 0 {
            return Err(SearchError::NoLegalActions);
        }
        Ok(self.rng.gen_range(0..count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Countdown;

    #[test]
    fn test_random_selector_in_range() {
        let mut selector = RandomSelector::new(Some(42));
        let state = Countdown::new(10);
        for _ in 0..100 {
            let index = selector.select_action(&state, None).unwrap();
            assert!(index < 3);
        }
    }

    #[test]
    fn test_random_selector_no_actions() {
        let mut selector = RandomSelector::new(Some(42));
        let result = selector.select_action(&Countdown::new(0), None);
        assert!(matches!(result, Err(SearchError::NoLegalActions)));
    }

    #[test]
    fn test_selector_is_object_safe() {
        let mut boxed: Box<dyn MoveSelector<Countdown>> = Box::new(RandomSelector::new(Some(1)));
        assert_eq!(boxed.name(), "random");
        assert!(boxed.select_action(&Countdown::new(1), None).unwrap() < 2);
    }
}
