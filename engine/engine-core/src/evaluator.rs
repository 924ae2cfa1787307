//! Position evaluator contract.
//!
//! An evaluator scores a state as the probability, in `[0, 1]`, that the
//! state's acting player goes on to win. It is a pure function of the state.
//! Hand-written heuristics, rollouts or learned models can all sit behind it.

use crate::state::{GameState, PlayerId};

/// Trait for position evaluators.
pub trait Evaluator<S>: Send + Sync {
    /// Win probability for `state.acting_player()`, in `[0, 1]`.
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64 + Send + Sync,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Evaluator that returns the same value for every state.
/// Useful for exercising search mechanics without a real heuristic.
#[derive(Debug, Clone, Copy)]
pub struct ConstantEvaluator(pub f64);

impl Default for ConstantEvaluator {
    fn default() -> Self {
        Self(0.5)
    }
}

impl<S> Evaluator<S> for ConstantEvaluator {
    fn evaluate(&self, _state: &S) -> f64 {
        self.0
    }
}

/// Evaluate `state` from `perspective`'s point of view.
///
/// Two-player convention: if someone other than `perspective` is to act,
/// the evaluator's value `v` is reported as `1 - v`.
pub fn value_for<S, E>(evaluator: &E, state: &S, perspective: PlayerId) -> f64
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    let value = evaluator.evaluate(state).clamp(0.0, 1.0);
    if state.acting_player() == perspective {
        value
    } else {
        1.0 - value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Countdown;

    #[test]
    fn test_closure_is_evaluator() {
        let eval = |s: &Countdown| s.remaining as f64 / 100.0;
        assert!((eval.evaluate(&Countdown::new(25)) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_value_for_inverts_for_opponent() {
        let eval = ConstantEvaluator(0.8);
        let mut state = Countdown::new(5);

        assert!((value_for(&eval, &state, 0) - 0.8).abs() < 1e-12);

        state.to_move = 1;
        assert!((value_for(&eval, &state, 0) - 0.2).abs() < 1e-12);
        assert!((value_for(&eval, &state, 1) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_value_for_clamps_out_of_range() {
        let state = Countdown::new(5);
        assert!((value_for(&ConstantEvaluator(1.7), &state, 0) - 1.0).abs() < 1e-12);
        assert!(value_for(&ConstantEvaluator(-0.3), &state, 0).abs() < 1e-12);
    }
}
