//! Game state and action contracts.
//!
//! Engines never look inside a game. They clone states, ask for the legal
//! actions, apply one, and hand leaves to an [`Evaluator`](crate::Evaluator).
//! Anything random in the game (card draws, deck shuffles) must flow through
//! the generator passed to [`GameAction::apply`], so that a seeded generator
//! replays the same outcome.

use std::fmt::Debug;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Zero-based seat index of a player.
pub type PlayerId = usize;

/// A complete, perfect-information game position.
///
/// `Clone` must produce a deep copy: mutating the clone may never be
/// observable through the original.
pub trait GameState: Clone + Debug + Send + Sync + 'static {
    type Action: GameAction<Self>;

    /// Player whose decision is pending.
    fn acting_player(&self) -> PlayerId;

    fn is_terminal(&self) -> bool;

    /// Legal actions in a stable order. Engines refer to actions by their
    /// index in this list, so two calls on equal states must agree.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Re-randomize the state's hidden-order resources (e.g. deck order).
    ///
    /// Used by alpha-beta to draw additional samples of a chance outcome.
    /// Games without such resources keep the default no-op.
    fn perturb_chance<R: Rng + ?Sized>(&mut self, _rng: &mut R) {}
}

/// A single move in a game, applied in place to a state.
pub trait GameAction<S>: Clone + Debug + Send + Sync + 'static {
    /// Whether applying this action draws on randomness.
    fn is_chance(&self) -> bool {
        false
    }

    /// Apply the action to `state`. All randomness must come from `rng`.
    fn apply<R: Rng + ?Sized>(&self, state: &mut S, rng: &mut R);

    /// Apply the action with a fresh generator seeded from `seed`.
    ///
    /// Equal states and equal seeds always yield equal successors.
    fn apply_seeded(&self, state: &mut S, seed: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        self.apply(state, &mut rng);
    }
}
