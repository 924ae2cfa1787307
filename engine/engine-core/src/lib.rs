//! Core contracts for the card-game search engines.
//!
//! Every engine in this workspace (flat Monte Carlo, alpha-beta, MCTS) is
//! written against the small set of traits defined here:
//! - [`GameState`] / [`GameAction`]: the game the engines search over
//! - [`Evaluator`]: a position scorer returning a win probability in `[0, 1]`
//! - [`MoveSelector`]: the "pick an action index" interface engines expose
//!
//! Shared machinery lives here too: Zobrist hashing, random playouts and
//! the time manager used to turn a game clock into a per-move budget.

pub mod budget;
pub mod evaluator;
pub mod playout;
pub mod selector;
pub mod state;
pub mod zobrist;

pub use budget::{Deadline, TimeManager, TimeManagerConfig};
pub use evaluator::{value_for, ConstantEvaluator, Evaluator};
pub use playout::{estimate_remaining_decisions, random_rollout, MAX_PLAYOUT_PLIES};
pub use selector::{MoveSelector, RandomSelector, SearchError};
pub use state::{GameAction, GameState, PlayerId};
pub use zobrist::{
    FeatureId, FeatureSink, HashReport, ZobristFeatures, ZobristLayout, ZobristTable, ZOBRIST_SEED,
};
