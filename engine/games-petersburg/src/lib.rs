//! Simplified two-player Saint Petersburg.
//!
//! Players collect workers (rubles), buildings (points) and aristocrats
//! (both) from two shared card rows. A round has a worker, building and
//! aristocrat phase; each phase ends once both players pass in a row and is
//! scored from the cards each player owns. The game ends after the round in
//! which any deck runs out.
//!
//! Randomness enters through card draws only: refilling the upper row at
//! the end of a phase and observing a deck with an Observatory. Actions that
//! draw report [`is_chance`](engine_core::GameAction::is_chance).
//!
//! Trading cards and most card abilities are not modelled.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameAction, GameState};
//! use games_petersburg::PetersburgState;
//!
//! let mut state = PetersburgState::seeded(7);
//! let actions = state.legal_actions();
//! actions[0].apply_seeded(&mut state, 1);
//! ```

pub mod action;
pub mod cards;
pub mod evaluator;
pub mod state;
pub mod zobrist;

pub use action::{CardSource, PetersburgAction};
pub use cards::{Card, CardSpec, Deck, CARDS, NUM_CARDS};
pub use evaluator::PetersburgEvaluator;
pub use state::{PetersburgState, Phase, PlayerBoard, NUM_PLAYERS, STARTING_RUBLES};
