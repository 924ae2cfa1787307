//! Flat Monte Carlo move selection.
//!
//! Every legal root action gets the same number of short random playouts;
//! the action with the best mean evaluation is played. There is no tree and
//! no state is shared between simulations, so each one starts from a fresh
//! clone of the root with the action (chance actions included) re-applied.

pub mod config;
pub mod search;

pub use config::FlatMcConfig;
pub use search::{FlatMcResult, FlatMonteCarlo};
