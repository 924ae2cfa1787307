//! Depth-limited alpha-beta search for two-player games with chance.
//!
//! The engine deepens iteratively until its time budget runs out, keeps a
//! bounded LRU transposition table warm across depths and moves, and
//! handles chance actions by averaging a few sampled outcomes instead of
//! enumerating them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use alphabeta::{AlphaBeta, AlphaBetaConfig};
//! use games_toy::{Nim, NimEvaluator};
//!
//! let mut engine = AlphaBeta::<Nim, _>::new(AlphaBetaConfig::default(), NimEvaluator);
//! let result = engine.search(&Nim::new(21), Some(std::time::Duration::from_secs(10)))?;
//! println!("take index {} (value {:.3}, depth {})", result.action, result.value, result.depth);
//! ```

pub mod config;
pub mod search;
pub mod tt;

pub use config::AlphaBetaConfig;
pub use search::{AlphaBeta, AlphaBetaResult};
pub use tt::{Probe, TranspositionTable, TtEntry, TtStats};
