//! Monte Carlo Tree Search (UCT) with explicit chance nodes.
//!
//! The search is game-agnostic: it works with any state implementing the
//! `engine-core` [`GameState`](engine_core::GameState) contract and any
//! [`Evaluator`](engine_core::Evaluator) scoring positions in `[0, 1]`.
//!
//! # Overview
//!
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT,
//!    `mean + C * sqrt(ln(N_parent) / N_child)`, unvisited children first
//! 2. **Expansion**: When reaching a leaf, add a child for each legal action
//! 3. **Simulation**: Play a short random rollout and evaluate the result
//! 4. **Backpropagation**: Update visit counts and reward sums along the
//!    path from leaf to root
//!
//! A chance action (deck shuffles, card draws) becomes a chance node with
//! `chance_samples` outcome children. Outcome `i` replays the action with
//! seed `base_seed + i`, so revisiting an outcome reproduces its state.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{Mcts, MctsConfig};
//!
//! let mut mcts = Mcts::new(MctsConfig::default().with_iterations(2_000), evaluator);
//! let result = mcts.search(&state, Some(time_remaining))?;
//! println!("Best action: {} after {} iterations", result.action, result.stats.iterations);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Iteration cap, or `None` to search until the budget is spent
//! - `exploration`: UCT exploration constant (default: 2.0)
//! - `chance_samples`: Outcome children per chance node (default: 10)
//! - `rollout_depth`: Random plies before evaluating (default: 4)
//! - `backup`: How rewards are credited along the path (default: raw)

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{BackupMode, MctsConfig, ParseBackupModeError};
pub use node::{MctsNode, NodeId, NodeKind};
pub use search::{run_mcts, Mcts, MctsSearch, SearchResult, SearchStats};
pub use tree::{MctsTree, TreeStats};
