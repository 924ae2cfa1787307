//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared
//! by the search engines and the arena binary. It deliberately knows
//! nothing about the engine crates; callers map these plain values onto
//! the engines' own config types.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CARDSEARCH_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CARDSEARCH_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CARDSEARCH_COMMON_SEED=7
//!     CARDSEARCH_TIME_DEFAULT_MOVE_TIME_MS=250
//!     CARDSEARCH_ALPHABETA_MAX_DEPTH=12
//!     CARDSEARCH_MCTS_BACKUP=acting_player
//!     CARDSEARCH_ARENA_PLAYER_ONE=flat-mc
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
