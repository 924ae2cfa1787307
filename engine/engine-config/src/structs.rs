//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_opening_factor() -> f64 {
    defaults::opening_factor()
}
fn d_estimate_playouts() -> u32 {
    defaults::estimate_playouts()
}
fn d_max_fraction_divisor() -> u32 {
    defaults::max_fraction_divisor()
}
fn d_check_interval() -> u32 {
    defaults::check_interval()
}
fn d_default_move_time_ms() -> u64 {
    defaults::default_move_time_ms()
}
fn d_simulations_per_action() -> u32 {
    defaults::simulations_per_action()
}
fn d_flat_mc_rollout_depth() -> u32 {
    defaults::flat_mc_rollout_depth()
}
fn d_flat_mc_move_time_ms() -> u64 {
    defaults::flat_mc_move_time_ms()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}
fn d_alphabeta_chance_samples() -> u32 {
    defaults::alphabeta_chance_samples()
}
fn d_use_tt() -> bool {
    defaults::use_transposition_table()
}
fn d_tt_capacity() -> usize {
    defaults::tt_capacity()
}
fn d_mcts_iterations() -> u32 {
    defaults::mcts_iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_mcts_chance_samples() -> u32 {
    defaults::mcts_chance_samples()
}
fn d_mcts_rollout_depth() -> u32 {
    defaults::mcts_rollout_depth()
}
fn d_backup() -> String {
    defaults::backup().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_game_time_ms() -> u64 {
    defaults::game_time_ms()
}
fn d_workers() -> usize {
    defaults::workers()
}
fn d_player_one() -> String {
    defaults::player_one().into()
}
fn d_player_two() -> String {
    defaults::player_two().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub flat_mc: FlatMcConfig,
    #[serde(default)]
    pub alphabeta: AlphaBetaConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Engine RNG seed. 0 = seed from OS entropy.
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

impl CommonConfig {
    /// The configured seed, or `None` when entropy seeding was requested.
    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}

/// Move time allocation shared by alpha-beta and MCTS
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimeConfig {
    #[serde(default = "d_opening_factor")]
    pub opening_factor: f64,
    #[serde(default = "d_estimate_playouts")]
    pub estimate_playouts: u32,
    #[serde(default = "d_max_fraction_divisor")]
    pub max_fraction_divisor: u32,
    #[serde(default = "d_check_interval")]
    pub check_interval: u32,
    #[serde(default = "d_default_move_time_ms")]
    pub default_move_time_ms: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            opening_factor: defaults::opening_factor(),
            estimate_playouts: defaults::estimate_playouts(),
            max_fraction_divisor: defaults::max_fraction_divisor(),
            check_interval: defaults::check_interval(),
            default_move_time_ms: defaults::default_move_time_ms(),
        }
    }
}

/// Flat Monte Carlo configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FlatMcConfig {
    #[serde(default = "d_simulations_per_action")]
    pub simulations_per_action: u32,
    #[serde(default = "d_flat_mc_rollout_depth")]
    pub rollout_depth: u32,
    /// Per-move limit in milliseconds. 0 = no limit beyond the clock cap.
    #[serde(default = "d_flat_mc_move_time_ms")]
    pub move_time_ms: u64,
}

impl Default for FlatMcConfig {
    fn default() -> Self {
        Self {
            simulations_per_action: defaults::simulations_per_action(),
            rollout_depth: defaults::flat_mc_rollout_depth(),
            move_time_ms: defaults::flat_mc_move_time_ms(),
        }
    }
}

/// Alpha-beta configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlphaBetaConfig {
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
    #[serde(default = "d_alphabeta_chance_samples")]
    pub chance_samples: u32,
    #[serde(default = "d_use_tt")]
    pub use_transposition_table: bool,
    #[serde(default = "d_tt_capacity")]
    pub tt_capacity: usize,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            chance_samples: defaults::alphabeta_chance_samples(),
            use_transposition_table: defaults::use_transposition_table(),
            tt_capacity: defaults::tt_capacity(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Iterations per move. 0 = until the time budget is spent.
    #[serde(default = "d_mcts_iterations")]
    pub iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_mcts_chance_samples")]
    pub chance_samples: u32,
    #[serde(default = "d_mcts_rollout_depth")]
    pub rollout_depth: u32,
    /// "raw" or "acting_player"
    #[serde(default = "d_backup")]
    pub backup: String,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::mcts_iterations(),
            exploration: defaults::exploration(),
            chance_samples: defaults::mcts_chance_samples(),
            rollout_depth: defaults::mcts_rollout_depth(),
            backup: defaults::backup().into(),
        }
    }
}

/// Arena (engine vs engine matches) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    /// Total game time in milliseconds, split evenly between the players.
    #[serde(default = "d_game_time_ms")]
    pub game_time_ms: u64,
    #[serde(default = "d_workers")]
    pub workers: usize,
    #[serde(default = "d_player_one")]
    pub player_one: String,
    #[serde(default = "d_player_two")]
    pub player_two: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            game_time_ms: defaults::game_time_ms(),
            workers: defaults::workers(),
            player_one: defaults::player_one().into(),
            player_two: defaults::player_two().into(),
        }
    }
}
