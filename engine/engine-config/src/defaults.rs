//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the documented
//! defaults and the ones the binaries use cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    time: TimeDefaults,
    flat_mc: FlatMcDefaults,
    alphabeta: AlphaBetaDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct TimeDefaults {
    opening_factor: f64,
    estimate_playouts: u32,
    max_fraction_divisor: u32,
    check_interval: u32,
    default_move_time_ms: u64,
}

#[derive(Debug, Deserialize)]
struct FlatMcDefaults {
    simulations_per_action: u32,
    rollout_depth: u32,
    move_time_ms: u64,
}

#[derive(Debug, Deserialize)]
struct AlphaBetaDefaults {
    max_depth: u32,
    chance_samples: u32,
    use_transposition_table: bool,
    tt_capacity: usize,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    exploration: f64,
    chance_samples: u32,
    rollout_depth: u32,
    backup: String,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    game_time_ms: u64,
    workers: usize,
    player_one: String,
    player_two: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Time
pub fn opening_factor() -> f64 {
    DEFAULTS.time.opening_factor
}
pub fn estimate_playouts() -> u32 {
    DEFAULTS.time.estimate_playouts
}
pub fn max_fraction_divisor() -> u32 {
    DEFAULTS.time.max_fraction_divisor
}
pub fn check_interval() -> u32 {
    DEFAULTS.time.check_interval
}
pub fn default_move_time_ms() -> u64 {
    DEFAULTS.time.default_move_time_ms
}

// Flat Monte Carlo
pub fn simulations_per_action() -> u32 {
    DEFAULTS.flat_mc.simulations_per_action
}
pub fn flat_mc_rollout_depth() -> u32 {
    DEFAULTS.flat_mc.rollout_depth
}
pub fn flat_mc_move_time_ms() -> u64 {
    DEFAULTS.flat_mc.move_time_ms
}

// Alpha-beta
pub fn max_depth() -> u32 {
    DEFAULTS.alphabeta.max_depth
}
pub fn alphabeta_chance_samples() -> u32 {
    DEFAULTS.alphabeta.chance_samples
}
pub fn use_transposition_table() -> bool {
    DEFAULTS.alphabeta.use_transposition_table
}
pub fn tt_capacity() -> usize {
    DEFAULTS.alphabeta.tt_capacity
}

// MCTS
pub fn mcts_iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn mcts_chance_samples() -> u32 {
    DEFAULTS.mcts.chance_samples
}
pub fn mcts_rollout_depth() -> u32 {
    DEFAULTS.mcts.rollout_depth
}
pub fn backup() -> &'static str {
    &DEFAULTS.mcts.backup
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn game_time_ms() -> u64 {
    DEFAULTS.arena.game_time_ms
}
pub fn workers() -> usize {
    DEFAULTS.arena.workers
}
pub fn player_one() -> &'static str {
    &DEFAULTS.arena.player_one
}
pub fn player_two() -> &'static str {
    &DEFAULTS.arena.player_two
}
