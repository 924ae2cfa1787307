//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by CARDSEARCH_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("CARDSEARCH_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from CARDSEARCH_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "CARDSEARCH_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file is logged and replaced by the defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CARDSEARCH_<SECTION>_<KEY>.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CARDSEARCH_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "CARDSEARCH_COMMON_SEED", parse);

    // Time
    env_override!(
        config,
        time.opening_factor,
        "CARDSEARCH_TIME_OPENING_FACTOR",
        parse
    );
    env_override!(
        config,
        time.estimate_playouts,
        "CARDSEARCH_TIME_ESTIMATE_PLAYOUTS",
        parse
    );
    env_override!(
        config,
        time.max_fraction_divisor,
        "CARDSEARCH_TIME_MAX_FRACTION_DIVISOR",
        parse
    );
    env_override!(
        config,
        time.check_interval,
        "CARDSEARCH_TIME_CHECK_INTERVAL",
        parse
    );
    env_override!(
        config,
        time.default_move_time_ms,
        "CARDSEARCH_TIME_DEFAULT_MOVE_TIME_MS",
        parse
    );

    // Flat Monte Carlo
    env_override!(
        config,
        flat_mc.simulations_per_action,
        "CARDSEARCH_FLAT_MC_SIMULATIONS_PER_ACTION",
        parse
    );
    env_override!(
        config,
        flat_mc.rollout_depth,
        "CARDSEARCH_FLAT_MC_ROLLOUT_DEPTH",
        parse
    );
    env_override!(
        config,
        flat_mc.move_time_ms,
        "CARDSEARCH_FLAT_MC_MOVE_TIME_MS",
        parse
    );

    // Alpha-beta
    env_override!(
        config,
        alphabeta.max_depth,
        "CARDSEARCH_ALPHABETA_MAX_DEPTH",
        parse
    );
    env_override!(
        config,
        alphabeta.chance_samples,
        "CARDSEARCH_ALPHABETA_CHANCE_SAMPLES",
        parse
    );
    env_override!(
        config,
        alphabeta.use_transposition_table,
        "CARDSEARCH_ALPHABETA_USE_TRANSPOSITION_TABLE",
        parse
    );
    env_override!(
        config,
        alphabeta.tt_capacity,
        "CARDSEARCH_ALPHABETA_TT_CAPACITY",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.iterations,
        "CARDSEARCH_MCTS_ITERATIONS",
        parse
    );
    env_override!(
        config,
        mcts.exploration,
        "CARDSEARCH_MCTS_EXPLORATION",
        parse
    );
    env_override!(
        config,
        mcts.chance_samples,
        "CARDSEARCH_MCTS_CHANCE_SAMPLES",
        parse
    );
    env_override!(
        config,
        mcts.rollout_depth,
        "CARDSEARCH_MCTS_ROLLOUT_DEPTH",
        parse
    );
    env_override!(config, mcts.backup, "CARDSEARCH_MCTS_BACKUP");

    // Arena
    env_override!(config, arena.games, "CARDSEARCH_ARENA_GAMES", parse);
    env_override!(
        config,
        arena.game_time_ms,
        "CARDSEARCH_ARENA_GAME_TIME_MS",
        parse
    );
    env_override!(config, arena.workers, "CARDSEARCH_ARENA_WORKERS", parse);
    env_override!(config, arena.player_one, "CARDSEARCH_ARENA_PLAYER_ONE");
    env_override!(config, arena.player_two, "CARDSEARCH_ARENA_PLAYER_TWO");

    config
}
