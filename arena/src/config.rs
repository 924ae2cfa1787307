//! Configuration for the arena binary
//!
//! Defaults come from the central config (config.toml plus `CARDSEARCH_*`
//! environment overrides). CLI arguments take highest priority.

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use crate::players::PlayerKind;

// Load central config once at startup
pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_game_time_ms() -> u64 {
    CENTRAL_CONFIG.arena.game_time_ms
}

fn default_workers() -> usize {
    CENTRAL_CONFIG.arena.workers
}

fn default_player_one() -> String {
    CENTRAL_CONFIG.arena.player_one.clone()
}

fn default_player_two() -> String {
    CENTRAL_CONFIG.arena.player_two.clone()
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Play search engines against each other at Saint Petersburg")]
#[command(
    long_about = "Plays a batch of independent games between two players, alternating
seats, and logs wins, draws, mean points and mean game length.

Players: random, flat-mc, alphabeta, mcts. Engine parameters are read from
config.toml with CARDSEARCH_* environment overrides. CLI arguments take
highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Total clock per game in milliseconds, split evenly between the players
    #[arg(long, default_value_t = default_game_time_ms())]
    pub game_time_ms: u64,

    /// Games played concurrently
    #[arg(long, default_value_t = default_workers())]
    pub workers: usize,

    /// First player (random, flat-mc, alphabeta, mcts)
    #[arg(long, default_value_t = default_player_one())]
    pub player_one: String,

    /// Second player (random, flat-mc, alphabeta, mcts)
    #[arg(long, default_value_t = default_player_two())]
    pub player_two: String,

    /// Base seed for deals and engines (0 for OS entropy)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.game_time_ms == 0 {
            return Err(anyhow!("game_time_ms must be greater than 0"));
        }

        if self.workers == 0 {
            return Err(anyhow!("workers must be greater than 0"));
        }

        self.players()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// The two configured contestants, in order.
    pub fn players(&self) -> Result<[PlayerKind; 2]> {
        let one = self
            .player_one
            .parse()
            .map_err(|e| anyhow!("player_one: {e}"))?;
        let two = self
            .player_two
            .parse()
            .map_err(|e| anyhow!("player_two: {e}"))?;
        Ok([one, two])
    }

    /// Clock each player starts a game with.
    pub fn player_clock(&self) -> Duration {
        Duration::from_millis(self.game_time_ms / 2)
    }

    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}
