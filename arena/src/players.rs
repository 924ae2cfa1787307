//! Building the contestants from configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use alphabeta::{AlphaBeta, AlphaBetaConfig};
use anyhow::{anyhow, Result};
use engine_config::CentralConfig;
use engine_core::{MoveSelector, RandomSelector, TimeManagerConfig};
use flat_mc::{FlatMcConfig, FlatMonteCarlo};
use games_petersburg::{PetersburgEvaluator, PetersburgState};
use mcts::{BackupMode, Mcts, MctsConfig};

pub type Player = Box<dyn MoveSelector<PetersburgState>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Random,
    FlatMc,
    AlphaBeta,
    Mcts,
}

impl PlayerKind {
    pub const ALL: [PlayerKind; 4] = [
        PlayerKind::Random,
        PlayerKind::FlatMc,
        PlayerKind::AlphaBeta,
        PlayerKind::Mcts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerKind::Random => "random",
            PlayerKind::FlatMc => "flat-mc",
            PlayerKind::AlphaBeta => "alphabeta",
            PlayerKind::Mcts => "mcts",
        }
    }
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PlayerKind::Random),
            "flat-mc" | "flat_mc" | "flatmc" => Ok(PlayerKind::FlatMc),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(PlayerKind::AlphaBeta),
            "mcts" => Ok(PlayerKind::Mcts),
            other => {
                let known: Vec<_> = PlayerKind::ALL.iter().map(|k| k.as_str()).collect();
                Err(anyhow!(
                    "unknown player '{other}', expected one of {}",
                    known.join(", ")
                ))
            }
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine configurations derived from the central config. Every game
/// builds its own engines from these.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub flat_mc: FlatMcConfig,
    pub alphabeta: AlphaBetaConfig,
    pub mcts: MctsConfig,
}

impl EngineSettings {
    pub fn from_central(central: &CentralConfig) -> Result<Self> {
        let time = TimeManagerConfig {
            opening_factor: central.time.opening_factor,
            estimate_playouts: central.time.estimate_playouts,
            max_fraction_divisor: central.time.max_fraction_divisor,
            check_interval: central.time.check_interval,
            default_move_time: Duration::from_millis(central.time.default_move_time_ms),
        };

        let flat_mc = FlatMcConfig {
            simulations_per_action: central.flat_mc.simulations_per_action,
            rollout_depth: central.flat_mc.rollout_depth,
            move_time: (central.flat_mc.move_time_ms > 0)
                .then(|| Duration::from_millis(central.flat_mc.move_time_ms)),
            time: time.clone(),
        };

        let alphabeta = AlphaBetaConfig {
            max_depth: central.alphabeta.max_depth,
            chance_samples: central.alphabeta.chance_samples,
            use_transposition_table: central.alphabeta.use_transposition_table,
            tt_capacity: central.alphabeta.tt_capacity,
            time: time.clone(),
        };

        let backup: BackupMode = central
            .mcts
            .backup
            .parse()
            .map_err(|e| anyhow!("mcts.backup: {e}"))?;
        let mcts = MctsConfig {
            iterations: (central.mcts.iterations > 0).then_some(central.mcts.iterations),
            exploration: central.mcts.exploration,
            chance_samples: central.mcts.chance_samples,
            rollout_depth: central.mcts.rollout_depth,
            backup,
            time,
        };

        Ok(Self {
            flat_mc,
            alphabeta,
            mcts,
        })
    }

    /// A fresh engine of `kind`. `seed` fixes its generator; `None` seeds
    /// from OS entropy.
    pub fn build(&self, kind: PlayerKind, seed: Option<u64>) -> Player {
        let evaluator = PetersburgEvaluator::default();
        match kind {
            PlayerKind::Random => Box::new(RandomSelector::new(seed)),
            PlayerKind::FlatMc => {
                let engine = FlatMonteCarlo::new(self.flat_mc.clone(), evaluator);
                match seed {
                    Some(seed) => Box::new(engine.with_seed(seed)),
                    None => Box::new(engine),
                }
            }
            PlayerKind::AlphaBeta => {
                let engine =
                    AlphaBeta::<PetersburgState, _>::new(self.alphabeta.clone(), evaluator);
                match seed {
                    Some(seed) => Box::new(engine.with_seed(seed)),
                    None => Box::new(engine),
                }
            }
            PlayerKind::Mcts => {
                let engine = Mcts::new(self.mcts.clone(), evaluator);
                match seed {
                    Some(seed) => Box::new(engine.with_seed(seed)),
                    None => Box::new(engine),
                }
            }
        }
    }
}
