//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;

use engine_core::TimeManagerConfig;
use thiserror::Error;

/// How a simulation's evaluation is credited along the selected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupMode {
    /// Every node on the path receives the leaf evaluation unchanged,
    /// whoever acted there. Cheap, but only meaningful when the evaluator
    /// already scores from a fixed player's side.
    #[default]
    Raw,

    /// Each node receives the evaluation from the point of view of the
    /// player who chose the edge into it (`v` or `1 - v`).
    ActingPlayer,
}

#[derive(Debug, Error)]
#[error("Unknown backup mode '{0}' (expected 'raw' or 'acting_player')")]
pub struct ParseBackupModeError(String);

impl FromStr for BackupMode {
    type Err = ParseBackupModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(BackupMode::Raw),
            "acting_player" | "acting-player" => Ok(BackupMode::ActingPlayer),
            other => Err(ParseBackupModeError(other.to_string())),
        }
    }
}

impl fmt::Display for BackupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupMode::Raw => write!(f, "raw"),
            BackupMode::ActingPlayer => write!(f, "acting_player"),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Iteration cap per move. `None` searches until the time budget is spent.
    pub iterations: Option<u32>,

    /// Exploration constant C in `mean + C * sqrt(ln(N_parent) / N_child)`.
    pub exploration: f64,

    /// Outcome children pre-allocated under every chance node.
    pub chance_samples: u32,

    /// Random plies played from a new leaf before evaluating.
    pub rollout_depth: u32,

    pub backup: BackupMode,

    pub time: TimeManagerConfig,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            exploration: 2.0,
            chance_samples: 10,
            rollout_depth: 4,
            backup: BackupMode::Raw,
            time: TimeManagerConfig::default(),
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: Some(200),
            chance_samples: 4,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration cap.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = Some(n);
        self
    }

    /// Builder pattern: search until the time budget is spent.
    pub fn unlimited_iterations(mut self) -> Self {
        self.iterations = None;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_chance_samples(mut self, k: u32) -> Self {
        self.chance_samples = k;
        self
    }

    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    pub fn with_backup(mut self, mode: BackupMode) -> Self {
        self.backup = mode;
        self
    }

    pub fn with_time(mut self, time: TimeManagerConfig) -> Self {
        self.time = time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!(config.iterations.is_none());
        assert!((config.exploration - 2.0).abs() < 1e-12);
        assert_eq!(config.chance_samples, 10);
        assert_eq!(config.rollout_depth, 4);
        assert_eq!(config.backup, BackupMode::Raw);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration(1.4)
            .with_backup(BackupMode::ActingPlayer);

        assert_eq!(config.iterations, Some(100));
        assert!((config.exploration - 1.4).abs() < 1e-12);
        assert_eq!(config.backup, BackupMode::ActingPlayer);
        assert!(config.unlimited_iterations().iterations.is_none());
    }

    #[test]
    fn test_backup_mode_parse() {
        assert_eq!("raw".parse::<BackupMode>().unwrap(), BackupMode::Raw);
        assert_eq!(
            "Acting_Player".parse::<BackupMode>().unwrap(),
            BackupMode::ActingPlayer
        );
        assert!("negamax".parse::<BackupMode>().is_err());
        assert_eq!(BackupMode::ActingPlayer.to_string(), "acting_player");
    }
}
