//! Flat Monte Carlo configuration parameters.

use std::time::Duration;

use engine_core::TimeManagerConfig;

/// Configuration for flat Monte Carlo selection.
#[derive(Debug, Clone)]
pub struct FlatMcConfig {
    /// Upper bound on simulations per root action.
    pub simulations_per_action: u32,

    /// Random plies played after the root action before evaluating.
    pub rollout_depth: u32,

    /// Optional wall-clock limit per move.
    pub move_time: Option<Duration>,

    /// Only the hard cap (`remaining / max_fraction_divisor`) is used here.
    pub time: TimeManagerConfig,
}

impl Default for FlatMcConfig {
    fn default() -> Self {
        Self {
            simulations_per_action: 10_000,
            rollout_depth: 4,
            move_time: None,
            time: TimeManagerConfig::default(),
        }
    }
}

impl FlatMcConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            simulations_per_action: 50,
            ..Self::default()
        }
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations_per_action = n;
        self
    }

    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    pub fn with_move_time(mut self, budget: Duration) -> Self {
        self.move_time = Some(budget);
        self
    }
}
