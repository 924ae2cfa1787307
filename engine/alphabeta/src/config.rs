//! Alpha-beta configuration parameters.

use engine_core::TimeManagerConfig;

/// Configuration for the alpha-beta engine.
#[derive(Debug, Clone)]
pub struct AlphaBetaConfig {
    /// Deepest iteration of iterative deepening.
    pub max_depth: u32,

    /// Sampled outcomes averaged per chance action (at least 1).
    pub chance_samples: u32,

    pub use_transposition_table: bool,

    /// Entries kept before least-recently-used eviction.
    pub tt_capacity: usize,

    pub time: TimeManagerConfig,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 50,
            chance_samples: 3,
            use_transposition_table: true,
            tt_capacity: 1_000_000,
            time: TimeManagerConfig::default(),
        }
    }
}

impl AlphaBetaConfig {
    /// Create a small, fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 6,
            tt_capacity: 10_000,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_chance_samples(mut self, samples: u32) -> Self {
        self.chance_samples = samples;
        self
    }

    pub fn with_transposition_table(mut self, enabled: bool) -> Self {
        self.use_transposition_table = enabled;
        self
    }

    pub fn with_tt_capacity(mut self, capacity: usize) -> Self {
        self.tt_capacity = capacity;
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
        let config = AlphaBetaConfig::default();
        assert_eq!(config.chance_samples, 3);
        assert_eq!(config.tt_capacity, 1_000_000);
        assert!(config.use_transposition_table);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AlphaBetaConfig::for_testing()
            .with_max_depth(3)
            .with_chance_samples(5)
            .with_transposition_table(false);

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.chance_samples, 5);
        assert!(!config.use_transposition_table);
    }
}
