//! Flat Monte Carlo search.

use std::time::{Duration, Instant};

use engine_core::{
    random_rollout, value_for, Deadline, Evaluator, GameAction, GameState, MoveSelector,
    SearchError, TimeManager,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::FlatMcConfig;

/// Result of a flat Monte Carlo search.
#[derive(Debug, Clone)]
pub struct FlatMcResult {
    /// Index of the chosen action in `legal_actions()`.
    pub action: usize,

    /// Mean value per root action, from the root player's perspective.
    /// `None` for actions that received no simulation.
    pub mean_values: Vec<Option<f64>>,

    /// Completed simulations per root action.
    pub simulations: Vec<u32>,

    /// True if the budget ran out before any simulation finished and the
    /// action was picked at random.
    pub fallback: bool,

    pub elapsed: Duration,
}

impl FlatMcResult {
    pub fn total_simulations(&self) -> u32 {
        self.simulations.iter().sum()
    }
}

/// Flat Monte Carlo move selector.
pub struct FlatMonteCarlo<E> {
    config: FlatMcConfig,
    evaluator: E,
    time: TimeManager,
    rng: ChaCha20Rng,
}

impl<E> FlatMonteCarlo<E> {
    pub fn new(config: FlatMcConfig, evaluator: E) -> Self {
        let time = TimeManager::new(config.time.clone());
        Self {
            config,
            evaluator,
            time,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Use a deterministic generator for playouts and chance outcomes.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &FlatMcConfig {
        &self.config
    }

    fn deadline(&self, time_remaining: Option<Duration>) -> Option<Deadline> {
        let cap = time_remaining.map(|r| self.time.hard_cap(r));
        let budget = match (self.config.move_time, cap) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        budget.map(Deadline::new)
    }

    /// Run the search from `state`.
    pub fn search<S>(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<FlatMcResult, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let start = Instant::now();
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let n = actions.len();
        if n == 1 {
            return Ok(FlatMcResult {
                action: 0,
                mean_values: vec![None],
                simulations: vec![0],
                fallback: false,
                elapsed: start.elapsed(),
            });
        }

        let root_player = state.acting_player();
        let deadline = self.deadline(time_remaining);
        let mut totals = vec![0.0f64; n];
        let mut counts = vec![0u32; n];

        // Round-robin so a deadline leaves every action with similar counts.
        'rounds: for _ in 0..self.config.simulations_per_action {
            for (i, action) in actions.iter().enumerate() {
                if deadline.is_some_and(|d| d.expired()) {
                    break 'rounds;
                }
                let mut sim = state.clone();
                action.apply(&mut sim, &mut self.rng);
                random_rollout(&mut sim, Some(self.config.rollout_depth), &mut self.rng)?;
                totals[i] += value_for(&self.evaluator, &sim, root_player);
                counts[i] += 1;
            }
        }

        let mean_values: Vec<Option<f64>> = totals
            .iter()
            .zip(&counts)
            .map(|(&total, &count)| (count > 0).then(|| total / count as f64))
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for (i, mean) in mean_values.iter().enumerate() {
            if let Some(mean) = *mean {
                trace!(action = i, mean, simulations = counts[i], "Root action");
                if best.map_or(true, |(_, b)| mean > b) {
                    best = Some((i, mean));
                }
            }
        }

        let (action, fallback) = match best {
            Some((i, _)) => (i, false),
            None => {
                debug!("Budget exhausted before any simulation, picking randomly");
                (self.rng.gen_range(0..n), true)
            }
        };

        let result = FlatMcResult {
            action,
            mean_values,
            simulations: counts,
            fallback,
            elapsed: start.elapsed(),
        };
        debug!(
            action = result.action,
            value = result.mean_values[action].unwrap_or(f64::NAN),
            simulations = result.total_simulations(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Flat MC search complete"
        );
        Ok(result)
    }
}

impl<S, E> MoveSelector<S> for FlatMonteCarlo<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn name(&self) -> &str {
        "flat-mc"
    }

    fn select_action(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<usize, SearchError> {
        self.search(state, time_remaining).map(|r| r.action)
    }
}
