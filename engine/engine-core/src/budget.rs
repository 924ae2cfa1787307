//! Turning a game clock into a per-move time budget.
//!
//! The budget for a move is the remaining clock spread over the decisions
//! the player is still expected to make, scaled by an opening factor and
//! capped at a fixed fraction of the clock:
//!
//! ```text
//! budget = min(opening_factor * remaining / expected_decisions,
//!              remaining / max_fraction_divisor)
//! ```
//!
//! Expected decisions come from a few random playouts of the current state.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::playout::estimate_remaining_decisions;
use crate::selector::SearchError;
use crate::state::GameState;

/// Time manager parameters.
#[derive(Debug, Clone)]
pub struct TimeManagerConfig {
    /// Multiplier on the even split of the remaining clock.
    pub opening_factor: f64,

    /// Random playouts used to estimate the remaining decisions.
    pub estimate_playouts: u32,

    /// A single move never gets more than `remaining / max_fraction_divisor`.
    pub max_fraction_divisor: u32,

    /// Units of work (nodes, iterations) between clock checks.
    pub check_interval: u32,

    /// Budget used when the remaining clock is unknown.
    pub default_move_time: Duration,
}

impl Default for TimeManagerConfig {
    fn default() -> Self {
        Self {
            opening_factor: 1.1,
            estimate_playouts: 3,
            max_fraction_divisor: 20,
            check_interval: 100,
            default_move_time: Duration::from_millis(1000),
        }
    }
}

impl TimeManagerConfig {
    pub fn with_default_move_time(mut self, budget: Duration) -> Self {
        self.default_move_time = budget;
        self
    }

    pub fn with_check_interval(mut self, interval: u32) -> Self {
        self.check_interval = interval;
        self
    }
}

/// Allocates per-move time budgets.
#[derive(Debug, Clone, Default)]
pub struct TimeManager {
    config: TimeManagerConfig,
}

impl TimeManager {
    pub fn new(config: TimeManagerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimeManagerConfig {
        &self.config
    }

    /// Clock checks happen every `check_interval` units of work (at least 1).
    pub fn check_interval(&self) -> u32 {
        self.config.check_interval.max(1)
    }

    /// Largest share of `remaining` a single move may use.
    pub fn hard_cap(&self, remaining: Duration) -> Duration {
        remaining / self.config.max_fraction_divisor.max(1)
    }

    /// Budget for a move given an expected number of remaining decisions.
    pub fn allocate(&self, remaining: Option<Duration>, expected_decisions: f64) -> Duration {
        let Some(remaining) = remaining else {
            return self.config.default_move_time;
        };
        let decisions = expected_decisions.max(1.0);
        let even_split = remaining.as_secs_f64() * self.config.opening_factor / decisions;
        Duration::from_secs_f64(even_split).min(self.hard_cap(remaining))
    }

    /// Budget for the move pending in `root`.
    ///
    /// Only runs the decision-estimate playouts when the remaining clock is
    /// known.
    pub fn move_budget<S, R>(
        &self,
        root: &S,
        remaining: Option<Duration>,
        rng: &mut R,
    ) -> Result<Duration, SearchError>
    where
        S: GameState,
        R: Rng + ?Sized,
    {
        let Some(remaining) = remaining else {
            return Ok(self.config.default_move_time);
        };
        let decisions = estimate_remaining_decisions(root, self.config.estimate_playouts, rng)?;
        let budget = self.allocate(Some(remaining), decisions);
        debug!(
            remaining_ms = remaining.as_millis() as u64,
            decisions,
            budget_ms = budget.as_millis() as u64,
            "Allocated move budget"
        );
        Ok(budget)
    }
}

/// A start instant plus a budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn new(budget: Duration) -> Self {
        Self::starting_at(Instant::now(), budget)
    }

    /// Deadline whose clock started at `start`, so that work done before
    /// the budget was known (e.g. the estimate playouts) is charged to it.
    pub fn starting_at(start: Instant, budget: Duration) -> Self {
        Self { start, budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// Whether `additional` more work would run past the budget.
    pub fn would_exceed(&self, additional: Duration) -> bool {
        self.elapsed()
            .checked_add(additional)
            .map_or(true, |total| total > self.budget)
    }
}
