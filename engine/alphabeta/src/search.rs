//! Iterative-deepening alpha-beta search with chance sampling.
//!
//! Values are win probabilities from the root player's point of view. Nodes
//! where the root player acts maximize, all others minimize. A chance action
//! is scored by the mean over `chance_samples` seeded outcomes: sample 0
//! keeps the state's own random order, later samples perturb it first.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use engine_core::{
    value_for, Deadline, Evaluator, GameAction, GameState, MoveSelector, PlayerId, SearchError,
    TimeManager, ZobristFeatures, ZobristTable,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::AlphaBetaConfig;
use crate::tt::{Probe, TranspositionTable, TtEntry};

/// Result of an alpha-beta search.
#[derive(Debug, Clone)]
pub struct AlphaBetaResult {
    /// Index of the chosen action in `legal_actions()`.
    pub action: usize,

    /// Value of the chosen action at the deepest completed depth.
    pub value: f64,

    /// Deepest fully completed iteration (0 if the root had one action).
    pub depth: u32,

    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_stores: u64,
    pub budget: Duration,
    pub elapsed: Duration,
}

/// Per-move search state.
struct SearchContext {
    root_player: PlayerId,
    /// Seed shared by every chance sample of this move, so that revisiting a
    /// position reproduces the same sampled outcomes.
    base_seed: u64,
    deadline: Deadline,
    check_interval: u64,
    /// Set once a depth has completed; only then may a depth be abandoned.
    may_abort: bool,
    aborted: bool,
    nodes: u64,
}

impl SearchContext {
    fn tick(&mut self) {
        self.nodes += 1;
        if self.may_abort && self.nodes % self.check_interval == 0 && self.deadline.expired() {
            self.aborted = true;
        }
    }
}

/// Alpha-beta move selector.
pub struct AlphaBeta<S, E> {
    config: AlphaBetaConfig,
    evaluator: E,
    tt: TranspositionTable,
    zobrist: ZobristTable,
    time: TimeManager,
    rng: ChaCha20Rng,
    /// Player whose perspective the table's values were stored from.
    tt_perspective: Option<PlayerId>,
    _state: PhantomData<fn() -> S>,
}

impl<S, E> AlphaBeta<S, E>
where
    S: GameState + ZobristFeatures,
    E: Evaluator<S>,
{
    pub fn new(config: AlphaBetaConfig, evaluator: E) -> Self {
        let tt_capacity = if config.use_transposition_table {
            config.tt_capacity
        } else {
            0
        };
        Self {
            tt: TranspositionTable::new(tt_capacity),
            zobrist: ZobristTable::for_state::<S>(),
            time: TimeManager::new(config.time.clone()),
            rng: ChaCha20Rng::from_entropy(),
            tt_perspective: None,
            config,
            evaluator,
            _state: PhantomData,
        }
    }

    /// Use a deterministic generator for budgeting playouts and chance seeds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Player whose point of view the table's values are stored from.
    pub fn perspective(&self) -> Option<PlayerId> {
        self.tt_perspective
    }

    pub fn clear_transposition_table(&mut self) {
        self.tt.clear();
        self.tt_perspective = None;
    }

    /// Stored values are relative to one root player; switching sides
    /// invalidates them.
    fn prepare_table(&mut self, root_player: PlayerId) {
        if self.tt_perspective != Some(root_player) {
            if !self.tt.is_empty() {
                debug!(root_player, "Root player changed, clearing transposition table");
            }
            self.tt.clear();
            self.tt_perspective = Some(root_player);
        }
        self.tt.reset_stats();
    }

    /// Choose an action for `state`'s acting player.
    ///
    /// Deepens from 1 to `max_depth` and returns the best action of the
    /// deepest completed depth. Stops early when the next depth is unlikely
    /// to finish within the move budget (`elapsed + 2 * last_depth`), and
    /// abandons a depth in progress once the budget is spent.
    pub fn search(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<AlphaBetaResult, SearchError> {
        let start = Instant::now();
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let root_player = state.acting_player();
        if actions.len() == 1 {
            return Ok(AlphaBetaResult {
                action: 0,
                value: value_for(&self.evaluator, state, root_player),
                depth: 0,
                nodes: 0,
                tt_hits: 0,
                tt_stores: 0,
                budget: Duration::ZERO,
                elapsed: start.elapsed(),
            });
        }

        // The estimate playouts count against the move's budget.
        let budget = self.time.move_budget(state, time_remaining, &mut self.rng)?;
        self.prepare_table(root_player);
        let mut ctx = SearchContext {
            root_player,
            base_seed: self.rng.gen(),
            deadline: Deadline::starting_at(start, budget),
            check_interval: u64::from(self.time.check_interval()),
            may_abort: false,
            aborted: false,
            nodes: 0,
        };

        let mut completed: Option<(usize, f64, u32)> = None;
        for depth in 1..=self.config.max_depth.max(1) {
            let depth_start = Instant::now();
            ctx.may_abort = completed.is_some();

            let mut alpha = f64::NEG_INFINITY;
            let mut best_value = f64::NEG_INFINITY;
            let mut best_index = 0;
            for (i, action) in actions.iter().enumerate() {
                let value = self.action_value(&mut ctx, state, i, action, depth, alpha, f64::INFINITY)?;
                if ctx.aborted {
                    break;
                }
                if value > best_value {
                    best_value = value;
                    best_index = i;
                }
                alpha = alpha.max(best_value);
            }

            if ctx.aborted {
                debug!(depth, nodes = ctx.nodes, "Out of time, abandoning depth");
                break;
            }
            completed = Some((best_index, best_value, depth));

            let depth_time = depth_start.elapsed();
            trace!(
                depth,
                action = best_index,
                value = best_value,
                depth_ms = depth_time.as_millis() as u64,
                "Depth complete"
            );
            if depth < self.config.max_depth
                && (ctx.deadline.would_exceed(depth_time * 2) || ctx.deadline.expired())
            {
                break;
            }
        }

        let (action, value, depth) = completed.ok_or_else(|| {
            SearchError::ContractViolation("first search depth did not complete".into())
        })?;
        let stats = self.tt.stats();
        let result = AlphaBetaResult {
            action,
            value,
            depth,
            nodes: ctx.nodes,
            tt_hits: stats.hits,
            tt_stores: stats.stores,
            budget,
            elapsed: start.elapsed(),
        };
        debug!(
            action = result.action,
            value = result.value,
            depth = result.depth,
            nodes = result.nodes,
            tt_hits = result.tt_hits,
            tt_stores = result.tt_stores,
            tt_size = self.tt.len(),
            budget_ms = budget.as_millis() as u64,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Alpha-beta search complete"
        );
        Ok(result)
    }

    /// Value of `state` searched to exactly `depth` with a full window and
    /// no time limit.
    pub fn evaluate_to_depth(&mut self, state: &S, depth: u32) -> Result<f64, SearchError> {
        let root_player = state.acting_player();
        self.prepare_table(root_player);
        let mut ctx = SearchContext {
            root_player,
            base_seed: self.rng.gen(),
            deadline: Deadline::new(Duration::MAX),
            check_interval: u64::from(self.time.check_interval()),
            may_abort: false,
            aborted: false,
            nodes: 0,
        };
        self.alpha_beta(&mut ctx, state, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn leaf_value(&mut self, key: Option<u64>, state: &S, depth: u32, root_player: PlayerId) -> f64 {
        let value = value_for(&self.evaluator, state, root_player);
        if let Some(key) = key {
            self.tt.store(key, TtEntry::exact(value, depth));
        }
        value
    }

    fn alpha_beta(
        &mut self,
        ctx: &mut SearchContext,
        state: &S,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SearchError> {
        ctx.tick();
        if ctx.aborted {
            return Ok(0.0);
        }

        let key = self
            .config
            .use_transposition_table
            .then(|| self.zobrist.hash(state));
        if let Some(key) = key {
            match self.tt.probe(key, depth, alpha, beta) {
                Probe::Cutoff(value) => return Ok(value),
                Probe::Window { alpha: a, beta: b } => {
                    alpha = a;
                    beta = b;
                }
                Probe::Miss => {}
            }
        }

        if depth == 0 || state.is_terminal() {
            return Ok(self.leaf_value(key, state, depth, ctx.root_player));
        }
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Ok(self.leaf_value(key, state, depth, ctx.root_player));
        }

        let maximizing = state.acting_player() == ctx.root_player;
        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (i, action) in actions.iter().enumerate() {
            let value = self.action_value(ctx, state, i, action, depth, alpha, beta)?;
            if ctx.aborted {
                return Ok(best);
            }
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        if let Some(key) = key {
            let entry = if best <= orig_alpha {
                TtEntry::upper_bound(best, depth)
            } else if best >= orig_beta {
                TtEntry::lower_bound(best, depth)
            } else {
                TtEntry::exact(best, depth)
            };
            self.tt.store(key, entry);
        }
        Ok(best)
    }

    /// Value of taking the `index`-th action of `state` with `depth` plies
    /// left including this one.
    #[allow(clippy::too_many_arguments)]
    fn action_value(
        &mut self,
        ctx: &mut SearchContext,
        state: &S,
        index: usize,
        action: &S::Action,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<f64, SearchError> {
        if !action.is_chance() {
            let mut child = state.clone();
            action.apply_seeded(&mut child, ctx.base_seed);
            return self.alpha_beta(ctx, &child, depth - 1, alpha, beta);
        }

        // Averages are only meaningful over exact values, so samples get an
        // open window.
        let samples = self.config.chance_samples.max(1);
        let mut total = 0.0;
        for k in 0..samples {
            let mut child = state.clone();
            let mut rng = ChaCha20Rng::seed_from_u64(ctx.base_seed.wrapping_add(u64::from(k)));
            if k == 0 {
                action.apply(&mut child, &mut rng);
            } else {
                child.perturb_chance(&mut rng);
                let sampled = child.legal_actions().into_iter().nth(index).ok_or_else(|| {
                    SearchError::ContractViolation(format!(
                        "action {index} vanished after perturbing chance"
                    ))
                })?;
                sampled.apply(&mut child, &mut rng);
            }
            total += self.alpha_beta(ctx, &child, depth - 1, f64::NEG_INFINITY, f64::INFINITY)?;
            if ctx.aborted {
                return Ok(total / f64::from(k + 1));
            }
        }
        Ok(total / f64::from(samples))
    }
}

impl<S, E> MoveSelector<S> for AlphaBeta<S, E>
where
    S: GameState + ZobristFeatures,
    E: Evaluator<S>,
{
    fn name(&self) -> &str {
        "alphabeta"
    }

    fn select_action(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<usize, SearchError> {
        self.search(state, time_remaining).map(|r| r.action)
    }
}
