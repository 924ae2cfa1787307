//! MCTS search implementation.
//!
//! Each iteration runs four phases:
//! 1. Selection: from the root, follow the child with the highest UCT score
//!    until an unexpanded or terminal node. Chance nodes are crossed by
//!    drawing one of their outcome children uniformly and replaying the
//!    action with that outcome's seed.
//! 2. Expansion: add one child per legal action of the reached state.
//! 3. Simulation: random playout of at most `rollout_depth` plies, then a
//!    single evaluator call.
//! 4. Backpropagation: credit the evaluation to every node on the path,
//!    according to the configured [`BackupMode`].
//!
//! Nodes hold no game state; every iteration replays from a clone of the root.

use std::time::{Duration, Instant};

use engine_core::{
    random_rollout, Deadline, Evaluator, GameAction, GameState, MoveSelector, SearchError,
    TimeManager,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::{BackupMode, MctsConfig};
use crate::node::{NodeId, NodeKind};
use crate::tree::MctsTree;

/// Counters collected over one search.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub iterations: u32,
    /// Nodes allocated in the tree, chance and outcome nodes included.
    pub nodes: usize,
    /// Deepest node reached by selection.
    pub max_depth: u32,
    pub elapsed: Duration,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Index of the chosen action in `legal_actions()`.
    pub action: usize,

    /// Visit count per root action, in legal-action order.
    pub visits: Vec<u32>,

    /// Mean reward of the chosen root child.
    pub value: f64,

    /// True if no iteration completed and the action was picked at random.
    pub fallback: bool,

    pub stats: SearchStats,
}

/// MCTS search state for a single move.
pub struct MctsSearch<'a, S, E> {
    tree: MctsTree,
    root_state: &'a S,
    evaluator: &'a E,
    config: MctsConfig,
    max_depth: u32,
}

impl<'a, S, E> MctsSearch<'a, S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    /// Create a new MCTS search from the given game state.
    pub fn new(root_state: &'a S, evaluator: &'a E, config: MctsConfig) -> Self {
        Self {
            tree: MctsTree::new(root_state.acting_player()),
            root_state,
            evaluator,
            config,
            max_depth: 0,
        }
    }

    /// Run iterations until the iteration cap is reached or `deadline` says
    /// the next block of iterations would not fit.
    ///
    /// The deadline is checked before every iteration. Every
    /// `check_interval` iterations the search also stops early if another
    /// block as long as the last one would overrun the budget.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        deadline: Option<Deadline>,
    ) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let root_state = self.root_state;
        let n_actions = root_state.legal_actions().len();
        if root_state.is_terminal() || n_actions == 0 {
            return Err(SearchError::NoLegalActions);
        }

        // Expand the root up front so every iteration lands in a root child.
        let root = self.tree.root();
        self.expand_node(root, root_state, rng)?;

        let check_interval = self.config.time.check_interval.max(1);
        let mut iterations = 0u32;
        let mut last_check = Duration::ZERO;
        loop {
            if self.config.iterations.is_some_and(|cap| iterations >= cap) {
                break;
            }
            if let Some(deadline) = deadline {
                if deadline.expired() {
                    break;
                }
                if iterations > 0 && iterations % check_interval == 0 {
                    let elapsed = deadline.elapsed();
                    if deadline.would_exceed(elapsed.saturating_sub(last_check)) {
                        break;
                    }
                    last_check = elapsed;
                }
            }
            self.simulate(rng)?;
            iterations += 1;
        }

        let visits = self.tree.root_visits();
        let (action, fallback) = match self.tree.best_action() {
            Some((action, count)) if count > 0 => (action as usize, false),
            _ => {
                debug!("No MCTS iteration completed, picking randomly");
                (rng.gen_range(0..n_actions), true)
            }
        };

        let root_children = &self.tree.get(root).children;
        let value = root_children
            .get(action)
            .map(|&id| self.tree.get(id).mean_value())
            .unwrap_or(0.0);

        let stats = SearchStats {
            iterations,
            nodes: self.tree.len(),
            max_depth: self.max_depth,
            elapsed: start.elapsed(),
        };
        debug!(
            action,
            value,
            iterations = stats.iterations,
            nodes = stats.nodes,
            max_depth = stats.max_depth,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            visits,
            value,
            fallback,
            stats,
        })
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SearchError> {
        let mut state = self.root_state.clone();
        let mut current = self.tree.root();
        let mut depth = 0u32;

        while !state.is_terminal() {
            if !self.tree.get(current).is_expanded() {
                self.expand_node(current, &state, rng)?;
                break;
            }

            let Some(child) = self.tree.select_child(current, self.config.exploration) else {
                break;
            };
            let (index, kind) = {
                let node = self.tree.get(child);
                (node.action as usize, node.kind)
            };
            let action = state
                .legal_actions()
                .into_iter()
                .nth(index)
                .ok_or_else(|| {
                    SearchError::ContractViolation(format!(
                        "action {index} is not legal when the path is replayed"
                    ))
                })?;

            depth += 1;
            match kind {
                NodeKind::Decision => {
                    action.apply(&mut state, rng);
                    current = child;
                }
                NodeKind::Chance { base_seed } => {
                    let outcomes = &self.tree.get(child).children;
                    let outcome = rng.gen_range(0..outcomes.len());
                    current = outcomes[outcome];
                    action.apply_seeded(&mut state, base_seed.wrapping_add(outcome as u64));
                    depth += 1;
                }
            }
        }
        self.max_depth = self.max_depth.max(depth);

        random_rollout(&mut state, Some(self.config.rollout_depth), rng)?;
        let value = self.evaluator.evaluate(&state).clamp(0.0, 1.0);
        let leaf_player = state.acting_player();

        match self.config.backup {
            BackupMode::Raw => self.tree.backpropagate(current, |_| value),
            BackupMode::ActingPlayer => self.tree.backpropagate(current, |node| {
                if node.player == leaf_player {
                    value
                } else {
                    1.0 - value
                }
            }),
        }

        trace!(leaf = current.0, depth, value, "MCTS iteration complete");
        Ok(())
    }

    /// Add a child for every legal action of `state`, in legal-action order.
    /// Chance actions get a chance node with its outcome children.
    fn expand_node<R: Rng + ?Sized>(
        &mut self,
        node_id: NodeId,
        state: &S,
        rng: &mut R,
    ) -> Result<(), SearchError> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::ContractViolation(
                "non-terminal state has no legal actions".to_string(),
            ));
        }

        let player = state.acting_player();
        let outcomes = self.config.chance_samples.max(1);
        for (i, action) in actions.iter().enumerate() {
            if action.is_chance() {
                self.tree
                    .add_chance_child(node_id, i as u32, player, rng.gen(), outcomes);
            } else {
                self.tree.add_child(node_id, i as u32, player);
            }
        }
        Ok(())
    }

    /// Get the tree (for debugging/analysis).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<S, E, R>(
    state: &S,
    evaluator: &E,
    config: MctsConfig,
    deadline: Option<Deadline>,
    rng: &mut R,
) -> Result<SearchResult, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
    R: Rng + ?Sized,
{
    MctsSearch::new(state, evaluator, config).run(rng, deadline)
}

/// MCTS move selector. A fresh tree is built for every move.
pub struct Mcts<E> {
    config: MctsConfig,
    evaluator: E,
    time: TimeManager,
    rng: ChaCha20Rng,
}

impl<E> Mcts<E> {
    pub fn new(config: MctsConfig, evaluator: E) -> Self {
        let time = TimeManager::new(config.time.clone());
        Self {
            config,
            evaluator,
            time,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Use a deterministic generator for selection, playouts and chance seeds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Search `state` and return the full result.
    ///
    /// With an iteration cap and no clock the search is purely
    /// iteration-limited. Otherwise the time manager's move budget applies,
    /// together with the cap if one is set.
    pub fn search<S>(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<SearchResult, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if state.legal_actions().is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let start = Instant::now();
        let deadline = match (self.config.iterations, time_remaining) {
            (Some(_), None) => None,
            _ => Some(Deadline::starting_at(
                start,
                self.time.move_budget(state, time_remaining, &mut self.rng)?,
            )),
        };

        MctsSearch::new(state, &self.evaluator, self.config.clone()).run(&mut self.rng, deadline)
    }
}

impl<S, E> MoveSelector<S> for Mcts<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn name(&self) -> &str {
        "mcts"
    }

    fn select_action(
        &mut self,
        state: &S,
        time_remaining: Option<Duration>,
    ) -> Result<usize, SearchError> {
        self.search(state, time_remaining).map(|r| r.action)
    }
}

#[cfg(test)]
mod tests;
