use engine_core::{
    Evaluator, FeatureId, FeatureSink, GameAction, GameState, PlayerId, ZobristFeatures,
    ZobristLayout,
};
use rand::Rng;

/// One decision: win now or lose now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fork {
    outcome: Option<bool>,
    win_first: bool,
}

impl Fork {
    /// Fork whose legal actions are `[Win, Lose]`.
    pub fn win_first() -> Self {
        Self {
            outcome: None,
            win_first: true,
        }
    }

    /// Fork whose legal actions are `[Lose, Win]`.
    pub fn lose_first() -> Self {
        Self {
            outcome: None,
            win_first: false,
        }
    }

    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    /// Index of [`ForkAction::Win`] among the legal actions.
    pub fn winning_index(&self) -> usize {
        if self.win_first {
            0
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkAction {
    Win,
    Lose,
}

impl GameState for Fork {
    type Action = ForkAction;

    fn acting_player(&self) -> PlayerId {
        0
    }

    fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    fn legal_actions(&self) -> Vec<ForkAction> {
        match (self.outcome, self.win_first) {
            (Some(_), _) => Vec::new(),
            (None, true) => vec![ForkAction::Win, ForkAction::Lose],
            (None, false) => vec![ForkAction::Lose, ForkAction::Win],
        }
    }
}

impl GameAction<Fork> for ForkAction {
    fn apply<R: Rng + ?Sized>(&self, state: &mut Fork, _rng: &mut R) {
        state.outcome = Some(matches!(self, ForkAction::Win));
    }
}

impl ZobristFeatures for Fork {
    fn zobrist_layout() -> ZobristLayout {
        ZobristLayout::new().feature("outcome", 1, 3)
    }

    fn visit_features(&self, sink: &mut FeatureSink<'_>) {
        let value = match self.outcome {
            None => 0,
            Some(false) => 1,
            Some(true) => 2,
        };
        sink.put(FeatureId(0), 0, value);
    }
}

/// 1.0 after winning, 0.0 after losing, 0.5 before deciding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForkEvaluator;

impl Evaluator<Fork> for ForkEvaluator {
    fn evaluate(&self, state: &Fork) -> f64 {
        match state.outcome {
            Some(true) => 1.0,
            Some(false) => 0.0,
            None => 0.5,
        }
    }
}
