use engine_core::{
    Evaluator, FeatureId, FeatureSink, GameAction, GameState, PlayerId, ZobristFeatures,
    ZobristLayout,
};
use rand::Rng;

/// Most tokens a single `Take` may remove.
pub const MAX_TAKE: u32 = 3;

/// Largest pile the Zobrist layout distinguishes.
pub const MAX_PILE: u32 = 10_000;

const PILE: FeatureId = FeatureId(0);
const TO_MOVE: FeatureId = FeatureId(1);
const WINNER: FeatureId = FeatureId(2);

/// Two-player subtraction game.
///
/// Once the pile is empty the game is over and the player who took the last
/// token stays the acting player, so evaluators can score the final
/// position from the winner's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    pile: u32,
    to_move: PlayerId,
    winner: Option<PlayerId>,
    gamble: bool,
}

impl Nim {
    pub fn new(pile: u32) -> Self {
        Self {
            pile,
            to_move: 0,
            winner: None,
            gamble: false,
        }
    }

    /// Variant where every position also offers [`NimAction::Gamble`].
    pub fn with_gamble(pile: u32) -> Self {
        Self {
            gamble: true,
            ..Self::new(pile)
        }
    }

    pub fn pile(&self) -> u32 {
        self.pile
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn remove(&mut self, amount: u32) {
        let amount = amount.min(self.pile);
        self.pile -= amount;
        if self.pile == 0 {
            self.winner = Some(self.to_move);
        } else {
            self.to_move = 1 - self.to_move;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NimAction {
    Take(u32),
    /// Remove a uniformly random 1..=3 tokens.
    Gamble,
}

impl GameState for Nim {
    type Action = NimAction;

    fn acting_player(&self) -> PlayerId {
        self.to_move
    }

    fn is_terminal(&self) -> bool {
        self.pile == 0
    }

    fn legal_actions(&self) -> Vec<NimAction> {
        if self.pile == 0 {
            return Vec::new();
        }
        let mut actions: Vec<NimAction> = (1..=MAX_TAKE.min(self.pile)).map(NimAction::Take).collect();
        if self.gamble {
            actions.push(NimAction::Gamble);
        }
        actions
    }
}

impl GameAction<Nim> for NimAction {
    fn is_chance(&self) -> bool {
        matches!(self, NimAction::Gamble)
    }

    fn apply<R: Rng + ?Sized>(&self, state: &mut Nim, rng: &mut R) {
        match *self {
            NimAction::Take(n) => state.remove(n),
            NimAction::Gamble => {
                let n = rng.gen_range(1..=MAX_TAKE);
                state.remove(n);
            }
        }
    }
}

impl ZobristFeatures for Nim {
    fn zobrist_layout() -> ZobristLayout {
        ZobristLayout::new()
            .feature("pile", 1, MAX_PILE as usize + 1)
            .feature("to_move", 1, 2)
            .feature("winner", 1, 3)
    }

    fn visit_features(&self, sink: &mut FeatureSink<'_>) {
        sink.put(PILE, 0, self.pile as usize);
        sink.put(TO_MOVE, 0, self.to_move);
        sink.put(WINNER, 0, self.winner.map_or(0, |p| p + 1));
    }
}

/// Heuristic from deterministic Nim theory: a pile that is a multiple of
/// four is lost for the player to move.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimEvaluator;

impl Evaluator<Nim> for NimEvaluator {
    fn evaluate(&self, state: &Nim) -> f64 {
        match state.winner {
            Some(winner) if winner == state.to_move => 1.0,
            Some(_) => 0.0,
            None if state.pile % (MAX_TAKE + 1) == 0 => 0.25,
            None => 0.75,
        }
    }
}
