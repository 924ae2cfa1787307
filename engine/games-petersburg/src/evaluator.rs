//! Hand-tuned logistic position evaluator.

use engine_core::{Evaluator, GameState, PlayerId};

use crate::cards::Deck;
use crate::state::{PetersburgState, Phase, HAND_PENALTY};

/// Scores a position by the material balance between the players, squashed
/// through a logistic curve. Terminal positions score 1, 0.5 or 0.
#[derive(Debug, Clone, Copy)]
pub struct PetersburgEvaluator {
    /// Logistic slope applied to the score difference.
    pub slope: f64,
    /// Weight of one round of income (rubles and points from owned cards).
    pub income_weight: f64,
}

impl Default for PetersburgEvaluator {
    fn default() -> Self {
        Self {
            slope: 0.15,
            income_weight: 1.5,
        }
    }
}

impl PetersburgEvaluator {
    /// Estimated final score of `player`, in points.
    pub fn material(&self, state: &PetersburgState, player: PlayerId) -> f64 {
        let board = state.player(player);
        let (mut rubles, mut points) = (0u32, 0u32);
        for deck in Deck::ALL {
            let (r, p) = board.income(deck);
            rubles += r;
            points += p;
        }
        let income = f64::from(points) + f64::from(rubles) / 3.0;

        f64::from(board.points)
            + f64::from(board.rubles) / 10.0
            + self.income_weight * income
            + board.unique_aristocrats() as f64
            - f64::from(HAND_PENALTY) * 0.5 * board.hand.len() as f64
    }
}

impl Evaluator<PetersburgState> for PetersburgEvaluator {
    fn evaluate(&self, state: &PetersburgState) -> f64 {
        let me = state.acting_player();
        let opponent = 1 - me;

        if state.phase() == Phase::End {
            let winners = state.winners();
            return match (winners.contains(&me), winners.len()) {
                (true, 1) => 1.0,
                (true, _) => 0.5,
                (false, _) => 0.0,
            };
        }

        let diff = self.material(state, me) - self.material(state, opponent);
        1.0 / (1.0 + (-self.slope * diff).exp())
    }
}
