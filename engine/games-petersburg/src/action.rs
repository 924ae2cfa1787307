//! Player actions.

use std::fmt;

use engine_core::GameAction;
use rand::Rng;

use crate::cards::{Card, Deck};
use crate::state::{PetersburgState, Phase};

/// Where a bought or pocketed card comes from. Indices refer to the state
/// the action was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardSource {
    Upper(usize),
    Lower(usize),
    Hand(usize),
    Observed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetersburgAction {
    /// `ends_phase` is set when the opponent has already passed: the phase
    /// is then scored and the upper row refilled from a deck.
    Pass { ends_phase: bool },
    Buy {
        card: Card,
        source: CardSource,
        cost: u32,
    },
    AddToHand { card: Card, source: CardSource },
    /// Throw away the observed card.
    Discard,
    /// Use an Observatory to draw a random card from a deck.
    Observe(Deck),
    /// Buy points with a Pub at 2 rubles each. The last Pub decision of a
    /// round refills the upper row with aristocrats.
    PubPoints { points: u32, ends_phase: bool },
}

impl GameAction<PetersburgState> for PetersburgAction {
    fn is_chance(&self) -> bool {
        match self {
            PetersburgAction::Observe(_) => true,
            PetersburgAction::Pass { ends_phase } | PetersburgAction::PubPoints { ends_phase, .. } => {
                *ends_phase
            }
            _ => false,
        }
    }

    fn apply<R: Rng + ?Sized>(&self, state: &mut PetersburgState, rng: &mut R) {
        let me = state.to_move;
        match *self {
            PetersburgAction::Pass { .. } => {
                state.players[me].passed = true;
                if state.players.iter().all(|p| p.passed) {
                    state.end_phase(rng);
                } else {
                    state.to_move = PetersburgState::opponent(me);
                }
            }
            PetersburgAction::Buy { source, cost, .. } => {
                state.players[me].passed = false;
                if let Some(card) = state.take_card(source) {
                    state.players[me].rubles = state.players[me].rubles.saturating_sub(cost);
                    state.add_to_tableau(me, card);
                }
                state.to_move = PetersburgState::opponent(me);
            }
            PetersburgAction::AddToHand { source, .. } => {
                state.players[me].passed = false;
                if let Some(card) = state.take_card(source) {
                    state.players[me].hand.push(card);
                }
                state.to_move = PetersburgState::opponent(me);
            }
            PetersburgAction::Discard => {
                if let Some(card) = state.observed.take() {
                    state.discard.push(card);
                }
                state.to_move = PetersburgState::opponent(me);
            }
            PetersburgAction::Observe(deck) => {
                state.players[me].passed = false;
                state.observed = state.draw(deck, rng);
                state.players[me].used_observatories += 1;
            }
            PetersburgAction::PubPoints { points, .. } => {
                let player = &mut state.players[me];
                player.points += points as i32;
                player.rubles = player.rubles.saturating_sub(2 * points);
                match state.next_pub_player(Some(me)) {
                    Some(next) if state.phase == Phase::Pub => state.to_move = next,
                    _ => state.start_aristocrat_phase(rng),
                }
            }
        }
    }
}

impl fmt::Display for CardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSource::Upper(_) => f.write_str("the upper row"),
            CardSource::Lower(_) => f.write_str("the lower row"),
            CardSource::Hand(_) => f.write_str("hand"),
            CardSource::Observed => f.write_str("observation"),
        }
    }
}

impl fmt::Display for PetersburgAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetersburgAction::Pass { .. } => write!(f, "pass"),
            PetersburgAction::Buy { card, source, cost } => {
                write!(f, "buy {card} from {source} for {cost}")
            }
            PetersburgAction::AddToHand { card, source } => {
                write!(f, "add {card} to hand from {source}")
            }
            PetersburgAction::Discard => write!(f, "discard observed card"),
            PetersburgAction::Observe(deck) => write!(f, "observe {deck} deck"),
            PetersburgAction::PubPoints { points, .. } => write!(f, "buy {points} pub points"),
        }
    }
}
