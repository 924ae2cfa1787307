//! Zobrist feature layout.
//!
//! Card collections are hashed as per-type counts, so two states that only
//! differ in the order of a row or deck hash the same. This is intended:
//! draws take a uniformly random card, so deck order never changes what can
//! happen next, and reordering a row or hand only reorders the legal actions.
//!
//! Each card type belongs to exactly one deck. That makes it lossless to
//! merge a player's workers, buildings and aristocrats into one tableau
//! feature, and the three draw piles into one deck feature.

use engine_core::{FeatureId, FeatureSink, ZobristFeatures, ZobristLayout};

use crate::cards::{Card, Deck, MAX_QUANTITY, NUM_CARDS};
use crate::state::{PetersburgState, NUM_PLAYERS, WAREHOUSE_HAND_SIZE};

const PHASE: FeatureId = FeatureId(0);
const TO_MOVE: FeatureId = FeatureId(1);
const ROUND: FeatureId = FeatureId(2);
const RUBLES: FeatureId = FeatureId(3);
const POINTS: FeatureId = FeatureId(4);
const PASSED: FeatureId = FeatureId(5);
const USED_OBSERVATORIES: FeatureId = FeatureId(6);
const STARTING_PLAYER: FeatureId = FeatureId(7);
const HAND: FeatureId = FeatureId(8);
const TABLEAU: FeatureId = FeatureId(9);
const UPPER_ROW: FeatureId = FeatureId(10);
const LOWER_ROW: FeatureId = FeatureId(11);
const DECK: FeatureId = FeatureId(12);
const DISCARD: FeatureId = FeatureId(13);
const OBSERVED: FeatureId = FeatureId(14);

pub const MAX_HASHED_ROUND: usize = 63;
pub const MAX_HASHED_RUBLES: usize = 300;
/// Points are hashed with this offset; end-of-game hand penalties can push
/// them below zero.
pub const POINTS_OFFSET: i32 = 50;
pub const MAX_HASHED_POINTS: usize = 350;

fn counts<'a>(cards: impl IntoIterator<Item = &'a Card>) -> [usize; NUM_CARDS] {
    let mut counts = [0; NUM_CARDS];
    for card in cards {
        counts[card.index()] += 1;
    }
    counts
}

impl ZobristFeatures for PetersburgState {
    fn zobrist_layout() -> ZobristLayout {
        let per_player_cards = NUM_PLAYERS * NUM_CARDS;
        ZobristLayout::new()
            .feature("phase", 1, 5)
            .feature("to_move", 1, NUM_PLAYERS)
            .feature("round", 1, MAX_HASHED_ROUND + 1)
            .feature("rubles", NUM_PLAYERS, MAX_HASHED_RUBLES + 1)
            .feature("points", NUM_PLAYERS, MAX_HASHED_POINTS + 1)
            .feature("passed", NUM_PLAYERS, 2)
            .feature("used_observatories", NUM_PLAYERS, 3)
            .feature("starting_player", Deck::ALL.len(), NUM_PLAYERS)
            .feature("hand", per_player_cards, WAREHOUSE_HAND_SIZE + 1)
            .feature("tableau", per_player_cards, MAX_QUANTITY + 1)
            .feature("upper_row", NUM_CARDS, MAX_QUANTITY + 1)
            .feature("lower_row", NUM_CARDS, MAX_QUANTITY + 1)
            .feature("deck", NUM_CARDS, MAX_QUANTITY + 1)
            .feature("discard", NUM_CARDS, MAX_QUANTITY + 1)
            .feature("observed", 1, NUM_CARDS + 1)
    }

    fn visit_features(&self, sink: &mut FeatureSink<'_>) {
        sink.put(PHASE, 0, self.phase.index());
        sink.put(TO_MOVE, 0, self.to_move);
        sink.put(ROUND, 0, self.round as usize);
        for deck in Deck::ALL {
            sink.put(STARTING_PLAYER, deck.index(), self.starting_player(deck));
        }

        for (p, player) in self.players.iter().enumerate() {
            sink.put(RUBLES, p, player.rubles as usize);
            sink.put(POINTS, p, (player.points + POINTS_OFFSET).max(0) as usize);
            sink.put(PASSED, p, usize::from(player.passed));
            sink.put(USED_OBSERVATORIES, p, player.used_observatories as usize);

            let first = p * NUM_CARDS;
            sink.put_list(HAND, first, counts(&player.hand));
            let owned = player
                .workers
                .iter()
                .chain(&player.buildings)
                .chain(&player.aristocrats);
            sink.put_list(TABLEAU, first, counts(owned));
        }

        sink.put_list(UPPER_ROW, 0, counts(&self.upper_row));
        sink.put_list(LOWER_ROW, 0, counts(&self.lower_row));
        sink.put_list(DECK, 0, counts(self.decks.iter().flatten()));
        sink.put_list(DISCARD, 0, counts(&self.discard));
        sink.put(OBSERVED, 0, self.observed.map_or(0, |c| c.index() + 1));
    }
}
