//! Game state and rules.

use engine_core::{GameState, PlayerId};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::action::{CardSource, PetersburgAction};
use crate::cards::{Card, Deck};

pub const NUM_PLAYERS: usize = 2;
pub const STARTING_RUBLES: u32 = 25;
/// Upper and lower row together never hold more than this.
pub const ROW_CAPACITY: usize = 8;
pub const HAND_SIZE: usize = 3;
pub const WAREHOUSE_HAND_SIZE: usize = 4;
/// Points a single Pub can buy per round, at 2 rubles each.
pub const PUB_POINTS: u32 = 5;
/// End-of-game bonus indexed by the number of distinct aristocrats.
pub const UNIQUE_ARISTOCRAT_BONUS: [i32; 11] = [0, 1, 3, 6, 10, 15, 21, 28, 36, 45, 55];
/// End-of-game penalty per card left in hand.
pub const HAND_PENALTY: i32 = 5;

/// Phases of a round. `Pub` only happens when someone owns a Pub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Worker,
    Building,
    Pub,
    Aristocrat,
    End,
}

impl Phase {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Everything a single player owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerBoard {
    pub rubles: u32,
    pub points: i32,
    pub hand: Vec<Card>,
    pub workers: Vec<Card>,
    pub buildings: Vec<Card>,
    pub aristocrats: Vec<Card>,
    /// True while the player's last action in this phase was a pass.
    pub passed: bool,
    pub used_observatories: u32,
}

impl PlayerBoard {
    fn new() -> Self {
        Self {
            rubles: STARTING_RUBLES,
            ..Self::default()
        }
    }

    pub fn tableau(&self, deck: Deck) -> &[Card] {
        match deck {
            Deck::Worker => &self.workers,
            Deck::Building => &self.buildings,
            Deck::Aristocrat => &self.aristocrats,
        }
    }

    fn tableau_mut(&mut self, deck: Deck) -> &mut Vec<Card> {
        match deck {
            Deck::Worker => &mut self.workers,
            Deck::Building => &mut self.buildings,
            Deck::Aristocrat => &mut self.aristocrats,
        }
    }

    pub fn owned(&self, card: Card) -> usize {
        self.tableau(card.deck()).iter().filter(|&&c| c == card).count()
    }

    pub fn hand_limit(&self) -> usize {
        if self.owned(Card::WAREHOUSE) > 0 {
            WAREHOUSE_HAND_SIZE
        } else {
            HAND_SIZE
        }
    }

    pub fn has_hand_room(&self) -> bool {
        self.hand.len() < self.hand_limit()
    }

    pub fn unused_observatories(&self) -> u32 {
        (self.owned(Card::OBSERVATORY) as u32).saturating_sub(self.used_observatories)
    }

    pub fn unique_aristocrats(&self) -> usize {
        let mut seen: Vec<Card> = self.aristocrats.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Rubles and points earned when the `deck` phase is scored.
    pub fn income(&self, deck: Deck) -> (u32, u32) {
        self.tableau(deck).iter().fold((0, 0), |(r, p), c| {
            (r + c.spec().rubles, p + c.spec().points)
        })
    }
}

/// Full game state. Deck order is hidden information in the real game, so
/// every draw picks a uniformly random card and deck order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetersburgState {
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) to_move: PlayerId,
    /// Starting player of each deck phase; rotates every round.
    pub(crate) starting_player: [PlayerId; 3],
    pub(crate) decks: [Vec<Card>; 3],
    pub(crate) upper_row: Vec<Card>,
    pub(crate) lower_row: Vec<Card>,
    pub(crate) discard: Vec<Card>,
    pub(crate) players: [PlayerBoard; NUM_PLAYERS],
    /// Card drawn with an Observatory, waiting for its owner's decision.
    pub(crate) observed: Option<Card>,
}

impl PetersburgState {
    /// Deal a new game: shuffled decks, four workers in the upper row and
    /// random starting players for the three phases.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut decks = Deck::ALL.map(Card::full_deck);
        for deck in &mut decks {
            deck.shuffle(rng);
        }

        let mut starters: [PlayerId; 3] = [0, 1, 0];
        starters.shuffle(rng);

        let mut state = Self {
            phase: Phase::Worker,
            round: 1,
            to_move: starters[Deck::Worker.index()],
            starting_player: starters,
            decks,
            upper_row: Vec::with_capacity(ROW_CAPACITY),
            lower_row: Vec::with_capacity(ROW_CAPACITY),
            discard: Vec::new(),
            players: [PlayerBoard::new(), PlayerBoard::new()],
            observed: None,
        };
        for _ in 0..2 * NUM_PLAYERS {
            if let Some(card) = state.draw(Deck::Worker, rng) {
                state.upper_row.push(card);
            }
        }
        state
    }

    /// Deal a new game from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&mut ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player(&self, player: PlayerId) -> &PlayerBoard {
        &self.players[player]
    }

    pub fn deck(&self, deck: Deck) -> &[Card] {
        &self.decks[deck.index()]
    }

    pub fn upper_row(&self) -> &[Card] {
        &self.upper_row
    }

    pub fn lower_row(&self) -> &[Card] {
        &self.lower_row
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn observed(&self) -> Option<Card> {
        self.observed
    }

    pub fn starting_player(&self, deck: Deck) -> PlayerId {
        self.starting_player[deck.index()]
    }

    /// Players with the most points, ties broken by rubles. Empty until the
    /// game is over; both players on a full tie.
    pub fn winners(&self) -> Vec<PlayerId> {
        if self.phase != Phase::End {
            return Vec::new();
        }
        let best = self
            .players
            .iter()
            .map(|p| (p.points, p.rubles))
            .max()
            .unwrap_or_default();
        (0..NUM_PLAYERS)
            .filter(|&i| (self.players[i].points, self.players[i].rubles) == best)
            .collect()
    }

    /// Cost for `player` to buy `card`: list price, one less from the lower
    /// row, one less per copy already owned, never below 1.
    pub fn buy_cost(&self, player: PlayerId, card: Card, from_lower_row: bool) -> u32 {
        let discount = u32::from(from_lower_row) + self.players[player].owned(card) as u32;
        card.spec().cost.saturating_sub(discount).max(1)
    }

    pub(crate) fn draw<R: Rng + ?Sized>(&mut self, deck: Deck, rng: &mut R) -> Option<Card> {
        let cards = &mut self.decks[deck.index()];
        if cards.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..cards.len());
        Some(cards.swap_remove(index))
    }

    fn refill_upper_row<R: Rng + ?Sized>(&mut self, deck: Deck, rng: &mut R) {
        let missing = ROW_CAPACITY.saturating_sub(self.upper_row.len() + self.lower_row.len());
        for _ in 0..missing {
            match self.draw(deck, rng) {
                Some(card) => self.upper_row.push(card),
                None => break,
            }
        }
    }

    #[inline]
    pub(crate) fn opponent(player: PlayerId) -> PlayerId {
        1 - player
    }

    pub(crate) fn take_card(&mut self, source: CardSource) -> Option<Card> {
        match source {
            CardSource::Upper(i) => (i < self.upper_row.len()).then(|| self.upper_row.remove(i)),
            CardSource::Lower(i) => (i < self.lower_row.len()).then(|| self.lower_row.remove(i)),
            CardSource::Hand(i) => {
                let hand = &mut self.players[self.to_move].hand;
                (i < hand.len()).then(|| hand.remove(i))
            }
            CardSource::Observed => self.observed.take(),
        }
    }

    pub(crate) fn add_to_tableau(&mut self, player: PlayerId, card: Card) {
        self.players[player].tableau_mut(card.deck()).push(card);
    }

    fn has_pub(&self, player: PlayerId) -> bool {
        self.players[player].owned(Card::PUB) > 0
    }

    /// Next Pub owner after `after` in building-phase order (`None` to start
    /// from the beginning).
    pub(crate) fn next_pub_player(&self, after: Option<PlayerId>) -> Option<PlayerId> {
        let start = self.starting_player(Deck::Building);
        let first_offset = match after {
            Some(p) => (p + NUM_PLAYERS - start) % NUM_PLAYERS + 1,
            None => 0,
        };
        (first_offset..NUM_PLAYERS)
            .map(|offset| (start + offset) % NUM_PLAYERS)
            .find(|&p| self.has_pub(p))
    }

    /// Score the current deck phase and move on. Called once every player
    /// has passed in a row.
    pub(crate) fn end_phase<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for player in &mut self.players {
            player.passed = false;
        }

        match self.phase {
            Phase::Worker => {
                self.score(Deck::Worker);
                self.phase = Phase::Building;
                self.refill_upper_row(Deck::Building, rng);
                self.to_move = self.starting_player(Deck::Building);
            }
            Phase::Building => {
                self.score(Deck::Building);
                for player in &mut self.players {
                    player.points += player.unused_observatories() as i32;
                    player.used_observatories = 0;
                }
                match self.next_pub_player(None) {
                    Some(first) => {
                        self.phase = Phase::Pub;
                        self.to_move = first;
                    }
                    None => self.start_aristocrat_phase(rng),
                }
            }
            Phase::Aristocrat => {
                self.score(Deck::Aristocrat);
                self.end_round(rng);
            }
            Phase::Pub | Phase::End => {}
        }
        trace!(round = self.round, phase = ?self.phase, "Phase ended");
    }

    pub(crate) fn start_aristocrat_phase<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.phase = Phase::Aristocrat;
        self.refill_upper_row(Deck::Aristocrat, rng);
        self.to_move = self.starting_player(Deck::Aristocrat);
    }

    fn score(&mut self, deck: Deck) {
        for player in &mut self.players {
            let (rubles, points) = player.income(deck);
            player.rubles += rubles;
            player.points += points as i32;
        }
    }

    fn end_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.round += 1;
        if self.decks.iter().any(Vec::is_empty) {
            self.finish();
            return;
        }

        self.discard.append(&mut self.lower_row);
        std::mem::swap(&mut self.lower_row, &mut self.upper_row);
        self.refill_upper_row(Deck::Worker, rng);
        for start in &mut self.starting_player {
            *start = Self::opponent(*start);
        }
        self.phase = Phase::Worker;
        self.to_move = self.starting_player(Deck::Worker);
    }

    fn finish(&mut self) {
        self.phase = Phase::End;
        for player in &mut self.players {
            let unique = player.unique_aristocrats().min(UNIQUE_ARISTOCRAT_BONUS.len() - 1);
            player.points += UNIQUE_ARISTOCRAT_BONUS[unique];
            player.points += (player.rubles / 10) as i32;
            player.points -= HAND_PENALTY * player.hand.len() as i32;
        }
        debug!(
            rounds = self.round - 1,
            points_0 = self.players[0].points,
            points_1 = self.players[1].points,
            "Game over"
        );
    }

    fn buy_actions(&self, actions: &mut Vec<PetersburgAction>) {
        let player = &self.players[self.to_move];
        if player.rubles == 0 {
            return;
        }
        let sources: [(&[Card], fn(usize) -> CardSource, bool); 3] = [
            (&player.hand, CardSource::Hand, false),
            (&self.upper_row, CardSource::Upper, false),
            (&self.lower_row, CardSource::Lower, true),
        ];
        for (cards, source, lower) in sources {
            for (i, &card) in cards.iter().enumerate() {
                // Identical cards in one place are interchangeable.
                if cards[..i].contains(&card) {
                    continue;
                }
                let cost = self.buy_cost(self.to_move, card, lower);
                if player.rubles >= cost {
                    actions.push(PetersburgAction::Buy {
                        card,
                        source: source(i),
                        cost,
                    });
                }
            }
        }
    }
}

impl GameState for PetersburgState {
    type Action = PetersburgAction;

    fn acting_player(&self) -> PlayerId {
        self.to_move
    }

    fn is_terminal(&self) -> bool {
        self.phase == Phase::End
    }

    fn legal_actions(&self) -> Vec<PetersburgAction> {
        let mut actions = Vec::new();
        let me = self.to_move;
        let player = &self.players[me];

        if self.phase == Phase::End {
            return actions;
        }

        if let Some(card) = self.observed {
            actions.push(PetersburgAction::Discard);
            if player.has_hand_room() {
                actions.push(PetersburgAction::AddToHand {
                    card,
                    source: CardSource::Observed,
                });
            }
            let cost = self.buy_cost(me, card, false);
            if player.rubles >= cost {
                actions.push(PetersburgAction::Buy {
                    card,
                    source: CardSource::Observed,
                    cost,
                });
            }
            return actions;
        }

        if self.phase == Phase::Pub {
            let max_points = (PUB_POINTS * player.owned(Card::PUB) as u32).min(player.rubles / 2);
            let ends_phase = self.next_pub_player(Some(me)).is_none();
            actions.extend((0..=max_points).map(|points| PetersburgAction::PubPoints { points, ends_phase }));
            return actions;
        }

        actions.push(PetersburgAction::Pass {
            ends_phase: self.players[Self::opponent(me)].passed,
        });
        self.buy_actions(&mut actions);

        if player.unused_observatories() > 0 {
            for deck in Deck::ALL {
                if self.deck(deck).len() > 1 {
                    actions.push(PetersburgAction::Observe(deck));
                }
            }
        }

        if player.has_hand_room() {
            let rows: [(&[Card], fn(usize) -> CardSource); 2] =
                [(&self.upper_row, CardSource::Upper), (&self.lower_row, CardSource::Lower)];
            for (cards, source) in rows {
                for (i, &card) in cards.iter().enumerate() {
                    if !cards[..i].contains(&card) {
                        actions.push(PetersburgAction::AddToHand {
                            card,
                            source: source(i),
                        });
                    }
                }
            }
        }
        actions
    }

    /// Shuffle the decks. Draws are uniform either way, but the swap-remove
    /// draw order changes which outcome a given seed produces.
    fn perturb_chance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for deck in &mut self.decks {
            deck.shuffle(rng);
        }
    }
}
