//! Card table.
//!
//! Trading cards and most special abilities are left out. The cards that
//! keep a rule of their own are the Observatory (observe a deck), the Pub
//! (buy points for rubles) and the Warehouse (hand size 4).

use std::fmt;

/// The three decks, which are also the three scoring phases of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deck {
    Worker,
    Building,
    Aristocrat,
}

impl Deck {
    pub const ALL: [Deck; 3] = [Deck::Worker, Deck::Building, Deck::Aristocrat];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Deck::Worker => "worker",
            Deck::Building => "building",
            Deck::Aristocrat => "aristocrat",
        };
        f.write_str(name)
    }
}

/// Static description of one card type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub name: &'static str,
    pub deck: Deck,
    pub cost: u32,
    /// Rubles paid out every time the card's phase is scored.
    pub rubles: u32,
    /// Points scored every time the card's phase is scored.
    pub points: u32,
    /// Copies in the deck.
    pub quantity: u32,
}

const fn spec(name: &'static str, deck: Deck, cost: u32, rubles: u32, points: u32, quantity: u32) -> CardSpec {
    CardSpec {
        name,
        deck,
        cost,
        rubles,
        points,
        quantity,
    }
}

/// Every card type, grouped by deck.
pub const CARDS: [CardSpec; 22] = [
    spec("Lumberjack", Deck::Worker, 3, 3, 0, 6),
    spec("Gold Miner", Deck::Worker, 4, 3, 0, 6),
    spec("Shepherd", Deck::Worker, 5, 3, 0, 6),
    spec("Fur Trapper", Deck::Worker, 6, 3, 0, 6),
    spec("Ship Builder", Deck::Worker, 7, 3, 0, 6),
    spec("Czar and Carpenter", Deck::Worker, 8, 3, 0, 1),
    spec("Market", Deck::Building, 5, 0, 1, 5),
    spec("Customs House", Deck::Building, 8, 0, 2, 5),
    spec("Firehouse", Deck::Building, 11, 0, 3, 5),
    spec("Hospital", Deck::Building, 14, 0, 4, 5),
    spec("Library", Deck::Building, 17, 0, 5, 5),
    spec("Theater", Deck::Building, 20, 0, 6, 5),
    spec("Observatory", Deck::Building, 6, 0, 0, 2),
    spec("Pub", Deck::Building, 1, 0, 0, 2),
    spec("Warehouse", Deck::Building, 4, 0, 0, 1),
    spec("Author", Deck::Aristocrat, 4, 0, 1, 3),
    spec("Administrator", Deck::Aristocrat, 7, 1, 1, 3),
    spec("Warehouse Manager", Deck::Aristocrat, 10, 2, 1, 3),
    spec("Secretary", Deck::Aristocrat, 12, 3, 1, 3),
    spec("Controller", Deck::Aristocrat, 14, 4, 1, 3),
    spec("Judge", Deck::Aristocrat, 16, 5, 2, 3),
    spec("Mistress of Ceremonies", Deck::Aristocrat, 18, 6, 3, 3),
];

/// Number of distinct card types.
pub const NUM_CARDS: usize = CARDS.len();

/// Largest `quantity` in the table.
pub const MAX_QUANTITY: usize = 6;

/// A card, identified by its index in [`CARDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub const OBSERVATORY: Card = Card(12);
    pub const PUB: Card = Card(13);
    pub const WAREHOUSE: Card = Card(14);

    /// Card with the given table index, if it exists.
    pub fn from_index(index: usize) -> Option<Card> {
        (index < NUM_CARDS).then(|| Card(index as u8))
    }

    pub fn all() -> impl Iterator<Item = Card> {
        (0..NUM_CARDS).map(|i| Card(i as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn spec(self) -> &'static CardSpec {
        &CARDS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn deck(self) -> Deck {
        self.spec().deck
    }

    /// A freshly shuffled-ready deck: every card of `deck`, `quantity` times.
    pub fn full_deck(deck: Deck) -> Vec<Card> {
        Card::all()
            .filter(|c| c.deck() == deck)
            .flat_map(|c| std::iter::repeat(c).take(c.spec().quantity as usize))
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
