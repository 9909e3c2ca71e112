use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;

/// Number of distinct faces in one deck.
pub const FACES_PER_DECK: usize = 52;

/// One face of the 52-slot index space. Only used to illustrate results;
/// allocation never looks at individual faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// `suit = index / 13`, `rank = index % 13`.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= FACES_PER_DECK {
            return None;
        }
        let ranks = Rank::ORDERED.len();
        match (Suit::from_index(index / ranks), Rank::from_index(index % ranks)) {
            (Some(suit), Some(rank)) => Some(Self { rank, suit }),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self.suit.index() * Rank::ORDERED.len() + self.rank.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

/// Suit name for a face index, e.g. `0..13 -> "Hearts"`.
pub fn suit_name(index: usize) -> Option<&'static str> {
    Card::from_index(index).map(|card| card.suit.name())
}

/// Comma-joined rendering of face indices. Out-of-range indices are skipped.
pub fn format_cards(indices: &[usize]) -> String {
    let rendered: Vec<String> = indices
        .iter()
        .filter_map(|&index| Card::from_index(index))
        .map(|card| card.to_string())
        .collect();
    if rendered.is_empty() {
        return "No cards".to_string();
    }
    rendered.join(", ")
}

/// One line per non-empty suit in `Suit::ALL` order, faces ascending by index.
pub fn format_grouped(indices: &[usize]) -> String {
    let mut buckets: [Vec<Card>; 4] = Default::default();
    for card in indices.iter().filter_map(|&index| Card::from_index(index)) {
        buckets[card.suit.index()].push(card);
    }

    let lines: Vec<String> = Suit::ALL
        .iter()
        .zip(buckets.iter_mut())
        .filter(|(_, cards)| !cards.is_empty())
        .map(|(suit, cards)| {
            cards.sort_by_key(|card| card.index());
            let faces: Vec<String> = cards.iter().map(|card| card.to_string()).collect();
            format!("{}: {}", suit.name(), faces.join(", "))
        })
        .collect();

    if lines.is_empty() {
        return "No cards".to_string();
    }
    lines.join("\n")
}
