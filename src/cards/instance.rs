//! Card instances - the immutable identity of each physical card.
//!
//! A `Card` never changes after the deck is built. Where it is and how it
//! is moving live elsewhere, keyed by `CardId`: container membership in
//! `ZoneManager`, motion and render state in `MoveScheduler`.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, Rank, Suit};

/// Stable identity of a card within one session.
///
/// Ids are dense: the deck assigns `0..deck_size` in construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
    pub asset: String,
}

impl Card {
    #[must_use]
    pub fn from_definition(id: CardId, def: &CardDefinition) -> Self {
        Self {
            id,
            rank: def.rank,
            suit: def.suit,
            asset: def.asset.clone(),
        }
    }

    /// A bare card for tests and examples.
    #[must_use]
    pub fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self::from_definition(id, &CardDefinition::new(rank, suit))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}
