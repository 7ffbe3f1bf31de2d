//! The authoritative deck of a session.
//!
//! Exactly one `Deck` exists per session. It owns every `Card` and is the
//! only place card identity is resolved; everything else passes `CardId`s.

use super::definition::CardDefinition;
use super::instance::{Card, CardId};

/// All cards of one session, indexed by `CardId`.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck in definition order. Card `i` gets `CardId(i)`.
    #[must_use]
    pub fn from_definitions(definitions: &[CardDefinition]) -> Self {
        let cards = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| Card::from_definition(CardId::new(i as u32), def))
            .collect();
        Self { cards }
    }

    /// Look up a card.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Check whether an id belongs to this deck.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        id.index() < self.cards.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All ids in construction order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_from_definitions() {
        let deck = Deck::from_definitions(&CardDefinition::standard_52());

        assert_eq!(deck.len(), 52);
        assert!(deck.contains(CardId::new(51)));
        assert!(!deck.contains(CardId::new(52)));

        let first = deck.get(CardId::new(0)).unwrap();
        assert_eq!((first.rank, first.suit), (Rank::Ace, Suit::Clubs));
    }

    #[test]
    fn test_ids_are_dense() {
        let deck = Deck::from_definitions(&CardDefinition::standard_52());
        let ids: Vec<_> = deck.ids().map(|id| id.0).collect();
        assert_eq!(ids, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_card() {
        let deck = Deck::from_definitions(&[CardDefinition::new(Rank::Two, Suit::Hearts)]);
        assert!(deck.get(CardId::new(1)).is_none());
    }
}
