//! Play legality.
//!
//! A card may be discarded onto the target iff it shares the target's rank
//! or suit. Asking before any target is turned up is an error, not a
//! yes or a no.

use smallvec::SmallVec;

use crate::cards::{Card, CardId, Deck};
use crate::core::EngineError;

/// Legal plays found in a hand. Hands rarely exceed a dozen cards.
pub type LegalPlays = SmallVec<[CardId; 8]>;

/// Rules trait: which discards are legal.
///
/// The session calls into this for both human input and AI decisions.
pub trait RulesEngine {
    /// Whether `card` may be played onto `target`.
    fn valid_play(&self, card: &Card, target: Option<&Card>) -> Result<bool, EngineError>;

    /// Cards in `hand` that are legal against `target`, in hand order.
    fn legal_plays(
        &self,
        deck: &Deck,
        hand: &[CardId],
        target: Option<CardId>,
    ) -> Result<LegalPlays, EngineError> {
        let target = target.ok_or(EngineError::NoTarget)?;
        let target = deck.get(target).ok_or(EngineError::UnknownCard(target))?;

        let mut legal = LegalPlays::new();
        for &id in hand {
            let card = deck.get(id).ok_or(EngineError::UnknownCard(id))?;
            if self.valid_play(card, Some(target))? {
                legal.push(id);
            }
        }
        Ok(legal)
    }
}

/// Match-rank-or-suit rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct BartokRules;

impl RulesEngine for BartokRules {
    fn valid_play(&self, card: &Card, target: Option<&Card>) -> Result<bool, EngineError> {
        let target = target.ok_or(EngineError::NoTarget)?;
        Ok(card.rank == target.rank || card.suit == target.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Rank, Suit};

    fn card(id: u32, rank: Rank, suit: Suit) -> Card {
        Card::new(CardId::new(id), rank, suit)
    }

    #[test]
    fn test_valid_play_matches_rank_or_suit() {
        let target = card(0, Rank::Seven, Suit::Hearts);
        let rules = BartokRules;

        assert_eq!(rules.valid_play(&card(1, Rank::Seven, Suit::Spades), Some(&target)), Ok(true));
        assert_eq!(rules.valid_play(&card(2, Rank::Three, Suit::Hearts), Some(&target)), Ok(true));
        assert_eq!(rules.valid_play(&card(3, Rank::Three, Suit::Spades), Some(&target)), Ok(false));
    }

    #[test]
    fn test_valid_play_without_target() {
        let result = BartokRules.valid_play(&card(1, Rank::Ace, Suit::Clubs), None);
        assert_eq!(result, Err(EngineError::NoTarget));
    }

    #[test]
    fn test_legal_plays_in_hand_order() {
        let deck = Deck::from_definitions(&[
            CardDefinition::new(Rank::Seven, Suit::Hearts),
            CardDefinition::new(Rank::Two, Suit::Hearts),
            CardDefinition::new(Rank::Nine, Suit::Clubs),
            CardDefinition::new(Rank::Seven, Suit::Clubs),
        ]);
        let hand = [CardId::new(3), CardId::new(2), CardId::new(1)];

        let legal = BartokRules.legal_plays(&deck, &hand, Some(CardId::new(0))).unwrap();
        assert_eq!(legal.as_slice(), &[CardId::new(3), CardId::new(1)]);

        let err = BartokRules.legal_plays(&deck, &hand, None);
        assert_eq!(err, Err(EngineError::NoTarget));
    }
}
