//! Turn strategies for non-human players.
//!
//! A strategy only decides; the session realizes the decision as a
//! scheduled move. Deciding never blocks.

use crate::cards::{CardId, Deck};
use crate::core::{EngineError, GameRng};
use crate::rules::RulesEngine;

/// What an AI player does on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// No legal play: take the top of the draw pile.
    Draw,
    /// Discard this card onto the target.
    Play(CardId),
}

/// Strategy for choosing an AI player's move.
pub trait TurnStrategy: Send {
    /// Decide given the player's hand and the current target.
    fn decide(
        &mut self,
        rules: &dyn RulesEngine,
        deck: &Deck,
        hand: &[CardId],
        target: Option<CardId>,
    ) -> Result<Decision, EngineError>;
}

/// Uniformly random choice among the legal plays; draw when there are none.
#[derive(Clone, Debug)]
pub struct RandomLegalPlay {
    rng: GameRng,
}

impl RandomLegalPlay {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl TurnStrategy for RandomLegalPlay {
    fn decide(
        &mut self,
        rules: &dyn RulesEngine,
        deck: &Deck,
        hand: &[CardId],
        target: Option<CardId>,
    ) -> Result<Decision, EngineError> {
        let legal = rules.legal_plays(deck, hand, target)?;
        Ok(match self.rng.choose(&legal) {
            Some(&card) => Decision::Play(card),
            None => Decision::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, Rank, Suit};
    use crate::rules::BartokRules;

    fn deck() -> Deck {
        Deck::from_definitions(&[
            CardDefinition::new(Rank::Seven, Suit::Hearts),
            CardDefinition::new(Rank::Two, Suit::Hearts),
            CardDefinition::new(Rank::Nine, Suit::Clubs),
            CardDefinition::new(Rank::Seven, Suit::Clubs),
        ])
    }

    #[test]
    fn test_draws_without_legal_play() {
        let mut ai = RandomLegalPlay::new(GameRng::new(3));
        let hand = [CardId::new(2)];

        let decision = ai.decide(&BartokRules, &deck(), &hand, Some(CardId::new(0)));
        assert_eq!(decision, Ok(Decision::Draw));
    }

    #[test]
    fn test_only_picks_legal_cards() {
        let deck = deck();
        let hand = [CardId::new(1), CardId::new(2), CardId::new(3)];
        let mut ai = RandomLegalPlay::new(GameRng::new(11));

        let mut seen = Vec::new();
        for _ in 0..50 {
            match ai.decide(&BartokRules, &deck, &hand, Some(CardId::new(0))).unwrap() {
                Decision::Play(card) => seen.push(card),
                Decision::Draw => panic!("a legal play exists"),
            }
        }

        assert!(!seen.contains(&CardId::new(2)));
        assert!(seen.contains(&CardId::new(1)));
        assert!(seen.contains(&CardId::new(3)));
    }

    #[test]
    fn test_requires_target() {
        let mut ai = RandomLegalPlay::new(GameRng::new(0));
        let result = ai.decide(&BartokRules, &deck(), &[CardId::new(1)], None);

        assert_eq!(result, Err(EngineError::NoTarget));
    }
}
