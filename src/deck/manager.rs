//! Deck construction, shuffling, dealing and discard recycling.
//!
//! ## Dealing
//!
//! Cards are dealt round-robin starting with the player seated after the
//! dealer. Step `i` starts `i * stagger` after the deal begins, so the moves
//! land one after another. The last step is the synchronization point that
//! turns up the first target.
//!
//! ```
//! use std::time::Duration;
//! use bartok_engine::core::PlayerId;
//! use bartok_engine::deck::DeckManager;
//!
//! let plan = DeckManager::deal_plan(2, 4, PlayerId::new(0), Duration::from_millis(100));
//! assert_eq!(plan.len(), 8);
//! assert_eq!(plan[0].recipient, PlayerId::new(1));
//! assert_eq!(plan[3].recipient, PlayerId::new(0));
//! assert_eq!(plan[7].delay, Duration::from_millis(700));
//! assert!(plan[7].last);
//! ```

use std::time::Duration;

use crate::cards::{CardDefinition, CardId, Deck};
use crate::core::{EngineError, GameRng, PlayerId};
use crate::zones::ZoneManager;

/// One card of a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DealStep {
    pub recipient: PlayerId,
    /// Offset from the start of the deal.
    pub delay: Duration,
    /// The final card; its completion starts the game.
    pub last: bool,
}

/// Owns the shuffle stream of a session.
#[derive(Clone, Debug)]
pub struct DeckManager {
    rng: GameRng,
}

impl DeckManager {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Build the deck in definition order.
    #[must_use]
    pub fn create_deck(definitions: &[CardDefinition]) -> Deck {
        Deck::from_definitions(definitions)
    }

    /// Fisher–Yates shuffle with the session's shuffle stream.
    pub fn shuffle(&mut self, cards: &mut [CardId]) {
        self.rng.shuffle(cards);
    }

    /// Deck ids in a freshly shuffled order, last element on top.
    #[must_use]
    pub fn shuffled_ids(&mut self, deck: &Deck) -> Vec<CardId> {
        let mut ids: Vec<CardId> = deck.ids().collect();
        self.shuffle(&mut ids);
        ids
    }

    /// Recipients and stagger offsets for dealing `per_player` cards to
    /// each of `player_count` players.
    #[must_use]
    pub fn deal_plan(
        per_player: usize,
        player_count: usize,
        dealer: PlayerId,
        stagger: Duration,
    ) -> Vec<DealStep> {
        let total = per_player * player_count;
        let mut recipient = dealer.next(player_count);

        (0..total)
            .map(|index| {
                let step = DealStep {
                    recipient,
                    delay: stagger * index as u32,
                    last: index + 1 == total,
                };
                recipient = recipient.next(player_count);
                step
            })
            .collect()
    }

    /// Shuffle the discard pile into a new draw pile. The target stays put.
    ///
    /// Returns the number of recycled cards. Fails with
    /// `NoCardsAvailable` if both piles are empty.
    pub fn reshuffle_discard_into_draw(&mut self, zones: &mut ZoneManager) -> Result<usize, EngineError> {
        if zones.draw_pile().is_empty() && zones.discard_pile().is_empty() {
            return Err(EngineError::NoCardsAvailable);
        }
        let rng = &mut self.rng;
        Ok(zones.recycle_discard(|cards| rng.shuffle(cards)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerKind, PlayerMap};
    use crate::zones::Transit;

    #[test]
    fn test_create_deck_in_definition_order() {
        let deck = DeckManager::create_deck(&CardDefinition::standard_52());

        assert_eq!(deck.len(), 52);
        assert_eq!(deck.get(CardId::new(0)).map(|c| c.id), Some(CardId::new(0)));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let deck = DeckManager::create_deck(&CardDefinition::standard_52());
        let mut manager = DeckManager::new(GameRng::new(7));

        let mut ids = manager.shuffled_ids(&deck);
        assert_ne!(ids, deck.ids().collect::<Vec<_>>());

        ids.sort();
        assert_eq!(ids, deck.ids().collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_deterministic() {
        let deck = DeckManager::create_deck(&CardDefinition::standard_52());
        let a = DeckManager::new(GameRng::new(99)).shuffled_ids(&deck);
        let b = DeckManager::new(GameRng::new(99)).shuffled_ids(&deck);

        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_plan_round_robin_from_dealer_left() {
        let plan = DeckManager::deal_plan(7, 4, PlayerId::new(2), Duration::from_millis(100));

        assert_eq!(plan.len(), 28);
        assert_eq!(plan[0].recipient, PlayerId::new(3));
        assert_eq!(plan[1].recipient, PlayerId::new(0));
        assert_eq!(plan[4].recipient, PlayerId::new(3));
        assert_eq!(plan.iter().filter(|s| s.last).count(), 1);
        assert!(plan.windows(2).all(|w| w[0].delay < w[1].delay));
    }

    #[test]
    fn test_reshuffle_moves_discard() {
        let deck = DeckManager::create_deck(&CardDefinition::standard_52());
        let mut manager = DeckManager::new(GameRng::new(1));
        let mut zones = ZoneManager::new(&PlayerMap::with_value(4, PlayerKind::Ai));
        zones.fill_draw_pile(deck.ids().collect());
        let t = Transit { start: Duration::ZERO, duration: Duration::from_millis(500) };

        zones.draw_to_target(t);
        for _ in 0..3 {
            zones.draw_to_target(t);
        }
        assert_eq!(zones.discard_pile().len(), 3);

        let moved = manager.reshuffle_discard_into_draw(&mut zones);
        assert_eq!(moved, Ok(3));
        assert!(zones.discard_pile().is_empty());
        assert!(zones.is_consistent(52));
    }

    #[test]
    fn test_reshuffle_with_nothing_left() {
        let mut manager = DeckManager::new(GameRng::new(1));
        let mut zones = ZoneManager::new(&PlayerMap::with_value(2, PlayerKind::Ai));

        assert_eq!(
            manager.reshuffle_discard_into_draw(&mut zones),
            Err(EngineError::NoCardsAvailable)
        );
    }
}
