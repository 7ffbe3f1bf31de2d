//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` owns every container a card can be in:
//! - the draw pile (ordered, top = last element)
//! - the discard pile (ordered, newest last)
//! - the target slot (zero or one card)
//! - one `Hand` per player
//!
//! Each card also carries a `CardState`: `AtRest` in a location, or
//! `InTransit` toward one. Container membership changes the instant a move
//! is scheduled; the state settles when the move completes. Legality
//! always looks at the container, never at the in-flight pose.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::hand::Hand;
use crate::cards::{CardId, Deck};
use crate::core::{PlayerId, PlayerKind, PlayerMap};

/// A container a card can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    DrawPile,
    Hand(PlayerId),
    Target,
    Discard,
}

/// Timing window of a relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transit {
    pub start: Duration,
    pub duration: Duration,
}

/// Placement of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    AtRest(Location),
    InTransit {
        from: Location,
        to: Location,
        start: Duration,
        duration: Duration,
    },
}

impl CardState {
    /// The container the card belongs to (destination while moving).
    #[must_use]
    pub fn location(&self) -> Location {
        match *self {
            CardState::AtRest(at) => at,
            CardState::InTransit { to, .. } => to,
        }
    }

    #[must_use]
    pub fn is_in_transit(&self) -> bool {
        matches!(self, CardState::InTransit { .. })
    }
}

/// Manages card locations across the piles, the target slot and the hands.
///
/// ## Usage
///
/// ```
/// use std::time::Duration;
/// use bartok_engine::cards::{CardDefinition, CardId, Deck};
/// use bartok_engine::core::{PlayerId, PlayerKind, PlayerMap};
/// use bartok_engine::zones::{Location, Transit, ZoneManager};
///
/// let deck = Deck::from_definitions(&CardDefinition::standard_52());
/// let kinds = PlayerMap::with_value(4, PlayerKind::Ai);
/// let mut zones = ZoneManager::new(&kinds);
/// zones.fill_draw_pile(deck.ids().collect());
///
/// let transit = Transit { start: Duration::ZERO, duration: Duration::from_millis(500) };
/// let card = zones.draw_to_hand(PlayerId::new(1), &deck, transit).unwrap();
/// assert_eq!(zones.location(card), Some(Location::Hand(PlayerId::new(1))));
/// assert_eq!(zones.draw_pile().len(), 51);
/// ```
#[derive(Clone, Debug)]
pub struct ZoneManager {
    states: FxHashMap<CardId, CardState>,
    draw: Vec<CardId>,
    discard: Vec<CardId>,
    target: Option<CardId>,
    hands: PlayerMap<Hand>,
}

impl ZoneManager {
    /// Create empty containers with one hand per player.
    #[must_use]
    pub fn new(kinds: &PlayerMap<PlayerKind>) -> Self {
        Self {
            states: FxHashMap::default(),
            draw: Vec::new(),
            discard: Vec::new(),
            target: None,
            hands: PlayerMap::new(kinds.player_count(), |p| Hand::new(p, kinds[p])),
        }
    }

    /// Put freshly built cards on the draw pile, last element on top.
    ///
    /// Panics if a card is already tracked.
    pub fn fill_draw_pile(&mut self, cards: Vec<CardId>) {
        for &card in &cards {
            if self.states.insert(card, CardState::AtRest(Location::DrawPile)).is_some() {
                panic!("{card} already exists in zone manager");
            }
        }
        self.draw.extend(cards);
    }

    fn relocate(&mut self, card: CardId, to: Location, transit: Option<Transit>) {
        let from = self.states.get(&card).map_or(to, CardState::location);
        let state = match transit {
            Some(t) => CardState::InTransit {
                from,
                to,
                start: t.start,
                duration: t.duration,
            },
            None => CardState::AtRest(to),
        };
        self.states.insert(card, state);
    }

    /// Move the top of the draw pile into a hand.
    ///
    /// Returns `None` if the draw pile is empty.
    pub fn draw_to_hand(&mut self, player: PlayerId, deck: &Deck, transit: Transit) -> Option<CardId> {
        let hand = self.hands.get_mut(player)?;
        let card = self.draw.pop()?;
        hand.add_card(card, deck);
        self.relocate(card, Location::Hand(player), Some(transit));
        Some(card)
    }

    /// Turn up the top of the draw pile as the target.
    ///
    /// Returns the new target and the card it displaced into the discard.
    pub fn draw_to_target(&mut self, transit: Transit) -> Option<(CardId, Option<CardId>)> {
        let card = self.draw.pop()?;
        let displaced = self.promote(card, transit);
        Some((card, displaced))
    }

    /// Play a hand card onto the target slot.
    ///
    /// Returns `None` (and changes nothing) if the card is not in that hand;
    /// otherwise the card displaced into the discard, if any.
    pub fn play_from_hand(
        &mut self,
        player: PlayerId,
        card: CardId,
        transit: Transit,
    ) -> Option<Option<CardId>> {
        if !self.hands.get_mut(player)?.remove_card(card) {
            return None;
        }
        Some(self.promote(card, transit))
    }

    /// Swap in a new target; the old one goes on top of the discard.
    fn promote(&mut self, card: CardId, transit: Transit) -> Option<CardId> {
        let displaced = self.target.replace(card);
        if let Some(old) = displaced {
            self.discard.push(old);
            self.relocate(old, Location::Discard, None);
        }
        self.relocate(card, Location::Target, Some(transit));
        displaced
    }

    /// Move the whole discard pile onto the draw pile, shuffled by
    /// `shuffle`. The target stays in play.
    ///
    /// Returns the number of cards moved.
    pub fn recycle_discard(&mut self, shuffle: impl FnOnce(&mut [CardId])) -> usize {
        let mut cards = std::mem::take(&mut self.discard);
        shuffle(&mut cards);
        for &card in &cards {
            self.relocate(card, Location::DrawPile, None);
        }
        let moved = cards.len();
        self.draw.extend(cards);
        moved
    }

    /// Mark a card as arrived at its destination.
    pub fn settle(&mut self, card: CardId) {
        if let Some(state) = self.states.get_mut(&card) {
            *state = CardState::AtRest(state.location());
        }
    }

    #[must_use]
    pub fn state(&self, card: CardId) -> Option<CardState> {
        self.states.get(&card).copied()
    }

    /// Container of a card; `None` if the card is unknown.
    #[must_use]
    pub fn location(&self, card: CardId) -> Option<Location> {
        self.states.get(&card).map(CardState::location)
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[CardId] {
        &self.draw
    }

    #[must_use]
    pub fn top_of_draw(&self) -> Option<CardId> {
        self.draw.last().copied()
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[CardId] {
        &self.discard
    }

    #[must_use]
    pub fn target(&self) -> Option<CardId> {
        self.target
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&Hand> {
        self.hands.get(player)
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.states.len()
    }

    /// Cards held in all containers together.
    #[must_use]
    pub fn contained_cards(&self) -> usize {
        self.draw.len()
            + self.discard.len()
            + usize::from(self.target.is_some())
            + self.hands.values().map(Hand::len).sum::<usize>()
    }

    /// Check conservation: every tracked card is in exactly one container,
    /// the one its state names, and the counts add up to `deck_size`.
    #[must_use]
    pub fn is_consistent(&self, deck_size: usize) -> bool {
        if self.contained_cards() != deck_size || self.total_cards() != deck_size {
            return false;
        }

        let mut seen: FxHashMap<CardId, Location> = FxHashMap::default();
        let mut record = |card: CardId, at: Location| seen.insert(card, at).is_none();

        let unique = self.draw.iter().all(|&c| record(c, Location::DrawPile))
            && self.discard.iter().all(|&c| record(c, Location::Discard))
            && self.target.map_or(true, |c| record(c, Location::Target))
            && self
                .hands
                .iter()
                .all(|(p, hand)| hand.cards().iter().all(|&c| record(c, Location::Hand(p))));

        unique
            && seen
                .iter()
                .all(|(card, at)| self.location(*card) == Some(*at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;

    const T: Transit = Transit {
        start: Duration::ZERO,
        duration: Duration::from_millis(500),
    };

    fn setup() -> (Deck, ZoneManager) {
        let deck = Deck::from_definitions(&CardDefinition::standard_52());
        let kinds = PlayerMap::new(4, |p| {
            if p.0 == 0 {
                PlayerKind::Human
            } else {
                PlayerKind::Ai
            }
        });
        let mut zones = ZoneManager::new(&kinds);
        zones.fill_draw_pile(deck.ids().collect());
        (deck, zones)
    }

    #[test]
    fn test_draw_takes_top() {
        let (deck, mut zones) = setup();
        let top = zones.top_of_draw();

        let card = zones.draw_to_hand(PlayerId::new(2), &deck, T);

        assert_eq!(card, top);
        assert_eq!(zones.hand(PlayerId::new(2)).unwrap().len(), 1);
        assert!(zones.is_consistent(52));
    }

    #[test]
    fn test_transit_then_settle() {
        let (deck, mut zones) = setup();
        let card = zones.draw_to_hand(PlayerId::new(1), &deck, T).unwrap();

        assert_eq!(
            zones.state(card),
            Some(CardState::InTransit {
                from: Location::DrawPile,
                to: Location::Hand(PlayerId::new(1)),
                start: T.start,
                duration: T.duration,
            })
        );

        zones.settle(card);
        assert_eq!(zones.state(card), Some(CardState::AtRest(Location::Hand(PlayerId::new(1)))));
    }

    #[test]
    fn test_promote_discards_old_target() {
        let (deck, mut zones) = setup();
        let (first, displaced) = zones.draw_to_target(T).unwrap();
        assert_eq!(displaced, None);

        let card = zones.draw_to_hand(PlayerId::new(1), &deck, T).unwrap();
        let displaced = zones.play_from_hand(PlayerId::new(1), card, T);

        assert_eq!(displaced, Some(Some(first)));
        assert_eq!(zones.target(), Some(card));
        assert_eq!(zones.discard_pile(), &[first]);
        assert_eq!(zones.location(first), Some(Location::Discard));
        assert!(zones.is_consistent(52));
    }

    #[test]
    fn test_play_requires_card_in_hand() {
        let (deck, mut zones) = setup();
        let card = zones.draw_to_hand(PlayerId::new(1), &deck, T).unwrap();

        assert_eq!(zones.play_from_hand(PlayerId::new(2), card, T), None);
        assert_eq!(zones.target(), None);
        assert!(zones.is_consistent(52));
    }

    #[test]
    fn test_recycle_discard_keeps_target() {
        let (deck, mut zones) = setup();
        zones.draw_to_target(T);
        for _ in 0..5 {
            let card = zones.draw_to_hand(PlayerId::new(3), &deck, T).unwrap();
            zones.play_from_hand(PlayerId::new(3), card, T);
        }
        assert_eq!(zones.discard_pile().len(), 5);
        let target = zones.target();
        let before = zones.draw_pile().len();

        let moved = zones.recycle_discard(|cards| cards.reverse());

        assert_eq!(moved, 5);
        assert!(zones.discard_pile().is_empty());
        assert_eq!(zones.draw_pile().len(), before + 5);
        assert_eq!(zones.target(), target);
        assert!(zones.is_consistent(52));
    }

    #[test]
    fn test_draw_from_empty_pile() {
        let kinds = PlayerMap::with_value(2, PlayerKind::Ai);
        let deck = Deck::from_definitions(&[]);
        let mut zones = ZoneManager::new(&kinds);

        assert_eq!(zones.draw_to_hand(PlayerId::new(0), &deck, T), None);
        assert_eq!(zones.draw_to_target(T), None);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_duplicate_card_panics() {
        let (_, mut zones) = setup();
        zones.fill_draw_pile(vec![CardId::new(0)]);
    }
}
