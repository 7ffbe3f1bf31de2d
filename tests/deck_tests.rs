//! Deck lifecycle tests: construction, shuffle, deal and reshuffle.

use std::time::Duration;

use bartok_engine::cards::{CardDefinition, CardId, Rank, Suit};
use bartok_engine::core::{EngineError, GameConfig, GameRng, PlayerId, PlayerKind, PlayerMap};
use bartok_engine::deck::DeckManager;
use bartok_engine::game::Session;
use bartok_engine::rules::{BartokRules, RulesEngine};
use bartok_engine::zones::{Location, Transit, ZoneManager};

const T: Transit = Transit {
    start: Duration::ZERO,
    duration: Duration::from_millis(500),
};

/// Test the standard deck has 52 distinct faces in suit-major order.
#[test]
fn test_standard_deck() {
    let deck = DeckManager::create_deck(&CardDefinition::standard_52());

    assert_eq!(deck.len(), 52);
    let first = deck.get(CardId::new(0)).unwrap();
    assert_eq!((first.rank, first.suit), (Rank::Ace, Suit::Clubs));
    let last = deck.get(CardId::new(51)).unwrap();
    assert_eq!((last.rank, last.suit), (Rank::King, Suit::Spades));
}

/// Test the rank-or-suit rule on the reference examples.
#[test]
fn test_valid_play_examples() {
    let deck = DeckManager::create_deck(&[
        CardDefinition::new(Rank::Seven, Suit::Hearts),
        CardDefinition::new(Rank::Seven, Suit::Spades),
        CardDefinition::new(Rank::Three, Suit::Hearts),
        CardDefinition::new(Rank::Three, Suit::Spades),
    ]);
    let target = deck.get(CardId::new(0));
    let rules = BartokRules;

    let verdicts: Vec<_> = (1..4)
        .map(|i| rules.valid_play(deck.get(CardId::new(i)).unwrap(), target))
        .collect();
    assert_eq!(verdicts, vec![Ok(true), Ok(true), Ok(false)]);
}

/// Test that two sessions with the same seed stack the same draw pile.
#[test]
fn test_session_shuffle_reproducible() {
    let a = Session::new(GameConfig::standard(), 1234).unwrap();
    let b = Session::new(GameConfig::standard(), 1234).unwrap();
    let c = Session::new(GameConfig::standard(), 4321).unwrap();

    assert_eq!(a.zones().draw_pile(), b.zones().draw_pile());
    assert_ne!(a.zones().draw_pile(), c.zones().draw_pile());
}

/// Test the deal gives each player the starting count and leaves the rest.
#[test]
fn test_deal_counts() {
    let mut config = GameConfig::standard().all_ai();
    config.rules.starting_cards = 5;
    let mut session = Session::new(config, 3).unwrap();
    session.start().unwrap();

    for (_, hand) in session.zones().hands().iter() {
        assert_eq!(hand.len(), 5);
    }
    assert_eq!(session.zones().draw_pile().len(), 52 - 20);
    assert!(session.zones().is_consistent(52));
}

/// Test the reshuffle moves exactly the discard pile, leaving the target.
#[test]
fn test_reshuffle_recycles_discard() {
    let deck = DeckManager::create_deck(&CardDefinition::standard_52());
    let mut manager = DeckManager::new(GameRng::new(9));
    let mut zones = ZoneManager::new(&PlayerMap::with_value(4, PlayerKind::Ai));
    zones.fill_draw_pile(manager.shuffled_ids(&deck));

    // flip the whole draw pile onto the target slot, one card at a time
    while zones.draw_to_target(T).is_some() {}
    let target = zones.target();
    assert!(zones.draw_pile().is_empty());
    assert_eq!(zones.discard_pile().len(), 51);

    let moved = manager.reshuffle_discard_into_draw(&mut zones).unwrap();

    assert_eq!(moved, 51);
    assert_eq!(zones.draw_pile().len(), 51);
    assert!(zones.discard_pile().is_empty());
    assert_eq!(zones.target(), target);
    for &card in zones.draw_pile() {
        assert_eq!(zones.location(card), Some(Location::DrawPile));
    }
    assert!(zones.is_consistent(52));
}

/// Test a forced draw with nothing left to draw is a distinct error.
#[test]
fn test_no_cards_available() {
    let deck = DeckManager::create_deck(&[CardDefinition::new(Rank::Two, Suit::Clubs)]);
    let mut manager = DeckManager::new(GameRng::new(0));
    let mut zones = ZoneManager::new(&PlayerMap::with_value(2, PlayerKind::Ai));
    zones.fill_draw_pile(deck.ids().collect());
    zones.draw_to_hand(PlayerId::new(0), &deck, T).unwrap();

    assert_eq!(zones.draw_to_hand(PlayerId::new(1), &deck, T), None);
    assert_eq!(
        manager.reshuffle_discard_into_draw(&mut zones),
        Err(EngineError::NoCardsAvailable)
    );
}
