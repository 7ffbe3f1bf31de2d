//! Game configuration types.
//!
//! A session is configured at startup by a `GameConfig`:
//! - `RulesConfig`: Player count, hand size, dealer and human seat
//! - `MotionConfig`: Move timing, easing and render-hint thresholds
//! - `TableLayout`: Seat and pile anchors with their sort layers
//! - the deck definitions
//!
//! `GameConfig::standard()` is the four-player, 52-card default.
//! `GameConfig::from_json` loads the same structure; missing fields fall
//! back to the standard values. Validation failures are fatal.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::geometry::Vec3;
use super::player::PlayerId;
use crate::cards::CardDefinition;
use crate::motion::Easing;

/// Sort layer identifier handed to the renderer. Higher draws on top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SortLayer(pub u16);

impl std::fmt::Display for SortLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-axis layout spacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Multiplier {
    pub x: f32,
    pub y: f32,
}

/// A player's hand slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeatDef {
    /// Player index seated here.
    pub player: u8,
    pub x: f32,
    pub y: f32,
    /// Base rotation of the fan, degrees about z.
    pub rotation: f32,
    pub layer: SortLayer,
}

/// Anchor of a shared pile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PileAnchor {
    pub x: f32,
    pub y: f32,
    pub layer: SortLayer,
}

/// Table geometry consumed only for presentation output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub center: Vec3,
    pub multiplier: Multiplier,
    pub seats: Vec<SeatDef>,
    pub draw_pile: PileAnchor,
    pub discard_pile: PileAnchor,
    pub target: PileAnchor,
}

impl TableLayout {
    /// World position of a layout coordinate.
    #[must_use]
    pub fn position(&self, x: f32, y: f32) -> Vec3 {
        self.center + Vec3::new(x * self.multiplier.x, y * self.multiplier.y, 0.0)
    }

    /// Seat of a player, if defined.
    #[must_use]
    pub fn seat_of(&self, player: PlayerId) -> Option<(usize, &SeatDef)> {
        self.seats
            .iter()
            .enumerate()
            .find(|(_, seat)| seat.player == player.0)
    }

    #[must_use]
    pub fn seat_position(&self, seat: &SeatDef) -> Vec3 {
        self.position(seat.x, seat.y)
    }

    #[must_use]
    pub fn anchor_position(&self, anchor: &PileAnchor) -> Vec3 {
        self.position(anchor.x, anchor.y)
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        let seat = |player, x, y, rotation, layer| SeatDef {
            player,
            x,
            y,
            rotation,
            layer: SortLayer(layer),
        };
        Self {
            center: Vec3::ZERO,
            multiplier: Multiplier { x: 1.0, y: 1.0 },
            seats: vec![
                seat(0, 0.0, -8.0, 0.0, 4),
                seat(1, -12.0, 0.0, 270.0, 5),
                seat(2, 0.0, 8.0, 180.0, 6),
                seat(3, 12.0, 0.0, 90.0, 7),
            ],
            draw_pile: PileAnchor { x: -2.0, y: 0.0, layer: SortLayer(1) },
            discard_pile: PileAnchor { x: 2.0, y: 0.0, layer: SortLayer(2) },
            target: PileAnchor { x: 2.0, y: 0.0, layer: SortLayer(3) },
        }
    }
}

/// Rule constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub player_count: usize,
    /// Cards dealt to each player.
    pub starting_cards: usize,
    /// Dealing starts with the player seated after the dealer, who also
    /// takes the first turn.
    pub dealer: u8,
    /// Seat driven by input events. `None` makes every seat an AI.
    pub human_seat: Option<u8>,
    /// Rotation step between adjacent cards of a fanned hand, degrees.
    pub hand_fan_degrees: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_cards: 7,
            dealer: 0,
            human_seat: Some(0),
            hand_fan_degrees: 10.0,
        }
    }
}

/// Animation timing and render-hint settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub move_duration_ms: u64,
    /// Delay between consecutive dealt cards.
    pub deal_stagger_ms: u64,
    /// Delay between game over and the restart signal.
    pub restart_delay_ms: u64,
    pub easing: Easing,
    /// Progress after which the destination sort order is committed.
    pub order_commit_at: f32,
    /// Progress after which the destination sort layer is committed.
    pub layer_commit_at: f32,
    pub card_height: f32,
    /// Z spacing between adjacent cards of a fanned hand.
    pub depth_step: f32,
    /// Layer used while a card travels, so it draws above everything.
    pub transit_layer: SortLayer,
    /// How far the turn indicator sits in front of the current seat.
    pub turn_light_offset: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_duration_ms: 500,
            deal_stagger_ms: 100,
            restart_delay_ms: 1000,
            easing: Easing::InOut,
            order_commit_at: 0.5,
            layer_commit_at: 0.75,
            card_height: 3.5,
            depth_step: 0.5,
            transit_layer: SortLayer(10),
            turn_light_offset: 5.0,
        }
    }
}

impl MotionConfig {
    #[must_use]
    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_duration_ms)
    }

    #[must_use]
    pub fn deal_stagger(&self) -> Duration {
        Duration::from_millis(self.deal_stagger_ms)
    }

    #[must_use]
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rules: RulesConfig,
    pub motion: MotionConfig,
    pub layout: TableLayout,
    /// Required deck size; a definition list of any other length is rejected.
    pub deck_size: usize,
    pub deck: Vec<CardDefinition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameConfig {
    /// Four players, one human at seat 0, standard 52-card deck.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: RulesConfig::default(),
            motion: MotionConfig::default(),
            layout: TableLayout::default(),
            deck_size: 52,
            deck: CardDefinition::standard_52(),
        }
    }

    /// Make every seat an AI (builder pattern).
    #[must_use]
    pub fn all_ai(mut self) -> Self {
        self.rules.human_seat = None;
        self
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that a session can start with this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        let players = rules.player_count;

        if !(2..=8).contains(&players) {
            return Err(ConfigError::PlayerCount(players));
        }
        if self.deck.len() != self.deck_size {
            return Err(ConfigError::WrongDeckSize {
                expected: self.deck_size,
                actual: self.deck.len(),
            });
        }

        let mut faces = FxHashSet::default();
        for def in &self.deck {
            if !faces.insert((def.rank, def.suit)) {
                return Err(ConfigError::DuplicateCard { rank: def.rank, suit: def.suit });
            }
        }

        let mut seated = FxHashSet::default();
        for seat in &self.layout.seats {
            if usize::from(seat.player) >= players {
                return Err(ConfigError::SeatOutOfRange("seat player"));
            }
            if !seated.insert(seat.player) {
                return Err(ConfigError::DuplicateSeat(seat.player));
            }
        }
        if let Some(missing) = PlayerId::all(players).find(|p| !seated.contains(&p.0)) {
            return Err(ConfigError::MissingSeat(missing.0));
        }

        if usize::from(rules.dealer) >= players {
            return Err(ConfigError::SeatOutOfRange("dealer"));
        }
        if rules.human_seat.is_some_and(|h| usize::from(h) >= players) {
            return Err(ConfigError::SeatOutOfRange("human seat"));
        }

        if rules.starting_cards == 0 {
            return Err(ConfigError::NonPositive("starting_cards"));
        }
        let needed = rules.starting_cards * players;
        if needed + 1 > self.deck.len() {
            return Err(ConfigError::NotEnoughCards {
                needed,
                available: self.deck.len(),
            });
        }

        if self.motion.move_duration_ms == 0 {
            return Err(ConfigError::NonPositive("move_duration_ms"));
        }

        Ok(())
    }
}
