//! Per-player hand with fan-layout computation.
//!
//! A human player's hand is kept sorted ascending by rank (stable) after
//! every insertion; AI hands keep insertion order. The fan layout spreads
//! the cards around the seat anchor:
//!
//! ```text
//! start   = seat.rotation + fan * (n - 1) / 2
//! angle_i = start - fan * i
//! pos_i   = seat.position + rotate((0, card_height / 2, 0), angle_i)
//! pos_i.z = seat.position.z - depth_step * i
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Deck};
use crate::core::{PlayerId, PlayerKind, Pose, SortLayer, Vec3};

/// Seat parameters for laying out a hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanParams {
    pub origin: Vec3,
    /// Base rotation of the seat, degrees.
    pub rotation: f32,
    pub fan_degrees: f32,
    pub card_height: f32,
    pub depth_step: f32,
    pub layer: SortLayer,
}

/// Where one hand card should rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanSlot {
    pub card: CardId,
    pub pose: Pose,
    pub face_up: bool,
    pub sort_order: i32,
    pub layer: SortLayer,
}

/// Ordered cards held by one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    owner: PlayerId,
    kind: PlayerKind,
    cards: Vec<CardId>,
}

impl Hand {
    #[must_use]
    pub fn new(owner: PlayerId, kind: PlayerKind) -> Self {
        Self {
            owner,
            kind,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Append a card; human hands are re-sorted by rank.
    ///
    /// Returns the card for chaining.
    pub fn add_card(&mut self, card: CardId, deck: &Deck) -> CardId {
        self.cards.push(card);
        if self.kind.is_human() {
            // Vec::sort_by_key is stable
            self.cards.sort_by_key(|id| deck.get(*id).map(|c| c.rank));
        }
        card
    }

    /// Remove the first occurrence of `card`.
    pub fn remove_card(&mut self, card: CardId) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Resting placement of every card, in hand order.
    #[must_use]
    pub fn fan_layout(&self, params: &FanParams) -> Vec<FanSlot> {
        let n = self.cards.len();
        let start = params.rotation + params.fan_degrees * (n.saturating_sub(1)) as f32 / 2.0;
        let reach = Vec3::new(0.0, params.card_height / 2.0, 0.0);

        self.cards
            .iter()
            .enumerate()
            .map(|(i, &card)| {
                let angle = start - params.fan_degrees * i as f32;
                let mut position = params.origin + reach.rotated_z(angle);
                position.z = params.origin.z - params.depth_step * i as f32;
                FanSlot {
                    card,
                    pose: Pose::new(position, angle),
                    face_up: self.kind.is_human(),
                    sort_order: i as i32 * 4,
                    layer: params.layer,
                }
            })
            .collect()
    }
}
