//! Session events and input outcomes.
//!
//! Events are queued as things happen and drained by the presentation
//! layer (or a test) with `Session::drain_events`.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{PlayerId, SessionResult};

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The deal was scheduled.
    DealStarted { cards: usize },
    /// The first target was turned up from the draw pile.
    TargetRevealed(CardId),
    TurnPassed {
        from: Option<PlayerId>,
        to: PlayerId,
        turn: u32,
    },
    CardDrawn { player: PlayerId, card: CardId },
    CardPlayed { player: PlayerId, card: CardId },
    /// The discard pile became the new draw pile.
    DiscardReshuffled { cards: usize },
    GameOver(SessionResult),
    /// The post-game delay elapsed; the host should call `Session::restart`.
    RestartRequested,
    /// Player input that had no effect.
    InputIgnored { card: CardId, reason: IgnoreReason },
}

/// Why a card activation was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The game has not reached its first turn.
    NoTurnYet,
    NotHumanTurn,
    /// A move is still animating.
    MoveInProgress,
    GameFinished,
    /// Not in the draw pile and not in the current player's hand.
    NotInHand,
    /// In hand but matches neither rank nor suit of the target.
    IllegalPlay,
}

/// Outcome of `Session::card_activated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The top of the draw pile was drawn (not necessarily the card clicked).
    Drew(CardId),
    Played(CardId),
    Ignored(IgnoreReason),
}

impl Activation {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Activation::Ignored(_))
    }
}
