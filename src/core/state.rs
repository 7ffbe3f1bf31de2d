//! Turn state: phase, current player, target card, turn counter.
//!
//! ## Phases
//!
//! `Idle → Pre → Waiting → {Pre (next turn) | GameOver}`
//!
//! - `Idle`: before the first turn; no current player.
//! - `Pre`: a player's turn has started and a decision is pending.
//! - `Waiting`: a move was scheduled; input is ignored until it completes.
//! - `Post`: reserved, never entered.
//! - `GameOver`: terminal for the session.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerKind};
use crate::cards::CardId;

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Idle,
    Pre,
    Waiting,
    Post,
    GameOver,
}

/// End-of-session result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub winner: PlayerId,
    pub kind: PlayerKind,
}

impl SessionResult {
    /// Banner text.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.kind.is_human() {
            "You Won!"
        } else {
            "Game Over"
        }
    }

    /// Secondary line; players are numbered from 1 on screen.
    #[must_use]
    pub fn detail(&self) -> String {
        if self.kind.is_human() {
            String::new()
        } else {
            format!("Player {} won", self.winner.0 + 1)
        }
    }
}

/// Mutable turn state of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Exactly one while the phase is neither `Idle` nor `GameOver`.
    pub current_player: Option<PlayerId>,
    /// `None` only until the first card is turned up.
    pub target: Option<CardId>,
    /// Number of turns started so far.
    pub turn: u32,
    pub result: Option<SessionResult>,
}

impl TurnState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether new moves may be started for the current player.
    #[must_use]
    pub fn accepts_moves(&self) -> bool {
        self.phase == TurnPhase::Pre
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Make `player` current and enter `Pre`.
    pub fn begin_turn(&mut self, player: PlayerId) {
        self.current_player = Some(player);
        self.phase = TurnPhase::Pre;
        self.turn += 1;
    }

    pub fn finish(&mut self, result: SessionResult) {
        self.phase = TurnPhase::GameOver;
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle() {
        let state = TurnState::new();

        assert_eq!(state.phase, TurnPhase::Idle);
        assert!(state.current_player.is_none());
        assert!(state.target.is_none());
        assert!(!state.accepts_moves());
    }

    #[test]
    fn test_begin_turn() {
        let mut state = TurnState::new();
        state.begin_turn(PlayerId::new(1));
        state.begin_turn(PlayerId::new(2));

        assert_eq!(state.phase, TurnPhase::Pre);
        assert_eq!(state.current_player, Some(PlayerId::new(2)));
        assert_eq!(state.turn, 2);
        assert!(state.accepts_moves());
    }

    #[test]
    fn test_result_text() {
        let human = SessionResult { winner: PlayerId::new(0), kind: PlayerKind::Human };
        let ai = SessionResult { winner: PlayerId::new(2), kind: PlayerKind::Ai };

        assert_eq!(human.headline(), "You Won!");
        assert_eq!(human.detail(), "");
        assert_eq!(ai.headline(), "Game Over");
        assert_eq!(ai.detail(), "Player 3 won");
    }

    #[test]
    fn test_finish() {
        let mut state = TurnState::new();
        state.begin_turn(PlayerId::new(3));
        state.finish(SessionResult { winner: PlayerId::new(3), kind: PlayerKind::Ai });

        assert!(state.is_over());
        assert_eq!(state.result.map(|r| r.winner), Some(PlayerId::new(3)));
    }
}
