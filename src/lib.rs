//! # bartok-engine
//!
//! Rules-and-flow engine for four-player Bartok: players discard a card
//! matching the target's rank or suit, draw when they cannot, and the round
//! ends when a hand empties.
//!
//! ## Design Principles
//!
//! 1. **Moves drive the game**: every deal, draw and play is a timed card
//!    move. The turn state machine waits in `Waiting` until the move's
//!    completion is reported by `Session::tick`.
//!
//! 2. **No globals**: a `Session` owns its deck, zones, scheduler and turn
//!    state. Restarting builds a new one.
//!
//! 3. **Deterministic**: one seed fixes the shuffle and every AI choice.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, turn state, errors, geometry
//! - `cards`: card definitions, instances and the session deck
//! - `deck`: shuffle, deal plan, discard recycling
//! - `zones`: draw/discard piles, target slot, hands and fan layout
//! - `motion`: easing and the move scheduler
//! - `rules`: play legality
//! - `ai`: turn strategies for AI seats
//! - `game`: the `Session` and its events
//! - `telemetry`: tracing subscriber setup for binaries
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use bartok_engine::{GameConfig, Session};
//!
//! let mut session = Session::new(GameConfig::standard().all_ai(), 7).unwrap();
//! session.start().unwrap();
//!
//! let mut now = Duration::ZERO;
//! while !session.is_over() {
//!     now += Duration::from_millis(20);
//!     session.tick(now).unwrap();
//! }
//! assert!(session.result().is_some());
//! ```

pub mod ai;
pub mod cards;
pub mod core;
pub mod deck;
pub mod game;
pub mod motion;
pub mod rules;
pub mod telemetry;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, EngineError, GameConfig, GameRng, PlayerId, PlayerKind, PlayerMap, Pose,
    SessionResult, TurnPhase, Vec3,
};

pub use crate::cards::{Card, CardDefinition, CardId, Deck, Rank, Suit};

pub use crate::deck::DeckManager;

pub use crate::zones::{CardState, Hand, Location, ZoneManager};

pub use crate::motion::{CardView, Easing, MoveScheduler, RenderHints};

pub use crate::rules::{BartokRules, RulesEngine};

pub use crate::ai::{Decision, RandomLegalPlay, TurnStrategy};

pub use crate::game::{Activation, IgnoreReason, Session, SessionEvent};
