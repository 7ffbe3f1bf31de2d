//! Core engine types: players, RNG, configuration, turn state, errors.

pub mod config;
pub mod error;
pub mod geometry;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{
    GameConfig, MotionConfig, Multiplier, PileAnchor, RulesConfig, SeatDef, SortLayer, TableLayout,
};
pub use error::{ConfigError, EngineError};
pub use geometry::{Pose, Vec3};
pub use player::{Player, PlayerId, PlayerKind, PlayerMap};
pub use rng::GameRng;
pub use state::{SessionResult, TurnPhase, TurnState};
