//! Engine error types.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{CardId, Rank, Suit};

/// Startup configuration problems. Any of these prevents a session from starting.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("deck has {actual} cards, expected {expected}")]
    WrongDeckSize { expected: usize, actual: usize },

    #[error("card {rank:?} of {suit:?} is defined more than once")]
    DuplicateCard { rank: Rank, suit: Suit },

    #[error("no seat defined for player {0}")]
    MissingSeat(u8),

    #[error("seat for player {0} is defined more than once")]
    DuplicateSeat(u8),

    #[error("player count must be between 2 and 8, got {0}")]
    PlayerCount(usize),

    #[error("dealing {needed} cards plus a target needs more than the {available} in the deck")]
    NotEnoughCards { needed: usize, available: usize },

    #[error("{0} is out of range for this table")]
    SeatOutOfRange(&'static str),

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),

    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// Runtime engine errors.
///
/// Illegal player input is never an error; it is ignored and reported as
/// an `Activation::Ignored` outcome instead.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("no cards available: draw and discard piles are both empty")]
    NoCardsAvailable,

    #[error("no target card has been turned up yet")]
    NoTarget,

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
