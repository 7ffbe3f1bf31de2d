//! Decision making for AI-controlled seats.

pub mod strategy;

pub use strategy::{Decision, RandomLegalPlay, TurnStrategy};
