//! Deck lifecycle: build, shuffle, deal, recycle.

pub mod manager;

pub use manager::{DealStep, DeckManager};
