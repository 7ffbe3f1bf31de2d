//! Rules engine trait and the Bartok implementation.
//!
//! The session never compares ranks or suits itself; it asks the
//! `RulesEngine`.

pub mod engine;

pub use engine::{BartokRules, LegalPlays, RulesEngine};
