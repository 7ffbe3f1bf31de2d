//! Session orchestration: the turn state machine and its events.
//!
//! ## Key Types
//!
//! - `Session`: owns one game from deal to restart signal
//! - `Completion`: who a finished move notifies
//! - `SessionEvent`: observable history, drained by the host
//! - `Activation`: outcome of a card activation

pub mod controller;
pub mod events;

pub use controller::{Completion, Session};
pub use events::{Activation, IgnoreReason, SessionEvent};
