//! Card containers: draw pile, discard pile, target slot and hands.
//!
//! ## Key Types
//!
//! - `ZoneManager`: container membership and per-card `CardState`
//! - `Location`: which container a card is in
//! - `Hand`: per-player ordered cards with fan layout

pub mod hand;
pub mod manager;

pub use hand::{FanParams, FanSlot, Hand};
pub use manager::{CardState, Location, Transit, ZoneManager};
