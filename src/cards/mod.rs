//! Card system: definitions, instances, and the session deck.
//!
//! ## Key Types
//!
//! - `Rank`, `Suit`: Card faces
//! - `CardDefinition`: Static (rank, suit, asset) input
//! - `CardId` / `Card`: Stable identity of a physical card
//! - `Deck`: The one authoritative card registry per session

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, Rank, Suit};
pub use instance::{Card, CardId};
pub use registry::Deck;
