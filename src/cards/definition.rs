//! Card definitions - the static input a deck is built from.
//!
//! A definition is a (rank, suit, asset) tuple. The asset reference is
//! opaque to the engine; it is carried through for the presentation layer.

use serde::{Deserialize, Serialize};

/// Card rank. Ordered Ace (low) through King.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value, 1 for Ace through 13 for King.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ace => f.write_str("A"),
            Rank::Jack => f.write_str("J"),
            Rank::Queen => f.write_str("Q"),
            Rank::King => f.write_str("K"),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Static card definition.
///
/// ```
/// use bartok_engine::cards::{CardDefinition, Rank, Suit};
///
/// let def = CardDefinition::new(Rank::Seven, Suit::Hearts);
/// assert_eq!(def.asset, "H7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub rank: Rank,
    pub suit: Suit,
    /// Display asset reference (sprite name, file path, ...).
    #[serde(default)]
    pub asset: String,
}

impl CardDefinition {
    /// Definition with the conventional asset name, e.g. `"C10"`.
    #[must_use]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            asset: format!("{}{}", suit.letter(), rank.value()),
        }
    }

    /// Override the asset reference (builder pattern).
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = asset.into();
        self
    }

    /// The 52 standard cards, suit-major: clubs Ace..King, then diamonds,
    /// hearts, spades.
    #[must_use]
    pub fn standard_52() -> Vec<CardDefinition> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| CardDefinition::new(rank, suit)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(Rank::Ace < Rank::Two);
        assert!(Rank::Queen < Rank::King);
        assert_eq!(Rank::Seven.value(), 7);
    }

    #[test]
    fn test_rank_from_value() {
        assert_eq!(Rank::from_value(1), Some(Rank::Ace));
        assert_eq!(Rank::from_value(13), Some(Rank::King));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(14), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rank::Ten.to_string(), "10");
        assert_eq!(Rank::Jack.to_string(), "J");
        assert_eq!(Suit::Spades.to_string(), "S");
    }

    #[test]
    fn test_standard_52() {
        let defs = CardDefinition::standard_52();
        assert_eq!(defs.len(), 52);
        assert_eq!(defs[0], CardDefinition::new(Rank::Ace, Suit::Clubs));
        assert_eq!(defs[51], CardDefinition::new(Rank::King, Suit::Spades));
        assert_eq!(defs[12].asset, "C13");
    }

    #[test]
    fn test_definition_serde_default_asset() {
        let def: CardDefinition =
            serde_json::from_str(r#"{"rank":"Two","suit":"Diamonds"}"#).unwrap();
        assert_eq!(def.rank, Rank::Two);
        assert!(def.asset.is_empty());
    }
}
