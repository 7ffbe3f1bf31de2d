//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index of a player. Seats are 0-based and turn order follows seat
//! order, wrapping at the player count.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier (seat index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player seated after this one, wrapping at `player_count`.
    ///
    /// ```
    /// use bartok_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(4), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who decides a player's moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Waits for "card activated" input from the presentation layer.
    Human,
    /// Decides synchronously through a `TurnStrategy`.
    #[default]
    Ai,
}

impl PlayerKind {
    #[must_use]
    pub const fn is_human(self) -> bool {
        matches!(self, PlayerKind::Human)
    }
}

/// A seated player.
///
/// The hand itself lives in the zone manager; this is identity plus the
/// seat reference used for presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub kind: PlayerKind,
    /// Index into `TableLayout::seats`.
    pub seat: usize,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, kind: PlayerKind, seat: usize) -> Self {
        Self { id, kind, seat }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use bartok_engine::core::{PlayerId, PlayerMap};
///
/// let mut sizes: PlayerMap<usize> = PlayerMap::with_value(4, 7);
/// sizes[PlayerId::new(1)] -= 1;
/// assert_eq!(sizes[PlayerId::new(1)], 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's entry, or `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable counterpart of [`PlayerMap::get`].
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
