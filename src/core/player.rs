//! Client-relative player ids and the seated player table.
//!
//! The server numbers players from this client's point of view: the
//! local player is always `0` and the others follow clockwise. Absolute
//! seat numbers only exist once the first player of the game is known,
//! see [`PlayerId::seat_from`].

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Client-relative player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player sitting at this client.
    pub const LOCAL: PlayerId = PlayerId(0);

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_local(self) -> bool {
        self.0 == 0
    }

    /// Seat number of this player when `first` holds seat 0 at a table of
    /// `player_count`, counting clockwise.
    ///
    /// ```
    /// use fengsheng_core::core::PlayerId;
    ///
    /// let first = PlayerId::new(2);
    /// assert_eq!(PlayerId::new(2).seat_from(first, 3), 0);
    /// assert_eq!(PlayerId::LOCAL.seat_from(first, 3), 1);
    /// assert_eq!(PlayerId::new(1).seat_from(first, 3), 2);
    /// ```
    #[must_use]
    pub fn seat_from(self, first: PlayerId, player_count: usize) -> u8 {
        ((self.index() + player_count - first.index() % player_count) % player_count) as u8
    }

    /// Every id at a table of `player_count`, local player first.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(|i| PlayerId(i as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player entries in client-relative order.
///
/// Empty until the server announces the table. Ids arrive from the
/// network, so lookups return [`GameError::UnknownPlayer`] instead of
/// panicking. Backed by an `im` vector so a `GameData` clone shares it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T: Clone> {
    entries: Vector<T>,
}

impl<T: Clone> Default for PlayerMap<T> {
    fn default() -> Self {
        Self { entries: Vector::new() }
    }
}

impl<T: Clone> PlayerMap<T> {
    /// Seat `player_count` players, building each entry from its id.
    pub fn seated(player_count: usize, entry: impl Fn(PlayerId) -> T) -> Self {
        Self {
            entries: PlayerId::all(player_count).map(entry).collect(),
        }
    }

    /// Zero before the game is initialised.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn try_get(&self, player: PlayerId) -> Result<&T, GameError> {
        self.entries
            .get(player.index())
            .ok_or(GameError::UnknownPlayer(player))
    }

    pub fn try_get_mut(&mut self, player: PlayerId) -> Result<&mut T, GameError> {
        self.entries
            .get_mut(player.index())
            .ok_or(GameError::UnknownPlayer(player))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (PlayerId(i as u8), entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .map(|(i, entry)| (PlayerId(i as u8), entry))
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.entries.len())
    }
}
