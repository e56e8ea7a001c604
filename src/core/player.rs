//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. The game is strictly two-player, so a
//! `PlayerId` is always 0 or 1 and every player has exactly one opponent.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by a `[T; 2]` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const SEATS: usize = 2;

/// Seat identifier: `PlayerId(0)` moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first seat.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The second seat.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < SEATS, "Seat must be 0 or 1");
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use burnpile::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
    /// assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both seats in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use burnpile::core::{PlayerId, PlayerMap};
///
/// let mut cards_left: PlayerMap<u32> = PlayerMap::new(|_| 55);
/// cards_left[PlayerId::SECOND] -= 3;
///
/// assert_eq!(cards_left[PlayerId::FIRST], 55);
/// assert_eq!(cards_left[PlayerId::SECOND], 52);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEATS],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Create a PlayerMap from the two seats' values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Borrow both seats mutably at once: `(player, opponent)`.
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        if player.index() == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
