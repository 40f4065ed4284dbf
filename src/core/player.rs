//! Player identification, per-player storage, and player holdings.
//!
//! ## PlayerId
//!
//! Seat index in turn order. Seat 0 takes the first turn.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Player
//!
//! Cash, tile hand, and per-chain share counts for one seat.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::board::Tile;
use crate::market::{ChainMap, ChainName};

/// Seat identifier. Seats are 0-based and follow turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use acquire_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat that plays after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use acquire_engine::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<u32> = PlayerMap::with_value(4, 6000);
/// cash[PlayerId::new(1)] -= 300;
/// assert_eq!(cash[PlayerId::new(1)], 5700);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
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

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether a seat exists in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
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

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seats in turn order starting at `start`, wrapping around.
    ///
    /// ```
    /// use acquire_engine::core::{PlayerId, PlayerMap};
    ///
    /// let map: PlayerMap<()> = PlayerMap::with_value(4, ());
    /// let order: Vec<_> = map.rotation_from(PlayerId::new(2)).collect();
    /// assert_eq!(order, vec![PlayerId::new(2), PlayerId::new(3), PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn rotation_from(&self, start: PlayerId) -> impl Iterator<Item = PlayerId> {
        let count = self.data.len();
        (0..count).map(move |offset| PlayerId(((start.index() + offset) % count) as u8))
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

/// One seat's holdings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,

    /// Cash in dollars.
    pub cash: u32,

    /// Tiles in hand (at most `HAND_SIZE`).
    pub hand: SmallVec<[Tile; 6]>,

    /// Shares held per chain.
    pub stocks: ChainMap<u8>,
}

impl Player {
    /// Create a player with the given name and cash and no tiles or shares.
    pub fn new(name: impl Into<String>, cash: u32) -> Self {
        Self {
            name: name.into(),
            cash,
            hand: SmallVec::new(),
            stocks: ChainMap::with_value(0),
        }
    }

    /// Check whether a tile is in this player's hand.
    #[must_use]
    pub fn holds_tile(&self, tile: Tile) -> bool {
        self.hand.contains(&tile)
    }

    /// Remove a tile from the hand.
    ///
    /// Returns true if the tile was found and removed.
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        if let Some(pos) = self.hand.iter().position(|&t| t == tile) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Shares held in `chain`.
    #[must_use]
    pub fn shares(&self, chain: ChainName) -> u8 {
        self.stocks[chain]
    }
}
