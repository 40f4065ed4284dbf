//! Hotel chains.
//!
//! ## ChainName
//!
//! The seven fixed chains, each with a pricing tier.
//!
//! ## ChainMap
//!
//! Fixed-size per-chain storage indexed by `ChainName`. Used for share pools,
//! per-player holdings and the chain registry.
//!
//! ## Chain
//!
//! Registry entry: owned tiles plus `active`/`safe` flags.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

use crate::board::Tile;
use crate::core::config::SAFE_CHAIN_SIZE;

/// Number of chains.
pub const CHAIN_COUNT: usize = 7;

/// One of the seven hotel chains.
///
/// Declaration order is the canonical order used for iteration and for
/// breaking size ties when sorting chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainName {
    Tower,
    Luxor,
    American,
    Worldwide,
    Festival,
    Continental,
    Imperial,
}

/// Pricing tier. Higher tiers trade at a premium.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Cheap = 1,
    Mid = 2,
    Premium = 3,
}

impl ChainName {
    /// All chains in canonical order.
    pub const ALL: [ChainName; CHAIN_COUNT] = [
        ChainName::Tower,
        ChainName::Luxor,
        ChainName::American,
        ChainName::Worldwide,
        ChainName::Festival,
        ChainName::Continental,
        ChainName::Imperial,
    ];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Pricing tier for this chain.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            ChainName::Tower | ChainName::Luxor => Tier::Cheap,
            ChainName::American | ChainName::Worldwide | ChainName::Festival => Tier::Mid,
            ChainName::Continental | ChainName::Imperial => Tier::Premium,
        }
    }

    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChainName::Tower => "tower",
            ChainName::Luxor => "luxor",
            ChainName::American => "american",
            ChainName::Worldwide => "worldwide",
            ChainName::Festival => "festival",
            ChainName::Continental => "continental",
            ChainName::Imperial => "imperial",
        }
    }
}

impl fmt::Display for ChainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chain name that is not one of the seven.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown chain: {0:?}")]
pub struct ChainParseError(pub String);

impl FromStr for ChainName {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainName::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChainParseError(s.to_string()))
    }
}

/// Per-chain storage with O(1) access.
///
/// ```
/// use acquire_engine::market::{ChainMap, ChainName};
///
/// let mut pool: ChainMap<u8> = ChainMap::with_value(25);
/// pool[ChainName::Luxor] -= 1;
/// assert_eq!(pool[ChainName::Luxor], 24);
/// assert_eq!(pool[ChainName::Tower], 25);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainMap<T>([T; CHAIN_COUNT]);

impl<T> ChainMap<T> {
    /// Build a map from a per-chain factory.
    pub fn new(factory: impl FnMut(ChainName) -> T) -> Self {
        Self(ChainName::ALL.map(factory))
    }

    /// Build a map with every entry set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over (ChainName, &T) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ChainName, &T)> {
        ChainName::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate over (ChainName, &mut T) pairs in canonical order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChainName, &mut T)> {
        ChainName::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<T> Index<ChainName> for ChainMap<T> {
    type Output = T;

    fn index(&self, chain: ChainName) -> &Self::Output {
        &self.0[chain.index()]
    }
}

impl<T> IndexMut<ChainName> for ChainMap<T> {
    fn index_mut(&mut self, chain: ChainName) -> &mut Self::Output {
        &mut self.0[chain.index()]
    }
}

/// Registry entry for one chain.
///
/// A chain starts inactive and empty. Founding activates it; being absorbed
/// in a merger resets it so the name can be founded again later.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Tiles owned by this chain.
    pub tiles: OrdSet<Tile>,

    /// Whether the chain is on the board.
    pub active: bool,

    /// Whether the chain has reached `SAFE_CHAIN_SIZE`. Kept in step with
    /// `tiles` by every mutator.
    pub safe: bool,
}

impl Chain {
    /// Number of tiles owned.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Activate with the given tiles.
    pub fn found(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles = tiles.into_iter().collect();
        self.active = true;
        self.refresh_safe();
    }

    /// Add tiles, ignoring ones already owned.
    pub fn absorb(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        for tile in tiles {
            self.tiles.insert(tile);
        }
        self.refresh_safe();
    }

    /// Return to the initial inactive, empty state.
    pub fn dissolve(&mut self) {
        self.tiles = OrdSet::new();
        self.active = false;
        self.safe = false;
    }

    fn refresh_safe(&mut self) {
        self.safe = self.size() >= SAFE_CHAIN_SIZE;
    }
}
