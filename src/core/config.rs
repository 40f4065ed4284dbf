//! Game configuration and rule constants.
//!
//! The rules themselves are fixed by the board game and live here as
//! constants. `AcquireConfig` only covers what differs from table to table:
//! how many seats, what they are called, and how much cash each starts with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board rows, labelled A through I.
pub const BOARD_ROWS: usize = 9;

/// Board columns, labelled 1 through 12.
pub const BOARD_COLS: usize = 12;

/// Total number of tiles (one per board cell).
pub const TOTAL_TILES: usize = BOARD_ROWS * BOARD_COLS;

/// Tiles held in a full hand.
pub const HAND_SIZE: usize = 6;

/// Shares issued per chain.
pub const SHARES_PER_CHAIN: u8 = 25;

/// Most shares a player may buy in one turn.
pub const MAX_PURCHASE_PER_TURN: u8 = 3;

/// A chain with at least this many tiles can no longer be absorbed.
pub const SAFE_CHAIN_SIZE: usize = 11;

/// A chain of this size lets the current player declare the game over.
pub const GAME_END_CHAIN_SIZE: usize = 41;

/// Defunct shares surrendered per survivor share received in a trade.
pub const TRADE_RATIO: u8 = 2;

/// Fewest seats at the table.
pub const MIN_PLAYERS: usize = 2;

/// Most seats at the table.
pub const MAX_PLAYERS: usize = 6;

/// Default starting cash per player.
pub const DEFAULT_STARTING_CASH: u32 = 6000;

/// Invalid table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 6, got {0}")]
    InvalidPlayerCount(usize),
    #[error("expected {expected} player names, got {got}")]
    NameCountMismatch { expected: usize, got: usize },
}

/// Table configuration.
///
/// ```
/// use acquire_engine::core::AcquireConfig;
///
/// let config = AcquireConfig::new(3)
///     .with_player_names(["Ada", "Brook", "Cyd"])
///     .with_starting_cash(8000);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.player_name(1), "Brook");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireConfig {
    /// Number of seats (2-6).
    pub player_count: usize,

    /// Display names per seat. Empty means "Player N".
    pub player_names: Vec<String>,

    /// Cash each player starts with.
    pub starting_cash: u32,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

impl AcquireConfig {
    /// Create a configuration for `player_count` seats with default names and cash.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            player_names: Vec::new(),
            starting_cash: DEFAULT_STARTING_CASH,
        }
    }

    /// Set display names, one per seat.
    #[must_use]
    pub fn with_player_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set starting cash.
    #[must_use]
    pub fn with_starting_cash(mut self, cash: u32) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Check the configuration describes a playable table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::InvalidPlayerCount(self.player_count));
        }
        if !self.player_names.is_empty() && self.player_names.len() != self.player_count {
            return Err(ConfigError::NameCountMismatch {
                expected: self.player_count,
                got: self.player_names.len(),
            });
        }
        Ok(())
    }

    /// Display name for a seat.
    #[must_use]
    pub fn player_name(&self, seat: usize) -> String {
        self.player_names
            .get(seat)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", seat + 1))
    }
}
