//! The bank's share pool.
//!
//! Every chain issues `SHARES_PER_CHAIN` shares. A share is always either in
//! the pool or in exactly one player's holdings; the mutators here only move
//! shares, never create or destroy them.

use serde::{Deserialize, Serialize};

use super::chain::{ChainMap, ChainName};
use crate::core::config::SHARES_PER_CHAIN;

/// Shares still available from the bank, per chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMarket {
    shares: ChainMap<u8>,
}

impl Default for StockMarket {
    fn default() -> Self {
        Self::new()
    }
}

impl StockMarket {
    /// A full pool for every chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shares: ChainMap::with_value(SHARES_PER_CHAIN),
        }
    }

    /// Shares of `chain` left in the pool.
    #[must_use]
    pub fn available(&self, chain: ChainName) -> u8 {
        self.shares[chain]
    }

    /// Take `count` shares out of the pool.
    ///
    /// Returns false and leaves the pool untouched if there are not enough.
    pub fn withdraw(&mut self, chain: ChainName, count: u8) -> bool {
        match self.shares[chain].checked_sub(count) {
            Some(left) => {
                self.shares[chain] = left;
                true
            }
            None => false,
        }
    }

    /// Return `count` shares to the pool.
    pub fn deposit(&mut self, chain: ChainName, count: u8) {
        self.shares[chain] += count;
    }

    /// Iterate over (chain, available) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ChainName, u8)> + '_ {
        self.shares.iter().map(|(c, &n)| (c, n))
    }
}
