//! The 9×12 board.
//!
//! Cells are stored row-major in an `im::Vector`, so cloning a `Board` is
//! O(1) and a placement only copies the touched chunk.
//!
//! ## Adjacency
//!
//! Strictly orthogonal. A tile touches at most four cells and therefore at
//! most four distinct chains.
//!
//! ## Flood fill
//!
//! `connected_tiles` walks every occupied cell reachable from a start tile.
//! `unincorporated_group` walks only occupied cells with no chain, starting
//! from a tile that may not be on the board yet. The placement classifier
//! uses the latter to collect the tiles a founding, expansion or merger
//! pulls in.
//!
//! ## Blocked tiles
//!
//! A group that could not found a chain because all seven were active is
//! marked blocked. Blocked cells never join a chain, so both the
//! unincorporated queries and the flood fill skip them.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::Tile;
use crate::core::config::TOTAL_TILES;
use crate::market::ChainName;

/// One board position.
///
/// `chain` and `blocked` are only ever set while `tile` is, and never both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    pub tile: Option<Tile>,
    pub chain: Option<ChainName>,

    /// Permanently outside every chain.
    pub blocked: bool,
}

impl BoardCell {
    /// Check whether a tile has been placed here.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.tile.is_some()
    }

    /// Occupied, not part of any chain, and still free to join one.
    #[must_use]
    pub fn is_unincorporated(&self) -> bool {
        self.tile.is_some() && self.chain.is_none() && !self.blocked
    }
}

/// Board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vector<BoardCell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: std::iter::repeat(BoardCell::default())
                .take(TOTAL_TILES)
                .collect(),
        }
    }

    /// The cell a tile maps to.
    #[must_use]
    pub fn cell(&self, tile: Tile) -> &BoardCell {
        &self.cells[tile.index()]
    }

    /// Check whether a tile has been placed.
    #[must_use]
    pub fn is_occupied(&self, tile: Tile) -> bool {
        self.cell(tile).is_occupied()
    }

    /// The chain owning a placed tile, if any.
    #[must_use]
    pub fn chain_at(&self, tile: Tile) -> Option<ChainName> {
        self.cell(tile).chain
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Iterate over placed tiles in row-major order.
    pub fn placed_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().filter_map(|c| c.tile)
    }

    /// Put a tile on its cell, optionally already owned by a chain.
    pub fn place(&mut self, tile: Tile, chain: Option<ChainName>) {
        self.cells.set(
            tile.index(),
            BoardCell {
                tile: Some(tile),
                chain,
                blocked: false,
            },
        );
    }

    /// Assign `chain` to every listed tile that is on the board.
    ///
    /// Empty and blocked cells are skipped so a chain can never own them.
    pub fn assign_chain<'a>(&mut self, tiles: impl IntoIterator<Item = &'a Tile>, chain: ChainName) {
        for &tile in tiles {
            if let Some(cell) = self.cells.get_mut(tile.index()) {
                if cell.is_occupied() && !cell.blocked {
                    cell.chain = Some(chain);
                }
            }
        }
    }

    /// Mark placed, chainless tiles as permanently unincorporated.
    pub fn block<'a>(&mut self, tiles: impl IntoIterator<Item = &'a Tile>) {
        for &tile in tiles {
            if let Some(cell) = self.cells.get_mut(tile.index()) {
                if cell.is_occupied() && cell.chain.is_none() {
                    cell.blocked = true;
                }
            }
        }
    }

    /// Check whether a placed tile can never join a chain.
    #[must_use]
    pub fn is_blocked(&self, tile: Tile) -> bool {
        self.cell(tile).blocked
    }

    /// Tiles currently assigned to `chain`, in row-major order.
    #[must_use]
    pub fn tiles_in_chain(&self, chain: ChainName) -> Vec<Tile> {
        self.cells
            .iter()
            .filter(|c| c.chain == Some(chain))
            .filter_map(|c| c.tile)
            .collect()
    }

    /// Distinct chains touching a position, in neighbour order.
    #[must_use]
    pub fn adjacent_chains(&self, tile: Tile) -> SmallVec<[ChainName; 4]> {
        let mut chains = SmallVec::new();
        for neighbor in tile.neighbors() {
            if let Some(chain) = self.chain_at(neighbor) {
                if !chains.contains(&chain) {
                    chains.push(chain);
                }
            }
        }
        chains
    }

    /// Occupied neighbours that belong to no chain.
    #[must_use]
    pub fn adjacent_unincorporated(&self, tile: Tile) -> SmallVec<[Tile; 4]> {
        tile.neighbors()
            .filter(|&n| self.cell(n).is_unincorporated())
            .collect()
    }

    /// All occupied tiles reachable from `start` through occupied cells.
    ///
    /// Returns an empty list if `start` itself is empty.
    #[must_use]
    pub fn connected_tiles(&self, start: Tile) -> Vec<Tile> {
        if !self.is_occupied(start) {
            return Vec::new();
        }
        self.flood(start, |cell| cell.is_occupied())
    }

    /// `start` plus every unincorporated tile reachable from it through
    /// unincorporated cells.
    ///
    /// `start` is included whether or not it has been placed, so this can be
    /// asked about a tile still in a player's hand.
    #[must_use]
    pub fn unincorporated_group(&self, start: Tile) -> Vec<Tile> {
        self.flood(start, |cell| cell.is_unincorporated())
    }

    fn flood(&self, start: Tile, passable: impl Fn(&BoardCell) -> bool) -> Vec<Tile> {
        let mut visited: FxHashSet<Tile> = FxHashSet::default();
        let mut stack = vec![start];
        let mut group = Vec::new();
        visited.insert(start);

        while let Some(current) = stack.pop() {
            group.push(current);
            for neighbor in current.neighbors() {
                if !visited.contains(&neighbor) && passable(self.cell(neighbor)) {
                    visited.insert(neighbor);
                    stack.push(neighbor);
                }
            }
        }

        group.sort_unstable();
        group
    }
}
