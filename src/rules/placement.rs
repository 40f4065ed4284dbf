//! Placement outcome classifier.
//!
//! Decides what putting a tile down would do, without doing it. Checked in
//! order:
//!
//! 1. No chain or unincorporated neighbours: `Nothing`. Blocked tiles count
//!    as neither.
//! 2. Only unincorporated neighbours: `Found`, or `Nothing` if every chain
//!    is already active (the group is then blocked for good).
//! 3. Exactly one neighbouring chain: `Expand`.
//! 4. Two or more neighbouring chains: `Merge`, unless two of them are safe,
//!    which makes the tile dead.
//!
//! The tile groups carried by `Found`, `Expand` and `Merge` are the placed
//! tile plus every unincorporated tile connected to it, never a blocked one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Tile;
use crate::core::GameState;
use crate::market::ChainName;

/// Why a tile cannot be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnplayableReason {
    /// Would merge two safe chains. Stays unplayable for the rest of the game.
    Dead,

    /// The cell is already occupied.
    AlreadyPlaced,
}

/// What placing a tile would do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// The tile goes down unincorporated.
    Nothing,

    /// A new chain can be founded on `tiles`.
    Found { tiles: Vec<Tile> },

    /// `chain` grows by `tiles`.
    Expand { chain: ChainName, tiles: Vec<Tile> },

    /// `chains` merge; `tiles` join the survivor.
    Merge {
        chains: SmallVec<[ChainName; 4]>,
        tiles: Vec<Tile>,
    },

    Unplayable(UnplayableReason),
}

impl PlacementOutcome {
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !matches!(self, PlacementOutcome::Unplayable(_))
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        matches!(self, PlacementOutcome::Unplayable(UnplayableReason::Dead))
    }
}

/// Classify placing `tile` on the current board.
#[must_use]
pub fn classify_placement(state: &GameState, tile: Tile) -> PlacementOutcome {
    let board = &state.board;
    if board.is_occupied(tile) {
        return PlacementOutcome::Unplayable(UnplayableReason::AlreadyPlaced);
    }

    let chains = board.adjacent_chains(tile);
    let has_unincorporated = !board.adjacent_unincorporated(tile).is_empty();

    match chains.len() {
        0 if !has_unincorporated => PlacementOutcome::Nothing,
        0 => {
            if ChainName::ALL.iter().all(|&c| state.chain(c).active) {
                PlacementOutcome::Nothing
            } else {
                PlacementOutcome::Found {
                    tiles: board.unincorporated_group(tile),
                }
            }
        }
        1 => PlacementOutcome::Expand {
            chain: chains[0],
            tiles: board.unincorporated_group(tile),
        },
        _ => {
            let safe = chains.iter().filter(|&&c| state.chain(c).safe).count();
            if safe >= 2 {
                PlacementOutcome::Unplayable(UnplayableReason::Dead)
            } else {
                PlacementOutcome::Merge {
                    chains,
                    tiles: board.unincorporated_group(tile),
                }
            }
        }
    }
}

/// Check whether a tile can be placed.
#[must_use]
pub fn is_playable(state: &GameState, tile: Tile) -> bool {
    classify_placement(state, tile).is_playable()
}
