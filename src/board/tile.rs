//! Tile identity.
//!
//! A tile is named by its column and row ("1A" through "12I") and maps
//! one-to-one onto a board coordinate. Internally it is the row-major cell
//! index, which keeps it `Copy` and one byte wide.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::config::{BOARD_COLS, BOARD_ROWS, TOTAL_TILES};

const ROW_LABELS: &[u8; BOARD_ROWS] = b"ABCDEFGHI";

/// A tile id that does not name a board cell.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid tile id: {0:?}")]
pub struct TileParseError(pub String);

/// One of the 108 tiles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile(u8);

impl Tile {
    /// Tile at a 0-based (row, col) coordinate, if it is on the board.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Tile> {
        if row < BOARD_ROWS && col < BOARD_COLS {
            Some(Tile((row * BOARD_COLS + col) as u8))
        } else {
            None
        }
    }

    /// Tile from its row-major cell index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Tile> {
        if index < TOTAL_TILES {
            Some(Tile(index as u8))
        } else {
            None
        }
    }

    /// Row-major cell index (0..108).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 0-based row (A = 0).
    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / BOARD_COLS
    }

    /// 0-based column ("1" = 0).
    #[must_use]
    pub const fn col(self) -> usize {
        self.index() % BOARD_COLS
    }

    /// All tiles in row-major order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..TOTAL_TILES as u8).map(Tile)
    }

    /// Orthogonal neighbours that are on the board. No diagonals.
    pub fn neighbors(self) -> impl Iterator<Item = Tile> {
        let (row, col) = (self.row(), self.col());
        let up = row.checked_sub(1).and_then(|r| Tile::new(r, col));
        let down = Tile::new(row + 1, col);
        let left = col.checked_sub(1).and_then(|c| Tile::new(row, c));
        let right = Tile::new(row, col + 1);
        [up, down, left, right].into_iter().flatten()
    }

    /// Check whether two tiles share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Tile) -> bool {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col()) == 1
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col() + 1, ROW_LABELS[self.row()] as char)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({})", self)
    }
}

impl FromStr for Tile {
    type Err = TileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TileParseError(s.to_string());

        let row_label = s.bytes().last().ok_or_else(err)?;
        let row = ROW_LABELS
            .iter()
            .position(|&label| label == row_label.to_ascii_uppercase())
            .ok_or_else(err)?;

        let digits = &s[..s.len() - 1];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let col: usize = digits.parse().map_err(|_| err())?;

        col.checked_sub(1)
            .and_then(|c| Tile::new(row, c))
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Tile {
    type Error = TileParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.to_string()
    }
}
