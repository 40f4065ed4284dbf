//! Board model: tile identity, cells, adjacency, and connected groups.

pub mod grid;
pub mod tile;

pub use grid::{Board, BoardCell};
pub use tile::{Tile, TileParseError};
