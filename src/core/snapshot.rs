//! Compact binary snapshots of a game.
//!
//! A relay or save file stores `to_bytes(&state)` between actions and
//! resumes with `from_bytes`. Any serde format works on `GameState`; this is
//! the bincode one.

use thiserror::Error;

use super::state::GameState;

/// A snapshot could not be written or read.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}

/// Encode a state with bincode.
pub fn to_bytes(state: &GameState) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(state).map_err(SnapshotError::Encode)
}

/// Decode a state written by `to_bytes`.
pub fn from_bytes(bytes: &[u8]) -> Result<GameState, SnapshotError> {
    bincode::deserialize(bytes).map_err(SnapshotError::Decode)
}
