//! Core types: players, configuration, RNG, actions, events, errors, state,
//! and snapshots.
//!
//! Nothing here knows the rules. The `rules` module reads and advances these
//! types; everything else only inspects them.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use action::{Action, ActionRecord, StockPurchase};
pub use config::{AcquireConfig, ConfigError};
pub use error::ActionError;
pub use event::{GameEndReason, GameEvent};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use snapshot::SnapshotError;
pub use state::{FinalStandings, GamePhase, GameState, MergerState, TurnState};
