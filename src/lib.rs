//! # acquire-engine
//!
//! A deterministic rules engine for Acquire, the hotel-chain tile placement
//! and stock trading board game.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `apply(state, player, action)` returns a new
//!    state or an error. The input state is never modified, so a rejected
//!    action leaves nothing half-done.
//!
//! 2. **N-Player First**: Every seat-indexed value lives in a `PlayerMap`
//!    sized from the config. Nothing assumes a particular player count.
//!
//! 3. **Deterministic**: The only random step is the opening shuffle, driven
//!    by a seeded `GameRng`. The same config, seed and action sequence always
//!    produce the same game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Board, tile pool, chain tile sets and
//!   logs use `im-rs`, so cloning a state per action is cheap.
//!
//! - **Explicit Phases**: `GamePhase` records whose decision is pending:
//!   a tile, a chain to found, purchases, a merger survivor or a defunct
//!   stock disposition.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, RNG, actions, events, errors, state
//! - `board`: Tiles, the 9×12 grid, adjacency and connected groups
//! - `market`: Chains, tiers, share prices and the bank's stock
//! - `rules`: Setup, placement, mergers, scoring and the engine entry points

pub mod board;
pub mod core;
pub mod market;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    AcquireConfig, Action, ActionError, ActionRecord, ConfigError, GameEndReason, GameEvent,
    GamePhase, GameRng, GameRngState, GameState, MergerState, Player, PlayerId, PlayerMap,
    StockPurchase,
};

pub use crate::board::{Board, Tile};

pub use crate::market::{stock_price, ChainName, StockMarket, Tier};

pub use crate::rules::{apply, new_game, valid_actions, Acquire, GameResult, RulesEngine};
