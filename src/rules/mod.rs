//! Acquire rules.
//!
//! - `setup`: shuffle and deal a new game
//! - `placement`: classify what a tile placement would do
//! - `turn`: tile, founding, purchase and end-of-turn handlers
//! - `merger`: survivor choice and defunct stock disposition
//! - `scoring`: shareholder bonuses and final scoring
//! - `engine`: `apply`, `valid_actions` and the `RulesEngine` trait
//!
//! Only `engine` changes state from outside the crate. The handlers it
//! dispatches to mutate a private clone.

pub mod engine;
pub mod merger;
pub mod placement;
pub mod scoring;
pub mod setup;
pub mod turn;

pub use engine::{apply, valid_actions, Acquire, GameResult, RulesEngine};
pub use merger::shareholder_order;
pub use placement::{classify_placement, is_playable, PlacementOutcome, UnplayableReason};
pub use scoring::{calculate_bonuses, can_declare_game_end, Bonus};
pub use setup::new_game;
pub use turn::has_playable_tile;
