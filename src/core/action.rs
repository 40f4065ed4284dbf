//! Actions a player can submit, and the record of accepted ones.
//!
//! Every state change goes through one `Action`. Actions are plain data and
//! compare by value, so the output of `valid_actions` can be matched against
//! what a client submits.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::board::Tile;
use crate::market::ChainName;

/// Buy `count` shares of `chain`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockPurchase {
    pub chain: ChainName,
    pub count: u8,
}

impl StockPurchase {
    #[must_use]
    pub const fn new(chain: ChainName, count: u8) -> Self {
        Self { chain, count }
    }
}

/// A player action.
///
/// ```
/// use acquire_engine::core::Action;
/// use acquire_engine::market::ChainName;
///
/// let place = Action::PlaceTile("5E".parse().unwrap());
/// let buy = Action::buy(&[(ChainName::Tower, 2), (ChainName::Luxor, 1)]);
///
/// assert_eq!(place.kind(), "place-tile");
/// assert_eq!(buy.kind(), "buy-stocks");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a tile from hand onto the board.
    PlaceTile(Tile),

    /// Name the chain to found on the pending tile group.
    SelectChainToFound(ChainName),

    /// Buy up to three shares of active chains, then end the turn.
    BuyStocks(SmallVec<[StockPurchase; 3]>),

    /// Buy nothing and end the turn.
    SkipBuyStocks,

    /// Break a size tie between the largest merging chains.
    ChooseMergerSurvivor(ChainName),

    /// Dispose of shares in the defunct chain currently being resolved.
    /// `trade` counts survivor shares received; each costs two defunct shares.
    HandleDefunctStock { hold: u8, sell: u8, trade: u8 },

    /// End the game and go to final scoring.
    DeclareGameEnd,

    /// Swap a dead tile in hand for a fresh one from the pool.
    ExchangeDeadTile(Tile),

    /// Skip tile placement when no tile in hand can be played.
    PassTurn,
}

impl Action {
    /// Build a `BuyStocks` action from (chain, count) pairs.
    #[must_use]
    pub fn buy(purchases: &[(ChainName, u8)]) -> Self {
        Action::BuyStocks(
            purchases
                .iter()
                .map(|&(chain, count)| StockPurchase::new(chain, count))
                .collect(),
        )
    }

    /// Stable kebab-case label, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::PlaceTile(_) => "place-tile",
            Action::SelectChainToFound(_) => "select-chain-to-found",
            Action::BuyStocks(_) => "buy-stocks",
            Action::SkipBuyStocks => "skip-buy-stocks",
            Action::ChooseMergerSurvivor(_) => "choose-merger-survivor",
            Action::HandleDefunctStock { .. } => "handle-defunct-stock",
            Action::DeclareGameEnd => "declare-game-end",
            Action::ExchangeDeadTile(_) => "exchange-dead-tile",
            Action::PassTurn => "pass-turn",
        }
    }
}

/// An accepted action with the context it was taken in.
///
/// Kept in `GameState::history` for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Position in the whole game's action sequence.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
