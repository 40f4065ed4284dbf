//! Rule violations.
//!
//! A rejected action is an ordinary result, never a panic. Each variant has a
//! stable kebab-case code for clients that branch on the reason, and a
//! `Display` message for people.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::Tile;
use crate::market::ChainName;

/// Why an action was rejected. The state it was applied to is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("it is not {0}'s turn to act")]
    WrongTurn(PlayerId),

    #[error("{action} is not allowed in the {phase} phase")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("tile {0} is not in the player's hand")]
    TileNotInHand(Tile),

    #[error("tile {0} cannot be played")]
    TileUnplayable(Tile),

    #[error("at most 3 shares may be bought per turn, requested {0}")]
    ExceedsMaxPurchase(u32),

    #[error("purchase costs ${cost} but only ${cash} is available")]
    InsufficientCash { cost: u32, cash: u32 },

    #[error("hold {hold} + sell {sell} + 2 x trade {trade} does not equal the {held} shares held")]
    InvalidStockAllocationSum {
        hold: u8,
        sell: u8,
        trade: u8,
        held: u8,
    },

    #[error("only {available} {chain} shares are left to trade for, requested {requested}")]
    InsufficientMarketStockForTrade {
        chain: ChainName,
        requested: u8,
        available: u8,
    },

    #[error("{0} is already on the board")]
    ChainAlreadyActive(ChainName),

    #[error("{0} is not one of the largest merging chains")]
    SurvivorNotTied(ChainName),

    #[error("no chain has 41 tiles and not every active chain is safe")]
    GameEndConditionsUnmet,

    #[error("the game is over")]
    GameOver,

    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),

    #[error("{0} is not on the board")]
    ChainNotActive(ChainName),

    #[error("only {available} {chain} shares are left in the bank, requested {requested}")]
    InsufficientMarketStock {
        chain: ChainName,
        requested: u8,
        available: u8,
    },

    #[error("tile {0} is not dead")]
    NotADeadTile(Tile),

    #[error("the tile pool is empty")]
    TilePoolEmpty,

    #[error("a dead tile has already been exchanged this turn")]
    DeadTileAlreadyExchanged,

    #[error("the player holds a playable tile and cannot pass")]
    HasPlayableTile,
}

impl ActionError {
    /// Stable reason code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            ActionError::WrongTurn(_) => "wrong-turn",
            ActionError::WrongPhase { .. } => "wrong-phase",
            ActionError::TileNotInHand(_) => "tile-not-in-hand",
            ActionError::TileUnplayable(_) => "tile-unplayable",
            ActionError::ExceedsMaxPurchase(_) => "exceeds-max-purchase",
            ActionError::InsufficientCash { .. } => "insufficient-cash",
            ActionError::InvalidStockAllocationSum { .. } => "invalid-stock-allocation-sum",
            ActionError::InsufficientMarketStockForTrade { .. } => {
                "insufficient-market-stock-for-trade"
            }
            ActionError::ChainAlreadyActive(_) => "chain-already-active",
            ActionError::SurvivorNotTied(_) => "survivor-not-tied",
            ActionError::GameEndConditionsUnmet => "game-end-conditions-unmet",
            ActionError::GameOver => "game-over",
            ActionError::UnknownPlayer(_) => "unknown-player",
            ActionError::ChainNotActive(_) => "chain-not-active",
            ActionError::InsufficientMarketStock { .. } => "insufficient-market-stock",
            ActionError::NotADeadTile(_) => "not-a-dead-tile",
            ActionError::TilePoolEmpty => "tile-pool-empty",
            ActionError::DeadTileAlreadyExchanged => "dead-tile-already-exchanged",
            ActionError::HasPlayableTile => "has-playable-tile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let err = ActionError::ExceedsMaxPurchase(4);
        assert_eq!(err.code(), "exceeds-max-purchase");
        assert_eq!(err.to_string(), "at most 3 shares may be bought per turn, requested 4");

        let err = ActionError::WrongTurn(PlayerId::new(2));
        assert_eq!(err.code(), "wrong-turn");
        assert_eq!(err.to_string(), "it is not Player 2's turn to act");

        let err = ActionError::TileUnplayable("7F".parse().unwrap());
        assert_eq!(err.to_string(), "tile 7F cannot be played");
    }

    #[test]
    fn test_codes_are_distinct() {
        let tile: Tile = "1A".parse().unwrap();
        let all = [
            ActionError::WrongTurn(PlayerId::new(0)),
            ActionError::WrongPhase { action: "x", phase: "y" },
            ActionError::TileNotInHand(tile),
            ActionError::TileUnplayable(tile),
            ActionError::ExceedsMaxPurchase(4),
            ActionError::InsufficientCash { cost: 1, cash: 0 },
            ActionError::InvalidStockAllocationSum { hold: 0, sell: 0, trade: 0, held: 1 },
            ActionError::InsufficientMarketStockForTrade {
                chain: ChainName::Tower,
                requested: 1,
                available: 0,
            },
            ActionError::ChainAlreadyActive(ChainName::Tower),
            ActionError::SurvivorNotTied(ChainName::Tower),
            ActionError::GameEndConditionsUnmet,
            ActionError::GameOver,
            ActionError::UnknownPlayer(PlayerId::new(9)),
            ActionError::ChainNotActive(ChainName::Tower),
            ActionError::InsufficientMarketStock {
                chain: ChainName::Tower,
                requested: 1,
                available: 0,
            },
            ActionError::NotADeadTile(tile),
            ActionError::TilePoolEmpty,
            ActionError::DeadTileAlreadyExchanged,
            ActionError::HasPlayableTile,
        ];

        let mut codes: Vec<_> = all.iter().map(ActionError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}
