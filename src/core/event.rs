//! Game events.
//!
//! Every accepted action appends one or more events to `GameState::events`.
//! The log is what a presentation layer shows as the game history; it is
//! never read back by the rules.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::Tile;
use crate::market::ChainName;

/// Something that happened during the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was put on the board.
    TilePlaced { player: PlayerId, tile: Tile },

    /// A tile group formed but every chain was already active, so it is
    /// blocked from ever joining a chain.
    FoundingBlocked { player: PlayerId, tiles: Vec<Tile> },

    /// A new chain went on the board.
    ChainFounded {
        player: PlayerId,
        chain: ChainName,
        size: usize,
        founder_share: bool,
    },

    /// A chain grew by absorbing a placed tile and its unincorporated group.
    ChainExpanded { chain: ChainName, size: usize },

    /// A placement joined two or more chains.
    MergerStarted {
        player: PlayerId,
        tile: Tile,
        chains: Vec<ChainName>,
    },

    /// The survivor of a merger is known.
    SurvivorChosen { chain: ChainName },

    /// A shareholder bonus was paid for a chain.
    BonusPaid {
        player: PlayerId,
        chain: ChainName,
        amount: u32,
    },

    /// A defunct chain had no shareholders to consult.
    NoShareholders { chain: ChainName },

    /// Defunct shares sold back to the bank.
    SharesSold {
        player: PlayerId,
        chain: ChainName,
        count: u8,
        proceeds: u32,
    },

    /// Defunct shares traded two-for-one into the survivor.
    SharesTraded {
        player: PlayerId,
        defunct: ChainName,
        survivor: ChainName,
        received: u8,
    },

    /// Defunct shares kept.
    SharesHeld {
        player: PlayerId,
        chain: ChainName,
        count: u8,
    },

    /// All defunct chains have been folded into the survivor.
    MergerCompleted { survivor: ChainName, size: usize },

    /// Shares bought from the bank.
    SharesBought {
        player: PlayerId,
        chain: ChainName,
        count: u8,
        cost: u32,
    },

    /// A dead tile went back to the pool for a fresh one.
    DeadTileExchanged { player: PlayerId, tile: Tile },

    /// A player with no playable tile skipped placement.
    TurnPassed { player: PlayerId },

    /// A tile was drawn at the end of a turn.
    TileDrawn { player: PlayerId },

    /// The game ended.
    GameEnded {
        reason: GameEndReason,
        winner: PlayerId,
    },
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// A player declared the end during their buy phase.
    Declared(PlayerId),

    /// The pool and every hand ran out.
    TilesExhausted,

    /// No tile in any hand or in the pool can ever be placed.
    Stalemate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let events = vec![
            GameEvent::TilePlaced {
                player: PlayerId::new(0),
                tile: "1A".parse().unwrap(),
            },
            GameEvent::BonusPaid {
                player: PlayerId::new(2),
                chain: ChainName::Luxor,
                amount: 3000,
            },
            GameEvent::GameEnded {
                reason: GameEndReason::Declared(PlayerId::new(1)),
                winner: PlayerId::new(3),
            },
        ];

        let json = serde_json::to_string(&events).unwrap();
        let back: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, back);
    }
}
