//! Game state.
//!
//! ## GameState
//!
//! Everything needed to continue a game: configuration, board, chain
//! registry, bank, players, tile pool, phase, event log and action history.
//! Collections that grow or get touched piecemeal use `im` persistent
//! structures, so the clone `apply` takes before mutating is cheap.
//!
//! ## GamePhase
//!
//! A tagged phase. The two multi-step sub-states (founding a chain and
//! resolving a merger) carry their data inside the variant, so a state taken
//! between two actions serializes and resumes without anything on the side.
//!
//! Fields are public for inspection. Mutate only through `rules::apply`;
//! it is the only path that keeps the invariants.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::config::AcquireConfig;
use super::event::{GameEndReason, GameEvent};
use super::player::{Player, PlayerId, PlayerMap};
use crate::board::{Board, Tile};
use crate::market::{Chain, ChainMap, ChainName, StockMarket};

/// Per-turn flags, reset when the turn passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Placed a tile or passed.
    pub played_tile: bool,
    pub bought_stocks: bool,
    pub stocks_purchased: u8,
    pub exchanged_dead_tile: bool,
}

/// Progress through a merger.
///
/// Lives inside `GamePhase::ResolvingMerger` from the placement that
/// triggers the merger until the last defunct chain is folded in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergerState {
    /// The player whose placement started the merger.
    pub mergemaker: PlayerId,

    pub triggering_tile: Tile,

    /// All merging chains, largest first.
    pub merging: SmallVec<[ChainName; 4]>,

    /// Chains tied for largest. Only consulted while `survivor` is `None`.
    pub candidates: SmallVec<[ChainName; 4]>,

    /// `None` until the mergemaker breaks a tie.
    pub survivor: Option<ChainName>,

    /// Chains being absorbed, in processing order (largest first).
    pub defunct: SmallVec<[ChainName; 3]>,

    pub defunct_index: usize,

    /// Holders of the current defunct chain, mergemaker first.
    pub shareholders: SmallVec<[PlayerId; 6]>,

    pub shareholder_index: usize,

    /// The triggering tile and the unincorporated tiles it connects.
    pub pending_tiles: Vec<Tile>,
}

impl MergerState {
    /// Waiting for the mergemaker to pick a survivor.
    #[must_use]
    pub fn awaiting_survivor(&self) -> bool {
        self.survivor.is_none()
    }

    /// The defunct chain whose shares are being disposed of.
    #[must_use]
    pub fn current_defunct(&self) -> Option<ChainName> {
        self.defunct.get(self.defunct_index).copied()
    }

    /// The shareholder who must decide next.
    #[must_use]
    pub fn current_shareholder(&self) -> Option<PlayerId> {
        self.survivor?;
        self.shareholders.get(self.shareholder_index).copied()
    }
}

/// Result of final scoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStandings {
    /// Final cash per seat, after bonuses and liquidation.
    pub scores: PlayerMap<u32>,

    /// Highest score. The earliest seat wins a tie.
    pub winner: PlayerId,

    pub reason: GameEndReason,
}

/// Current phase of the turn cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    PlayingTile,

    /// A tile group is waiting for the current player to name a chain.
    FoundingChain { tiles: Vec<Tile> },

    BuyingStocks,

    ResolvingMerger(MergerState),

    Ended(FinalStandings),
}

impl GamePhase {
    /// Stable kebab-case name, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GamePhase::PlayingTile => "play-tile",
            GamePhase::FoundingChain { .. } => "found-chain",
            GamePhase::BuyingStocks => "buy-stocks",
            GamePhase::ResolvingMerger(_) => "resolve-merger",
            GamePhase::Ended(_) => "ended",
        }
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub config: AcquireConfig,

    pub board: Board,

    /// Chain registry.
    pub chains: ChainMap<Chain>,

    /// Shares left in the bank.
    pub market: StockMarket,

    pub players: PlayerMap<Player>,

    /// Undrawn tiles. Draws take from the back.
    pub tile_pool: Vector<Tile>,

    pub phase: GamePhase,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    pub turn: TurnState,

    pub events: Vector<GameEvent>,

    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a state at the start of the first turn.
    ///
    /// Players arrive with their hands already dealt; `tile_pool` holds the
    /// rest.
    #[must_use]
    pub fn new(config: AcquireConfig, players: PlayerMap<Player>, tile_pool: Vector<Tile>) -> Self {
        Self {
            config,
            board: Board::new(),
            chains: ChainMap::new(|_| Chain::default()),
            market: StockMarket::new(),
            players,
            tile_pool,
            phase: GamePhase::PlayingTile,
            current_player: PlayerId::new(0),
            turn_number: 1,
            turn: TurnState::default(),
            events: Vector::new(),
            history: Vector::new(),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn chain(&self, name: ChainName) -> &Chain {
        &self.chains[name]
    }

    /// Current size of a chain.
    #[must_use]
    pub fn chain_size(&self, name: ChainName) -> usize {
        self.chains[name].size()
    }

    /// Active chains in canonical order.
    pub fn active_chains(&self) -> impl Iterator<Item = ChainName> + '_ {
        self.chains.iter().filter(|(_, c)| c.active).map(|(n, _)| n)
    }

    /// Shares of `chain` held across all players.
    #[must_use]
    pub fn shares_held(&self, chain: ChainName) -> u32 {
        self.players.iter().map(|(_, p)| u32::from(p.shares(chain))).sum()
    }

    /// Merger progress, if one is being resolved.
    #[must_use]
    pub fn merger(&self) -> Option<&MergerState> {
        match &self.phase {
            GamePhase::ResolvingMerger(merger) => Some(merger),
            _ => None,
        }
    }

    /// The single player allowed to act right now.
    ///
    /// Normally the turn player; during stock disposition, the shareholder
    /// whose decision is pending. `None` once the game is over.
    #[must_use]
    pub fn acting_player(&self) -> Option<PlayerId> {
        match &self.phase {
            GamePhase::Ended(_) => None,
            GamePhase::ResolvingMerger(merger) if !merger.awaiting_survivor() => {
                merger.current_shareholder()
            }
            _ => Some(self.current_player),
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    #[must_use]
    pub fn standings(&self) -> Option<&FinalStandings> {
        match &self.phase {
            GamePhase::Ended(standings) => Some(standings),
            _ => None,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.standings().map(|s| s.winner)
    }

    #[must_use]
    pub fn final_scores(&self) -> Option<&PlayerMap<u32>> {
        self.standings().map(|s| &s.scores)
    }

    // === Mutation helpers used by the rules ===

    /// Append to the event log.
    pub fn log(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Record an accepted action in history.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }

    /// Move the top tile of the pool into a player's hand.
    pub fn draw_tile(&mut self, player: PlayerId) -> Option<Tile> {
        let tile = self.tile_pool.pop_back()?;
        self.players[player].hand.push(tile);
        Some(tile)
    }
}
