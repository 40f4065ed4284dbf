//! Engine entry points.
//!
//! `apply` is the only way a `GameState` changes. It checks that the acting
//! player may submit the action in the current phase, then runs the handler
//! on a clone. The caller's state is never touched: on success they get the
//! new state, on failure an `ActionError` and their old state is still
//! valid.
//!
//! `valid_actions` enumerates every action `apply` would accept from a
//! player, without changing anything.
//!
//! ## RulesEngine
//!
//! Policy modules (bots, search) program against the `RulesEngine` trait
//! rather than the free functions. `Acquire` implements it.

use smallvec::SmallVec;
use tracing::debug;

use super::merger::{choose_survivor, handle_defunct_stock};
use super::placement::classify_placement;
use super::scoring::can_declare_game_end;
use super::turn;
use crate::core::config::{MAX_PURCHASE_PER_TURN, TRADE_RATIO};
use crate::core::{
    Action, ActionError, GameEndReason, GamePhase, GameState, MergerState, PlayerId, PlayerMap,
    StockPurchase,
};
use crate::market::{stock_price, ChainName};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    pub scores: PlayerMap<u32>,
    pub reason: GameEndReason,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if player can't act
/// - `apply_action`: Must be deterministic and leave `state` untouched
/// - `is_terminal`: Return None if game continues
pub trait RulesEngine {
    /// Get legal actions for a player.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action, returning the next state.
    fn apply_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, ActionError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// The player whose input the game is waiting on.
    fn acting_player(&self, state: &GameState) -> Option<PlayerId> {
        state.acting_player()
    }
}

/// The Acquire rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Acquire;

impl RulesEngine for Acquire {
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        valid_actions(state, player)
    }

    fn apply_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, ActionError> {
        apply(state, player, action)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.standings().map(|s| GameResult {
            winner: s.winner,
            scores: s.scores.clone(),
            reason: s.reason,
        })
    }
}

/// Apply `action` on behalf of `player`.
pub fn apply(state: &GameState, player: PlayerId, action: &Action) -> Result<GameState, ActionError> {
    match try_apply(state, player, action) {
        Ok(next) => {
            debug!(
                player = %player,
                action = action.kind(),
                phase = next.phase.name(),
                "action accepted"
            );
            Ok(next)
        }
        Err(err) => {
            debug!(
                player = %player,
                action = action.kind(),
                code = err.code(),
                reason = %err,
                "action rejected"
            );
            Err(err)
        }
    }
}

fn try_apply(state: &GameState, player: PlayerId, action: &Action) -> Result<GameState, ActionError> {
    authorize(state, player, action)?;

    let mut next = state.clone();
    next.record_action(player, action.clone());
    match (action, next.phase.clone()) {
        (Action::PlaceTile(tile), _) => turn::place_tile(&mut next, player, *tile)?,
        (Action::SelectChainToFound(chain), GamePhase::FoundingChain { tiles }) => {
            turn::select_chain_to_found(&mut next, player, tiles, *chain)?;
        }
        (Action::BuyStocks(purchases), _) => turn::buy_stocks(&mut next, player, purchases)?,
        (Action::SkipBuyStocks, _) => turn::skip_buy_stocks(&mut next),
        (Action::ChooseMergerSurvivor(chain), GamePhase::ResolvingMerger(merger)) => {
            choose_survivor(&mut next, merger, *chain)?;
        }
        (Action::HandleDefunctStock { hold, sell, trade }, GamePhase::ResolvingMerger(merger)) => {
            handle_defunct_stock(&mut next, merger, player, *hold, *sell, *trade)?;
        }
        (Action::DeclareGameEnd, _) => turn::declare_game_end(&mut next, player)?,
        (Action::ExchangeDeadTile(tile), _) => turn::exchange_dead_tile(&mut next, player, *tile)?,
        (Action::PassTurn, _) => turn::pass_turn(&mut next, player)?,
        _ => return Err(wrong_phase(state, action)),
    }
    Ok(next)
}

fn wrong_phase(state: &GameState, action: &Action) -> ActionError {
    ActionError::WrongPhase {
        action: action.kind(),
        phase: state.phase.name(),
    }
}

/// Check that `player` may submit `action` now.
///
/// Stock disposition belongs to the pending shareholder; everything else to
/// the turn player. The actor is checked before the phase.
fn authorize(state: &GameState, player: PlayerId, action: &Action) -> Result<(), ActionError> {
    if state.is_game_over() {
        return Err(ActionError::GameOver);
    }
    if !state.players.contains(player) {
        return Err(ActionError::UnknownPlayer(player));
    }

    if let Action::HandleDefunctStock { .. } = action {
        return match state.merger().and_then(MergerState::current_shareholder) {
            Some(expected) if expected == player => Ok(()),
            Some(_) => Err(ActionError::WrongTurn(player)),
            None => Err(wrong_phase(state, action)),
        };
    }

    if player != state.current_player {
        return Err(ActionError::WrongTurn(player));
    }

    let phase_ok = match action {
        Action::PlaceTile(_) | Action::ExchangeDeadTile(_) | Action::PassTurn => {
            matches!(state.phase, GamePhase::PlayingTile)
        }
        Action::SelectChainToFound(_) => matches!(state.phase, GamePhase::FoundingChain { .. }),
        Action::BuyStocks(_) | Action::SkipBuyStocks | Action::DeclareGameEnd => {
            matches!(state.phase, GamePhase::BuyingStocks)
        }
        Action::ChooseMergerSurvivor(_) => state
            .merger()
            .is_some_and(MergerState::awaiting_survivor),
        Action::HandleDefunctStock { .. } => false,
    };
    if phase_ok {
        Ok(())
    } else {
        Err(wrong_phase(state, action))
    }
}

/// Every action `apply` would accept from `player` in `state`.
///
/// Empty when it is not `player`'s move.
#[must_use]
pub fn valid_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    if state.acting_player() != Some(player) {
        return Vec::new();
    }

    let mut actions = Vec::new();
    match &state.phase {
        GamePhase::PlayingTile => {
            let mut any_playable = false;
            for &tile in &state.player(player).hand {
                let outcome = classify_placement(state, tile);
                if outcome.is_playable() {
                    any_playable = true;
                    actions.push(Action::PlaceTile(tile));
                } else if outcome.is_dead()
                    && !state.tile_pool.is_empty()
                    && !state.turn.exchanged_dead_tile
                {
                    actions.push(Action::ExchangeDeadTile(tile));
                }
            }
            if !any_playable {
                actions.push(Action::PassTurn);
            }
        }
        GamePhase::FoundingChain { .. } => {
            actions.extend(
                ChainName::ALL
                    .into_iter()
                    .filter(|&c| !state.chain(c).active)
                    .map(Action::SelectChainToFound),
            );
        }
        GamePhase::BuyingStocks => {
            actions.push(Action::SkipBuyStocks);
            purchase_options(state, player, &mut actions);
            if can_declare_game_end(state) {
                actions.push(Action::DeclareGameEnd);
            }
        }
        GamePhase::ResolvingMerger(merger) => match (merger.survivor, merger.current_defunct()) {
            (None, _) => {
                actions.extend(merger.candidates.iter().map(|&c| Action::ChooseMergerSurvivor(c)));
            }
            (Some(survivor), Some(defunct)) => {
                defunct_options(state, player, survivor, defunct, &mut actions);
            }
            (Some(_), None) => {}
        },
        GamePhase::Ended(_) => {}
    }
    actions
}

/// Every non-empty affordable basket of at most three shares.
///
/// Each basket lists distinct chains in canonical order, so every multiset
/// of shares appears exactly once.
fn purchase_options(state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
    let chains: SmallVec<[ChainName; 7]> = state
        .active_chains()
        .filter(|&c| state.market.available(c) > 0)
        .collect();
    let mut basket = SmallVec::new();
    collect_baskets(
        state,
        &chains,
        MAX_PURCHASE_PER_TURN,
        state.player(player).cash,
        &mut basket,
        out,
    );
}

fn collect_baskets(
    state: &GameState,
    chains: &[ChainName],
    remaining: u8,
    cash: u32,
    basket: &mut SmallVec<[StockPurchase; 3]>,
    out: &mut Vec<Action>,
) {
    for (i, &chain) in chains.iter().enumerate() {
        let price = stock_price(chain, state.chain_size(chain));
        for count in 1..=remaining.min(state.market.available(chain)) {
            let cost = price * u32::from(count);
            if cost > cash {
                break;
            }
            basket.push(StockPurchase::new(chain, count));
            out.push(Action::BuyStocks(basket.clone()));
            collect_baskets(state, &chains[i + 1..], remaining - count, cash - cost, basket, out);
            basket.pop();
        }
    }
}

/// Every (hold, sell, trade) split of the player's defunct shares that the
/// survivor's remaining stock allows.
fn defunct_options(
    state: &GameState,
    player: PlayerId,
    survivor: ChainName,
    defunct: ChainName,
    out: &mut Vec<Action>,
) {
    let held = state.player(player).shares(defunct);
    let survivor_stock = state.market.available(survivor);
    for sell in 0..=held {
        let max_trade = ((held - sell) / TRADE_RATIO).min(survivor_stock);
        for trade in 0..=max_trade {
            let hold = held - sell - trade * TRADE_RATIO;
            out.push(Action::HandleDefunctStock { hold, sell, trade });
        }
    }
}
