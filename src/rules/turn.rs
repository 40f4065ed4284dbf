//! Turn handlers.
//!
//! One function per action outside the merger protocol. Each runs on the
//! engine's working copy after authorization has passed, so it may mutate
//! freely before returning an error; the copy is thrown away on `Err`.

use tracing::info;

use super::merger::start_merger;
use super::placement::{classify_placement, is_playable, PlacementOutcome};
use super::scoring::{can_declare_game_end, finish_game};
use crate::board::Tile;
use crate::core::config::{HAND_SIZE, MAX_PURCHASE_PER_TURN};
use crate::core::{
    ActionError, GameEndReason, GameEvent, GamePhase, GameState, PlayerId, StockPurchase,
    TurnState,
};
use crate::market::{stock_price, ChainMap, ChainName};

pub(crate) fn place_tile(
    state: &mut GameState,
    player: PlayerId,
    tile: Tile,
) -> Result<(), ActionError> {
    if !state.players[player].holds_tile(tile) {
        return Err(ActionError::TileNotInHand(tile));
    }
    let outcome = classify_placement(state, tile);
    if !outcome.is_playable() {
        return Err(ActionError::TileUnplayable(tile));
    }

    state.players[player].remove_tile(tile);
    state.turn.played_tile = true;
    state.log(GameEvent::TilePlaced { player, tile });

    match outcome {
        PlacementOutcome::Nothing => {
            state.board.place(tile, None);
            let group = state.board.unincorporated_group(tile);
            if group.len() > 1 {
                state.board.block(&group);
                state.log(GameEvent::FoundingBlocked {
                    player,
                    tiles: group,
                });
            }
            state.phase = GamePhase::BuyingStocks;
        }
        PlacementOutcome::Found { tiles } => {
            state.board.place(tile, None);
            state.phase = GamePhase::FoundingChain { tiles };
        }
        PlacementOutcome::Expand { chain, tiles } => {
            state.board.place(tile, Some(chain));
            state.board.assign_chain(&tiles, chain);
            state.chains[chain].absorb(tiles);
            state.log(GameEvent::ChainExpanded {
                chain,
                size: state.chain_size(chain),
            });
            state.phase = GamePhase::BuyingStocks;
        }
        PlacementOutcome::Merge { chains, tiles } => {
            state.board.place(tile, None);
            start_merger(state, player, tile, &chains, tiles);
        }
        PlacementOutcome::Unplayable(_) => return Err(ActionError::TileUnplayable(tile)),
    }
    Ok(())
}

pub(crate) fn select_chain_to_found(
    state: &mut GameState,
    player: PlayerId,
    tiles: Vec<Tile>,
    chain: ChainName,
) -> Result<(), ActionError> {
    if state.chain(chain).active {
        return Err(ActionError::ChainAlreadyActive(chain));
    }

    state.board.assign_chain(&tiles, chain);
    state.chains[chain].found(tiles);

    let founder_share = state.market.withdraw(chain, 1);
    if founder_share {
        state.players[player].stocks[chain] += 1;
    }

    let size = state.chain_size(chain);
    info!(player = %player, chain = %chain, size, "chain founded");
    state.log(GameEvent::ChainFounded {
        player,
        chain,
        size,
        founder_share,
    });
    state.phase = GamePhase::BuyingStocks;
    Ok(())
}

pub(crate) fn buy_stocks(
    state: &mut GameState,
    player: PlayerId,
    purchases: &[StockPurchase],
) -> Result<(), ActionError> {
    let total: u32 = purchases.iter().map(|p| u32::from(p.count)).sum();
    if total > u32::from(MAX_PURCHASE_PER_TURN) {
        return Err(ActionError::ExceedsMaxPurchase(total));
    }

    let mut basket: ChainMap<u8> = ChainMap::with_value(0);
    for purchase in purchases {
        if !state.chain(purchase.chain).active {
            return Err(ActionError::ChainNotActive(purchase.chain));
        }
        basket[purchase.chain] += purchase.count;
    }

    let mut cost = 0;
    for (chain, &count) in basket.iter() {
        let available = state.market.available(chain);
        if count > available {
            return Err(ActionError::InsufficientMarketStock {
                chain,
                requested: count,
                available,
            });
        }
        cost += stock_price(chain, state.chain_size(chain)) * u32::from(count);
    }

    let cash = state.players[player].cash;
    if cost > cash {
        return Err(ActionError::InsufficientCash { cost, cash });
    }

    for (chain, &count) in basket.iter().filter(|&(_, &n)| n > 0) {
        let price = stock_price(chain, state.chain_size(chain));
        state.market.withdraw(chain, count);
        state.players[player].stocks[chain] += count;
        state.log(GameEvent::SharesBought {
            player,
            chain,
            count,
            cost: price * u32::from(count),
        });
    }
    state.players[player].cash -= cost;
    state.turn.bought_stocks = true;
    state.turn.stocks_purchased = total as u8;

    end_turn(state);
    Ok(())
}

pub(crate) fn skip_buy_stocks(state: &mut GameState) {
    state.turn.bought_stocks = true;
    end_turn(state);
}

pub(crate) fn declare_game_end(state: &mut GameState, player: PlayerId) -> Result<(), ActionError> {
    if !can_declare_game_end(state) {
        return Err(ActionError::GameEndConditionsUnmet);
    }
    finish_game(state, GameEndReason::Declared(player));
    Ok(())
}

pub(crate) fn exchange_dead_tile(
    state: &mut GameState,
    player: PlayerId,
    tile: Tile,
) -> Result<(), ActionError> {
    if !state.players[player].holds_tile(tile) {
        return Err(ActionError::TileNotInHand(tile));
    }
    if state.turn.exchanged_dead_tile {
        return Err(ActionError::DeadTileAlreadyExchanged);
    }
    if !classify_placement(state, tile).is_dead() {
        return Err(ActionError::NotADeadTile(tile));
    }
    if state.tile_pool.is_empty() {
        return Err(ActionError::TilePoolEmpty);
    }

    state.players[player].remove_tile(tile);
    state.draw_tile(player);
    // Back into the pool at the far end from the draw point.
    state.tile_pool.push_front(tile);
    state.turn.exchanged_dead_tile = true;
    state.log(GameEvent::DeadTileExchanged { player, tile });
    Ok(())
}

pub(crate) fn pass_turn(state: &mut GameState, player: PlayerId) -> Result<(), ActionError> {
    if has_playable_tile(state, player) {
        return Err(ActionError::HasPlayableTile);
    }
    state.turn.played_tile = true;
    state.log(GameEvent::TurnPassed { player });
    state.phase = GamePhase::BuyingStocks;
    Ok(())
}

/// Check whether any tile in a player's hand can be placed.
#[must_use]
pub fn has_playable_tile(state: &GameState, player: PlayerId) -> bool {
    state.players[player]
        .hand
        .iter()
        .any(|&tile| is_playable(state, tile))
}

/// Draw for the current player, check for an automatic end, and hand the
/// turn to the next seat.
fn end_turn(state: &mut GameState) {
    let current = state.current_player;
    if state.players[current].hand.len() < HAND_SIZE && state.draw_tile(current).is_some() {
        state.log(GameEvent::TileDrawn { player: current });
    }

    if state.tile_pool.is_empty() && state.players.iter().all(|(_, p)| p.hand.is_empty()) {
        finish_game(state, GameEndReason::TilesExhausted);
        return;
    }
    // Dead tiles never come back to life, so nobody can place again.
    if !state.player_ids().any(|id| has_playable_tile(state, id))
        && !state.tile_pool.iter().any(|&tile| is_playable(state, tile))
    {
        finish_game(state, GameEndReason::Stalemate);
        return;
    }

    state.current_player = current.next(state.player_count());
    state.phase = GamePhase::PlayingTile;
    state.turn = TurnState::default();
    state.turn_number += 1;
}
