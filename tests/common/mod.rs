//! Board and hand rigging shared by the integration tests.
//!
//! Every helper keeps the 108 tiles accounted for: a tile moved onto the
//! board or into a chosen hand is taken out of wherever it was, and hands
//! are topped back up from the pool.

#![allow(dead_code)]

use acquire_engine::board::Tile;
use acquire_engine::core::config::HAND_SIZE;
use acquire_engine::core::{AcquireConfig, Action, GameRng, GameState, PlayerId};
use acquire_engine::market::ChainName;
use acquire_engine::rules::{apply, new_game, valid_actions};

pub fn t(id: &str) -> Tile {
    id.parse().unwrap()
}

pub fn p(seat: u8) -> PlayerId {
    PlayerId::new(seat)
}

pub fn fresh(players: usize, seed: u64) -> GameState {
    new_game(&AcquireConfig::new(players), &mut GameRng::new(seed)).unwrap()
}

/// Pull `ids` out of the pool and every hand, then refill short hands.
pub fn reserve(state: &mut GameState, ids: &[&str]) -> Vec<Tile> {
    let tiles: Vec<Tile> = ids.iter().map(|id| t(id)).collect();
    state.tile_pool.retain(|tile| !tiles.contains(tile));
    for seat in 0..state.player_count() {
        let id = p(seat as u8);
        state.players[id].hand.retain(|tile| !tiles.contains(tile));
        while state.players[id].hand.len() < HAND_SIZE {
            let Some(tile) = state.tile_pool.pop_back() else {
                break;
            };
            state.players[id].hand.push(tile);
        }
    }
    tiles
}

/// Place `ids` on the board as an active chain.
pub fn put_chain(state: &mut GameState, chain: ChainName, ids: &[&str]) {
    let tiles = reserve(state, ids);
    for &tile in &tiles {
        state.board.place(tile, Some(chain));
    }
    state.chains[chain].found(tiles);
}

/// Place `ids` on the board with no chain.
pub fn put_loose(state: &mut GameState, ids: &[&str]) {
    for tile in reserve(state, ids) {
        state.board.place(tile, None);
    }
}

/// Make `ids` part of a seat's hand, returning displaced tiles to the pool.
pub fn deal(state: &mut GameState, seat: u8, ids: &[&str]) {
    let tiles = reserve(state, ids);
    let hand = &mut state.players[p(seat)].hand;
    while hand.len() + tiles.len() > HAND_SIZE {
        if let Some(tile) = hand.pop() {
            state.tile_pool.push_front(tile);
        }
    }
    hand.extend(tiles);
}

/// Move shares from the bank to a seat.
pub fn give(state: &mut GameState, seat: u8, chain: ChainName, count: u8) {
    assert!(state.market.withdraw(chain, count));
    state.players[p(seat)].stocks[chain] += count;
}

/// Every tile on the board, in hands and in the pool.
pub fn tile_count(state: &GameState) -> usize {
    state.board.placed_count()
        + state.tile_pool.len()
        + state.players.iter().map(|(_, pl)| pl.hand.len()).sum::<usize>()
}

/// Row `row` (a letter) for columns `from..=to`.
pub fn row(row: char, from: u8, to: u8) -> Vec<String> {
    (from..=to).map(|col| format!("{col}{row}")).collect()
}

pub fn strs(ids: &[String]) -> Vec<&str> {
    ids.iter().map(String::as_str).collect()
}

/// Pick a uniformly random legal action for whoever must act.
pub fn random_action(state: &GameState, rng: &mut GameRng) -> Option<(PlayerId, Action)> {
    let player = state.acting_player()?;
    let actions = valid_actions(state, player);
    let action = rng.choose(&actions)?.clone();
    Some((player, action))
}

/// Advance by one random legal action. `None` once the game is over.
pub fn random_step(state: &GameState, rng: &mut GameRng) -> Option<GameState> {
    let (player, action) = random_action(state, rng)?;
    match apply(state, player, &action) {
        Ok(next) => Some(next),
        Err(err) => panic!("listed action {action:?} for {player} rejected: {err}"),
    }
}
