//! Shareholder bonuses and final scoring.
//!
//! ## Bonus split
//!
//! - One holder takes majority and minority together.
//! - A tie for first splits majority + minority among the tied holders and
//!   pays no separate minority.
//! - Otherwise first takes the majority; a tie for second splits the minority.
//!
//! Every split share is rounded up to the next $100, so a split can pay out
//! slightly more than the nominal bonus.

use tracing::info;

use crate::core::config::GAME_END_CHAIN_SIZE;
use crate::core::{FinalStandings, GameEndReason, GameEvent, GamePhase, GameState, PlayerId, PlayerMap};
use crate::market::{majority_bonus, minority_bonus, stock_price, ChainName};

/// A bonus owed to one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bonus {
    pub player: PlayerId,
    pub amount: u32,
}

fn split_rounded_up(total: u32, ways: usize) -> u32 {
    let unit = 100 * ways as u32;
    total.div_ceil(unit) * 100
}

/// Bonuses owed to the holders of `chain` at its current size.
///
/// Holders of equal rank appear in seat order.
#[must_use]
pub fn calculate_bonuses(state: &GameState, chain: ChainName) -> Vec<Bonus> {
    let size = state.chain_size(chain);
    let majority = majority_bonus(chain, size);
    let minority = minority_bonus(chain, size);

    let mut holders: Vec<(PlayerId, u8)> = state
        .players
        .iter()
        .map(|(id, p)| (id, p.shares(chain)))
        .filter(|&(_, n)| n > 0)
        .collect();
    holders.sort_by(|a, b| b.1.cmp(&a.1));

    let Some(&(first, top)) = holders.first() else {
        return Vec::new();
    };
    if holders.len() == 1 {
        return vec![Bonus {
            player: first,
            amount: majority + minority,
        }];
    }

    let tied_first: Vec<PlayerId> = holders
        .iter()
        .take_while(|&&(_, n)| n == top)
        .map(|&(id, _)| id)
        .collect();
    if tied_first.len() > 1 {
        let each = split_rounded_up(majority + minority, tied_first.len());
        return tied_first
            .into_iter()
            .map(|player| Bonus { player, amount: each })
            .collect();
    }

    let mut bonuses = vec![Bonus {
        player: first,
        amount: majority,
    }];

    let second = holders[1].1;
    let tied_second: Vec<PlayerId> = holders[1..]
        .iter()
        .take_while(|&&(_, n)| n == second)
        .map(|&(id, _)| id)
        .collect();
    let each = if tied_second.len() > 1 {
        split_rounded_up(minority, tied_second.len())
    } else {
        minority
    };
    bonuses.extend(tied_second.into_iter().map(|player| Bonus { player, amount: each }));
    bonuses
}

/// Pay the bonuses for `chain` into players' cash and log them.
pub(crate) fn pay_bonuses(state: &mut GameState, chain: ChainName) {
    for Bonus { player, amount } in calculate_bonuses(state, chain) {
        state.players[player].cash += amount;
        state.log(GameEvent::BonusPaid {
            player,
            chain,
            amount,
        });
    }
}

/// Check whether the end of the game may be declared.
///
/// True when some active chain has reached `GAME_END_CHAIN_SIZE`, or when
/// there is at least one active chain and every active chain is safe.
#[must_use]
pub fn can_declare_game_end(state: &GameState) -> bool {
    let mut any_active = false;
    let mut all_safe = true;
    for name in state.active_chains() {
        let chain = state.chain(name);
        if chain.size() >= GAME_END_CHAIN_SIZE {
            return true;
        }
        any_active = true;
        all_safe &= chain.safe;
    }
    any_active && all_safe
}

/// Score the game and move it to `GamePhase::Ended`.
///
/// Every active chain pays its bonuses as if it were defunct, then every
/// holding in it is sold back to the bank at the current price. The score is
/// the resulting cash.
pub(crate) fn finish_game(state: &mut GameState, reason: GameEndReason) {
    let active: Vec<ChainName> = state.active_chains().collect();
    for chain in active {
        pay_bonuses(state, chain);

        let price = stock_price(chain, state.chain_size(chain));
        for (_, player) in state.players.iter_mut() {
            let held = player.stocks[chain];
            if held > 0 {
                player.cash += price * u32::from(held);
                player.stocks[chain] = 0;
                state.market.deposit(chain, held);
            }
        }
    }

    let scores = PlayerMap::new(state.player_count(), |id| state.players[id].cash);
    let mut winner = PlayerId::new(0);
    for (id, &score) in scores.iter() {
        if score > scores[winner] {
            winner = id;
        }
    }

    info!(
        winner = %winner,
        score = scores[winner],
        reason = ?reason,
        turn = state.turn_number,
        "game over"
    );
    state.log(GameEvent::GameEnded { reason, winner });
    state.phase = GamePhase::Ended(FinalStandings {
        scores,
        winner,
        reason,
    });
}
