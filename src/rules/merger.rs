//! Merger resolution.
//!
//! A merger spans several actions and lives in
//! `GamePhase::ResolvingMerger` until it is done:
//!
//! 1. **Survivor.** The largest merging chain survives. If two or more tie
//!    for largest, the mergemaker picks one with `ChooseMergerSurvivor`.
//! 2. **Defunct chains**, largest first. For each:
//!    - bonuses are paid at once;
//!    - every holder, starting with the mergemaker and going round the table,
//!      submits `HandleDefunctStock`; a chain nobody holds is skipped.
//! 3. **Finalize.** The survivor takes every defunct tile plus the pending
//!    tiles, defunct chains reset, and the mergemaker goes on to buy stocks.
//!
//! The shareholder order for each defunct chain starts again from the
//! mergemaker rather than from wherever the previous chain's round ended.

use smallvec::SmallVec;
use tracing::info;

use super::scoring::pay_bonuses;
use crate::board::Tile;
use crate::core::config::TRADE_RATIO;
use crate::core::{ActionError, GameEvent, GamePhase, GameState, MergerState, PlayerId};
use crate::market::{stock_price, ChainName};

/// Holders of `chain`, in turn order starting at `start`.
#[must_use]
pub fn shareholder_order(
    state: &GameState,
    chain: ChainName,
    start: PlayerId,
) -> SmallVec<[PlayerId; 6]> {
    state
        .players
        .rotation_from(start)
        .filter(|&id| state.players[id].shares(chain) > 0)
        .collect()
}

/// Begin a merger triggered by `tile`. The tile is already on the board,
/// unincorporated.
pub(crate) fn start_merger(
    state: &mut GameState,
    mergemaker: PlayerId,
    tile: Tile,
    chains: &[ChainName],
    pending_tiles: Vec<Tile>,
) {
    let mut merging: SmallVec<[ChainName; 4]> = SmallVec::from_slice(chains);
    merging.sort_by(|a, b| {
        state
            .chain_size(*b)
            .cmp(&state.chain_size(*a))
            .then(a.cmp(b))
    });

    let largest = state.chain_size(merging[0]);
    let candidates: SmallVec<[ChainName; 4]> = merging
        .iter()
        .copied()
        .filter(|&c| state.chain_size(c) == largest)
        .collect();

    state.log(GameEvent::MergerStarted {
        player: mergemaker,
        tile,
        chains: merging.to_vec(),
    });

    let merger = MergerState {
        mergemaker,
        triggering_tile: tile,
        merging,
        candidates,
        survivor: None,
        defunct: SmallVec::new(),
        defunct_index: 0,
        shareholders: SmallVec::new(),
        shareholder_index: 0,
        pending_tiles,
    };

    if merger.candidates.len() > 1 {
        state.phase = GamePhase::ResolvingMerger(merger);
    } else {
        let survivor = merger.merging[0];
        set_survivor(state, merger, survivor);
    }
}

/// Break a size tie by naming the survivor.
pub(crate) fn choose_survivor(
    state: &mut GameState,
    mut merger: MergerState,
    chain: ChainName,
) -> Result<(), ActionError> {
    if !merger.candidates.contains(&chain) {
        return Err(ActionError::SurvivorNotTied(chain));
    }
    merger.candidates.clear();
    set_survivor(state, merger, chain);
    Ok(())
}

fn set_survivor(state: &mut GameState, mut merger: MergerState, survivor: ChainName) {
    merger.survivor = Some(survivor);
    merger.defunct = merger
        .merging
        .iter()
        .copied()
        .filter(|&c| c != survivor)
        .collect();
    merger.defunct_index = 0;
    state.log(GameEvent::SurvivorChosen { chain: survivor });
    advance(state, merger, survivor);
}

/// Pay bonuses for the current defunct chain and find its shareholders,
/// skipping chains nobody holds. Finalizes once no defunct chain is left.
fn advance(state: &mut GameState, mut merger: MergerState, survivor: ChainName) {
    while let Some(defunct) = merger.current_defunct() {
        pay_bonuses(state, defunct);

        let order = shareholder_order(state, defunct, merger.mergemaker);
        if !order.is_empty() {
            merger.shareholders = order;
            merger.shareholder_index = 0;
            state.phase = GamePhase::ResolvingMerger(merger);
            return;
        }

        state.log(GameEvent::NoShareholders { chain: defunct });
        merger.defunct_index += 1;
    }

    finalize(state, merger, survivor);
}

/// Apply one shareholder's hold/sell/trade decision for the current defunct
/// chain. `player` must already be checked as the expected shareholder.
pub(crate) fn handle_defunct_stock(
    state: &mut GameState,
    mut merger: MergerState,
    player: PlayerId,
    hold: u8,
    sell: u8,
    trade: u8,
) -> Result<(), ActionError> {
    let (Some(survivor), Some(defunct)) = (merger.survivor, merger.current_defunct()) else {
        return Err(ActionError::WrongPhase {
            action: "handle-defunct-stock",
            phase: state.phase.name(),
        });
    };

    let held = state.players[player].shares(defunct);
    let traded_in = u32::from(trade) * u32::from(TRADE_RATIO);
    if u32::from(hold) + u32::from(sell) + traded_in != u32::from(held) {
        return Err(ActionError::InvalidStockAllocationSum {
            hold,
            sell,
            trade,
            held,
        });
    }

    let available = state.market.available(survivor);
    if trade > available {
        return Err(ActionError::InsufficientMarketStockForTrade {
            chain: survivor,
            requested: trade,
            available,
        });
    }

    // traded_in <= held, so it fits in a u8.
    let traded_in = traded_in as u8;
    let proceeds = stock_price(defunct, state.chain_size(defunct)) * u32::from(sell);

    let seat = &mut state.players[player];
    seat.cash += proceeds;
    seat.stocks[defunct] = hold;
    seat.stocks[survivor] += trade;

    state.market.deposit(defunct, sell + traded_in);
    state.market.withdraw(survivor, trade);

    if sell > 0 {
        state.log(GameEvent::SharesSold {
            player,
            chain: defunct,
            count: sell,
            proceeds,
        });
    }
    if trade > 0 {
        state.log(GameEvent::SharesTraded {
            player,
            defunct,
            survivor,
            received: trade,
        });
    }
    if hold > 0 {
        state.log(GameEvent::SharesHeld {
            player,
            chain: defunct,
            count: hold,
        });
    }

    merger.shareholder_index += 1;
    if merger.shareholder_index < merger.shareholders.len() {
        state.phase = GamePhase::ResolvingMerger(merger);
    } else {
        merger.defunct_index += 1;
        advance(state, merger, survivor);
    }
    Ok(())
}

/// Fold every defunct chain and the pending tiles into the survivor.
fn finalize(state: &mut GameState, merger: MergerState, survivor: ChainName) {
    let mut absorbed: Vec<Tile> = merger.pending_tiles;
    for &defunct in &merger.defunct {
        absorbed.extend(state.chains[defunct].tiles.iter().copied());
        state.chains[defunct].dissolve();
    }

    state.board.assign_chain(&absorbed, survivor);
    state.chains[survivor].absorb(absorbed);

    let size = state.chain_size(survivor);
    info!(
        survivor = %survivor,
        size,
        defunct = merger.defunct.len(),
        "merger complete"
    );
    state.log(GameEvent::MergerCompleted { survivor, size });
    state.phase = GamePhase::BuyingStocks;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AcquireConfig, GameRng};
    use crate::rules::new_game;

    fn t(id: &str) -> Tile {
        id.parse().unwrap()
    }

    fn state(players: usize) -> GameState {
        new_game(&AcquireConfig::new(players), &mut GameRng::new(9)).unwrap()
    }

    fn put_chain(state: &mut GameState, chain: ChainName, ids: &[&str]) {
        let tiles: Vec<Tile> = ids.iter().map(|id| t(id)).collect();
        for &tile in &tiles {
            state.board.place(tile, Some(chain));
        }
        state.chains[chain].found(tiles);
    }

    fn give(state: &mut GameState, seat: u8, chain: ChainName, count: u8) {
        assert!(state.market.withdraw(chain, count));
        state.players[PlayerId::new(seat)].stocks[chain] += count;
    }

    fn merger(state: &GameState) -> MergerState {
        state.merger().cloned().unwrap()
    }

    #[test]
    fn test_shareholder_order_rotates_from_mergemaker() {
        let mut s = state(4);
        give(&mut s, 0, ChainName::Tower, 1);
        give(&mut s, 1, ChainName::Tower, 2);
        give(&mut s, 3, ChainName::Tower, 1);

        let order = shareholder_order(&s, ChainName::Tower, PlayerId::new(2));
        assert_eq!(
            order.as_slice(),
            &[PlayerId::new(3), PlayerId::new(0), PlayerId::new(1)]
        );
    }

    #[test]
    fn test_unequal_merger_picks_largest() {
        let mut s = state(2);
        put_chain(&mut s, ChainName::Tower, &["1A", "2A", "3A"]);
        put_chain(&mut s, ChainName::Luxor, &["5A", "6A"]);
        give(&mut s, 1, ChainName::Luxor, 2);
        s.board.place(t("4A"), None);

        start_merger(&mut s, PlayerId::new(0), t("4A"), &[ChainName::Luxor, ChainName::Tower], vec![t("4A")]);

        let m = merger(&s);
        assert_eq!(m.survivor, Some(ChainName::Tower));
        assert_eq!(m.defunct.as_slice(), &[ChainName::Luxor]);
        assert_eq!(m.current_shareholder(), Some(PlayerId::new(1)));
        // Sole Luxor holder at size 2: 2000 + 1000.
        assert_eq!(s.player(PlayerId::new(1)).cash, 9000);
    }

    #[test]
    fn test_tie_waits_for_survivor() {
        let mut s = state(2);
        put_chain(&mut s, ChainName::Tower, &["1A", "2A"]);
        put_chain(&mut s, ChainName::Luxor, &["4A", "5A"]);
        s.board.place(t("3A"), None);

        start_merger(&mut s, PlayerId::new(0), t("3A"), &[ChainName::Tower, ChainName::Luxor], vec![t("3A")]);

        let m = merger(&s);
        assert!(m.awaiting_survivor());
        assert_eq!(m.candidates.len(), 2);

        let err = choose_survivor(&mut s.clone(), m.clone(), ChainName::American).unwrap_err();
        assert_eq!(err.code(), "survivor-not-tied");

        // Nobody holds Tower, so choosing Luxor finalizes immediately.
        choose_survivor(&mut s, m, ChainName::Luxor).unwrap();
        assert_eq!(s.phase, GamePhase::BuyingStocks);
        assert_eq!(s.chain_size(ChainName::Luxor), 5);
        assert!(!s.chain(ChainName::Tower).active);
        assert_eq!(s.board.chain_at(t("1A")), Some(ChainName::Luxor));
    }

    #[test]
    fn test_defunct_decision_moves_shares() {
        let mut s = state(3);
        put_chain(&mut s, ChainName::Imperial, &["1A", "2A", "3A", "4A"]);
        put_chain(&mut s, ChainName::Tower, &["6A", "7A"]);
        give(&mut s, 0, ChainName::Tower, 5);
        give(&mut s, 2, ChainName::Tower, 2);
        s.board.place(t("5A"), None);

        start_merger(&mut s, PlayerId::new(0), t("5A"), &[ChainName::Imperial, ChainName::Tower], vec![t("5A")]);
        let cash_before = s.player(PlayerId::new(0)).cash;

        let m = merger(&s);
        let err = handle_defunct_stock(&mut s.clone(), m.clone(), PlayerId::new(0), 1, 1, 1).unwrap_err();
        assert_eq!(err.code(), "invalid-stock-allocation-sum");

        handle_defunct_stock(&mut s, m, PlayerId::new(0), 1, 2, 1).unwrap();
        let p0 = s.player(PlayerId::new(0));
        assert_eq!(p0.shares(ChainName::Tower), 1);
        assert_eq!(p0.shares(ChainName::Imperial), 1);
        assert_eq!(p0.cash, cash_before + 2 * 200);
        assert_eq!(s.market.available(ChainName::Imperial), 24);
        // 25 - 7 issued + 2 sold + 2 traded in.
        assert_eq!(s.market.available(ChainName::Tower), 22);

        let m = merger(&s);
        assert_eq!(m.current_shareholder(), Some(PlayerId::new(2)));
        handle_defunct_stock(&mut s, m, PlayerId::new(2), 2, 0, 0).unwrap();

        assert_eq!(s.phase, GamePhase::BuyingStocks);
        assert_eq!(s.chain_size(ChainName::Imperial), 7);
        assert_eq!(s.chain(ChainName::Tower), &crate::market::Chain::default());
    }

    #[test]
    fn test_trade_capped_by_survivor_stock() {
        let mut s = state(2);
        put_chain(&mut s, ChainName::Festival, &["1A", "2A", "3A"]);
        put_chain(&mut s, ChainName::Luxor, &["5A", "6A"]);
        give(&mut s, 1, ChainName::Festival, 24);
        give(&mut s, 0, ChainName::Luxor, 4);
        s.board.place(t("4A"), None);

        start_merger(&mut s, PlayerId::new(0), t("4A"), &[ChainName::Festival, ChainName::Luxor], vec![t("4A")]);
        let m = merger(&s);

        let err = handle_defunct_stock(&mut s.clone(), m.clone(), PlayerId::new(0), 0, 0, 2).unwrap_err();
        assert_eq!(err.code(), "insufficient-market-stock-for-trade");

        handle_defunct_stock(&mut s, m, PlayerId::new(0), 0, 2, 1).unwrap();
        assert_eq!(s.market.available(ChainName::Festival), 0);
    }

    #[test]
    fn test_three_way_merger_processes_largest_defunct_first() {
        let mut s = state(2);
        put_chain(&mut s, ChainName::Continental, &["5A", "5B", "5C", "4B"]);
        put_chain(&mut s, ChainName::Tower, &["7B", "8B", "9B"]);
        put_chain(&mut s, ChainName::Luxor, &["6C", "6D"]);
        give(&mut s, 1, ChainName::Tower, 1);
        give(&mut s, 1, ChainName::Luxor, 1);
        s.board.place(t("6B"), None);

        start_merger(
            &mut s,
            PlayerId::new(0),
            t("6B"),
            &[ChainName::Luxor, ChainName::Tower, ChainName::Continental],
            vec![t("6B")],
        );

        let m = merger(&s);
        assert_eq!(m.defunct.as_slice(), &[ChainName::Tower, ChainName::Luxor]);
        assert_eq!(m.current_defunct(), Some(ChainName::Tower));

        handle_defunct_stock(&mut s, m, PlayerId::new(1), 1, 0, 0).unwrap();
        let m = merger(&s);
        assert_eq!(m.current_defunct(), Some(ChainName::Luxor));
        assert_eq!(m.current_shareholder(), Some(PlayerId::new(1)));

        handle_defunct_stock(&mut s, m, PlayerId::new(1), 0, 1, 0).unwrap();
        assert_eq!(s.phase, GamePhase::BuyingStocks);
        assert_eq!(s.chain_size(ChainName::Continental), 10);
    }
}
