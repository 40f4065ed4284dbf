//! Merger protocol tests: survivor choice, shareholder order across several
//! defunct chains, and stock disposition checks.

mod common;

use acquire_engine::core::{Action, ActionError, GameEvent, GamePhase, GameState};
use acquire_engine::market::{majority_bonus, minority_bonus, stock_price, ChainName};
use acquire_engine::rules::{apply, shareholder_order, valid_actions};
use common::*;

fn dispose(hold: u8, sell: u8, trade: u8) -> Action {
    Action::HandleDefunctStock { hold, sell, trade }
}

/// Tower (3) and Luxor (2) joined by 4A; seat 1 places.
fn unequal_merger() -> GameState {
    let mut state = fresh(4, 11);
    put_chain(&mut state, ChainName::Tower, &["1A", "2A", "3A"]);
    put_chain(&mut state, ChainName::Luxor, &["5A", "6A"]);
    give(&mut state, 0, ChainName::Luxor, 4);
    give(&mut state, 2, ChainName::Luxor, 2);
    give(&mut state, 3, ChainName::Luxor, 1);
    state.current_player = p(1);
    deal(&mut state, 1, &["4A"]);
    state
}

#[test]
fn test_larger_chain_survives_without_choice() {
    let state = unequal_merger();
    let state = apply(&state, p(1), &Action::PlaceTile(t("4A"))).unwrap();

    let merger = state.merger().unwrap();
    assert_eq!(merger.survivor, Some(ChainName::Tower));
    assert_eq!(merger.current_defunct(), Some(ChainName::Luxor));
    // From the mergemaker round the table: 1 holds nothing.
    assert_eq!(merger.shareholders.as_slice(), &[p(2), p(3), p(0)]);
    assert_eq!(state.acting_player(), Some(p(2)));
    assert!(valid_actions(&state, p(1)).is_empty());
}

#[test]
fn test_bonuses_paid_before_disposition() {
    let before = unequal_merger();
    let state = apply(&before, p(1), &Action::PlaceTile(t("4A"))).unwrap();

    let majority = majority_bonus(ChainName::Luxor, 2);
    let minority = minority_bonus(ChainName::Luxor, 2);
    assert_eq!(state.player(p(0)).cash, before.player(p(0)).cash + majority);
    assert_eq!(state.player(p(2)).cash, before.player(p(2)).cash + minority);
    assert_eq!(state.player(p(3)).cash, before.player(p(3)).cash);
}

#[test]
fn test_disposition_round() {
    let state = unequal_merger();
    let state = apply(&state, p(1), &Action::PlaceTile(t("4A"))).unwrap();

    // Out of order.
    let err = apply(&state, p(0), &dispose(4, 0, 0)).unwrap_err();
    assert_eq!(err, ActionError::WrongTurn(p(0)));

    // Shares must add up.
    let err = apply(&state, p(2), &dispose(1, 0, 0)).unwrap_err();
    assert_eq!(err.code(), "invalid-stock-allocation-sum");

    let price = stock_price(ChainName::Luxor, 2);
    let cash = state.player(p(2)).cash;
    let state = apply(&state, p(2), &dispose(0, 2, 0)).unwrap();
    assert_eq!(state.player(p(2)).cash, cash + 2 * price);
    assert_eq!(state.player(p(2)).shares(ChainName::Luxor), 0);

    let state = apply(&state, p(3), &dispose(1, 0, 0)).unwrap();
    assert_eq!(state.acting_player(), Some(p(0)));

    let state = apply(&state, p(0), &dispose(0, 0, 2)).unwrap();
    assert_eq!(state.phase, GamePhase::BuyingStocks);
    assert_eq!(state.current_player, p(1));
    assert_eq!(state.player(p(0)).shares(ChainName::Tower), 2);
    assert_eq!(state.player(p(3)).shares(ChainName::Luxor), 1);
    assert_eq!(state.chain_size(ChainName::Tower), 6);
    assert!(!state.chain(ChainName::Luxor).active);
    assert_eq!(state.board.chain_at(t("6A")), Some(ChainName::Tower));
    assert_eq!(state.board.chain_at(t("4A")), Some(ChainName::Tower));

    // 25 Luxor shares: 1 still held, the rest back in the bank.
    assert_eq!(state.market.available(ChainName::Luxor), 24);
    assert_eq!(state.market.available(ChainName::Tower), 23);
}

#[test]
fn test_trade_limited_by_survivor_stock() {
    let mut state = unequal_merger();
    assert!(state.market.withdraw(ChainName::Tower, 24));
    let state = apply(&state, p(1), &Action::PlaceTile(t("4A"))).unwrap();

    // Seat 2 holds two Luxor; one Tower share is left to trade for.
    let err = apply(&state, p(2), &dispose(0, 0, 2)).unwrap_err();
    assert!(matches!(err, ActionError::InvalidStockAllocationSum { .. }));

    let options = valid_actions(&state, p(2));
    assert!(options.contains(&dispose(0, 0, 1)));
    assert!(options
        .iter()
        .all(|a| !matches!(a, Action::HandleDefunctStock { trade, .. } if *trade > 1)));

    let state = apply(&state, p(2), &dispose(0, 0, 1)).unwrap();
    let state = apply(&state, p(3), &dispose(1, 0, 0)).unwrap();
    let err = apply(&state, p(0), &dispose(0, 0, 2)).unwrap_err();
    assert_eq!(
        err,
        ActionError::InsufficientMarketStockForTrade {
            chain: ChainName::Tower,
            requested: 2,
            available: 0,
        }
    );
}

#[test]
fn test_survivor_must_be_tied_for_largest() {
    let mut state = fresh(3, 12);
    put_chain(&mut state, ChainName::Tower, &["1A", "2A"]);
    put_chain(&mut state, ChainName::Luxor, &["4A", "5A"]);
    put_chain(&mut state, ChainName::American, &["3B"]);
    deal(&mut state, 0, &["3A"]);

    let state = apply(&state, p(0), &Action::PlaceTile(t("3A"))).unwrap();
    let merger = state.merger().unwrap();
    assert_eq!(merger.candidates.as_slice(), &[ChainName::Tower, ChainName::Luxor]);

    let err = apply(&state, p(0), &Action::ChooseMergerSurvivor(ChainName::American)).unwrap_err();
    assert_eq!(err, ActionError::SurvivorNotTied(ChainName::American));

    let choices = valid_actions(&state, p(0));
    assert_eq!(
        choices,
        vec![
            Action::ChooseMergerSurvivor(ChainName::Tower),
            Action::ChooseMergerSurvivor(ChainName::Luxor),
        ]
    );

    // Nobody holds stock in either defunct chain, so the merger completes.
    let state = apply(&state, p(0), &Action::ChooseMergerSurvivor(ChainName::Tower)).unwrap();
    assert_eq!(state.phase, GamePhase::BuyingStocks);
    assert_eq!(state.chain_size(ChainName::Tower), 6);
    let skipped = state
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::NoShareholders { .. }))
        .count();
    assert_eq!(skipped, 2);
}

#[test]
fn test_each_defunct_chain_restarts_from_mergemaker() {
    let mut state = fresh(3, 13);
    put_chain(&mut state, ChainName::Continental, &["1C", "2C", "3C", "4C"]);
    put_chain(&mut state, ChainName::Tower, &["6C", "7C", "8C"]);
    put_chain(&mut state, ChainName::Luxor, &["5A", "5B"]);
    give(&mut state, 0, ChainName::Tower, 1);
    give(&mut state, 2, ChainName::Tower, 1);
    give(&mut state, 0, ChainName::Luxor, 1);
    give(&mut state, 2, ChainName::Luxor, 1);
    state.current_player = p(1);
    deal(&mut state, 1, &["5C"]);

    let state = apply(&state, p(1), &Action::PlaceTile(t("5C"))).unwrap();
    let merger = state.merger().unwrap();
    assert_eq!(merger.survivor, Some(ChainName::Continental));
    assert_eq!(merger.defunct.as_slice(), &[ChainName::Tower, ChainName::Luxor]);
    assert_eq!(merger.shareholders.as_slice(), &[p(2), p(0)]);

    let state = apply(&state, p(2), &dispose(1, 0, 0)).unwrap();
    let state = apply(&state, p(0), &dispose(1, 0, 0)).unwrap();

    // Luxor round starts again at seat 2, not where Tower's ended.
    let merger = state.merger().unwrap();
    assert_eq!(merger.current_defunct(), Some(ChainName::Luxor));
    assert_eq!(
        merger.shareholders,
        shareholder_order(&state, ChainName::Luxor, p(1))
    );
    assert_eq!(state.acting_player(), Some(p(2)));

    let state = apply(&state, p(2), &dispose(0, 1, 0)).unwrap();
    let state = apply(&state, p(0), &dispose(0, 1, 0)).unwrap();
    assert_eq!(state.phase, GamePhase::BuyingStocks);
    assert_eq!(state.chain_size(ChainName::Continental), 10);
    assert!(!state.chain(ChainName::Tower).active);
    assert!(!state.chain(ChainName::Luxor).active);
}

#[test]
fn test_rejected_disposition_leaves_merger_intact() {
    let state = unequal_merger();
    let state = apply(&state, p(1), &Action::PlaceTile(t("4A"))).unwrap();
    let snapshot = state.clone();

    assert!(apply(&state, p(2), &dispose(0, 5, 0)).is_err());
    assert_eq!(state, snapshot);
}
