//! End-to-end ledger runs through the public API

use approx::assert_relative_eq;

use flow_simulator::growing::{WithdrawalKind, BASE_RATE};
use flow_simulator::rounding::round_display;
use flow_simulator::{Currency, GrowingFlowEngine, RateSnapshot};

#[test]
fn month_of_accrual_keeps_totals_consistent() {
    let engine = GrowingFlowEngine::default();
    let snapshot = RateSnapshot::defaults();
    let (mut account, receipt) = engine.open_account(Currency::RUB, 50_000.0, &snapshot).unwrap();
    assert_eq!(receipt.bonus_percent, 125.0);

    let mut pocket_sum = 0.0;
    for day in 1..=30 {
        let report = engine.tick(&mut account);
        pocket_sum += report.accrued;
        assert_eq!(report.day, day);
        assert!(account.totals_consistent());
    }

    assert_relative_eq!(account.pocket(), pocket_sum, epsilon = 1e-6);
    // balance only moves into the pocket
    assert_relative_eq!(
        account.total_balance() + account.pocket(),
        receipt.bonus_balance,
        epsilon = 1e-6
    );
    assert_relative_eq!(account.deposits()[0].rate, 0.31 + 0.01 * 29.0, epsilon = 1e-9);
}

#[test]
fn withdraw_then_keep_growing() {
    let engine = GrowingFlowEngine::default();
    let snapshot = RateSnapshot::defaults();
    let (mut account, _) = engine.open_account(Currency::RUB, 10_000.0, &snapshot).unwrap();

    for _ in 0..3 {
        engine.tick(&mut account);
    }
    let report = engine.withdraw_all(&mut account);
    assert_eq!(report.kind, WithdrawalKind::Full);
    assert_relative_eq!(account.effective_rate(), BASE_RATE, epsilon = 1e-12);

    engine.tick(&mut account);
    // not a fresh account any more, so the increment applies
    assert_relative_eq!(account.deposits()[0].rate, BASE_RATE + 0.01, epsilon = 1e-12);
}

#[test]
fn partial_withdrawal_lands_between_base_and_current() {
    let engine = GrowingFlowEngine::default();
    let snapshot = RateSnapshot::defaults();
    let (mut account, _) = engine.open_account(Currency::EUR, 1_000.0, &snapshot).unwrap();
    for _ in 0..10 {
        engine.tick(&mut account);
    }
    engine.top_up(&mut account, 200.0, Currency::EUR, &snapshot).unwrap();
    engine.tick(&mut account);

    let pocket = account.pocket();
    let report = engine.withdraw(&mut account, pocket / 2.0);

    assert_eq!(report.kind, WithdrawalKind::Partial);
    assert!(report.rate_after < report.rate_before);
    assert!(report.rate_after > BASE_RATE);
    assert_relative_eq!(
        report.rate_after,
        report.rate_before - (report.rate_before - BASE_RATE) * 0.5,
        epsilon = 1e-9
    );
    assert!(account.totals_consistent());
}

#[test]
fn snapshot_is_rounded_for_display() {
    let engine = GrowingFlowEngine::default();
    let snapshot = RateSnapshot::defaults();
    let (mut account, _) = engine.open_account(Currency::RUB, 3_333.0, &snapshot).unwrap();
    engine.tick(&mut account);
    engine.tick(&mut account);

    let view = account.snapshot();
    assert_eq!(view.day, 2);
    assert_eq!(view.deposit_count, 1);
    assert_eq!(view.balance, round_display(account.total_balance()));
    assert_eq!(view.pocket, round_display(account.pocket()));
}
