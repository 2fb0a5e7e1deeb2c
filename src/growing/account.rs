//! Aggregate state of one growing-flow account

use serde::{Deserialize, Serialize};

use super::deposit::Deposit;
use super::reports::LedgerSnapshot;
use crate::currency::Currency;
use crate::rounding::{round_display, round_units};

/// Tolerance used when checking aggregate invariants
pub const AGGREGATE_TOLERANCE: f64 = 1e-6;

/// Ledger for one user session.
///
/// Totals are derived: they are recomputed from the deposit list after every
/// mutation and never updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub(crate) currency: Currency,
    pub(crate) deposits: Vec<Deposit>,

    pub(crate) total_principal: f64,
    pub(crate) total_balance: f64,
    pub(crate) total_daily_accrual: f64,
    pub(crate) weighted_bonus_multiplier: f64,

    /// Accrual released from the flow and available for withdrawal
    pub(crate) pocket: f64,
    pub(crate) withdrawn_total: f64,

    /// Ticks applied so far
    pub(crate) day_counter: u32,

    pub(crate) pseudo_asset_units: f64,
    pub(crate) pseudo_asset_cost: f64,
}

impl Account {
    /// Empty account; deposits are added through the engine
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            deposits: Vec::new(),
            total_principal: 0.0,
            total_balance: 0.0,
            total_daily_accrual: 0.0,
            weighted_bonus_multiplier: 1.0,
            pocket: 0.0,
            withdrawn_total: 0.0,
            day_counter: 0,
            pseudo_asset_units: 0.0,
            pseudo_asset_cost: 0.0,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    pub fn total_principal(&self) -> f64 {
        self.total_principal
    }

    pub fn total_balance(&self) -> f64 {
        self.total_balance
    }

    pub fn total_daily_accrual(&self) -> f64 {
        self.total_daily_accrual
    }

    /// total balance / total principal
    pub fn weighted_bonus_multiplier(&self) -> f64 {
        self.weighted_bonus_multiplier
    }

    pub fn pocket(&self) -> f64 {
        self.pocket
    }

    pub fn withdrawn_total(&self) -> f64 {
        self.withdrawn_total
    }

    pub fn day_counter(&self) -> u32 {
        self.day_counter
    }

    pub fn pseudo_asset_units(&self) -> f64 {
        self.pseudo_asset_units
    }

    pub fn pseudo_asset_cost(&self) -> f64 {
        self.pseudo_asset_cost
    }

    /// True until the first tick has been applied
    pub fn is_fresh(&self) -> bool {
        self.day_counter == 0
    }

    /// Account-level daily rate in percent, from aggregate accrual over aggregate balance
    pub fn effective_rate(&self) -> f64 {
        if self.total_balance > 0.0 {
            self.total_daily_accrual / self.total_balance * 100.0
        } else {
            0.0
        }
    }

    /// Rebuild every aggregate from the deposit list
    pub(crate) fn recompute_totals(&mut self) {
        self.total_principal = self.deposits.iter().map(|d| d.principal).sum();
        self.total_balance = self.deposits.iter().map(|d| d.bonus_balance).sum();
        self.total_daily_accrual = self.deposits.iter().map(|d| d.daily_accrual).sum();
        self.weighted_bonus_multiplier = if self.total_principal > 0.0 {
            self.total_balance / self.total_principal
        } else {
            1.0
        };
    }

    /// Check that stored totals match the deposit list
    pub fn totals_consistent(&self) -> bool {
        let principal: f64 = self.deposits.iter().map(|d| d.principal).sum();
        let balance: f64 = self.deposits.iter().map(|d| d.bonus_balance).sum();
        let accrual: f64 = self.deposits.iter().map(|d| d.daily_accrual).sum();

        close(principal, self.total_principal)
            && close(balance, self.total_balance)
            && close(accrual, self.total_daily_accrual)
    }

    /// Rounded figures for display
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            day: self.day_counter,
            currency: self.currency,
            deposit_count: self.deposits.len(),
            contributed: round_display(self.total_principal),
            balance: round_display(self.total_balance),
            daily_accrual: round_display(self.total_daily_accrual),
            rate: round_display(self.effective_rate()),
            bonus_percent: round_display((self.weighted_bonus_multiplier - 1.0) * 100.0),
            pocket: round_display(self.pocket),
            withdrawn: round_display(self.withdrawn_total),
            pseudo_asset_units: round_units(self.pseudo_asset_units),
            pseudo_asset_cost: round_display(self.pseudo_asset_cost),
        }
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= AGGREGATE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_account() {
        let account = Account::new(Currency::EUR);
        assert!(account.is_fresh());
        assert!(account.totals_consistent());
        assert_eq!(account.effective_rate(), 0.0);
        assert_eq!(account.weighted_bonus_multiplier(), 1.0);
    }

    #[test]
    fn test_weighted_multiplier_is_balance_over_principal() {
        let mut account = Account::new(Currency::RUB);
        account.deposits.push(Deposit::new(1_000.0, 1.5, 0.30));
        account.deposits.push(Deposit::new(10_000.0, 2.0, 0.30));
        account.recompute_totals();

        // 21_500 / 11_000, not the mean of 1.5 and 2.0
        assert!((account.weighted_bonus_multiplier() - 21_500.0 / 11_000.0).abs() < 1e-12);
        assert!(account.totals_consistent());
    }

    #[test]
    fn test_detects_stale_totals() {
        let mut account = Account::new(Currency::RUB);
        account.deposits.push(Deposit::new(1_000.0, 1.5, 0.30));
        assert!(!account.totals_consistent());
        account.recompute_totals();
        assert!(account.totals_consistent());
    }
}
