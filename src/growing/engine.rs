//! Ledger operations: top-up, accrual tick and pocket withdrawal

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::deposit::Deposit;
use super::reports::{TickReport, TopUpReceipt, WithdrawalKind, WithdrawalReport};
use crate::currency::Currency;
use crate::error::{FlowError, Result};
use crate::rates::{self, PseudoAssetRate, RateSnapshot};
use crate::tiers::BonusTierTable;

/// Base daily rate, in percent, for every new deposit
pub const BASE_RATE: f64 = 0.30;

/// Daily rate growth, in percentage points
pub const RATE_INCREMENT: f64 = 0.01;

/// Rate set on every deposit by the first tick of a fresh account
pub const BOOTSTRAP_RATE: f64 = 0.31;

/// How a deposit added to an already running account is treated on its first tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewDepositPolicy {
    /// Bumped on the very next tick like every other deposit
    BumpImmediately,
    /// Keeps the base rate through its first tick
    HoldFirstTick,
}

/// Rate parameters of the growing flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub base_rate: f64,
    pub rate_increment: f64,
    pub bootstrap_rate: f64,
    pub new_deposit_policy: NewDepositPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_rate: BASE_RATE,
            rate_increment: RATE_INCREMENT,
            bootstrap_rate: BOOTSTRAP_RATE,
            new_deposit_policy: NewDepositPolicy::BumpImmediately,
        }
    }
}

impl LedgerConfig {
    /// Read a config from a JSON file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Applies ledger operations to accounts it does not own
#[derive(Debug, Clone)]
pub struct GrowingFlowEngine {
    config: LedgerConfig,
    tiers: BonusTierTable,
}

impl GrowingFlowEngine {
    pub fn new(config: LedgerConfig, tiers: BonusTierTable) -> Self {
        Self { config, tiers }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn tiers(&self) -> &BonusTierTable {
        &self.tiers
    }

    /// Create an account from its first contribution
    pub fn open_account(
        &self,
        currency: Currency,
        amount: f64,
        snapshot: &RateSnapshot,
    ) -> Result<(Account, TopUpReceipt)> {
        let mut account = Account::new(currency);
        let receipt = self.top_up(&mut account, amount, currency, snapshot)?;
        Ok((account, receipt))
    }

    /// Add a deposit. On error the account is left untouched.
    pub fn top_up(
        &self,
        account: &mut Account,
        amount: f64,
        currency: Currency,
        snapshot: &RateSnapshot,
    ) -> Result<TopUpReceipt> {
        if currency != account.currency {
            return Err(FlowError::CurrencyMismatch {
                account: account.currency,
                requested: currency,
            });
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(FlowError::InvalidAmount(amount));
        }

        let multiplier = self.tiers.multiplier(currency, amount);
        let deposit = Deposit::new(amount, multiplier, self.config.base_rate);

        let bonus_base_amount = rates::to_base(snapshot, deposit.bonus_amount(), currency)?;
        let units = rates::pseudo_asset_units(snapshot, bonus_base_amount, PseudoAssetRate::Growing);
        let cost = rates::pseudo_asset_cost(snapshot, units, currency)?;

        let receipt = TopUpReceipt {
            amount,
            multiplier,
            bonus_percent: (multiplier - 1.0) * 100.0,
            bonus_balance: deposit.bonus_balance,
            daily_accrual: deposit.daily_accrual,
            bonus_base_amount,
            pseudo_asset_units: units,
            pseudo_asset_cost: cost,
        };

        debug!(
            "deposit #{}: {} {} x{} -> balance {}, accrual {}",
            account.deposits.len() + 1,
            amount,
            currency,
            multiplier,
            deposit.bonus_balance,
            deposit.daily_accrual
        );

        account.deposits.push(deposit.with_pseudo_asset_units(units));
        account.pseudo_asset_units += units;
        account.pseudo_asset_cost += cost;
        account.recompute_totals();

        Ok(receipt)
    }

    /// Advance the account by one day.
    ///
    /// Each deposit releases its accrual into the pocket, then its rate grows. The
    /// first tick of a fresh account sets the bootstrap rate instead of adding the
    /// increment.
    pub fn tick(&self, account: &mut Account) -> TickReport {
        let first_tick = account.is_fresh();
        let mut accrued = 0.0;

        for deposit in account.deposits.iter_mut() {
            accrued += deposit.release_accrual();

            if first_tick {
                deposit.rate = self.config.bootstrap_rate;
            } else if deposit.ticks == 0
                && self.config.new_deposit_policy == NewDepositPolicy::HoldFirstTick
            {
                // stays at its creation rate for one tick
            } else {
                deposit.rate += self.config.rate_increment;
            }

            deposit.refresh_accrual();
            deposit.ticks += 1;
        }

        account.pocket += accrued;
        account.day_counter += 1;
        account.recompute_totals();

        debug!(
            "day {}: accrued {}, pocket {}, next accrual {}",
            account.day_counter, accrued, account.pocket, account.total_daily_accrual
        );

        TickReport {
            day: account.day_counter,
            accrued,
            pocket: account.pocket,
            balance: account.total_balance,
            daily_accrual: account.total_daily_accrual,
            rate: account.effective_rate(),
        }
    }

    /// Withdraw from the pocket and rebalance rates.
    ///
    /// Requests above the pocket are clamped. Emptying the pocket resets every
    /// deposit to the base rate. A partial withdrawal pulls the account rate toward
    /// base in proportion to the share of the pocket taken, then spreads the new
    /// total accrual over deposits by their share of the balance.
    pub fn withdraw(&self, account: &mut Account, amount: f64) -> WithdrawalReport {
        let rate_before = account.effective_rate();
        let pocket_before = account.pocket;

        if !(amount > 0.0) || pocket_before <= 0.0 {
            return WithdrawalReport {
                requested: amount,
                applied: 0.0,
                kind: WithdrawalKind::None,
                rate_before,
                rate_after: rate_before,
                pocket: account.pocket,
                withdrawn_total: account.withdrawn_total,
            };
        }

        let applied = amount.min(pocket_before);
        let base_rate = self.config.base_rate;

        let kind = if applied >= pocket_before {
            for deposit in account.deposits.iter_mut() {
                deposit.set_rate(base_rate);
            }
            account.pocket = 0.0;
            WithdrawalKind::Full
        } else {
            let ratio = applied / pocket_before;
            let new_rate = rate_before - (rate_before - base_rate) * ratio;
            let total_balance = account.total_balance;

            if total_balance > 0.0 {
                let new_total_accrual = total_balance * new_rate / 100.0;
                for deposit in account.deposits.iter_mut() {
                    let share = deposit.bonus_balance / total_balance;
                    deposit.daily_accrual = new_total_accrual * share;
                    deposit.rate = if deposit.bonus_balance > 0.0 {
                        deposit.daily_accrual / deposit.bonus_balance * 100.0
                    } else {
                        base_rate
                    };
                }
            } else {
                for deposit in account.deposits.iter_mut() {
                    deposit.set_rate(base_rate);
                }
            }

            account.pocket -= applied;
            WithdrawalKind::Partial
        };

        account.withdrawn_total += applied;
        account.recompute_totals();

        let rate_after = account.effective_rate();
        debug!(
            "withdrew {} of {} requested ({:?}), rate {} -> {}",
            applied, amount, kind, rate_before, rate_after
        );

        WithdrawalReport {
            requested: amount,
            applied,
            kind,
            rate_before,
            rate_after,
            pocket: account.pocket,
            withdrawn_total: account.withdrawn_total,
        }
    }

    /// Withdraw everything in the pocket
    pub fn withdraw_all(&self, account: &mut Account) -> WithdrawalReport {
        let pocket = account.pocket;
        self.withdraw(account, pocket)
    }
}

impl Default for GrowingFlowEngine {
    fn default() -> Self {
        Self::new(LedgerConfig::default(), BonusTierTable::defaults())
    }
}
