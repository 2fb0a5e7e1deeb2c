//! Output rows for ledger operations

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Result of adding a deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUpReceipt {
    pub amount: f64,
    pub multiplier: f64,
    /// Tier bonus in percent (multiplier - 1) * 100
    pub bonus_percent: f64,
    pub bonus_balance: f64,
    pub daily_accrual: f64,
    /// Bonus-only amount converted to base currency
    pub bonus_base_amount: f64,
    pub pseudo_asset_units: f64,
    /// Cost of those units at the sell rate, in account currency
    pub pseudo_asset_cost: f64,
}

/// Result of one accrual tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub day: u32,
    /// Amount moved from the flow into the pocket
    pub accrued: f64,
    pub pocket: f64,
    pub balance: f64,
    /// Accrual that the next tick will release
    pub daily_accrual: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalKind {
    /// Nothing was withdrawn (empty pocket or non-positive request)
    None,
    Partial,
    Full,
}

/// Result of a pocket withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalReport {
    pub requested: f64,
    /// Amount actually withdrawn after clamping to the pocket
    pub applied: f64,
    pub kind: WithdrawalKind,
    pub rate_before: f64,
    pub rate_after: f64,
    pub pocket: f64,
    pub withdrawn_total: f64,
}

/// Display-ready account figures, already rounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub day: u32,
    pub currency: Currency,
    pub deposit_count: usize,
    pub contributed: f64,
    pub balance: f64,
    pub daily_accrual: f64,
    pub rate: f64,
    pub bonus_percent: f64,
    pub pocket: f64,
    pub withdrawn: f64,
    pub pseudo_asset_units: f64,
    pub pseudo_asset_cost: f64,
}
