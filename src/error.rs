//! Error type shared by the ledger, calculators and table loaders

use thiserror::Error;

use crate::currency::Currency;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Currency code not present in the rate snapshot or not supported at all
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// No annuity multiplier for the (period, snapped amount) pair
    #[error("no bonus tier for a {period_years}-year period and amount {amount}")]
    NoBonusTierMatch { period_years: u32, amount: f64 },

    #[error("no fast flow plan for {currency} with nominal {nominal}")]
    NoFastFlowPlan { currency: Currency, nominal: f64 },

    #[error("account is denominated in {account}, top-up requested in {requested}")]
    CurrencyMismatch { account: Currency, requested: Currency },

    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
