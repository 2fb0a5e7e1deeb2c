//! Supported currencies and their valid contribution ranges

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};

/// Currency an account or plan is denominated in.
///
/// RUB is the base currency of every rate snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    RUB,
    EUR,
    PLN,
    GBP,
    CNY,
    KGS,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::RUB,
        Currency::EUR,
        Currency::PLN,
        Currency::GBP,
        Currency::CNY,
        Currency::KGS,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::EUR => "EUR",
            Currency::PLN => "PLN",
            Currency::GBP => "GBP",
            Currency::CNY => "CNY",
            Currency::KGS => "KGS",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RUB => "₽",
            Currency::EUR => "€",
            Currency::PLN => "zł",
            Currency::GBP => "£",
            Currency::CNY => "¥",
            Currency::KGS => "с",
        }
    }

    /// Range of amounts accepted for a single contribution
    pub fn limits(&self) -> CurrencyLimits {
        match self {
            Currency::RUB => CurrencyLimits::new(1_000.0, 5_000_000.0),
            Currency::EUR => CurrencyLimits::new(10.0, 50_000.0),
            Currency::PLN => CurrencyLimits::new(50.0, 250_000.0),
            Currency::GBP => CurrencyLimits::new(10.0, 50_000.0),
            Currency::CNY => CurrencyLimits::new(100.0, 500_000.0),
            Currency::KGS => CurrencyLimits::new(1_000.0, 5_000_000.0),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| FlowError::UnknownCurrency(s.to_string()))
    }
}

/// Inclusive bounds on a single contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyLimits {
    pub min: f64,
    pub max: f64,
}

impl CurrencyLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// Reject amounts outside the range (or non-finite input)
    pub fn validate(&self, amount: f64) -> Result<f64> {
        if amount.is_finite() && self.contains(amount) {
            Ok(amount)
        } else {
            Err(FlowError::InvalidAmount(amount))
        }
    }
}
