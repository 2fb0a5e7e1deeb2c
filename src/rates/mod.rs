//! Exchange-rate snapshot, conversion helpers and the explicit rate cache
//!
//! The ledger never fetches rates itself. A [`RateSnapshot`] is handed to every
//! operation that needs conversion; a [`RateCache`] decides when a
//! [`RateSource`] should be asked for a fresh one.

mod cache;
mod conversion;
pub mod loader;

pub use cache::{RateCache, RateSource, CsvRateSource, StaticRateSource, DEFAULT_CACHE_TTL_SECS};
pub use conversion::{to_base, from_base, pseudo_asset_units, pseudo_asset_cost};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{FlowError, Result};

/// Which pseudo-asset buy rate applies to a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PseudoAssetRate {
    /// Growing and fast flows
    Growing,
    /// Accumulative (annuity) flow
    Annuity,
}

/// Immutable set of rates valid for one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Units of base currency (RUB) per one unit of the keyed currency
    base_rates: BTreeMap<Currency, f64>,

    /// Base-currency price of one pseudo-asset unit for growing/fast flows
    pub pseudo_asset_buy_growing: f64,

    /// Base-currency price of one pseudo-asset unit for the annuity flow
    pub pseudo_asset_buy_annuity: f64,

    /// Base-currency price the user pays when buying pseudo-asset units
    pub pseudo_asset_sell: f64,
}

impl RateSnapshot {
    /// Build a snapshot from explicit currency rates. RUB is always pinned to 1.0.
    pub fn new(
        rates: impl IntoIterator<Item = (Currency, f64)>,
        pseudo_asset_buy_growing: f64,
        pseudo_asset_buy_annuity: f64,
        pseudo_asset_sell: f64,
    ) -> Self {
        let mut base_rates: BTreeMap<Currency, f64> = rates.into_iter().collect();
        base_rates.insert(Currency::RUB, 1.0);
        Self {
            base_rates,
            pseudo_asset_buy_growing,
            pseudo_asset_buy_annuity,
            pseudo_asset_sell,
        }
    }

    /// Static fallback rates used when no source has ever succeeded
    pub fn defaults() -> Self {
        Self::new(
            [
                (Currency::EUR, 99.20),
                (Currency::PLN, 23.20),
                (Currency::GBP, 116.50),
                (Currency::CNY, 12.80),
                (Currency::KGS, 1.06),
            ],
            6500.0,
            6500.0,
            1625.0,
        )
    }

    /// Base-currency value of one unit of `currency`
    pub fn rate(&self, currency: Currency) -> Result<f64> {
        self.base_rates
            .get(&currency)
            .copied()
            .ok_or_else(|| FlowError::UnknownCurrency(currency.code().to_string()))
    }

    /// Replace (or add) a single currency rate
    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        if currency != Currency::RUB {
            self.base_rates.insert(currency, rate);
        }
        self
    }

    /// Drop a currency from the snapshot
    pub fn without(mut self, currency: Currency) -> Self {
        self.base_rates.remove(&currency);
        self
    }

    pub fn pseudo_asset_buy_rate(&self, selector: PseudoAssetRate) -> f64 {
        match selector {
            PseudoAssetRate::Growing => self.pseudo_asset_buy_growing,
            PseudoAssetRate::Annuity => self.pseudo_asset_buy_annuity,
        }
    }

    pub fn currencies(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.base_rates.iter().map(|(c, r)| (*c, *r))
    }
}

impl Default for RateSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rub_is_pinned() {
        let snapshot = RateSnapshot::new([(Currency::RUB, 2.0)], 1.0, 1.0, 1.0);
        assert_eq!(snapshot.rate(Currency::RUB).unwrap(), 1.0);

        let snapshot = snapshot.with_rate(Currency::RUB, 3.0);
        assert_eq!(snapshot.rate(Currency::RUB).unwrap(), 1.0);
    }

    #[test]
    fn test_missing_currency() {
        let snapshot = RateSnapshot::defaults().without(Currency::KGS);
        assert!(matches!(
            snapshot.rate(Currency::KGS),
            Err(FlowError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_pseudo_asset_selector() {
        let snapshot = RateSnapshot::new([], 6500.0, 7000.0, 1625.0);
        assert_eq!(snapshot.pseudo_asset_buy_rate(PseudoAssetRate::Growing), 6500.0);
        assert_eq!(snapshot.pseudo_asset_buy_rate(PseudoAssetRate::Annuity), 7000.0);
    }
}
