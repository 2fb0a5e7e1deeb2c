//! Contribution bonus tiers
//!
//! Each currency has a ladder of `(min_amount, bonus_percent)` steps. The highest
//! step whose threshold does not exceed the contribution wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// One rung of a currency's bonus ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusTier {
    pub min_amount: f64,
    pub bonus_percent: f64,
}

impl BonusTier {
    pub fn new(min_amount: f64, bonus_percent: f64) -> Self {
        Self { min_amount, bonus_percent }
    }

    pub fn multiplier(&self) -> f64 {
        1.0 + self.bonus_percent / 100.0
    }
}

/// Bonus ladders for every configured currency
#[derive(Debug, Clone, PartialEq)]
pub struct BonusTierTable {
    /// Tiers per currency, kept sorted by descending `min_amount`
    tiers: BTreeMap<Currency, Vec<BonusTier>>,
}

/// RUB ladder; other currencies scale the thresholds
const RUB_LADDER: [(f64, f64); 7] = [
    (1_000.0, 50.0),
    (5_000.0, 75.0),
    (10_000.0, 100.0),
    (50_000.0, 125.0),
    (100_000.0, 150.0),
    (500_000.0, 175.0),
    (1_000_000.0, 200.0),
];

impl BonusTierTable {
    pub fn new() -> Self {
        Self { tiers: BTreeMap::new() }
    }

    /// Default ladders for all supported currencies
    pub fn defaults() -> Self {
        let mut table = Self::new();
        for currency in Currency::ALL {
            let divisor = match currency {
                Currency::RUB | Currency::KGS => 1.0,
                Currency::EUR | Currency::GBP => 100.0,
                Currency::PLN => 20.0,
                Currency::CNY => 10.0,
            };
            for (min_amount, bonus_percent) in RUB_LADDER {
                table.insert(currency, BonusTier::new(min_amount / divisor, bonus_percent));
            }
        }
        table
    }

    /// Add a tier, keeping the currency's ladder in descending order
    pub fn insert(&mut self, currency: Currency, tier: BonusTier) {
        let ladder = self.tiers.entry(currency).or_default();
        ladder.push(tier);
        ladder.sort_by(|a, b| b.min_amount.total_cmp(&a.min_amount));
    }

    pub fn tiers(&self, currency: Currency) -> &[BonusTier] {
        self.tiers.get(&currency).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Highest tier whose threshold is at or below `amount`
    pub fn tier_for(&self, currency: Currency, amount: f64) -> Option<BonusTier> {
        self.tiers(currency)
            .iter()
            .find(|tier| tier.min_amount <= amount)
            .copied()
    }

    /// Multiplier applied to a contribution; 1.0 when no tier qualifies
    pub fn multiplier(&self, currency: Currency, amount: f64) -> f64 {
        self.tier_for(currency, amount)
            .map(|tier| tier.multiplier())
            .unwrap_or(1.0)
    }

    /// Bonus percent applied to a contribution; 0 when no tier qualifies
    pub fn bonus_percent(&self, currency: Currency, amount: f64) -> f64 {
        self.tier_for(currency, amount)
            .map(|tier| tier.bonus_percent)
            .unwrap_or(0.0)
    }
}

impl Default for BonusTierTable {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_selects_its_own_tier() {
        let table = BonusTierTable::defaults();

        assert_eq!(table.multiplier(Currency::RUB, 10_000.0), 2.0);
        assert_eq!(table.multiplier(Currency::RUB, 9_999.99), 1.75);
        assert_eq!(table.multiplier(Currency::RUB, 100_000.0), 2.5);
        assert_eq!(table.multiplier(Currency::RUB, 5_000_000.0), 3.0);
    }

    #[test]
    fn test_below_lowest_tier_has_no_bonus() {
        let table = BonusTierTable::defaults();
        assert_eq!(table.multiplier(Currency::RUB, 999.0), 1.0);
        assert_eq!(table.bonus_percent(Currency::RUB, 999.0), 0.0);
    }

    #[test]
    fn test_scaled_ladders() {
        let table = BonusTierTable::defaults();
        assert_eq!(table.multiplier(Currency::EUR, 100.0), 2.0);
        assert_eq!(table.multiplier(Currency::PLN, 500.0), 2.0);
        assert_eq!(table.multiplier(Currency::CNY, 1_000.0), 2.0);
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut table = BonusTierTable::new();
        table.insert(Currency::EUR, BonusTier::new(10.0, 50.0));
        table.insert(Currency::EUR, BonusTier::new(1_000.0, 150.0));
        table.insert(Currency::EUR, BonusTier::new(100.0, 100.0));

        let mins: Vec<f64> = table.tiers(Currency::EUR).iter().map(|t| t.min_amount).collect();
        assert_eq!(mins, vec![1_000.0, 100.0, 10.0]);
        assert_eq!(table.multiplier(Currency::EUR, 500.0), 2.0);
        assert_eq!(table.multiplier(Currency::RUB, 500.0), 1.0);
    }
}
