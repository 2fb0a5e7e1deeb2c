//! A single contribution inside a growing-flow account

use serde::{Deserialize, Serialize};

/// One deposit and its independently evolving accrual rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Amount originally contributed, in account currency
    pub principal: f64,

    /// Bonus multiplier resolved when the deposit was created
    pub multiplier: f64,

    /// Current in-flow value: principal * multiplier, less accrual already released
    pub bonus_balance: f64,

    /// Daily accrual rate in percent
    pub rate: f64,

    /// Cached `bonus_balance * rate / 100`
    pub daily_accrual: f64,

    /// Number of ticks this deposit has been through
    pub ticks: u32,

    /// Pseudo-asset units backing the bonus part of this deposit
    pub pseudo_asset_units: f64,
}

impl Deposit {
    pub fn new(principal: f64, multiplier: f64, rate: f64) -> Self {
        let bonus_balance = principal * multiplier;
        Self {
            principal,
            multiplier,
            bonus_balance,
            rate,
            daily_accrual: bonus_balance * rate / 100.0,
            ticks: 0,
            pseudo_asset_units: 0.0,
        }
    }

    pub fn with_pseudo_asset_units(mut self, units: f64) -> Self {
        self.pseudo_asset_units = units;
        self
    }

    /// Bonus-only part of the original contribution
    pub fn bonus_amount(&self) -> f64 {
        self.principal * (self.multiplier - 1.0)
    }

    /// Recompute the cached accrual from balance and rate
    pub fn refresh_accrual(&mut self) {
        self.daily_accrual = self.bonus_balance * self.rate / 100.0;
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.refresh_accrual();
    }

    /// Take the current accrual out of the balance and return it
    pub fn release_accrual(&mut self) -> f64 {
        let accrued = self.daily_accrual;
        self.bonus_balance -= accrued;
        accrued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_deposit() {
        let d = Deposit::new(10_000.0, 2.0, 0.30);
        assert_relative_eq!(d.bonus_balance, 20_000.0, epsilon = 1e-9);
        assert_relative_eq!(d.daily_accrual, 60.0, epsilon = 1e-9);
        assert_relative_eq!(d.bonus_amount(), 10_000.0, epsilon = 1e-9);
        assert_eq!(d.ticks, 0);
    }

    #[test]
    fn test_release_then_rerate() {
        let mut d = Deposit::new(10_000.0, 2.0, 0.30);
        let accrued = d.release_accrual();
        assert_relative_eq!(accrued, 60.0, epsilon = 1e-9);
        assert_relative_eq!(d.bonus_balance, 19_940.0, epsilon = 1e-9);

        d.set_rate(0.31);
        assert_relative_eq!(d.daily_accrual, 19_940.0 * 0.0031, epsilon = 1e-9);
    }
}
