//! Accumulative flow: one-shot annuity projection
//!
//! The contributor pays `amount` every month for the period, then receives
//! `amount * multiplier` every month for the same number of months.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{FlowError, Result};
use crate::rates::{self, PseudoAssetRate, RateSnapshot};
use crate::tiers::AnnuityTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityProjection {
    pub currency: Currency,
    /// Monthly contribution as entered
    pub amount: f64,
    pub period_years: u32,
    pub period_months: u32,
    pub multiplier: f64,
    /// amount * (multiplier - 1), in contribution currency
    pub bonus_amount: f64,
    pub bonus_base_amount: f64,
    /// Pseudo-asset units to add with each monthly contribution
    pub monthly_pseudo_asset_units: f64,
    pub monthly_payment: f64,
    pub total_input: f64,
    pub total_output: f64,
}

/// Project an accumulative flow. Fails when the table has no multiplier for the
/// period and the nominal nearest to `amount`.
pub fn project_annuity(
    table: &AnnuityTable,
    snapshot: &RateSnapshot,
    currency: Currency,
    amount: f64,
    period_years: u32,
) -> Result<AnnuityProjection> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(FlowError::InvalidAmount(amount));
    }

    let multiplier = table
        .multiplier(period_years, amount)
        .filter(|m| *m > 0.0)
        .ok_or(FlowError::NoBonusTierMatch { period_years, amount })?;

    let bonus_amount = amount * (multiplier - 1.0);
    let bonus_base_amount = rates::to_base(snapshot, bonus_amount, currency)?;
    let monthly_pseudo_asset_units =
        rates::pseudo_asset_units(snapshot, bonus_base_amount, PseudoAssetRate::Annuity);

    let period_months = period_years * 12;
    let months = f64::from(period_months);

    debug!(
        "annuity {} {} over {} years: x{}, {} units/month",
        amount, currency, period_years, multiplier, monthly_pseudo_asset_units
    );

    Ok(AnnuityProjection {
        currency,
        amount,
        period_years,
        period_months,
        multiplier,
        bonus_amount,
        bonus_base_amount,
        monthly_pseudo_asset_units,
        monthly_payment: amount * multiplier,
        total_input: amount * months,
        total_output: amount * multiplier * months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_year_thousand() {
        let p = project_annuity(
            &AnnuityTable::defaults(),
            &RateSnapshot::defaults(),
            Currency::RUB,
            1_000.0,
            3,
        )
        .unwrap();

        assert_eq!(p.multiplier, 5.0);
        assert_eq!(p.period_months, 36);
        assert_eq!(p.total_input, 36_000.0);
        assert_eq!(p.total_output, 180_000.0);
        assert_eq!(p.monthly_payment, 5_000.0);
        assert_relative_eq!(p.monthly_pseudo_asset_units, 4_000.0 / 6500.0, epsilon = 1e-12);
    }

    #[test]
    fn test_snapped_amount_keeps_entered_amount() {
        let p = project_annuity(
            &AnnuityTable::defaults(),
            &RateSnapshot::defaults(),
            Currency::RUB,
            1_200.0,
            3,
        )
        .unwrap();

        assert_eq!(p.multiplier, 5.0);
        assert_eq!(p.total_input, 1_200.0 * 36.0);
    }

    #[test]
    fn test_uses_annuity_rate_and_currency() {
        let snapshot = RateSnapshot::new([(Currency::EUR, 100.0)], 6500.0, 8000.0, 1625.0);
        let p = project_annuity(&AnnuityTable::defaults(), &snapshot, Currency::EUR, 1_000.0, 5).unwrap();

        assert_eq!(p.multiplier, 8.0);
        assert_relative_eq!(p.bonus_base_amount, 700_000.0, epsilon = 1e-6);
        assert_relative_eq!(p.monthly_pseudo_asset_units, 700_000.0 / 8000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_period_is_an_error() {
        let err = project_annuity(
            &AnnuityTable::defaults(),
            &RateSnapshot::defaults(),
            Currency::RUB,
            1_000.0,
            4,
        )
        .unwrap_err();
        assert!(matches!(err, FlowError::NoBonusTierMatch { period_years: 4, .. }));
    }
}
