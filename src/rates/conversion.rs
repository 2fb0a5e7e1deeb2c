//! Currency and pseudo-asset conversion
//!
//! All results are full precision. Use [`crate::rounding`] at the display boundary.

use super::{PseudoAssetRate, RateSnapshot};
use crate::currency::Currency;
use crate::error::Result;

/// Convert an amount quoted in `currency` into base currency
pub fn to_base(snapshot: &RateSnapshot, amount: f64, currency: Currency) -> Result<f64> {
    Ok(amount * snapshot.rate(currency)?)
}

/// Convert a base-currency amount into `currency`
pub fn from_base(snapshot: &RateSnapshot, base_amount: f64, currency: Currency) -> Result<f64> {
    Ok(base_amount / snapshot.rate(currency)?)
}

/// Pseudo-asset units matching a base-currency amount at the selected buy rate
pub fn pseudo_asset_units(snapshot: &RateSnapshot, base_amount: f64, selector: PseudoAssetRate) -> f64 {
    let rate = snapshot.pseudo_asset_buy_rate(selector);
    if rate <= 0.0 {
        return 0.0;
    }
    base_amount / rate
}

/// What `units` pseudo-asset units cost at the sell rate, expressed in `currency`
pub fn pseudo_asset_cost(snapshot: &RateSnapshot, units: f64, currency: Currency) -> Result<f64> {
    from_base(snapshot, units * snapshot.pseudo_asset_sell, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_through_base() {
        let snapshot = RateSnapshot::defaults();
        let base = to_base(&snapshot, 100.0, Currency::EUR).unwrap();
        assert_relative_eq!(base, 9920.0);
        assert_relative_eq!(from_base(&snapshot, base, Currency::EUR).unwrap(), 100.0);
    }

    #[test]
    fn test_pseudo_asset_units_keep_precision() {
        let snapshot = RateSnapshot::new([], 6500.0, 6500.0, 1625.0);
        let units = pseudo_asset_units(&snapshot, 50_000.0, PseudoAssetRate::Growing);
        assert_relative_eq!(units, 50_000.0 / 6500.0);
        assert!(units != crate::rounding::round_units(units));
    }

    #[test]
    fn test_pseudo_asset_cost() {
        let snapshot = RateSnapshot::new([], 6500.0, 6500.0, 1625.0);
        let cost = pseudo_asset_cost(&snapshot, 4.0, Currency::RUB).unwrap();
        assert_relative_eq!(cost, 6500.0);
    }
}
