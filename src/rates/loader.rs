//! CSV loader for rate snapshots
//!
//! `rates.csv` has a `key,value` header. Keys are currency codes or one of the
//! pseudo-asset rate names below. Keys missing from the file keep their default.

use std::path::Path;

use log::info;
use serde::Deserialize;

use super::RateSnapshot;
use crate::currency::Currency;
use crate::error::{FlowError, Result};

pub const PSEUDO_ASSET_BUY_GROWING: &str = "pseudo_asset_buy_growing";
pub const PSEUDO_ASSET_BUY_ANNUITY: &str = "pseudo_asset_buy_annuity";
pub const PSEUDO_ASSET_SELL: &str = "pseudo_asset_sell";

#[derive(Debug, Deserialize)]
struct RateRow {
    key: String,
    value: f64,
}

/// Load a snapshot from a `rates.csv` file
pub fn load_rate_snapshot(path: &Path) -> Result<RateSnapshot> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut snapshot = RateSnapshot::defaults();
    let mut count = 0;

    for result in reader.deserialize() {
        let row: RateRow = result?;
        if !row.value.is_finite() || row.value <= 0.0 {
            return Err(FlowError::Parse(format!("rate for {} must be positive, got {}", row.key, row.value)));
        }

        match row.key.as_str() {
            PSEUDO_ASSET_BUY_GROWING => snapshot.pseudo_asset_buy_growing = row.value,
            PSEUDO_ASSET_BUY_ANNUITY => snapshot.pseudo_asset_buy_annuity = row.value,
            PSEUDO_ASSET_SELL => snapshot.pseudo_asset_sell = row.value,
            code => {
                let currency: Currency = code.parse()?;
                snapshot = snapshot.with_rate(currency, row.value);
            }
        }
        count += 1;
    }

    info!("loaded {} rate entries from {}", count, path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("flow_simulator_rates_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rates.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_rates_overrides_defaults() {
        let path = write_temp("ok", "key,value\nEUR,101.5\npseudo_asset_sell,1700\n");
        let snapshot = load_rate_snapshot(&path).unwrap();

        assert_eq!(snapshot.rate(Currency::EUR).unwrap(), 101.5);
        assert_eq!(snapshot.pseudo_asset_sell, 1700.0);
        // untouched keys keep their defaults
        assert_eq!(snapshot.pseudo_asset_buy_growing, 6500.0);
        assert_eq!(snapshot.rate(Currency::PLN).unwrap(), 23.2);
    }

    #[test]
    fn test_load_rates_rejects_unknown_code() {
        let path = write_temp("bad", "key,value\nXYZ,1.0\n");
        assert!(matches!(load_rate_snapshot(&path), Err(FlowError::UnknownCurrency(_))));
    }
}
