//! CSV-based table loader
//!
//! Loads bonus ladders and annuity multipliers from data/tables/

use std::path::Path;

use log::info;
use serde::Deserialize;

use super::{AnnuityEntry, AnnuityTable, BonusTier, BonusTierTable};
use crate::currency::Currency;
use crate::error::Result;

/// Default path to the tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

pub const BONUS_TIERS_FILE: &str = "bonus_tiers.csv";
pub const ANNUITY_MULTIPLIERS_FILE: &str = "annuity_multipliers.csv";

#[derive(Debug, Deserialize)]
struct BonusTierRow {
    currency: String,
    min_amount: f64,
    bonus_percent: f64,
}

/// Load bonus ladders from `bonus_tiers.csv` (`currency,min_amount,bonus_percent`)
pub fn load_bonus_tiers(path: &Path) -> Result<BonusTierTable> {
    let mut reader = csv::Reader::from_path(path.join(BONUS_TIERS_FILE))?;
    let mut table = BonusTierTable::new();

    for result in reader.deserialize() {
        let row: BonusTierRow = result?;
        let currency: Currency = row.currency.parse()?;
        table.insert(currency, BonusTier::new(row.min_amount, row.bonus_percent));
    }

    info!("loaded bonus tiers from {}", path.display());
    Ok(table)
}

/// Load annuity multipliers from `annuity_multipliers.csv` (`period_years,amount,multiplier`)
pub fn load_annuity_table(path: &Path) -> Result<AnnuityTable> {
    let mut reader = csv::Reader::from_path(path.join(ANNUITY_MULTIPLIERS_FILE))?;
    let mut entries = Vec::new();

    for result in reader.deserialize() {
        let entry: AnnuityEntry = result?;
        entries.push(entry);
    }

    info!("loaded {} annuity multipliers from {}", entries.len(), path.display());
    Ok(AnnuityTable::from_entries(entries))
}
