//! Multiplier tables: contribution bonus ladders and annuity multipliers

mod bonus;
mod annuity;
pub mod loader;

pub use bonus::{BonusTier, BonusTierTable};
pub use annuity::{AnnuityEntry, AnnuityTable, DEFAULT_NOMINALS, DEFAULT_PERIODS};

use std::path::Path;

use crate::error::Result;

/// Container for all multiplier tables
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub bonus: BonusTierTable,
    pub annuity: AnnuityTable,
}

impl Tables {
    /// Compiled-in tables
    pub fn defaults() -> Self {
        Self {
            bonus: BonusTierTable::defaults(),
            annuity: AnnuityTable::defaults(),
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            bonus: loader::load_bonus_tiers(path)?,
            annuity: loader::load_annuity_table(path)?,
        })
    }
}
