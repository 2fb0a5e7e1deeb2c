//! Annuity multipliers keyed by (period in years, nominal amount)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityEntry {
    pub period_years: u32,
    pub amount: f64,
    pub multiplier: f64,
}

/// Exact-match multiplier table with nearest-nominal snapping
#[derive(Debug, Clone, PartialEq)]
pub struct AnnuityTable {
    entries: Vec<AnnuityEntry>,
    /// Distinct nominal amounts, ascending
    nominals: Vec<f64>,
}

pub const DEFAULT_PERIODS: [u32; 7] = [3, 5, 7, 10, 15, 20, 25];
pub const DEFAULT_NOMINALS: [f64; 7] = [1_000.0, 2_500.0, 5_000.0, 10_000.0, 25_000.0, 50_000.0, 100_000.0];

/// Multipliers per period, aligned with `DEFAULT_NOMINALS`
const DEFAULT_MULTIPLIERS: [(u32, [f64; 7]); 7] = [
    (3, [5.0, 5.25, 5.5, 5.75, 6.0, 6.5, 7.0]),
    (5, [8.0, 8.25, 8.5, 8.75, 9.0, 9.5, 10.0]),
    (7, [13.0, 13.5, 14.0, 14.5, 15.0, 15.0, 15.0]),
    (10, [16.0, 17.0, 18.0, 19.0, 20.0, 20.0, 20.0]),
    (15, [24.0, 25.5, 27.0, 28.5, 30.0, 30.0, 30.0]),
    (20, [32.0, 34.0, 36.0, 38.0, 40.0, 40.0, 40.0]),
    (25, [40.0, 42.5, 45.0, 47.5, 50.0, 50.0, 50.0]),
];

impl AnnuityTable {
    pub fn from_entries(entries: Vec<AnnuityEntry>) -> Self {
        let mut nominals: Vec<f64> = entries.iter().map(|e| e.amount).collect();
        nominals.sort_by(|a, b| a.total_cmp(b));
        nominals.dedup();
        Self { entries, nominals }
    }

    pub fn defaults() -> Self {
        let entries = DEFAULT_MULTIPLIERS
            .iter()
            .flat_map(|(period, row)| {
                DEFAULT_NOMINALS
                    .iter()
                    .zip(row.iter())
                    .map(move |(&amount, &multiplier)| AnnuityEntry {
                        period_years: *period,
                        amount,
                        multiplier,
                    })
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn nominals(&self) -> &[f64] {
        &self.nominals
    }

    /// Distinct periods, ascending
    pub fn periods(&self) -> Vec<u32> {
        let mut periods: Vec<u32> = self.entries.iter().map(|e| e.period_years).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }

    /// Closest configured nominal to `amount`. Equidistant amounts go to the lower nominal.
    pub fn snap_amount(&self, amount: f64) -> Option<f64> {
        let mut best: Option<f64> = None;
        for &nominal in &self.nominals {
            match best {
                Some(b) if (nominal - amount).abs() >= (b - amount).abs() => {}
                _ => best = Some(nominal),
            }
        }
        best
    }

    /// Multiplier for the period and the nominal nearest to `amount`
    pub fn multiplier(&self, period_years: u32, amount: f64) -> Option<f64> {
        let nominal = self.snap_amount(amount)?;
        self.entries
            .iter()
            .find(|e| e.period_years == period_years && e.amount == nominal)
            .map(|e| e.multiplier)
    }
}

impl Default for AnnuityTable {
    fn default() -> Self {
        Self::defaults()
    }
}
