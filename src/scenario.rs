//! Scenario runner for scripted growing-flow accounts
//!
//! A script opens an account and replays a list of operations against it. The
//! runner holds the engine and rate snapshot once, so many scripts can be replayed
//! against the same setup; independent scripts run in parallel.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::Result;
use crate::growing::{Account, GrowingFlowEngine, LedgerSnapshot};
use crate::rates::RateSnapshot;

fn one_day() -> u32 {
    1
}

/// One step of a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    TopUp {
        amount: f64,
    },
    Tick {
        #[serde(default = "one_day")]
        days: u32,
    },
    Withdraw {
        amount: f64,
    },
    WithdrawAll,
}

impl Operation {
    fn label(&self) -> &'static str {
        match self {
            Operation::TopUp { .. } => "top_up",
            Operation::Tick { .. } => "tick",
            Operation::Withdraw { .. } => "withdraw",
            Operation::WithdrawAll => "withdraw_all",
        }
    }
}

/// Opening contribution plus the operations to replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub currency: Currency,
    pub opening_amount: f64,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Script {
    /// Load a JSON array of scripts
    pub fn load_all(path: &Path) -> Result<Vec<Script>> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Account state after one operation (ticks emit one row per day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub step: usize,
    pub operation: String,
    /// Amount passed to the operation (accrued amount for ticks, applied amount for withdrawals)
    pub amount: f64,
    pub day: u32,
    pub deposit_count: usize,
    pub contributed: f64,
    pub balance: f64,
    pub daily_accrual: f64,
    pub rate: f64,
    pub bonus_percent: f64,
    pub pocket: f64,
    pub withdrawn: f64,
    pub pseudo_asset_units: f64,
}

impl ScenarioRow {
    fn new(step: usize, operation: &str, amount: f64, snapshot: LedgerSnapshot) -> Self {
        Self {
            step,
            operation: operation.to_string(),
            amount,
            day: snapshot.day,
            deposit_count: snapshot.deposit_count,
            contributed: snapshot.contributed,
            balance: snapshot.balance,
            daily_accrual: snapshot.daily_accrual,
            rate: snapshot.rate,
            bonus_percent: snapshot.bonus_percent,
            pocket: snapshot.pocket,
            withdrawn: snapshot.withdrawn,
            pseudo_asset_units: snapshot.pseudo_asset_units,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub rows: Vec<ScenarioRow>,
    pub account: Account,
}

/// Pre-built engine and rates for replaying scripts
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: GrowingFlowEngine,
    snapshot: RateSnapshot,
}

impl ScenarioRunner {
    pub fn new(engine: GrowingFlowEngine, snapshot: RateSnapshot) -> Self {
        Self { engine, snapshot }
    }

    pub fn engine(&self) -> &GrowingFlowEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> &RateSnapshot {
        &self.snapshot
    }

    /// Replay one script against a fresh account
    pub fn run(&self, script: &Script) -> Result<ScenarioResult> {
        let (mut account, receipt) =
            self.engine
                .open_account(script.currency, script.opening_amount, &self.snapshot)?;

        let mut rows = vec![ScenarioRow::new(0, "open", receipt.amount, account.snapshot())];

        for (i, op) in script.operations.iter().enumerate() {
            let step = i + 1;
            match op {
                Operation::TopUp { amount } => {
                    let receipt = self.engine.top_up(&mut account, *amount, script.currency, &self.snapshot)?;
                    rows.push(ScenarioRow::new(step, op.label(), receipt.amount, account.snapshot()));
                }
                Operation::Tick { days } => {
                    for _ in 0..*days {
                        let report = self.engine.tick(&mut account);
                        rows.push(ScenarioRow::new(step, op.label(), report.accrued, account.snapshot()));
                    }
                }
                Operation::Withdraw { amount } => {
                    let report = self.engine.withdraw(&mut account, *amount);
                    rows.push(ScenarioRow::new(step, op.label(), report.applied, account.snapshot()));
                }
                Operation::WithdrawAll => {
                    let report = self.engine.withdraw_all(&mut account);
                    rows.push(ScenarioRow::new(step, op.label(), report.applied, account.snapshot()));
                }
            }
        }

        Ok(ScenarioResult {
            name: script.name.clone(),
            rows,
            account,
        })
    }

    /// Replay independent scripts in parallel, preserving input order
    pub fn run_batch(&self, scripts: &[Script]) -> Vec<Result<ScenarioResult>> {
        scripts.par_iter().map(|script| self.run(script)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(GrowingFlowEngine::default(), RateSnapshot::defaults())
    }
}
