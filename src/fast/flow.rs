//! Running state of a fast flow

use log::debug;
use serde::{Deserialize, Serialize};

use super::plans::{self, FastFlowPlan, FAST_FLOW_DAYS};
use crate::currency::Currency;
use crate::error::{FlowError, Result};
use crate::rates::{self, PseudoAssetRate, RateSnapshot};

/// A fast flow being paid out day by day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastFlow {
    pub plan: FastFlowPlan,
    pub day_counter: u32,
    pub days_total: u32,
    /// Still in the flow
    pub current_balance: f64,
    /// Paid out so far
    pub savings: f64,
    pub completed: bool,
    /// Pseudo-asset units matching the plan profit
    pub pseudo_asset_units: f64,
    /// Profit those units stand for, in plan currency
    pub pseudo_asset_value: f64,
}

impl FastFlow {
    /// Start the plan for `currency` with exactly this nominal
    pub fn start(currency: Currency, nominal: f64, snapshot: &RateSnapshot) -> Result<Self> {
        let plan = plans::plan(currency, nominal)
            .ok_or(FlowError::NoFastFlowPlan { currency, nominal })?;

        let profit_base = rates::to_base(snapshot, plan.profit, currency)?;
        let units = rates::pseudo_asset_units(snapshot, profit_base, PseudoAssetRate::Growing);

        Ok(Self {
            plan,
            day_counter: 0,
            days_total: FAST_FLOW_DAYS,
            current_balance: plan.total,
            savings: 0.0,
            completed: false,
            pseudo_asset_units: units,
            pseudo_asset_value: plan.profit,
        })
    }

    pub fn currency(&self) -> Currency {
        self.plan.currency
    }

    pub fn days_remaining(&self) -> u32 {
        self.days_total.saturating_sub(self.day_counter)
    }

    /// Pay out one day. Returns false (and changes nothing) once completed.
    pub fn tick(&mut self) -> bool {
        if self.completed {
            return false;
        }

        self.day_counter += 1;
        self.current_balance -= self.plan.daily_payment;
        self.savings += self.plan.daily_payment;

        if self.day_counter >= self.days_total {
            self.completed = true;
            debug!("fast flow {} {} completed", self.plan.amount, self.plan.currency);
        }
        true
    }
}
