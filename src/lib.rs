//! Flow Simulator - deposit ledger and payout calculators for flow products
//!
//! This library provides:
//! - The growing-flow ledger: multi-deposit accrual with per-deposit rates,
//!   pocket withdrawals and rate rebalancing
//! - Fast-flow fixed 30-day payout plans
//! - Accumulative-flow annuity projections
//! - Bonus tier resolution, currency conversion and a TTL rate cache
//! - A scenario runner for replaying scripted accounts in parallel

pub mod error;
pub mod currency;
pub mod rounding;
pub mod rates;
pub mod tiers;
pub mod growing;
pub mod fast;
pub mod accumulative;
pub mod scenario;

// Re-export commonly used types
pub use error::{FlowError, Result};
pub use currency::{Currency, CurrencyLimits};
pub use rates::{RateCache, RateSnapshot};
pub use tiers::{AnnuityTable, BonusTierTable, Tables};
pub use growing::{Account, GrowingFlowEngine, LedgerConfig};
pub use fast::FastFlow;
pub use accumulative::{project_annuity, AnnuityProjection};
pub use scenario::ScenarioRunner;
