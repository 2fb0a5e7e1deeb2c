//! Growing flow: multi-deposit accrual ledger

mod deposit;
mod account;
mod engine;
mod reports;

pub use deposit::Deposit;
pub use account::{Account, AGGREGATE_TOLERANCE};
pub use engine::{
    GrowingFlowEngine, LedgerConfig, NewDepositPolicy, BASE_RATE, BOOTSTRAP_RATE, RATE_INCREMENT,
};
pub use reports::{LedgerSnapshot, TickReport, TopUpReceipt, WithdrawalKind, WithdrawalReport};
