//! Fast flow: fixed 30-day payout plans

mod plans;
mod flow;

pub use plans::{plan, plans, FastFlowPlan, FAST_FLOW_DAYS};
pub use flow::FastFlow;
