//! Fixed fast-flow plan table
//!
//! Rows are stored exactly as published. `profit`, `total` and `daily_payment`
//! are not derived from `percent`.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Length of every fast-flow plan, in days
pub const FAST_FLOW_DAYS: u32 = 30;

/// One published plan row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastFlowPlan {
    pub currency: Currency,
    pub amount: f64,
    pub percent: f64,
    pub profit: f64,
    pub total: f64,
    pub daily_payment: f64,
}

// (amount, percent, profit, total, daily)
type PlanRow = (f64, f64, f64, f64, f64);

const RUB_PLANS: [PlanRow; 25] = [
    (3000.0, 20.0, 600.0, 3600.0, 120.0),
    (15000.0, 12.0, 1800.0, 16800.0, 560.0),
    (20000.0, 11.6, 2320.0, 22320.0, 744.0),
    (30000.0, 11.0, 3300.0, 33300.0, 1110.0),
    (40000.0, 10.4, 4160.0, 44160.0, 1472.0),
    (60000.0, 10.0, 6000.0, 66000.0, 2200.0),
    (80000.0, 9.5, 7600.0, 87600.0, 2920.0),
    (90000.0, 9.0, 8100.0, 98100.0, 3270.0),
    (120000.0, 8.5, 10200.0, 130200.0, 4340.0),
    (150000.0, 8.0, 12000.0, 162000.0, 5400.0),
    (160000.0, 7.7, 12320.0, 172320.0, 5744.0),
    (200000.0, 7.4, 14800.0, 214800.0, 7160.0),
    (300000.0, 7.0, 21000.0, 321000.0, 10700.0),
    (360000.0, 6.7, 24120.0, 384120.0, 12804.0),
    (400000.0, 6.5, 26000.0, 426000.0, 14200.0),
    (450000.0, 6.3, 28350.0, 478350.0, 15945.0),
    (540000.0, 6.2, 33480.0, 573480.0, 19116.0),
    (600000.0, 6.0, 36000.0, 636000.0, 21200.0),
    (700000.0, 5.6, 39200.0, 739200.0, 24640.0),
    (800000.0, 5.3, 42400.0, 842400.0, 28080.0),
    (900000.0, 5.0, 45000.0, 945000.0, 31500.0),
    (1200000.0, 4.8, 57600.0, 1257600.0, 41920.0),
    (1500000.0, 4.5, 67500.0, 1567500.0, 52250.0),
    (2100000.0, 4.2, 88200.0, 2188200.0, 72940.0),
    (3000000.0, 4.0, 120000.0, 3120000.0, 104000.0),
];

const EUR_PLANS: [PlanRow; 25] = [
    (30.0, 20.0, 6.0, 36.0, 1.2),
    (150.0, 12.0, 18.0, 168.0, 5.6),
    (200.0, 11.6, 23.2, 223.2, 7.44),
    (300.0, 11.0, 33.0, 333.0, 11.1),
    (400.0, 10.4, 41.6, 441.6, 14.72),
    (600.0, 10.0, 60.0, 660.0, 22.0),
    (800.0, 9.5, 76.0, 876.0, 29.2),
    (900.0, 9.0, 81.0, 981.0, 32.7),
    (1200.0, 8.5, 102.0, 1302.0, 43.4),
    (1500.0, 8.0, 120.0, 1620.0, 54.0),
    (1600.0, 7.7, 123.2, 1723.2, 57.44),
    (2000.0, 7.4, 148.0, 2148.0, 71.6),
    (3000.0, 7.0, 210.0, 3210.0, 107.0),
    (3600.0, 6.7, 241.2, 3841.2, 128.04),
    (4000.0, 6.5, 260.0, 4260.0, 142.0),
    (4500.0, 6.3, 283.5, 4783.5, 159.45),
    (5400.0, 6.2, 334.8, 5734.8, 191.16),
    (6000.0, 6.0, 360.0, 6360.0, 212.0),
    (7000.0, 5.6, 392.0, 7392.0, 246.4),
    (8000.0, 5.3, 424.0, 8424.0, 280.8),
    (9000.0, 5.0, 450.0, 9450.0, 315.0),
    (12000.0, 4.8, 576.0, 12576.0, 419.2),
    (15000.0, 4.5, 675.0, 15675.0, 522.5),
    (21000.0, 4.2, 882.0, 21882.0, 729.4),
    (30000.0, 4.0, 1200.0, 31200.0, 1040.0),
];

const PLN_PLANS: [PlanRow; 25] = [
    (150.0, 20.0, 30.0, 180.0, 6.0),
    (300.0, 15.0, 45.0, 345.0, 11.5),
    (450.0, 13.0, 58.5, 508.5, 16.95),
    (600.0, 12.0, 72.0, 672.0, 22.4),
    (900.0, 10.0, 90.0, 990.0, 33.0),
    (1200.0, 9.5, 114.0, 1314.0, 43.8),
    (1500.0, 9.0, 135.0, 1635.0, 54.5),
    (1800.0, 8.7, 156.6, 1956.6, 65.22),
    (2400.0, 8.2, 196.8, 2596.8, 86.56),
    (3000.0, 8.0, 240.0, 3240.0, 108.0),
    (3600.0, 7.8, 280.8, 3880.8, 129.36),
    (4500.0, 7.5, 337.5, 4837.5, 161.25),
    (5700.0, 7.2, 410.4, 6110.4, 203.68),
    (6000.0, 7.0, 420.0, 6420.0, 214.0),
    (6600.0, 6.7, 442.2, 7042.2, 234.74),
    (7500.0, 6.5, 487.5, 7987.5, 266.25),
    (8100.0, 6.3, 510.3, 8610.3, 287.01),
    (9000.0, 6.0, 540.0, 9540.0, 318.0),
    (12000.0, 5.5, 660.0, 12660.0, 422.0),
    (15000.0, 5.0, 750.0, 15750.0, 525.0),
    (18000.0, 4.8, 864.0, 18864.0, 628.8),
    (21000.0, 4.6, 966.0, 21966.0, 732.2),
    (27000.0, 4.4, 1188.0, 28188.0, 939.6),
    (36000.0, 4.2, 1512.0, 37512.0, 1250.4),
    (45000.0, 4.0, 1800.0, 46800.0, 1560.0),
];

fn rows(currency: Currency) -> &'static [PlanRow] {
    match currency {
        Currency::RUB => &RUB_PLANS,
        Currency::EUR => &EUR_PLANS,
        Currency::PLN => &PLN_PLANS,
        _ => &[],
    }
}

fn to_plan(currency: Currency, row: &PlanRow) -> FastFlowPlan {
    let (amount, percent, profit, total, daily_payment) = *row;
    FastFlowPlan {
        currency,
        amount,
        percent,
        profit,
        total,
        daily_payment,
    }
}

/// All plans offered in `currency`, ascending by nominal
pub fn plans(currency: Currency) -> Vec<FastFlowPlan> {
    rows(currency).iter().map(|row| to_plan(currency, row)).collect()
}

/// Plan with exactly this nominal
pub fn plan(currency: Currency, nominal: f64) -> Option<FastFlowPlan> {
    rows(currency)
        .iter()
        .find(|row| row.0 == nominal)
        .map(|row| to_plan(currency, row))
}
