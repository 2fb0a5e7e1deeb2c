//! Fast flow, accumulative projection and table loading through the public API

use std::fs;

use approx::assert_relative_eq;

use flow_simulator::fast::{plans, FAST_FLOW_DAYS};
use flow_simulator::tiers::loader::{ANNUITY_MULTIPLIERS_FILE, BONUS_TIERS_FILE};
use flow_simulator::{project_annuity, Currency, FastFlow, FlowError, RateSnapshot, Tables};

#[test]
fn every_rub_plan_pays_out_its_total() {
    let snapshot = RateSnapshot::defaults();
    for plan in plans(Currency::RUB) {
        let mut flow = FastFlow::start(Currency::RUB, plan.amount, &snapshot).unwrap();
        while flow.tick() {}

        assert!(flow.completed);
        assert_eq!(flow.day_counter, FAST_FLOW_DAYS);
        assert_relative_eq!(flow.savings, plan.total, epsilon = 1e-6);
        assert_relative_eq!(flow.current_balance, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn fast_flow_requires_exact_nominal() {
    let err = FastFlow::start(Currency::EUR, 123.0, &RateSnapshot::defaults()).unwrap_err();
    assert!(matches!(err, FlowError::NoFastFlowPlan { .. }));
}

#[test]
fn accumulative_three_years_of_thousand() {
    let tables = Tables::defaults();
    let p = project_annuity(&tables.annuity, &RateSnapshot::defaults(), Currency::RUB, 1_000.0, 3).unwrap();

    assert_eq!(p.multiplier, 5.0);
    assert_eq!(p.total_input, 36_000.0);
    assert_eq!(p.total_output, 180_000.0);
}

#[test]
fn tables_load_from_directory() {
    let dir = std::env::temp_dir().join(format!("flow_simulator_it_tables_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(BONUS_TIERS_FILE),
        "currency,min_amount,bonus_percent\nRUB,1000,10\nRUB,2000,20\n",
    )
    .unwrap();
    fs::write(
        dir.join(ANNUITY_MULTIPLIERS_FILE),
        "period_years,amount,multiplier\n2,100,3\n2,200,4\n",
    )
    .unwrap();

    let tables = Tables::from_csv_path(&dir).unwrap();
    assert_eq!(tables.bonus.bonus_percent(Currency::RUB, 2_500.0), 20.0);
    assert_eq!(tables.annuity.periods(), vec![2]);

    // 150 is equidistant from both nominals and snaps down
    let p = project_annuity(&tables.annuity, &RateSnapshot::defaults(), Currency::RUB, 150.0, 2).unwrap();
    assert_eq!(p.multiplier, 3.0);
    assert_eq!(p.period_months, 24);

    fs::remove_dir_all(&dir).unwrap();
}
