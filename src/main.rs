//! Flow Simulator CLI
//!
//! Command-line interface for running growing, fast and accumulative flow simulations

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use flow_simulator::fast::FastFlow;
use flow_simulator::growing::{GrowingFlowEngine, LedgerConfig};
use flow_simulator::rates::{CsvRateSource, RateCache, RateSnapshot};
use flow_simulator::rounding::{round_display, round_units};
use flow_simulator::scenario::{Script, ScenarioRunner};
use flow_simulator::{project_annuity, Currency, Tables};

#[derive(Debug, Parser)]
#[command(name = "flow_simulator", version, about = "Simulate growing, fast and accumulative flows")]
struct Cli {
    /// Directory with bonus_tiers.csv and annuity_multipliers.csv (compiled-in tables when omitted)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// rates.csv with currency and pseudo-asset rates (static defaults when omitted)
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a growing flow and accrue it for a number of days
    Growing {
        #[arg(long, default_value = "RUB")]
        currency: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value_t = 30)]
        days: u32,
        /// Withdraw the whole pocket every N days
        #[arg(long)]
        withdraw_every: Option<u32>,
        /// Ledger rate parameters as JSON
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "growing_output.csv")]
        output: PathBuf,
    },
    /// Replay a JSON file of growing-flow scripts
    Scenario {
        #[arg(long)]
        scripts: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Run a fast-flow plan to completion
    Fast {
        #[arg(long, default_value = "RUB")]
        currency: String,
        #[arg(long)]
        nominal: f64,
        #[arg(long, default_value = "fast_output.csv")]
        output: PathBuf,
    },
    /// Project an accumulative flow
    Accumulative {
        #[arg(long, default_value = "RUB")]
        currency: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        period: u32,
        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the rate snapshot in use
    Rates,
}

#[derive(Debug, Serialize)]
struct FastFlowRow {
    day: u32,
    current_balance: f64,
    daily_payment: f64,
    savings: f64,
    completed: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let tables = match &cli.tables {
        Some(dir) => Tables::from_csv_path(dir)
            .with_context(|| format!("loading tables from {}", dir.display()))?,
        None => Tables::defaults(),
    };
    let snapshot = load_snapshot(cli.rates.as_deref());

    match cli.command {
        Command::Growing { currency, amount, days, withdraw_every, config, output } => {
            let currency: Currency = currency.parse()?;
            currency.limits().validate(amount).with_context(|| {
                let limits = currency.limits();
                format!("amount must be between {} and {} {}", limits.min, limits.max, currency)
            })?;
            let engine = GrowingFlowEngine::new(load_config(config.as_deref())?, tables.bonus);
            run_growing(&engine, &snapshot, currency, amount, days, withdraw_every, &output)
        }
        Command::Scenario { scripts, config, output_dir } => {
            let engine = GrowingFlowEngine::new(load_config(config.as_deref())?, tables.bonus);
            let scripts = Script::load_all(&scripts)
                .with_context(|| format!("reading scripts from {}", scripts.display()))?;
            run_scenarios(ScenarioRunner::new(engine, snapshot), &scripts, &output_dir)
        }
        Command::Fast { currency, nominal, output } => {
            let currency: Currency = currency.parse()?;
            run_fast(&snapshot, currency, nominal, &output)
        }
        Command::Accumulative { currency, amount, period, json } => {
            let currency: Currency = currency.parse()?;
            let nominals = tables.annuity.nominals();
            if let (Some(min), Some(max)) = (nominals.first(), nominals.last()) {
                if amount < *min || amount > *max {
                    bail!("amount must be between {} and {}", min, max);
                }
            }
            let projection = project_annuity(&tables.annuity, &snapshot, currency, amount, period)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                println!("Accumulative flow: {} {} for {} years, x{}", amount, currency, period, projection.multiplier);
                println!("  Monthly contribution: {:.2} {} + {:.2} pseudo-asset units",
                    amount, currency.symbol(), round_units(projection.monthly_pseudo_asset_units));
                println!("  Monthly payment:      {:.2} {}", round_display(projection.monthly_payment), currency.symbol());
                println!("  Total paid in:        {:.0} {}", projection.total_input, currency.symbol());
                println!("  Total paid out:       {:.0} {}", projection.total_output, currency.symbol());
            }
            Ok(())
        }
        Command::Rates => {
            for (currency, rate) in snapshot.currencies() {
                println!("{:>4}: {:.4} RUB per 1{}", currency, rate, currency.symbol());
            }
            println!("pseudo-asset buy (growing):    {:.2}", snapshot.pseudo_asset_buy_growing);
            println!("pseudo-asset buy (annuity):    {:.2}", snapshot.pseudo_asset_buy_annuity);
            println!("pseudo-asset sell:             {:.2}", snapshot.pseudo_asset_sell);
            Ok(())
        }
    }
}

fn load_snapshot(rates: Option<&Path>) -> RateSnapshot {
    match rates {
        Some(path) => {
            let mut cache = RateCache::default();
            cache.get_or_refresh(Utc::now(), &CsvRateSource::new(path))
        }
        None => RateSnapshot::defaults(),
    }
}

fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    match path {
        Some(path) => LedgerConfig::from_json_path(path)
            .with_context(|| format!("reading ledger config from {}", path.display())),
        None => Ok(LedgerConfig::default()),
    }
}

fn run_growing(
    engine: &GrowingFlowEngine,
    snapshot: &RateSnapshot,
    currency: Currency,
    amount: f64,
    days: u32,
    withdraw_every: Option<u32>,
    output: &Path,
) -> Result<()> {
    let (mut account, receipt) = engine.open_account(currency, amount, snapshot)?;

    println!("Growing flow: {:.2} {}", amount, currency.symbol());
    println!("  Bonus:            {:.0}%", receipt.bonus_percent);
    println!("  In flow:          {:.2} {}", round_display(receipt.bonus_balance), currency.symbol());
    println!("  Pseudo-asset:     {:.2} units (cost {:.2} {})",
        round_units(receipt.pseudo_asset_units), round_display(receipt.pseudo_asset_cost), currency.symbol());
    println!("  Daily accrual:    {:.2} {}", round_display(receipt.daily_accrual), currency.symbol());
    println!();

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.serialize(account.snapshot())?;

    for day in 1..=days {
        engine.tick(&mut account);
        if let Some(n) = withdraw_every {
            if n > 0 && day % n == 0 {
                engine.withdraw_all(&mut account);
            }
        }
        writer.serialize(account.snapshot())?;
    }
    writer.flush()?;

    let last = account.snapshot();
    println!("{:>5} {:>14} {:>10} {:>8} {:>12} {:>12}", "Day", "In flow", "Accrual", "Rate%", "Pocket", "Withdrawn");
    println!("{:>5} {:>14.2} {:>10.2} {:>8.2} {:>12.2} {:>12.2}",
        last.day, last.balance, last.daily_accrual, last.rate, last.pocket, last.withdrawn);
    println!("\nFull results written to: {}", output.display());
    Ok(())
}

fn run_scenarios(runner: ScenarioRunner, scripts: &[Script], output_dir: &Path) -> Result<()> {
    let results = runner.run_batch(scripts);

    for (script, result) in scripts.iter().zip(results) {
        let result = result.with_context(|| format!("running script {}", script.name))?;
        let path = output_dir.join(format!("{}.csv", result.name));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &result.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        let last = result.account.snapshot();
        println!("{}: day {}, in flow {:.2}, pocket {:.2}, withdrawn {:.2} -> {}",
            result.name, last.day, last.balance, last.pocket, last.withdrawn, path.display());
    }
    Ok(())
}

fn run_fast(snapshot: &RateSnapshot, currency: Currency, nominal: f64, output: &Path) -> Result<()> {
    let mut flow = FastFlow::start(currency, nominal, snapshot)?;

    println!("Fast flow: {} {} at {}%", flow.plan.amount, currency.symbol(), flow.plan.percent);
    println!("  Pseudo-asset: {:.2} units (= {:.2} {})",
        round_units(flow.pseudo_asset_units), flow.pseudo_asset_value, currency.symbol());
    println!("  In flow:      {:.2} {}", flow.plan.total, currency.symbol());

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("creating {}", output.display()))?;
    while flow.tick() {
        writer.serialize(FastFlowRow {
            day: flow.day_counter,
            current_balance: round_display(flow.current_balance.max(0.0)),
            daily_payment: flow.plan.daily_payment,
            savings: round_display(flow.savings),
            completed: flow.completed,
        })?;
    }
    writer.flush()?;

    println!("  Paid out:     {:.2} {} over {} days", round_display(flow.savings), currency.symbol(), flow.day_counter);
    println!("\nFull results written to: {}", output.display());
    Ok(())
}
