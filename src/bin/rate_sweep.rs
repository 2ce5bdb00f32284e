//! Sweep fixed rates against one simulated ARM distribution
//!
//! Runs the ARM trials once, then reports for each fixed rate how often the
//! ARM came out cheaper. Output is written as CSV for charting.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Serialize;

use arm_vs_fixed::history::{CsvHistory, EmbeddedHistory, RateHistorySource};
use arm_vs_fixed::{LoanTerms, ScenarioRunner, SimulationConfig};

#[derive(Debug, Parser)]
#[command(name = "rate_sweep", about = "Break-even sweep of fixed rates against a simulated 5/1 ARM")]
struct Args {
    /// Lowest fixed rate (%)
    #[arg(long, default_value_t = 5.0)]
    from: f64,

    /// Highest fixed rate (%)
    #[arg(long, default_value_t = 8.0)]
    to: f64,

    /// Step between fixed rates (%)
    #[arg(long, default_value_t = 0.125)]
    step: f64,

    /// Number of Monte Carlo simulations
    #[arg(long, default_value_t = 5000)]
    trials: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Historical index CSV (date,rate); defaults to the built-in table
    #[arg(long)]
    history: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    fixed_rate: f64,
    fixed_cost: f64,
    arm_median_cost: f64,
    expected_savings: f64,
    prob_arm_cheaper_pct: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    ensure!(args.step > 0.0, "step must be positive");
    ensure!(args.to >= args.from, "--to must not be below --from");

    let start = Instant::now();
    let config = SimulationConfig {
        trial_count: args.trials,
        seed: args.seed,
        ..SimulationConfig::default()
    };

    let csv = args.history.as_ref().map(CsvHistory::new);
    let mut sources: Vec<&dyn RateHistorySource> = Vec::new();
    if let Some(csv) = &csv {
        sources.push(csv);
    }
    sources.push(&EmbeddedHistory);

    let runner = ScenarioRunner::from_sources(&sources, config).context("loading historical index data")?;

    let steps = ((args.to - args.from) / args.step).round() as usize;
    let rates: Vec<f64> = (0..=steps).map(|i| args.from + i as f64 * args.step).collect();

    println!("Simulating {} ARM trials against {} fixed rates...", args.trials, rates.len());
    let summaries = runner.fixed_rate_sweep(&LoanTerms::default(), &rates)?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut break_even = None;
    for summary in &summaries {
        let row = SweepRow {
            fixed_rate: summary.terms.fixed.annual_rate_percent,
            fixed_cost: summary.fixed_cost,
            arm_median_cost: summary.arm.median,
            expected_savings: summary.expected_savings,
            prob_arm_cheaper_pct: summary.probability_arm_cheaper_pct,
        };
        if break_even.is_none() && row.expected_savings > 0.0 {
            break_even = Some(row.fixed_rate);
        }
        println!(
            "  {:>6.3}%  fixed ${:>12.2}  ARM median ${:>12.2}  ARM cheaper {:>5.1}%",
            row.fixed_rate, row.fixed_cost, row.arm_median_cost, row.prob_arm_cheaper_pct
        );
        writer.serialize(&row)?;
    }
    writer.flush()?;

    match break_even {
        Some(rate) => println!("\nARM favored on median cost from a fixed rate of {:.3}%", rate),
        None => println!("\nFixed rate favored across the whole sweep"),
    }
    println!("Output written to {} in {:?}", args.output.display(), start.elapsed());

    Ok(())
}
