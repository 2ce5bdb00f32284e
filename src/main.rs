//! ARM vs Fixed CLI
//!
//! Command-line interface for comparing a fixed-rate mortgage against a 5/1 ARM

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use clap::Parser;

use arm_vs_fixed::history::{load_with_fallback, CsvHistory, EmbeddedHistory, RateHistorySource, SyntheticHistory};
use arm_vs_fixed::loan::load_terms;
use arm_vs_fixed::simulation::{CancellationToken, MonteCarloDriver, SimulationConfig, SimulationSummary, Verdict};
use arm_vs_fixed::LoanTerms;

#[derive(Debug, Parser)]
#[command(name = "arm_vs_fixed", version, about = "Monte Carlo comparison of a fixed-rate mortgage and a 5/1 ARM")]
struct Args {
    /// JSON file with loan terms; flags below override its values
    #[arg(long)]
    terms: Option<PathBuf>,

    /// Loan amount ($)
    #[arg(long)]
    principal: Option<f64>,

    /// Loan term (years)
    #[arg(long)]
    term_years: Option<u32>,

    /// Fixed rate (%)
    #[arg(long)]
    fixed_rate: Option<f64>,

    /// 5/1 ARM initial rate (%)
    #[arg(long)]
    arm_rate: Option<f64>,

    /// ARM margin over the index (%)
    #[arg(long)]
    margin: Option<f64>,

    /// Cap on the first rate increase (%)
    #[arg(long)]
    initial_cap: Option<f64>,

    /// Cap on each later annual increase (%)
    #[arg(long)]
    periodic_cap: Option<f64>,

    /// Cap on total increase over the initial rate (%)
    #[arg(long)]
    lifetime_cap: Option<f64>,

    /// Number of Monte Carlo simulations
    #[arg(long, default_value_t = 1000)]
    trials: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum rate paths kept for the rate bands
    #[arg(long, default_value_t = 200)]
    max_paths: usize,

    /// Run trials on a single thread
    #[arg(long)]
    sequential: bool,

    /// Historical index CSV (date,rate); falls back to the built-in table
    #[arg(long)]
    history: Option<PathBuf>,

    /// Print the full summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn loan_terms(&self) -> Result<LoanTerms> {
        let mut terms = match &self.terms {
            Some(path) => load_terms(path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("reading loan terms from {}", path.display()))?,
            None => LoanTerms::default(),
        };

        terms.principal = self.principal.unwrap_or(terms.principal);
        terms.term_years = self.term_years.unwrap_or(terms.term_years);
        terms.fixed.annual_rate_percent = self.fixed_rate.unwrap_or(terms.fixed.annual_rate_percent);

        let arm = &mut terms.arm;
        arm.initial_rate_percent = self.arm_rate.unwrap_or(arm.initial_rate_percent);
        arm.margin_percent = self.margin.unwrap_or(arm.margin_percent);
        arm.initial_cap_percent = self.initial_cap.unwrap_or(arm.initial_cap_percent);
        arm.periodic_cap_percent = self.periodic_cap.unwrap_or(arm.periodic_cap_percent);
        arm.lifetime_cap_percent = self.lifetime_cap.unwrap_or(arm.lifetime_cap_percent);

        terms.validate()?;
        Ok(terms)
    }

    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            trial_count: self.trials,
            seed: self.seed,
            max_sampled_paths: self.max_paths,
            parallel: !self.sequential,
        }
    }
}

fn print_report(summary: &SimulationSummary) {
    let terms = &summary.terms;
    let arm = &summary.arm;

    println!("Fixed-Rate ({}%) Total Cost: ${:.2}", terms.fixed.annual_rate_percent, summary.fixed_cost);
    println!("  Monthly Payment: ${:.2}", summary.fixed_monthly_payment);
    println!("5/1 ARM (Initial: {}%) Median Cost: ${:.2}", terms.arm.initial_rate_percent, arm.median);
    println!("  Mean: ${:.2}  Std Dev: ${:.2}", arm.mean, arm.std_dev);
    println!("  Min: ${:.2}  Max: ${:.2}", arm.min, arm.max);
    println!(
        "Expected Savings with {}: ${:.2}",
        if summary.expected_savings > 0.0 { "ARM" } else { "Fixed Rate" },
        summary.expected_savings.abs()
    );
    println!("5/1 ARM 95% Confidence Interval: ${:.2} to ${:.2}", arm.interval_low, arm.interval_high);
    println!();

    match summary.verdict() {
        Verdict::FixedFavored => println!(
            "Based on historical patterns, the fixed-rate mortgage is likely to be less expensive. \
             The ARM was more expensive in {:.1}% of simulations.",
            100.0 - summary.probability_arm_cheaper_pct
        ),
        Verdict::ArmFavored => println!(
            "Based on historical patterns, the 5/1 ARM is likely to be less expensive. \
             The ARM was less expensive in {:.1}% of simulations.",
            summary.probability_arm_cheaper_pct
        ),
    }

    if !summary.rate_bands.is_empty() {
        println!();
        println!("ARM Rate Projections ({} sampled paths):", summary.sampled_paths.len());
        println!("{:>5} {:>8} {:>8} {:>8}", "Year", "Median", "2.5%", "97.5%");
        for band in &summary.rate_bands {
            println!("{:>5} {:>8.2} {:>8.2} {:>8.2}", band.year, band.median, band.low, band.high);
        }
    }

    if !summary.is_complete() {
        println!();
        println!(
            "Warning: only {} of {} simulations completed",
            summary.trials_completed, summary.trials_requested
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let terms = args.loan_terms()?;

    let csv = args.history.as_ref().map(CsvHistory::new);
    let mut sources: Vec<&dyn RateHistorySource> = Vec::new();
    if let Some(csv) = &csv {
        sources.push(csv);
    }
    let synthetic = SyntheticHistory::default();
    sources.push(&EmbeddedHistory);
    sources.push(&synthetic);

    let history = load_with_fallback(&sources).context("loading historical index data")?;

    let trials = args.trials;
    let reported = AtomicUsize::new(0);
    let progress = |fraction: f64| {
        let pct = (fraction * 100.0) as usize / 10 * 10;
        if !args.json && pct > reported.fetch_max(pct, Ordering::Relaxed) {
            eprintln!("Running simulation... {}% of {}", pct, trials);
        }
    };

    let driver = MonteCarloDriver::new(args.config());
    let summary = driver.run_with(&terms, &history, &progress, &CancellationToken::new())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary);
    }

    Ok(())
}
