//! Monte Carlo driver comparing a fixed-rate loan against simulated ARM outcomes

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use super::path::{PathGenerator, RatePath};
use super::summary::SimulationSummary;
use crate::amortization::{amortize_fixed, amortize_variable, monthly_payment};
use crate::error::{SimulationError, ValidationError};
use crate::history::RateHistory;
use crate::loan::LoanTerms;

/// Sampled paths are never taken more often than every this many trials
pub const MIN_SAMPLE_STRIDE: usize = 50;

/// Configuration for a Monte Carlo run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of independent ARM trials
    pub trial_count: usize,

    /// Base seed; None draws one from entropy
    pub seed: Option<u64>,

    /// Upper bound on rate paths retained for charting
    pub max_sampled_paths: usize,

    /// Run trials on the rayon thread pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: 1000,
            seed: None,
            max_sampled_paths: 200,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trial_count == 0 {
            return Err(ValidationError::NonPositiveTrialCount);
        }
        if self.max_sampled_paths == 0 {
            return Err(ValidationError::NoSampledPaths);
        }
        Ok(())
    }

    /// Keep one path every `sample_stride()` trials
    pub fn sample_stride(&self) -> usize {
        let bounded = self.trial_count.div_ceil(self.max_sampled_paths.max(1));
        bounded.max(MIN_SAMPLE_STRIDE)
    }
}

/// Receives the completed fraction (0, 1] after every trial
///
/// Called synchronously from whichever thread finished the trial.
pub trait ProgressObserver: Sync {
    fn on_progress(&self, fraction: f64);
}

impl<F> ProgressObserver for F
where
    F: Fn(f64) + Sync,
{
    fn on_progress(&self, fraction: f64) {
        self(fraction)
    }
}

/// Observer that ignores progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _fraction: f64) {}
}

/// Shared flag for aborting a run between trials
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of one trial
struct Trial {
    cost: f64,
    path: Option<RatePath>,
}

/// Independent RNG for each trial, so results do not depend on scheduling
fn trial_rng(base_seed: u64, trial: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed ^ (trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Main Monte Carlo driver
#[derive(Debug, Clone, Default)]
pub struct MonteCarloDriver {
    config: SimulationConfig,
}

impl MonteCarloDriver {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all trials without progress reporting or cancellation
    pub fn run(&self, terms: &LoanTerms, history: &RateHistory) -> Result<SimulationSummary, SimulationError> {
        self.run_with(terms, history, &NoProgress, &CancellationToken::new())
    }

    /// Run with a progress observer and a cancellation token
    pub fn run_with(
        &self,
        terms: &LoanTerms,
        history: &RateHistory,
        progress: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<SimulationSummary, SimulationError> {
        terms.validate()?;
        self.config.validate()?;

        let generator = PathGenerator::from_history(history);
        self.run_with_generator(terms, &generator, progress, cancel)
    }

    /// Run against an already digested history
    pub fn run_with_generator(
        &self,
        terms: &LoanTerms,
        generator: &PathGenerator,
        progress: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<SimulationSummary, SimulationError> {
        terms.validate()?;
        self.config.validate()?;

        let trial_count = self.config.trial_count;
        let stride = self.config.sample_stride();
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        info!(
            "Running {} ARM trials (seed {}, parallel: {}, sampling every {} trials)",
            trial_count, base_seed, self.config.parallel, stride
        );

        let fixed_cost = amortize_fixed(terms.principal, terms.fixed.annual_rate_percent, terms.term_years);
        let fixed_payment = monthly_payment(terms.principal, terms.fixed.annual_rate_percent, terms.term_years);

        let completed = AtomicUsize::new(0);
        let decile = (trial_count / 10).max(1);

        let run_trial = |trial: usize| -> Option<Trial> {
            if cancel.is_cancelled() {
                return None;
            }

            let mut rng = trial_rng(base_seed, trial);
            let path = generator.generate(&terms.arm, terms.term_years, &mut rng);
            let cost = amortize_variable(terms.principal, path.rates());

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            progress.on_progress(done as f64 / trial_count as f64);
            if done % decile == 0 {
                debug!("Completed {}/{} trials", done, trial_count);
            }

            Some(Trial {
                cost,
                path: (trial % stride == 0).then_some(path),
            })
        };

        let trials: Vec<Option<Trial>> = if self.config.parallel {
            (0..trial_count).into_par_iter().map(&run_trial).collect()
        } else {
            (0..trial_count).map(&run_trial).collect()
        };

        let mut arm_costs = Vec::with_capacity(trial_count);
        let mut sampled_paths = Vec::new();
        for trial in trials.into_iter().flatten() {
            arm_costs.push(trial.cost);
            sampled_paths.extend(trial.path);
        }

        if arm_costs.len() < trial_count {
            warn!("Simulation cancelled after {}/{} trials", arm_costs.len(), trial_count);
        }

        let summary = SimulationSummary::from_trials(
            *terms,
            fixed_cost,
            fixed_payment,
            arm_costs,
            sampled_paths,
            trial_count,
        )
        .ok_or(SimulationError::Cancelled { trials_requested: trial_count })?;

        info!(
            "Fixed cost {:.2}, ARM median {:.2}, ARM cheaper in {:.1}% of {} trials",
            summary.fixed_cost, summary.arm.median, summary.probability_arm_cheaper_pct, summary.trials_completed
        );

        Ok(summary)
    }
}
