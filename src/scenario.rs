//! Scenario runner for efficient batch comparisons
//!
//! Digests the rate history once, then runs many loan scenarios against it
//! without re-reading or re-aggregating the history.

use crate::error::{HistoryError, SimulationError};
use crate::history::{load_with_fallback, RateHistory, RateHistorySource};
use crate::loan::LoanTerms;
use crate::simulation::{CancellationToken, MonteCarloDriver, NoProgress, PathGenerator, SimulationConfig, SimulationSummary};
use crate::amortization::{amortize_fixed, monthly_payment};

/// Pre-loaded scenario runner for efficient batch simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_sources(&[&EmbeddedHistory], SimulationConfig::default())?;
///
/// for rate in [6.0, 6.5, 7.0] {
///     let mut terms = LoanTerms::default();
///     terms.fixed.annual_rate_percent = rate;
///     let summary = runner.run(&terms)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    generator: PathGenerator,
    driver: MonteCarloDriver,
}

impl ScenarioRunner {
    /// Create runner from an already loaded history
    pub fn new(history: &RateHistory, config: SimulationConfig) -> Self {
        Self {
            generator: PathGenerator::from_history(history),
            driver: MonteCarloDriver::new(config),
        }
    }

    /// Create runner from the first history source that loads
    pub fn from_sources(sources: &[&dyn RateHistorySource], config: SimulationConfig) -> Result<Self, HistoryError> {
        let history = load_with_fallback(sources)?;
        Ok(Self::new(&history, config))
    }

    /// Create runner with a pre-built generator
    pub fn with_generator(generator: PathGenerator, config: SimulationConfig) -> Self {
        Self {
            generator,
            driver: MonteCarloDriver::new(config),
        }
    }

    /// Run a single comparison
    pub fn run(&self, terms: &LoanTerms) -> Result<SimulationSummary, SimulationError> {
        self.driver
            .run_with_generator(terms, &self.generator, &NoProgress, &CancellationToken::new())
    }

    /// Run several independent comparisons
    pub fn run_scenarios(&self, scenarios: &[LoanTerms]) -> Vec<Result<SimulationSummary, SimulationError>> {
        scenarios.iter().map(|terms| self.run(terms)).collect()
    }

    /// Compare one simulated ARM distribution against several fixed rates
    ///
    /// The ARM side does not depend on the fixed rate, so its trials run once and
    /// only the fixed-rate side is recomputed per rate.
    pub fn fixed_rate_sweep(
        &self,
        base: &LoanTerms,
        fixed_rates: &[f64],
    ) -> Result<Vec<SimulationSummary>, SimulationError> {
        let arm_run = self.run(base)?;

        fixed_rates
            .iter()
            .map(|&rate| {
                let mut terms = *base;
                terms.fixed.annual_rate_percent = rate;
                terms.validate()?;

                let summary = SimulationSummary::from_trials(
                    terms,
                    amortize_fixed(terms.principal, rate, terms.term_years),
                    monthly_payment(terms.principal, rate, terms.term_years),
                    arm_run.arm_costs.clone(),
                    arm_run.sampled_paths.clone(),
                    arm_run.trials_requested,
                );
                summary.ok_or(SimulationError::Cancelled { trials_requested: arm_run.trials_requested })
            })
            .collect()
    }

    pub fn generator(&self) -> &PathGenerator {
        &self.generator
    }

    pub fn config(&self) -> &SimulationConfig {
        self.driver.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::EmbeddedHistory;

    fn runner() -> ScenarioRunner {
        let config = SimulationConfig {
            trial_count: 500,
            seed: Some(11),
            ..SimulationConfig::default()
        };
        ScenarioRunner::from_sources(&[&EmbeddedHistory], config).unwrap()
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = runner();

        let scenarios: Vec<_> = [6.0, 6.75, 7.5]
            .iter()
            .map(|&rate| {
                let mut terms = LoanTerms::default();
                terms.fixed.annual_rate_percent = rate;
                terms
            })
            .collect();

        let results: Vec<_> = runner.run_scenarios(&scenarios).into_iter().map(Result::unwrap).collect();
        assert_eq!(results.len(), 3);

        // Higher fixed rate should make the ARM look at least as attractive
        assert!(results[2].fixed_cost > results[0].fixed_cost);
        assert!(results[2].probability_arm_cheaper_pct >= results[0].probability_arm_cheaper_pct);
    }

    #[test]
    fn test_sweep_matches_individual_runs() {
        let runner = runner();
        let base = LoanTerms::default();

        let sweep = runner.fixed_rate_sweep(&base, &[6.0, 7.0]).unwrap();
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep[0].arm_costs, sweep[1].arm_costs);

        let mut terms = base;
        terms.fixed.annual_rate_percent = 7.0;
        let single = runner.run(&terms).unwrap();
        assert_eq!(single.arm_costs, sweep[1].arm_costs);
        assert_eq!(single.fixed_cost, sweep[1].fixed_cost);
        assert_eq!(single.probability_arm_cheaper_pct, sweep[1].probability_arm_cheaper_pct);
    }

    #[test]
    fn test_sweep_rejects_negative_rate() {
        let result = runner().fixed_rate_sweep(&LoanTerms::default(), &[6.0, -1.0]);
        assert!(matches!(result, Err(SimulationError::Invalid(_))));
    }
}
