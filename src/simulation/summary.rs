//! Reduction of Monte Carlo trial results to summary statistics

use serde::{Deserialize, Serialize};

use super::path::RatePath;
use crate::loan::LoanTerms;

/// Lower bound of the reported two-sided interval (percentile)
pub const INTERVAL_LOW_PERCENTILE: f64 = 2.5;
/// Upper bound of the reported two-sided interval (percentile)
pub const INTERVAL_HIGH_PERCENTILE: f64 = 97.5;

/// Percentile of sorted data, linearly interpolating between order statistics
///
/// `pct` is in [0, 100]. Returns NaN for empty input.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (pct / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + weight * (sorted[upper] - sorted[lower])
        }
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Distribution of total ARM cost across trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDistribution {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 2.5th percentile
    pub interval_low: f64,
    /// 97.5th percentile
    pub interval_high: f64,
}

impl CostDistribution {
    /// Summarize a set of costs; None when empty
    pub fn from_costs(costs: &[f64]) -> Option<Self> {
        if costs.is_empty() {
            return None;
        }

        let n = costs.len() as f64;
        let mean = costs.iter().sum::<f64>() / n;
        let variance = costs.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
        let sorted = sorted_copy(costs);

        Some(Self {
            mean,
            median: percentile(&sorted, 50.0),
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            interval_low: percentile(&sorted, INTERVAL_LOW_PERCENTILE),
            interval_high: percentile(&sorted, INTERVAL_HIGH_PERCENTILE),
        })
    }
}

/// Spread of the sampled ARM rate paths in one loan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// 1-based loan year
    pub year: u32,
    pub median: f64,
    pub low: f64,
    pub high: f64,
}

/// Per-year median and 2.5/97.5 percentile rates across paths
pub fn rate_bands(paths: &[RatePath]) -> Vec<RateBand> {
    let years = paths.iter().map(RatePath::len).min().unwrap_or(0);

    (0..years)
        .map(|year| {
            let column: Vec<f64> = paths.iter().map(|p| p.rates()[year]).collect();
            let sorted = sorted_copy(&column);
            RateBand {
                year: year as u32 + 1,
                median: percentile(&sorted, 50.0),
                low: percentile(&sorted, INTERVAL_LOW_PERCENTILE),
                high: percentile(&sorted, INTERVAL_HIGH_PERCENTILE),
            }
        })
        .collect()
}

/// Which loan the simulation favors, judged on the median ARM cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    FixedFavored,
    ArmFavored,
}

/// Result of a Monte Carlo comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Terms the run compared
    pub terms: LoanTerms,

    /// Total paid on the fixed-rate loan
    pub fixed_cost: f64,
    pub fixed_monthly_payment: f64,

    /// Distribution of total paid on the ARM
    pub arm: CostDistribution,

    /// Percent of completed trials where the ARM cost less than the fixed loan
    pub probability_arm_cheaper_pct: f64,

    /// Fixed cost minus median ARM cost (positive favors the ARM)
    pub expected_savings: f64,

    /// Total ARM cost of every completed trial, in trial order
    pub arm_costs: Vec<f64>,

    /// Evenly spaced sub-sample of generated rate paths
    pub sampled_paths: Vec<RatePath>,

    /// Per-year spread of the sampled paths
    pub rate_bands: Vec<RateBand>,

    pub trials_requested: usize,
    pub trials_completed: usize,
}

impl SimulationSummary {
    /// Reduce completed trials; None when no trial completed
    pub fn from_trials(
        terms: LoanTerms,
        fixed_cost: f64,
        fixed_monthly_payment: f64,
        arm_costs: Vec<f64>,
        sampled_paths: Vec<RatePath>,
        trials_requested: usize,
    ) -> Option<Self> {
        let arm = CostDistribution::from_costs(&arm_costs)?;
        let cheaper = arm_costs.iter().filter(|&&c| c < fixed_cost).count();
        let probability_arm_cheaper_pct = cheaper as f64 / arm_costs.len() as f64 * 100.0;
        let rate_bands = rate_bands(&sampled_paths);

        Some(Self {
            terms,
            fixed_cost,
            fixed_monthly_payment,
            arm,
            probability_arm_cheaper_pct,
            expected_savings: fixed_cost - arm.median,
            trials_completed: arm_costs.len(),
            arm_costs,
            sampled_paths,
            rate_bands,
            trials_requested,
        })
    }

    /// False when the run was cancelled before every trial finished
    pub fn is_complete(&self) -> bool {
        self.trials_completed == self.trials_requested
    }

    pub fn verdict(&self) -> Verdict {
        if self.fixed_cost < self.arm.median {
            Verdict::FixedFavored
        } else {
            Verdict::ArmFavored
        }
    }

    /// Per-trial savings of the ARM over the fixed loan (positive favors the ARM)
    pub fn savings(&self) -> Vec<f64> {
        self.arm_costs.iter().map(|c| self.fixed_cost - c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        assert_abs_diff_eq!(percentile(&sorted, 2.5), 1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(percentile(&sorted, 97.5), 4.9, epsilon = 1e-12);

        assert_eq!(percentile(&[1.0, 2.0], 50.0), 1.5);
        assert_eq!(percentile(&[7.0], 97.5), 7.0);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_cost_distribution() {
        let dist = CostDistribution::from_costs(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(dist.mean, 2.5);
        assert_eq!(dist.median, 2.5);
        assert_eq!(dist.min, 1.0);
        assert_eq!(dist.max, 4.0);
        // Population variance of 1..4 is 1.25
        assert_abs_diff_eq!(dist.std_dev, 1.25f64.sqrt(), epsilon = 1e-12);

        assert!(CostDistribution::from_costs(&[]).is_none());
    }

    #[test]
    fn test_summary_probability_and_savings() {
        let costs = vec![90.0, 95.0, 105.0, 110.0, 120.0];
        let summary = SimulationSummary::from_trials(LoanTerms::default(), 100.0, 1.0, costs, Vec::new(), 5).unwrap();

        assert_eq!(summary.probability_arm_cheaper_pct, 40.0);
        assert_eq!(summary.arm.median, 105.0);
        assert_eq!(summary.expected_savings, -5.0);
        assert_eq!(summary.verdict(), Verdict::FixedFavored);
        assert_eq!(summary.savings(), vec![10.0, 5.0, -5.0, -10.0, -20.0]);
        assert!(summary.is_complete());
        assert!(summary.rate_bands.is_empty());
    }

    #[test]
    fn test_ties_are_not_cheaper() {
        let summary = SimulationSummary::from_trials(LoanTerms::default(), 100.0, 1.0, vec![100.0, 100.0], Vec::new(), 4)
            .unwrap();
        assert_eq!(summary.probability_arm_cheaper_pct, 0.0);
        assert_eq!(summary.verdict(), Verdict::ArmFavored);
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_no_trials() {
        assert!(SimulationSummary::from_trials(LoanTerms::default(), 100.0, 1.0, Vec::new(), Vec::new(), 10).is_none());
    }

    #[test]
    fn test_rate_bands() {
        let paths = vec![
            RatePath::from(vec![5.0, 6.0]),
            RatePath::from(vec![5.0, 8.0]),
            RatePath::from(vec![5.0, 7.0]),
        ];
        let bands = rate_bands(&paths);

        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0], RateBand { year: 1, median: 5.0, low: 5.0, high: 5.0 });
        assert_eq!(bands[1].year, 2);
        assert_eq!(bands[1].median, 7.0);
        assert_abs_diff_eq!(bands[1].low, 6.05, epsilon = 1e-12);
        assert_abs_diff_eq!(bands[1].high, 7.95, epsilon = 1e-12);
    }
}
