//! ARM rate-path generation by bootstrapping historical annual index changes

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::history::RateHistory;
use crate::loan::{ArmTerms, TEASER_YEARS};

/// The simulated index never drops below this level (percent)
pub const INDEX_FLOOR_PERCENT: f64 = 0.5;

/// Histories shorter than this produce a flat post-teaser path
pub const MIN_HISTORY_OBSERVATIONS: usize = 12;

/// Annual ARM rates (percent) for every year of the loan, index 0 = first teaser year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatePath(Vec<f64>);

impl RatePath {
    pub fn rates(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rate in the given 0-based loan year
    pub fn rate_in_year(&self, year: usize) -> Option<f64> {
        self.0.get(year).copied()
    }

    pub fn into_rates(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for RatePath {
    fn from(rates: Vec<f64>) -> Self {
        Self(rates)
    }
}

impl AsRef<[f64]> for RatePath {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Rate-path generator digested from a historical index series
///
/// Holds the empirical distribution of year-over-year index changes and the
/// latest index level, so one history can feed any number of trials.
#[derive(Debug, Clone, Default)]
pub struct PathGenerator {
    annual_changes: Vec<f64>,
    latest_index: f64,
}

impl PathGenerator {
    /// Digest a history into annual changes
    ///
    /// Too little history is not an error: the generator then holds the ARM at
    /// its initial rate for the whole loan.
    pub fn from_history(history: &RateHistory) -> Self {
        if history.len() < MIN_HISTORY_OBSERVATIONS {
            warn!(
                "Only {} historical observations (need {}); ARM rate held at the initial rate after the teaser",
                history.len(),
                MIN_HISTORY_OBSERVATIONS
            );
            return Self::default();
        }

        let annual_changes = history.annual_changes();
        if annual_changes.is_empty() {
            warn!("History spans no consecutive calendar years; ARM rate held at the initial rate after the teaser");
            return Self::default();
        }

        Self {
            annual_changes,
            latest_index: history.latest_rate().unwrap_or_default(),
        }
    }

    /// True when paths stay flat at the initial rate
    pub fn is_degenerate(&self) -> bool {
        self.annual_changes.is_empty()
    }

    pub fn annual_changes(&self) -> &[f64] {
        &self.annual_changes
    }

    pub fn latest_index(&self) -> f64 {
        self.latest_index
    }

    /// Generate one `term_years` rate path
    pub fn generate<R: Rng + ?Sized>(&self, arm: &ArmTerms, term_years: u32, rng: &mut R) -> RatePath {
        let term = term_years as usize;
        let teaser = TEASER_YEARS as usize;
        let mut rates = Vec::with_capacity(term.max(teaser));
        rates.resize(teaser, arm.initial_rate_percent);

        if !self.is_degenerate() {
            let ceiling = arm.lifetime_ceiling();
            let mut index = self.latest_index;
            let mut prior_rate = arm.initial_rate_percent;

            for reset in 0..term.saturating_sub(teaser) {
                let change = self.annual_changes[rng.gen_range(0..self.annual_changes.len())];
                index = (index + change).max(INDEX_FLOOR_PERCENT);

                // Increases are capped, decreases are not
                let rate = (index + arm.margin_percent)
                    .min(prior_rate + arm.step_cap(reset))
                    .min(ceiling);

                rates.push(rate);
                prior_rate = rate;
            }
        }

        rates.truncate(term);
        if let Some(&last) = rates.last() {
            rates.resize(term, last);
        }

        RatePath(rates)
    }
}

/// Generate a single path straight from a history
pub fn generate_rate_path<R: Rng + ?Sized>(
    arm: &ArmTerms,
    term_years: u32,
    history: &RateHistory,
    rng: &mut R,
) -> RatePath {
    PathGenerator::from_history(history).generate(arm, term_years, rng)
}
