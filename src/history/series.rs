//! Ordered historical index observations and their annual statistics

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// A single index observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    pub date: NaiveDate,
    /// Index level in percent
    pub rate_percent: f64,
}

impl RateObservation {
    pub fn new(date: NaiveDate, rate_percent: f64) -> Self {
        Self { date, rate_percent }
    }
}

/// Mean index level for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualMean {
    pub year: i32,
    pub rate_percent: f64,
}

/// Time-ordered series of index observations
///
/// Dates are strictly increasing and every rate is non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateHistory {
    observations: Vec<RateObservation>,
}

impl RateHistory {
    /// Build a history, rejecting out-of-order, duplicate, negative or non-finite entries
    pub fn new(observations: Vec<RateObservation>) -> Result<Self, HistoryError> {
        for (row, obs) in observations.iter().enumerate() {
            if !obs.rate_percent.is_finite() {
                return Err(HistoryError::Rate { row, value: obs.rate_percent.to_string() });
            }
            if obs.rate_percent < 0.0 {
                return Err(HistoryError::NegativeRate { row, value: obs.rate_percent });
            }
            if row > 0 && observations[row - 1].date >= obs.date {
                return Err(HistoryError::NotIncreasing { row });
            }
        }

        Ok(Self { observations })
    }

    /// Build a history from observations in arbitrary order
    pub fn from_unsorted(mut observations: Vec<RateObservation>) -> Result<Self, HistoryError> {
        observations.sort_by_key(|obs| obs.date);
        Self::new(observations)
    }

    pub fn observations(&self) -> &[RateObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Most recent index level
    pub fn latest_rate(&self) -> Option<f64> {
        self.observations.last().map(|obs| obs.rate_percent)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|obs| obs.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|obs| obs.date)
    }

    /// Mean of the observations within each calendar year, in year order
    pub fn annual_means(&self) -> Vec<AnnualMean> {
        let mut means = Vec::new();
        let mut current: Option<(i32, f64, usize)> = None;

        for obs in &self.observations {
            let year = obs.date.year();
            current = match current {
                Some((y, sum, count)) if y == year => Some((y, sum + obs.rate_percent, count + 1)),
                Some((y, sum, count)) => {
                    means.push(AnnualMean { year: y, rate_percent: sum / count as f64 });
                    Some((year, obs.rate_percent, 1))
                }
                None => Some((year, obs.rate_percent, 1)),
            };
        }

        if let Some((year, sum, count)) = current {
            means.push(AnnualMean { year, rate_percent: sum / count as f64 });
        }

        means
    }

    /// Year-over-year changes between consecutive calendar years
    ///
    /// A calendar year with no observations breaks the chain: no change is
    /// reported across the gap.
    pub fn annual_changes(&self) -> Vec<f64> {
        self.annual_means()
            .windows(2)
            .filter(|pair| pair[1].year == pair[0].year + 1)
            .map(|pair| pair[1].rate_percent - pair[0].rate_percent)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_unordered() {
        let obs = vec![
            RateObservation::new(date(2020, 2, 1), 1.0),
            RateObservation::new(date(2020, 1, 1), 1.0),
        ];
        assert!(matches!(RateHistory::new(obs.clone()), Err(HistoryError::NotIncreasing { row: 1 })));

        let sorted = RateHistory::from_unsorted(obs).unwrap();
        assert_eq!(sorted.first_date(), Some(date(2020, 1, 1)));
    }

    #[test]
    fn test_rejects_duplicate_dates() {
        let obs = vec![
            RateObservation::new(date(2020, 1, 1), 1.0),
            RateObservation::new(date(2020, 1, 1), 2.0),
        ];
        assert!(matches!(RateHistory::new(obs), Err(HistoryError::NotIncreasing { row: 1 })));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let obs = vec![RateObservation::new(date(2020, 1, 1), -0.1)];
        assert!(matches!(RateHistory::new(obs), Err(HistoryError::NegativeRate { row: 0, .. })));
    }

    #[test]
    fn test_annual_means_and_changes() {
        let history = RateHistory::new(vec![
            RateObservation::new(date(2000, 1, 1), 4.0),
            RateObservation::new(date(2000, 7, 1), 6.0),
            RateObservation::new(date(2001, 1, 1), 3.0),
            RateObservation::new(date(2002, 3, 1), 2.0),
            RateObservation::new(date(2002, 9, 1), 3.0),
        ])
        .unwrap();

        let means = history.annual_means();
        assert_eq!(means.len(), 3);
        assert_eq!(means[0], AnnualMean { year: 2000, rate_percent: 5.0 });
        assert_eq!(means[1], AnnualMean { year: 2001, rate_percent: 3.0 });
        assert_abs_diff_eq!(means[2].rate_percent, 2.5);

        let changes = history.annual_changes();
        assert_eq!(changes.len(), 2);
        assert_abs_diff_eq!(changes[0], -2.0);
        assert_abs_diff_eq!(changes[1], -0.5);

        assert_eq!(history.latest_rate(), Some(3.0));
    }

    #[test]
    fn test_changes_skip_missing_year() {
        let history = RateHistory::new(vec![
            RateObservation::new(date(2000, 1, 1), 4.0),
            RateObservation::new(date(2002, 1, 1), 6.0),
            RateObservation::new(date(2003, 1, 1), 7.0),
        ])
        .unwrap();

        assert_eq!(history.annual_changes(), vec![1.0]);
    }

    #[test]
    fn test_empty_history() {
        let history = RateHistory::default();
        assert!(history.is_empty());
        assert!(history.annual_means().is_empty());
        assert!(history.annual_changes().is_empty());
        assert_eq!(history.latest_rate(), None);
    }
}
