//! Historical index data feeding the rate-path generator
//!
//! The simulation only needs a time-ordered [`RateHistory`]; where it comes from
//! is up to the caller. Three sources ship with the crate:
//!
//! - [`CsvHistory`]: a FRED-style `date,rate` CSV export
//! - [`EmbeddedHistory`]: a built-in 1962-2025 one-year Treasury table
//! - [`SyntheticHistory`]: a seeded mean-reverting series, used as a last resort
//!
//! [`load_with_fallback`] tries sources in order and returns the first success.

mod series;
mod embedded;
mod synthetic;
pub mod loader;

pub use series::{AnnualMean, RateHistory, RateObservation};
pub use embedded::{interpolate_monthly, EmbeddedHistory};
pub use synthetic::SyntheticHistory;
pub use loader::{load_history, load_history_from_reader, CsvHistory};

use log::{info, warn};

use crate::error::HistoryError;

/// Anything that can deliver a historical rate series
pub trait RateHistorySource {
    /// Short label used in log output
    fn name(&self) -> &str;

    /// Produce the series
    fn load(&self) -> Result<RateHistory, HistoryError>;
}

/// Load from the first source that succeeds
///
/// Each failure is logged before moving on to the next source.
pub fn load_with_fallback(sources: &[&dyn RateHistorySource]) -> Result<RateHistory, HistoryError> {
    for source in sources {
        match source.load() {
            Ok(history) => {
                info!(
                    "Loaded {} rate observations from {} source ({:?} to {:?})",
                    history.len(),
                    source.name(),
                    history.first_date(),
                    history.last_date(),
                );
                return Ok(history);
            }
            Err(e) => warn!("Failed to load {} rate history: {}", source.name(), e),
        }
    }

    Err(HistoryError::AllSourcesFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl RateHistorySource for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn load(&self) -> Result<RateHistory, HistoryError> {
            Err(HistoryError::Empty)
        }
    }

    #[test]
    fn test_falls_back_to_embedded() {
        let missing = CsvHistory::new("no/such/file.csv");
        let history = load_with_fallback(&[&missing, &Failing, &EmbeddedHistory]).unwrap();
        assert_eq!(history.latest_rate(), Some(4.10));
    }

    #[test]
    fn test_all_sources_failed() {
        let err = load_with_fallback(&[&Failing]).unwrap_err();
        assert!(matches!(err, HistoryError::AllSourcesFailed));

        assert!(matches!(load_with_fallback(&[]), Err(HistoryError::AllSourcesFailed)));
    }
}
