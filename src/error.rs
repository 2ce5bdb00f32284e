//! Error types shared across the crate

use thiserror::Error;

/// Rejected loan terms or simulation settings.
///
/// Raised once, before any simulation work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("loan principal must be positive, got {0}")]
    NonPositivePrincipal(f64),

    #[error("loan term must be positive")]
    NonPositiveTerm,

    #[error("loan term of {term_years} years must exceed the {teaser_years}-year teaser period for an ARM comparison")]
    TermWithinTeaser { term_years: u32, teaser_years: u32 },

    #[error("{field} cannot be negative, got {value}")]
    NegativeRate { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFiniteValue { field: &'static str },

    #[error("number of simulations must be positive")]
    NonPositiveTrialCount,

    #[error("at least one sampled rate path must be retained")]
    NoSampledPaths,
}

/// Failure of a Monte Carlo run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid simulation input: {0}")]
    Invalid(#[from] ValidationError),

    #[error("simulation cancelled before any of {trials_requested} trials completed")]
    Cancelled { trials_requested: usize },
}

/// Failure to produce a usable historical rate series.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unparseable date '{value}'")]
    Date { row: usize, value: String },

    #[error("row {row}: unparseable rate '{value}'")]
    Rate { row: usize, value: String },

    #[error("row {row}: observation dates must be strictly increasing")]
    NotIncreasing { row: usize },

    #[error("row {row}: rate cannot be negative, got {value}")]
    NegativeRate { row: usize, value: f64 },

    #[error("historical series contains no observations")]
    Empty,

    #[error("no historical rate source could be loaded")]
    AllSourcesFailed,
}
