//! ARM vs Fixed - Monte Carlo lifetime-cost comparison of fixed-rate and 5/1 ARM mortgages
//!
//! This library provides:
//! - ARM rate-path generation by bootstrapping historical index changes under
//!   initial, periodic and lifetime caps
//! - Level-payment amortization with annual payment resets
//! - A Monte Carlo driver reducing simulated ARM costs to summary statistics
//! - Historical index sources (CSV, built-in Treasury table, synthetic series)

pub mod error;
pub mod loan;
pub mod history;
pub mod amortization;
pub mod simulation;
pub mod scenario;

// Re-export commonly used types
pub use error::{HistoryError, SimulationError, ValidationError};
pub use loan::{ArmTerms, FixedRateTerms, LoanTerms, TEASER_YEARS};
pub use history::{RateHistory, RateHistorySource, RateObservation};
pub use amortization::{amortize_fixed, amortize_variable};
pub use simulation::{MonteCarloDriver, PathGenerator, RatePath, SimulationConfig, SimulationSummary};
pub use scenario::ScenarioRunner;
