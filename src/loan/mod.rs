//! Loan terms, validation, and loading

mod data;
pub mod loader;

pub use data::{ArmTerms, FixedRateTerms, LoanTerms, TEASER_YEARS};
pub use loader::{load_terms, load_terms_from_reader};
