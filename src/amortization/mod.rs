//! Amortization of fixed and variable-rate loans

mod engine;
mod schedule;

pub use engine::{
    amortize_fixed, amortize_variable, fixed_schedule, level_payment, monthly_payment, monthly_rate,
    variable_schedule, BALANCE_EPSILON,
};
pub use schedule::{AmortizationRow, AmortizationSchedule};
