//! Level-payment amortization for fixed and annually resetting rates
//!
//! Rates come in as annual percentages and are applied monthly as
//! `annual / 100 / 12`. A variable-rate loan re-amortizes the remaining balance
//! over the remaining months at month 0 and at every annual reset after the
//! teaser period, the way an ARM servicer recomputes the payment.

use std::iter;

use super::schedule::{AmortizationRow, AmortizationSchedule};
use crate::loan::TEASER_YEARS;

/// Balances below this are treated as paid off
pub const BALANCE_EPSILON: f64 = 0.01;

const TEASER_MONTHS: usize = TEASER_YEARS as usize * 12;

/// Convert an annual percentage to a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Payment that amortizes `principal` over `months` at a constant monthly rate
///
/// A zero rate falls back to straight-line repayment.
pub fn level_payment(principal: f64, monthly_rate: f64, months: usize) -> f64 {
    if months == 0 {
        return 0.0;
    }

    if monthly_rate == 0.0 {
        return principal / months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Monthly payment on a fixed-rate loan
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    level_payment(principal, monthly_rate(annual_rate_percent), term_years as usize * 12)
}

/// Total nominal amount paid on a fixed-rate loan
pub fn amortize_fixed(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    // Straight-line repayment returns exactly the principal
    if monthly_rate(annual_rate_percent) == 0.0 {
        return principal;
    }

    monthly_payment(principal, annual_rate_percent, term_years) * 12.0 * term_years as f64
}

/// Total nominal amount paid on a loan whose rate follows `annual_rate_path`
///
/// One entry per year; the loan term is the path length.
pub fn amortize_variable(principal: f64, annual_rate_path: &[f64]) -> f64 {
    amortize_months(
        principal,
        expand_monthly(annual_rate_path),
        annual_rate_path.len() * 12,
        is_reset_month,
        |_| {},
    )
}

/// Monthly schedule for a fixed-rate loan
pub fn fixed_schedule(principal: f64, annual_rate_percent: f64, term_years: u32) -> AmortizationSchedule {
    let months = term_years as usize * 12;
    let rate = monthly_rate(annual_rate_percent);
    let mut schedule = AmortizationSchedule::default();

    amortize_months(principal, iter::repeat(rate).take(months), months, |_| false, |row| {
        schedule.add_row(row)
    });

    schedule
}

/// Monthly schedule for a loan whose rate follows `annual_rate_path`
pub fn variable_schedule(principal: f64, annual_rate_path: &[f64]) -> AmortizationSchedule {
    let mut schedule = AmortizationSchedule::default();

    amortize_months(
        principal,
        expand_monthly(annual_rate_path),
        annual_rate_path.len() * 12,
        is_reset_month,
        |row| schedule.add_row(row),
    );

    schedule
}

/// Annual resets after the teaser: months 60, 72, 84, ...
fn is_reset_month(month: usize) -> bool {
    month >= TEASER_MONTHS && month % 12 == 0
}

fn expand_monthly(annual_rate_path: &[f64]) -> impl Iterator<Item = f64> + '_ {
    annual_rate_path
        .iter()
        .flat_map(|&annual| iter::repeat(monthly_rate(annual)).take(12))
}

/// Shared month loop; returns the total of scheduled payments
///
/// The payment is recomputed at month 0 and wherever `is_reset` holds, from the
/// remaining balance over the remaining months.
fn amortize_months<I, R, F>(principal: f64, monthly_rates: I, total_months: usize, is_reset: R, mut visit: F) -> f64
where
    I: Iterator<Item = f64>,
    R: Fn(usize) -> bool,
    F: FnMut(AmortizationRow),
{
    let mut remaining = principal;
    let mut total_paid = 0.0;
    let mut payment = 0.0;

    for (month, rate) in monthly_rates.enumerate() {
        if month == 0 || is_reset(month) {
            payment = level_payment(remaining, rate, total_months - month);
        }

        let interest = remaining * rate;
        // Caps the final month against floating-point overpayment
        let principal_paid = (payment - interest).min(remaining);

        remaining -= principal_paid;
        total_paid += payment;

        if remaining < BALANCE_EPSILON {
            remaining = 0.0;
        }

        visit(AmortizationRow {
            month,
            monthly_rate: rate,
            payment,
            interest,
            principal_paid,
            remaining_principal: remaining,
        });
    }

    total_paid
}
