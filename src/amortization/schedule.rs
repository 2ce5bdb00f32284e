//! Month-by-month amortization output

use serde::{Deserialize, Serialize};

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month index (0-based)
    pub month: usize,
    /// Monthly rate as a decimal (annual % / 100 / 12)
    pub monthly_rate: f64,
    /// Scheduled payment for the month
    pub payment: f64,
    pub interest: f64,
    pub principal_paid: f64,
    /// Balance after this month's payment
    pub remaining_principal: f64,
}

/// Complete amortization schedule for one loan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn add_row(&mut self, row: AmortizationRow) {
        self.rows.push(row);
    }

    /// Sum of scheduled payments
    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal_paid).sum()
    }

    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.remaining_principal).unwrap_or(0.0)
    }

    /// Distinct payment amounts in the order they take effect, with the month each starts
    pub fn payment_changes(&self) -> Vec<(usize, f64)> {
        let mut changes: Vec<(usize, f64)> = Vec::new();
        for row in &self.rows {
            if changes.last().map_or(true, |&(_, p)| p != row.payment) {
                changes.push((row.month, row.payment));
            }
        }
        changes
    }
}
