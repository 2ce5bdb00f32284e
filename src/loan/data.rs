//! Loan term structures for the fixed-rate and 5/1 ARM products

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of the ARM's fixed teaser period in years (the "5" in 5/1)
pub const TEASER_YEARS: u32 = 5;

/// Fixed-rate mortgage terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedRateTerms {
    /// Annual note rate in percent (6.75 = 6.75%)
    pub annual_rate_percent: f64,
}

impl Default for FixedRateTerms {
    fn default() -> Self {
        Self { annual_rate_percent: 6.75 }
    }
}

/// 5/1 adjustable-rate mortgage terms
///
/// All values are percentages. Caps limit rate *increases* only: the initial cap
/// applies at the first reset, the periodic cap at every later reset, and the
/// lifetime cap bounds the rate at `initial_rate_percent + lifetime_cap_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmTerms {
    /// Teaser rate held for the first `TEASER_YEARS` years
    pub initial_rate_percent: f64,

    /// Spread added to the index at each reset
    pub margin_percent: f64,

    /// Maximum increase at the first reset
    pub initial_cap_percent: f64,

    /// Maximum increase at each subsequent reset
    pub periodic_cap_percent: f64,

    /// Maximum increase over the initial rate for the life of the loan
    pub lifetime_cap_percent: f64,
}

impl ArmTerms {
    /// Absolute ceiling the rate may never exceed
    pub fn lifetime_ceiling(&self) -> f64 {
        self.initial_rate_percent + self.lifetime_cap_percent
    }

    /// Step cap applicable at the given post-teaser reset (0 = first reset)
    pub fn step_cap(&self, reset_index: usize) -> f64 {
        if reset_index == 0 {
            self.initial_cap_percent
        } else {
            self.periodic_cap_percent
        }
    }
}

impl Default for ArmTerms {
    fn default() -> Self {
        Self {
            initial_rate_percent: 6.25,
            margin_percent: 2.75,
            initial_cap_percent: 2.0,
            periodic_cap_percent: 2.0,
            lifetime_cap_percent: 5.0,
        }
    }
}

/// Complete set of terms compared by a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Loan term in whole years (same for both products)
    pub term_years: u32,

    /// Fixed-rate alternative
    pub fixed: FixedRateTerms,

    /// ARM alternative
    pub arm: ArmTerms,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            principal: 300_000.0,
            term_years: 30,
            fixed: FixedRateTerms::default(),
            arm: ArmTerms::default(),
        }
    }
}

impl LoanTerms {
    /// Number of monthly payments over the full term
    pub fn months(&self) -> usize {
        self.term_years as usize * 12
    }

    /// Reject terms that cannot describe a meaningful fixed vs 5/1 ARM comparison
    pub fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("principal", self.principal),
            ("fixed rate", self.fixed.annual_rate_percent),
            ("ARM initial rate", self.arm.initial_rate_percent),
            ("ARM margin", self.arm.margin_percent),
            ("initial cap", self.arm.initial_cap_percent),
            ("periodic cap", self.arm.periodic_cap_percent),
            ("lifetime cap", self.arm.lifetime_cap_percent),
        ];
        for (field, value) in rates {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { field });
            }
        }

        if self.principal <= 0.0 {
            return Err(ValidationError::NonPositivePrincipal(self.principal));
        }
        if self.term_years == 0 {
            return Err(ValidationError::NonPositiveTerm);
        }
        if self.term_years <= TEASER_YEARS {
            return Err(ValidationError::TermWithinTeaser {
                term_years: self.term_years,
                teaser_years: TEASER_YEARS,
            });
        }

        // Skip the principal entry; the rest are rates and caps
        for &(field, value) in &rates[1..] {
            if value < 0.0 {
                return Err(ValidationError::NegativeRate { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let terms = LoanTerms::default();
        assert!(terms.validate().is_ok());
        assert_eq!(terms.months(), 360);
        assert_eq!(terms.arm.lifetime_ceiling(), 11.25);
    }

    #[test]
    fn test_term_within_teaser_rejected() {
        for term_years in 1..=TEASER_YEARS {
            let terms = LoanTerms { term_years, ..LoanTerms::default() };
            assert_eq!(
                terms.validate(),
                Err(ValidationError::TermWithinTeaser { term_years, teaser_years: TEASER_YEARS })
            );
        }

        let terms = LoanTerms { term_years: 6, ..LoanTerms::default() };
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_zero_term_rejected() {
        let terms = LoanTerms { term_years: 0, ..LoanTerms::default() };
        assert_eq!(terms.validate(), Err(ValidationError::NonPositiveTerm));
    }

    #[test]
    fn test_non_positive_principal_rejected() {
        for principal in [0.0, -1.0] {
            let terms = LoanTerms { principal, ..LoanTerms::default() };
            assert_eq!(terms.validate(), Err(ValidationError::NonPositivePrincipal(principal)));
        }
    }

    #[test]
    fn test_negative_rates_and_caps_rejected() {
        let mut terms = LoanTerms::default();
        terms.arm.periodic_cap_percent = -0.5;
        assert_eq!(
            terms.validate(),
            Err(ValidationError::NegativeRate { field: "periodic cap", value: -0.5 })
        );

        let mut terms = LoanTerms::default();
        terms.fixed.annual_rate_percent = -1.0;
        assert!(matches!(terms.validate(), Err(ValidationError::NegativeRate { field: "fixed rate", .. })));
    }

    #[test]
    fn test_zero_rates_allowed() {
        let mut terms = LoanTerms::default();
        terms.fixed.annual_rate_percent = 0.0;
        terms.arm.margin_percent = 0.0;
        terms.arm.lifetime_cap_percent = 0.0;
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let mut terms = LoanTerms::default();
        terms.arm.margin_percent = f64::NAN;
        assert_eq!(terms.validate(), Err(ValidationError::NonFiniteValue { field: "ARM margin" }));
    }

    #[test]
    fn test_step_cap_selection() {
        let arm = ArmTerms { initial_cap_percent: 5.0, periodic_cap_percent: 1.0, ..ArmTerms::default() };
        assert_eq!(arm.step_cap(0), 5.0);
        assert_eq!(arm.step_cap(1), 1.0);
        assert_eq!(arm.step_cap(20), 1.0);
    }
}
