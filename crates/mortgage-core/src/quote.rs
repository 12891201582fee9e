//! Principal-only payment quote served to the site's calculator endpoint.
//!
//! Stricter than [`calculate`](crate::amortization::calculate): a missing or
//! non-positive term is an error rather than a 30-year default.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::{calculate_with, LoanInputs, TermPolicy};
use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// Longest term whose month count still fits in a `u32`.
const MAX_TERM_YEARS: i64 = (u32::MAX / 12) as i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub years: u32,
    pub monthly_payment: Money,
}

impl Quote {
    /// Payment quantized to cents with half-even rounding, e.g. `"1798.65"`.
    pub fn monthly_payment_display(&self) -> String {
        let cents = self
            .monthly_payment
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        format!("{cents:.2}")
    }
}

/// Monthly principal-and-interest payment for a loan of `principal`.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    years: i64,
) -> MortgageResult<Quote> {
    if years <= 0 || years > MAX_TERM_YEARS {
        return Err(MortgageError::InvalidTerm { years });
    }
    if principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidLoanAmount {
            loan_amount: principal,
        });
    }

    let years = years as u32;
    let inputs = LoanInputs::new(principal, annual_rate_percent, Some(years));
    let result = calculate_with(&inputs, TermPolicy::Reject)?;

    Ok(Quote {
        principal,
        annual_rate_percent,
        years,
        monthly_payment: result.monthly_principal_and_interest,
    })
}
