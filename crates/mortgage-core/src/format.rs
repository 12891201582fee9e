//! Display formatting for calculator results.
//!
//! Everything here produces strings from a finished result; the numeric
//! values are never rounded in place.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::LoanResult;
use crate::types::Money;

/// Render `amount` with thousands separators and `decimals` fixed places.
///
/// Midpoints round away from zero, matching how the site has always shown
/// figures: `1798.655` → `"1,798.66"`, `647514.5` → `"647,515"` at 0 places.
pub fn format_currency(amount: Money, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match plain.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + whole.len() / 3 + 1);
    if rounded < Decimal::ZERO {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// The figures the calculator modal shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDisplay {
    pub monthly_payment: String,
    pub monthly_principal_and_interest: String,
    pub monthly_escrow: String,
    pub total_paid: String,
    pub total_interest: String,
    pub months: u32,
}

impl From<&LoanResult> for LoanDisplay {
    fn from(result: &LoanResult) -> Self {
        LoanDisplay {
            monthly_payment: format_currency(result.total_monthly_payment, 2),
            monthly_principal_and_interest: format_currency(
                result.monthly_principal_and_interest,
                2,
            ),
            monthly_escrow: format_currency(result.monthly_escrow, 2),
            total_paid: format_currency(result.total_payments, 0),
            total_interest: format_currency(result.total_interest, 0),
            months: result.number_of_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_currency(dec!(1798.6515754), 2), "1,798.65");
        assert_eq!(format_currency(dec!(647514.57), 0), "647,515");
        assert_eq!(format_currency(dec!(1234567.891), 2), "1,234,567.89");
        assert_eq!(format_currency(dec!(999), 2), "999.00");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(format_currency(dec!(0.125), 2), "0.13");
        assert_eq!(format_currency(dec!(2.5), 0), "3");
    }

    #[test]
    fn test_negative_and_zero() {
        assert_eq!(format_currency(dec!(-1234.5), 2), "-1,234.50");
        assert_eq!(format_currency(dec!(-0.001), 2), "0.00");
    }
}
