use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Convert an annual percentage (6 = 6%/yr) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Compound growth factor (1 + rate)^nper.
///
/// Evaluated by repeated squaring on 96-bit decimals, so every intermediate
/// keeps 28 significant digits and `factor - 1` stays accurate for small
/// monthly rates over long terms. Returns `None` once the factor leaves the
/// representable range.
pub fn growth_factor(rate: Rate, nper: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powu(u64::from(nper))
}

/// Level payment that retires `present_value` over `nper` periods at `rate`.
///
/// Returned as a positive amount (the borrower's outflow). A zero rate
/// degenerates to straight-line repayment.
pub fn pmt(rate: Rate, nper: u32, present_value: Money) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let periods = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(present_value / periods);
    }

    // f / (f - 1) tends to 1 as f grows; past the decimal range it is 1 to
    // within the last representable digit.
    let ratio = match growth_factor(rate, nper) {
        Some(factor) => {
            let denominator = factor - Decimal::ONE;
            if denominator.is_zero() {
                return Ok(present_value / periods);
            }
            factor
                .checked_div(denominator)
                .ok_or_else(|| MortgageError::Overflow {
                    context: "PMT annuity ratio".into(),
                })?
        }
        None => Decimal::ONE,
    };

    present_value
        .checked_mul(rate)
        .and_then(|interest_only| interest_only.checked_mul(ratio))
        .ok_or_else(|| MortgageError::Overflow {
            context: "PMT level payment".into(),
        })
}

/// Interest accrued on `balance` over one period.
pub fn period_interest(balance: Money, rate: Rate) -> MortgageResult<Money> {
    balance
        .checked_mul(rate)
        .ok_or_else(|| MortgageError::Overflow {
            context: "period interest".into(),
        })
}
