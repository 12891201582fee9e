//! Month-by-month amortization schedule.
//!
//! Only built when a caller asks for it; the headline figures come from
//! [`calculate_with`](super::calculator::calculate_with) and never from
//! summing this schedule.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::{calculate_with, LoanInputs, LoanResult, TermPolicy};
use crate::error::MortgageError;
use crate::time_value;
use crate::types::*;
use crate::MortgageResult;

/// Final-payment adjustments larger than this are reported as a warning.
const ADJUSTMENT_TOLERANCE: Money = dec!(0.01);

/// Longest term a schedule is built for; one row is allocated per month.
pub const MAX_SCHEDULE_YEARS: u32 = 50;

/// Request for a full schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub loan: LoanInputs,
    /// `None` leaves the choice to the caller's default policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_policy: Option<TermPolicy>,
    /// Due date of the first payment; later payments fall on the same day of
    /// each following month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// One monthly payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub opening_balance: Money,
    /// Principal and interest only; escrow is not amortized
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Roll-up of twelve payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub summary: LoanResult,
    pub periods: Vec<SchedulePeriod>,
    pub yearly: Vec<YearSummary>,
    pub total_interest: Money,
    pub total_principal: Money,
    /// Last payment minus the level payment
    pub final_payment_adjustment: Money,
}

/// Build a month-by-month schedule that retires the loan exactly.
pub fn build_schedule(
    input: &ScheduleInput,
) -> MortgageResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let summary = calculate_with(&input.loan, input.term_policy.unwrap_or_default())?;
    if summary.term_years > MAX_SCHEDULE_YEARS {
        return Err(MortgageError::InvalidTerm {
            years: i64::from(summary.term_years),
        });
    }
    let rate = summary.monthly_rate;
    let level_payment = summary.monthly_principal_and_interest;
    let months = summary.number_of_months;

    let mut periods = Vec::with_capacity(months as usize);
    let mut yearly: Vec<YearSummary> = Vec::with_capacity(summary.term_years as usize);
    let mut balance = summary.loan_amount;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut final_payment_adjustment = Decimal::ZERO;

    for month in 1..=months {
        let opening = balance;
        let interest = time_value::period_interest(opening, rate)?;

        // The last payment absorbs accumulated rounding so the loan closes at 0
        let (payment, principal) = if month == months || level_payment - interest >= opening {
            (opening + interest, opening)
        } else {
            (level_payment, level_payment - interest)
        };
        if month == months {
            final_payment_adjustment = payment - level_payment;
        }

        balance = opening - principal;
        total_interest += interest;
        total_principal += principal;

        let payment_date = match input.first_payment_date {
            Some(first) => Some(first.checked_add_months(Months::new(month - 1)).ok_or_else(
                || MortgageError::InvalidInput {
                    field: "first_payment_date".into(),
                    reason: format!("Payment {month} falls outside the supported date range"),
                },
            )?),
            None => None,
        };

        let year = (month - 1) / 12 + 1;
        match yearly.last_mut() {
            Some(current) if current.year == year => {
                current.interest += interest;
                current.principal += principal;
                current.closing_balance = balance;
            }
            _ => yearly.push(YearSummary {
                year,
                interest,
                principal,
                closing_balance: balance,
            }),
        }

        periods.push(SchedulePeriod {
            month,
            payment_date,
            opening_balance: opening,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });

        if balance.is_zero() && month < months {
            warnings.push(format!("Loan retired early at month {month}"));
            break;
        }
    }

    if final_payment_adjustment.abs() > ADJUSTMENT_TOLERANCE {
        warnings.push(format!(
            "Final payment adjusted by {} to close the balance",
            final_payment_adjustment.round_dp(2)
        ));
    }

    let output = AmortizationSchedule {
        summary,
        periods,
        yearly,
        total_interest,
        total_principal,
        final_payment_adjustment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization schedule (level payment, final-period true-up)",
        &serde_json::json!({
            "loan_amount": output.summary.loan_amount.to_string(),
            "monthly_rate": rate.to_string(),
            "months": months,
            "first_payment_date": input.first_payment_date,
        }),
        warnings,
        elapsed,
        output,
    ))
}
