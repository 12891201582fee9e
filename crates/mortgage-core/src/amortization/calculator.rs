use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::error::MortgageError;
use crate::time_value;
use crate::types::*;
use crate::MortgageResult;

/// Term used when the caller leaves it blank or enters something unusable.
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Down payment share below which lenders usually require PMI.
const PMI_THRESHOLD: Rate = dec!(0.20);

const MONTHS_PER_YEAR: u32 = 12;

/// What to do with a missing or zero loan term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "years")]
pub enum TermPolicy {
    /// Substitute the given number of years
    Default(u32),
    /// Fail with `InvalidTerm`
    Reject,
}

impl Default for TermPolicy {
    fn default() -> Self {
        TermPolicy::Default(DEFAULT_TERM_YEARS)
    }
}

/// Loan terms captured from the calculator form for a single calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Purchase price, before any down payment
    pub property_price: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// Annual rate as a percentage (6.5 = 6.5%)
    pub annual_rate_percent: Percent,
    /// Anything other than a whole, non-negative number of years reads as
    /// missing and is resolved by the [`TermPolicy`]
    #[serde(
        default,
        deserialize_with = "lenient_term",
        skip_serializing_if = "Option::is_none"
    )]
    pub term_years: Option<u32>,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub annual_pmi: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
}

impl LoanInputs {
    pub fn new(
        property_price: Money,
        annual_rate_percent: Percent,
        term_years: Option<u32>,
    ) -> Self {
        LoanInputs {
            property_price,
            annual_rate_percent,
            term_years,
            ..Default::default()
        }
    }

    pub fn with_down_payment(mut self, down_payment: Money) -> Self {
        self.down_payment = down_payment;
        self
    }

    pub fn with_property_tax(mut self, annual: Money) -> Self {
        self.annual_property_tax = annual;
        self
    }

    pub fn with_insurance(mut self, annual: Money) -> Self {
        self.annual_insurance = annual;
        self
    }

    pub fn with_pmi(mut self, annual: Money) -> Self {
        self.annual_pmi = annual;
        self
    }

    pub fn with_hoa(mut self, monthly: Money) -> Self {
        self.monthly_hoa = monthly;
        self
    }

    /// Amount actually borrowed.
    pub fn loan_amount(&self) -> Money {
        self.property_price - self.down_payment
    }
}

/// Derived payment figures for one set of loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub loan_amount: Money,
    pub monthly_rate: Rate,
    /// Effective term after the term policy was applied
    pub term_years: u32,
    pub number_of_months: u32,
    pub monthly_principal_and_interest: Money,
    /// Taxes, insurance, PMI and HOA dues per month
    pub monthly_escrow: Money,
    pub total_monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
}

/// Calculate a fixed-rate mortgage payment, defaulting a blank term to 30 years.
pub fn calculate(inputs: &LoanInputs) -> MortgageResult<LoanResult> {
    calculate_with(inputs, TermPolicy::default())
}

/// Calculate a fixed-rate mortgage payment under an explicit term policy.
///
/// Validation runs before any arithmetic: the loan amount must be positive
/// and the rate non-negative. A zero rate is repaid straight-line.
pub fn calculate_with(
    inputs: &LoanInputs,
    term_policy: TermPolicy,
) -> MortgageResult<LoanResult> {
    if inputs.property_price < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must not be negative".into(),
        });
    }
    if inputs.down_payment < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must not be negative".into(),
        });
    }

    let loan_amount = inputs.loan_amount();
    if loan_amount <= Decimal::ZERO {
        return Err(MortgageError::InvalidLoanAmount { loan_amount });
    }
    if inputs.annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidRate {
            rate: inputs.annual_rate_percent,
        });
    }
    validate_escrow(inputs)?;

    let term_years = resolve_term(inputs.term_years, term_policy)?;
    let number_of_months = term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or(MortgageError::InvalidTerm {
            years: i64::from(term_years),
        })?;
    let months = Decimal::from(number_of_months);

    let monthly_rate = time_value::monthly_rate(inputs.annual_rate_percent);
    let monthly_principal_and_interest =
        time_value::pmt(monthly_rate, number_of_months, loan_amount)?;

    let monthly_escrow = monthly_escrow(inputs)?;
    let total_monthly_payment = monthly_principal_and_interest
        .checked_add(monthly_escrow)
        .ok_or_else(|| overflow("total monthly payment"))?;
    let total_payments = total_monthly_payment
        .checked_mul(months)
        .ok_or_else(|| overflow("total payments"))?;

    let total_interest = if monthly_rate.is_zero() {
        Decimal::ZERO
    } else {
        let total_principal_and_interest = monthly_principal_and_interest
            .checked_mul(months)
            .ok_or_else(|| overflow("total principal and interest"))?;
        (total_principal_and_interest - loan_amount).max(Decimal::ZERO)
    };

    Ok(LoanResult {
        loan_amount,
        monthly_rate,
        term_years,
        number_of_months,
        monthly_principal_and_interest,
        monthly_escrow,
        total_monthly_payment,
        total_payments,
        total_interest,
    })
}

/// Calculate the payment and wrap it in the standard output envelope.
pub fn calculate_mortgage(
    inputs: &LoanInputs,
    term_policy: TermPolicy,
) -> MortgageResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let result = calculate_with(inputs, term_policy)?;

    let mut warnings: Vec<String> = Vec::new();
    if inputs.term_years != Some(result.term_years) {
        warnings.push(format!(
            "term_years missing or invalid; defaulted to {} years",
            result.term_years
        ));
    }
    if result.monthly_rate.is_zero() {
        warnings.push("Zero interest rate: principal repaid straight-line".into());
    }
    if !inputs.property_price.is_zero()
        && inputs.down_payment / inputs.property_price < PMI_THRESHOLD
        && inputs.annual_pmi.is_zero()
    {
        warnings.push(
            "Down payment below 20% of price with no PMI entered; lenders usually require PMI"
                .into(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization (level monthly annuity)",
        &serde_json::json!({
            "property_price": inputs.property_price.to_string(),
            "down_payment": inputs.down_payment.to_string(),
            "annual_rate_percent": inputs.annual_rate_percent.to_string(),
            "term_years": result.term_years,
            "term_policy": term_policy,
        }),
        warnings,
        elapsed,
        result,
    ))
}

/// (tax + insurance + PMI) / 12 + HOA
fn monthly_escrow(inputs: &LoanInputs) -> MortgageResult<Money> {
    let annual = inputs
        .annual_property_tax
        .checked_add(inputs.annual_insurance)
        .and_then(|sum| sum.checked_add(inputs.annual_pmi))
        .ok_or_else(|| overflow("annual escrow"))?;
    (annual / Decimal::from(MONTHS_PER_YEAR))
        .checked_add(inputs.monthly_hoa)
        .ok_or_else(|| overflow("monthly escrow"))
}

fn validate_escrow(inputs: &LoanInputs) -> MortgageResult<()> {
    let components = [
        ("annual_property_tax", inputs.annual_property_tax),
        ("annual_insurance", inputs.annual_insurance),
        ("annual_pmi", inputs.annual_pmi),
        ("monthly_hoa", inputs.monthly_hoa),
    ];
    for (field, amount) in components {
        if amount < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: field.into(),
                reason: "Escrow components must not be negative".into(),
            });
        }
    }
    Ok(())
}

fn lenient_term<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(whole_years))
}

fn whole_years(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(years) => u32::try_from(years).ok(),
            None => n
                .as_f64()
                .filter(|years| years.fract() == 0.0)
                .filter(|years| (0.0..=f64::from(u32::MAX)).contains(years))
                .map(|years| years as u32),
        },
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn resolve_term(requested: Option<u32>, policy: TermPolicy) -> MortgageResult<u32> {
    match (requested, policy) {
        (Some(years), _) if years > 0 => Ok(years),
        (_, TermPolicy::Default(years)) if years > 0 => Ok(years),
        (requested, _) => Err(MortgageError::InvalidTerm {
            years: requested.map(i64::from).unwrap_or(0),
        }),
    }
}

fn overflow(context: &str) -> MortgageError {
    MortgageError::Overflow {
        context: context.into(),
    }
}
