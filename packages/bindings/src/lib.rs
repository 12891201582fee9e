//! In-process engine for the site's calculator modal.
//!
//! Every entry point takes and returns strings so the JavaScript side never
//! handles binary floats; amounts stay decimal end to end.

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use mortgage_core::amortization::schedule::{self, ScheduleInput};
use mortgage_core::amortization::{self, LoanInputs, TermPolicy};
use mortgage_core::format::{self, LoanDisplay};
use mortgage_core::quote;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| to_napi_error(format!("{field}: '{raw}' is not a number ({e})")))
}

/// Calculator request as the modal sends it.
#[derive(Deserialize)]
struct CalculateRequest {
    #[serde(flatten)]
    loan: LoanInputs,
    #[serde(default)]
    term_policy: TermPolicy,
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// Full payment breakdown plus the display strings the modal renders.
#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let request: CalculateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_mortgage(&request.loan, request.term_policy)
        .map_err(|e| to_napi_error(e.user_message()))?;
    let display = LoanDisplay::from(&output.result);
    serde_json::to_string(&serde_json::json!({
        "output": output,
        "display": display,
    }))
    .map_err(to_napi_error)
}

/// Month-by-month schedule for an explicit request.
#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Quote and formatting
// ---------------------------------------------------------------------------

/// Strict quote, same contract as the server's `/api/calc/`.
#[napi]
pub fn monthly_payment(principal: String, rate: String, years: i64) -> NapiResult<String> {
    let principal = parse_decimal("principal", &principal)?;
    let rate = parse_decimal("rate", &rate)?;
    let quote = quote::monthly_payment(principal, rate, years).map_err(to_napi_error)?;
    Ok(quote.monthly_payment_display())
}

#[napi]
pub fn format_currency(amount: String, decimals: u32) -> NapiResult<String> {
    let amount = parse_decimal("amount", &amount)?;
    Ok(format::format_currency(amount, decimals))
}
