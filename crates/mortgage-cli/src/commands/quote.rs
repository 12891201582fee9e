use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_core::quote;

/// Arguments for a principal-and-interest quote
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years; must be positive
    #[arg(long)]
    pub years: i64,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote = quote::monthly_payment(args.principal, args.rate, args.years)?;
    Ok(json!({
        "result": {
            "monthly_payment": quote.monthly_payment_display(),
            "principal": quote.principal,
            "annual_rate_percent": quote.annual_rate_percent,
            "years": quote.years,
        }
    }))
}
