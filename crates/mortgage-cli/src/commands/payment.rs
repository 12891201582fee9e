use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization::{self, LoanInputs, TermPolicy};
use mortgage_core::format::LoanDisplay;

use crate::input;

/// Loan terms shared by `payment` and `schedule`
#[derive(Args)]
pub struct LoanArgs {
    /// Purchase price of the property
    #[arg(long, alias = "principal")]
    pub price: Option<Decimal>,

    /// Cash paid up front; reduces the amount borrowed
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate as a percentage (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years (defaults to 30 unless --strict-term)
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub tax: Decimal,

    /// Annual homeowner's insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Annual private mortgage insurance
    #[arg(long, default_value = "0")]
    pub pmi: Decimal,

    /// Monthly HOA dues
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,

    /// Fail on a missing or zero term instead of assuming 30 years
    #[arg(long)]
    pub strict_term: bool,
}

impl LoanArgs {
    pub fn term_policy(&self) -> TermPolicy {
        if self.strict_term {
            TermPolicy::Reject
        } else {
            TermPolicy::default()
        }
    }

    pub fn to_inputs(&self) -> Result<LoanInputs, Box<dyn std::error::Error>> {
        let price = self
            .price
            .ok_or("--price is required (or provide --input)")?;
        let rate = self
            .rate
            .ok_or("--rate is required (or provide --input)")?;

        Ok(LoanInputs::new(price, rate, self.years)
            .with_down_payment(self.down_payment)
            .with_property_tax(self.tax)
            .with_insurance(self.insurance)
            .with_pmi(self.pmi)
            .with_hoa(self.hoa))
    }
}

/// Arguments for a payment estimate
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Include the rounded figures the calculator modal shows
    #[arg(long)]
    pub display: bool,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: LoanInputs = match input::load(args.input.as_deref())? {
        Some(value) => serde_json::from_value(value)?,
        None => args.loan.to_inputs()?,
    };

    let output = amortization::calculate_mortgage(&inputs, args.loan.term_policy())?;
    let mut value = serde_json::to_value(&output)?;
    if args.display {
        if let Value::Object(ref mut map) = value {
            map.insert(
                "display".into(),
                serde_json::to_value(LoanDisplay::from(&output.result))?,
            );
        }
    }
    Ok(value)
}
