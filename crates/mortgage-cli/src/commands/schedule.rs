use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use mortgage_core::amortization::schedule::{self, ScheduleInput};

use super::payment::LoanArgs;
use crate::input;

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML schedule input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Due date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Print only the yearly roll-up
    #[arg(long, conflicts_with = "monthly")]
    pub yearly: bool,

    /// Print only the monthly rows
    #[arg(long)]
    pub monthly: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut schedule_input: ScheduleInput = match input::load(args.input.as_deref())? {
        Some(value) => serde_json::from_value(value)?,
        None => ScheduleInput {
            loan: args.loan.to_inputs()?,
            term_policy: None,
            first_payment_date: args.start_date,
        },
    };
    // A policy in the input file wins over --strict-term
    if schedule_input.term_policy.is_none() {
        schedule_input.term_policy = Some(args.loan.term_policy());
    }

    let output = schedule::build_schedule(&schedule_input)?;
    if args.yearly {
        return Ok(serde_json::to_value(&output.result.yearly)?);
    }
    if args.monthly {
        return Ok(serde_json::to_value(&output.result.periods)?);
    }
    Ok(serde_json::to_value(output)?)
}
