mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::payment::PaymentArgs;
use commands::quote::QuoteArgs;
use commands::schedule::ScheduleArgs;

/// Fixed-rate mortgage payment estimates
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Fixed-rate mortgage payment estimates",
    long_about = "Estimate monthly mortgage payments with decimal precision. \
                  Covers principal and interest, escrow (tax, insurance, PMI, HOA), \
                  lifetime totals, and month-by-month amortization schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, escrow and lifetime totals for a home purchase
    Payment(PaymentArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Principal-and-interest quote for a loan amount (strict term)
    Quote(QuoteArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Quote(args) => commands::quote::run_quote(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
