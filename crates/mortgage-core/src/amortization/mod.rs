pub mod calculator;

#[cfg(feature = "schedule")]
pub mod schedule;

pub use calculator::{
    calculate, calculate_mortgage, calculate_with, LoanInputs, LoanResult, TermPolicy,
    DEFAULT_TERM_YEARS,
};
