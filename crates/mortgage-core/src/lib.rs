pub mod amortization;
pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "quote")]
pub mod quote;

pub use amortization::{calculate, calculate_with, LoanInputs, LoanResult, TermPolicy};
pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
