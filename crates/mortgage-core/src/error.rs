use rust_decimal::Decimal;
use thiserror::Error;

/// Re-prompt text shown to the user for a bad principal or rate.
pub const INVALID_PRINCIPAL_OR_RATE: &str =
    "Please enter valid principal and interest rate values.";

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid loan amount: {loan_amount} (principal must be greater than zero)")]
    InvalidLoanAmount { loan_amount: Decimal },

    #[error("Invalid interest rate: {rate}% (rate must not be negative)")]
    InvalidRate { rate: Decimal },

    #[error("Invalid term: {years} years (term must be a positive number of years)")]
    InvalidTerm { years: i64 },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    /// Short message suitable for showing next to the calculator form.
    pub fn user_message(&self) -> String {
        match self {
            MortgageError::InvalidLoanAmount { .. } | MortgageError::InvalidRate { .. } => {
                INVALID_PRINCIPAL_OR_RATE.to_string()
            }
            MortgageError::InvalidTerm { .. } => "years must be > 0".to_string(),
            MortgageError::InvalidInput { field, reason } => format!("{field}: {reason}"),
            MortgageError::Overflow { .. } => {
                "The values entered are too large to calculate.".to_string()
            }
            MortgageError::SerializationError(_) => "Malformed request.".to_string(),
        }
    }

    /// Validation failures the caller can fix by re-entering values.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MortgageError::SerializationError(_))
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_principal_and_rate_share_user_message() {
        let amount = MortgageError::InvalidLoanAmount {
            loan_amount: dec!(0),
        };
        let rate = MortgageError::InvalidRate { rate: dec!(-1) };
        assert_eq!(amount.user_message(), INVALID_PRINCIPAL_OR_RATE);
        assert_eq!(rate.user_message(), INVALID_PRINCIPAL_OR_RATE);
        assert!(amount.is_recoverable());
    }

    #[test]
    fn test_display_names_the_offending_value() {
        let err = MortgageError::InvalidLoanAmount {
            loan_amount: dec!(-5000),
        };
        assert!(err.to_string().contains("-5000"));
    }
}
