use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Monthly payment {payment} is less than interest {interest} in month {month} - loan term would be infinite")]
    PaymentBelowInterest {
        month: u32,
        payment: Decimal,
        interest: Decimal,
    },

    #[error("Loan cannot be paid off within the specified term of {term_months} months (remaining debt: {remaining_debt})")]
    TermExceeded {
        term_months: u32,
        remaining_debt: Decimal,
    },

    #[error("Loan term exceeds maximum of {limit} months (remaining debt: {remaining_debt})")]
    IterationLimitExceeded { limit: u32, remaining_debt: Decimal },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    SolverDidNotConverge {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Closed set of failure categories a presentation layer maps to messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    PaymentBelowInterest,
    TermExceeded,
    IterationLimitExceeded,
    SolverDidNotConverge,
}

impl LoanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoanError::InvalidInput { .. }
            | LoanError::DateError(_)
            | LoanError::SerializationError(_) => ErrorKind::InvalidInput,
            LoanError::PaymentBelowInterest { .. } => ErrorKind::PaymentBelowInterest,
            LoanError::TermExceeded { .. } => ErrorKind::TermExceeded,
            LoanError::IterationLimitExceeded { .. } => ErrorKind::IterationLimitExceeded,
            LoanError::SolverDidNotConverge { .. } => ErrorKind::SolverDidNotConverge,
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
