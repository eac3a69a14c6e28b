pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "solvers")]
pub mod solvers;

pub use error::{ErrorKind, LoanError};
pub use types::*;

/// Standard result type for all loan-solver operations
pub type LoanResult<T> = Result<T, LoanError>;
