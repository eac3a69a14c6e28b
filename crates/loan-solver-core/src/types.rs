use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::LoanResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed as percentages (5 = 5%), matching how borrowers quote them.
pub type Percent = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> LoanResult<()> {
    if value < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: field.into(),
            reason: "Must not be negative".into(),
        });
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> LoanResult<()> {
    if value <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: field.into(),
            reason: "Must be greater than zero".into(),
        });
    }
    Ok(())
}

pub(crate) fn require_term(field: &str, months: u32) -> LoanResult<()> {
    if months == 0 {
        return Err(LoanError::InvalidInput {
            field: field.into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    Ok(())
}
