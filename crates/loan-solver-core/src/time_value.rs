use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::types::{Money, Percent};
use crate::LoanResult;

fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / dec!(100) / dec!(12)
}

/// `(1 + r)^months`, or `InvalidInput` when it does not fit in a Decimal.
fn growth_factor(rate: Decimal, months: u32) -> LoanResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(months as u64)
        .ok_or_else(|| LoanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Compounding over {months} months overflows"),
        })
}

fn overflow(field: &str) -> LoanError {
    LoanError::InvalidInput {
        field: field.into(),
        reason: "Result does not fit in a Decimal".into(),
    }
}

fn validate(annual_rate_pct: Percent, months: u32) -> LoanResult<()> {
    if months == 0 {
        return Err(LoanError::InvalidInput {
            field: "months".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Rate must not be negative".into(),
        });
    }
    Ok(())
}

/// Level monthly payment that retires `principal` in `months` payments.
pub fn annuity_payment(principal: Money, annual_rate_pct: Percent, months: u32) -> LoanResult<Money> {
    validate(annual_rate_pct, months)?;

    let rate = monthly_rate(annual_rate_pct);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let factor = growth_factor(rate, months)?;
    let annuity_factor = (factor - Decimal::ONE)
        .checked_div(rate)
        .ok_or_else(|| overflow("annual_rate_pct"))?;
    if annuity_factor.is_zero() {
        return Err(LoanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annuity factor collapsed to zero".into(),
        });
    }

    (factor / annuity_factor)
        .checked_mul(principal)
        .ok_or_else(|| overflow("principal"))
}

/// Principal that a level monthly `payment` retires in `months` payments.
pub fn annuity_principal(payment: Money, annual_rate_pct: Percent, months: u32) -> LoanResult<Money> {
    validate(annual_rate_pct, months)?;

    let rate = monthly_rate(annual_rate_pct);
    if rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(months))
            .ok_or_else(|| overflow("payment"));
    }

    let factor = growth_factor(rate, months)?;
    (Decimal::ONE - Decimal::ONE / factor)
        .checked_div(rate)
        .and_then(|annuity_factor| annuity_factor.checked_mul(payment))
        .ok_or_else(|| overflow("payment"))
}
