use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::simulator::ScheduleRow;
use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

/// Elapsed term split into whole years and leftover months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTermSplit {
    pub years: u32,
    pub months: u32,
}

impl LoanTermSplit {
    pub fn from_months(total_months: u32) -> Self {
        Self {
            years: total_months / 12,
            months: total_months % 12,
        }
    }
}

/// One sample of the yearly balance curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month: u32,
    /// Loan age in years, one decimal place
    pub year: Decimal,
    pub remaining_debt: Money,
    /// Interest, principal and extra payments made up to and including this month
    pub cumulative_paid: Money,
}

/// Annualised first-month principal repayment as a percentage of the principal.
pub fn repayment_rate(first_month_principal: Money, principal: Money) -> LoanResult<Percent> {
    if principal.is_zero() {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Repayment rate is undefined for a zero principal".into(),
        });
    }
    Ok(first_month_principal / principal * dec!(1200))
}

/// Sample the schedule once per loan year plus the final month.
pub fn balance_curve(schedule: &[ScheduleRow]) -> Vec<BalancePoint> {
    let last_index = schedule.len().saturating_sub(1);
    let mut cumulative_paid = Decimal::ZERO;
    let mut points = Vec::with_capacity(schedule.len() / 12 + 2);

    for (i, row) in schedule.iter().enumerate() {
        cumulative_paid += row.interest + row.principal + row.extra_payment;
        if i % 12 == 0 || i == last_index {
            points.push(BalancePoint {
                month: row.month,
                year: (Decimal::from(row.month) / dec!(12)).round_dp(1),
                remaining_debt: row.remaining_debt,
                cumulative_paid,
            });
        }
    }

    points
}
