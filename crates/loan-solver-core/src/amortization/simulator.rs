use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

/// Debt at or below this amount counts as repaid.
pub const PAYOFF_THRESHOLD: Money = dec!(0.01);

/// Hard bound on simulated months (100 years), independent of any term cap.
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

const MONTHS_PER_YEAR: u32 = 12;

/// Input for a single amortization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub principal: Money,
    /// Annual interest rate as a percentage (5 = 5%)
    pub annual_rate_pct: Percent,
    pub monthly_payment: Money,
    /// Paid on top of the regular payment at the end of every loan year
    #[serde(default)]
    pub annual_extra_payment: Money,
    pub start_date: NaiveDate,
    /// Fail with `TermExceeded` if debt remains after this many months
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_cap_months: Option<u32>,
}

/// A single month of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub date: NaiveDate,
    pub interest: Money,
    pub principal: Money,
    pub extra_payment: Money,
    pub remaining_debt: Money,
}

/// Successful amortization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub schedule: Vec<ScheduleRow>,
    pub total_payment: Money,
    pub total_interest: Money,
    pub months: u32,
}

impl Simulation {
    pub fn first_month_principal(&self) -> Money {
        self.schedule
            .first()
            .map(|row| row.principal)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Simple monthly interest on the current balance. `None` if the balance has
/// grown past what a Decimal can hold.
pub fn monthly_interest(balance: Money, annual_rate_pct: Percent) -> Option<Money> {
    balance
        .checked_mul(annual_rate_pct)
        .map(|scaled| scaled / dec!(100) / dec!(12))
}

/// Whether month index `m` (0-based) closes a loan year.
pub fn is_year_end(month_index: u32) -> bool {
    (month_index + 1) % MONTHS_PER_YEAR == 0
}

/// Advance `start` by `months` calendar months, keeping the day where the
/// target month allows it.
pub fn advance_months(start: NaiveDate, months: u32) -> LoanResult<NaiveDate> {
    start.checked_add_months(Months::new(months)).ok_or_else(|| {
        LoanError::DateError(format!("Cannot advance {start} by {months} months"))
    })
}

/// Run the month-by-month amortization until the debt is repaid or a
/// failure condition is hit.
pub fn simulate(input: &SimulationInput) -> LoanResult<Simulation> {
    require_non_negative("principal", input.principal)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_non_negative("monthly_payment", input.monthly_payment)?;
    require_non_negative("annual_extra_payment", input.annual_extra_payment)?;
    if let Some(cap) = input.term_cap_months {
        require_term("term_cap_months", cap)?;
    }

    let mut schedule = Vec::new();
    let mut remaining_debt = input.principal;
    let mut total_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut month: u32 = 0;

    // A balance too large for Decimal is a runaway loan, not a panic.
    let diverged = |remaining_debt| LoanError::IterationLimitExceeded {
        limit: MAX_SIMULATION_MONTHS,
        remaining_debt,
    };

    while remaining_debt > PAYOFF_THRESHOLD {
        if month >= MAX_SIMULATION_MONTHS {
            debug!(remaining = %remaining_debt, "simulation hit the month limit");
            return Err(LoanError::IterationLimitExceeded {
                limit: MAX_SIMULATION_MONTHS,
                remaining_debt,
            });
        }
        if let Some(cap) = input.term_cap_months {
            if month >= cap {
                debug!(cap, remaining = %remaining_debt, "simulation ran past the term cap");
                return Err(LoanError::TermExceeded {
                    term_months: cap,
                    remaining_debt,
                });
            }
        }

        let interest = monthly_interest(remaining_debt, input.annual_rate_pct)
            .ok_or_else(|| diverged(remaining_debt))?;
        if input.monthly_payment < interest && input.annual_extra_payment.is_zero() {
            debug!(month = month + 1, %interest, "payment does not cover interest");
            return Err(LoanError::PaymentBelowInterest {
                month: month + 1,
                payment: input.monthly_payment,
                interest,
            });
        }

        let mut principal = input.monthly_payment - interest;
        let mut extra_payment = if is_year_end(month) {
            input.annual_extra_payment
        } else {
            Decimal::ZERO
        };

        let outflow = principal
            .checked_add(extra_payment)
            .ok_or_else(|| diverged(remaining_debt))?;

        // Final month pays exactly what is left; a pending extra payment is dropped.
        let outflow = if outflow > remaining_debt {
            principal = remaining_debt;
            extra_payment = Decimal::ZERO;
            remaining_debt
        } else {
            outflow
        };

        remaining_debt = remaining_debt
            .checked_sub(outflow)
            .ok_or_else(|| diverged(remaining_debt))?;
        total_payment = input
            .monthly_payment
            .checked_add(extra_payment)
            .and_then(|paid| total_payment.checked_add(paid))
            .ok_or_else(|| diverged(remaining_debt))?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| diverged(remaining_debt))?;

        schedule.push(ScheduleRow {
            month: month + 1,
            date: advance_months(input.start_date, month)?,
            interest,
            principal,
            extra_payment,
            remaining_debt: remaining_debt.max(Decimal::ZERO),
        });

        month += 1;
    }

    Ok(Simulation {
        schedule,
        total_payment,
        total_interest,
        months: month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn base_input() -> SimulationInput {
        SimulationInput {
            principal: dec!(1200),
            annual_rate_pct: Decimal::ZERO,
            monthly_payment: dec!(100),
            annual_extra_payment: Decimal::ZERO,
            start_date: start(),
            term_cap_months: None,
        }
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let sim = simulate(&base_input()).unwrap();
        assert_eq!(sim.months, 12);
        assert_eq!(sim.total_payment, dec!(1200));
        assert_eq!(sim.total_interest, Decimal::ZERO);
        assert_eq!(sim.schedule[0].remaining_debt, dec!(1100));
        assert_eq!(sim.schedule[11].remaining_debt, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_interest_on_balance() {
        let mut input = base_input();
        input.principal = dec!(12000);
        input.annual_rate_pct = dec!(12);
        input.monthly_payment = dec!(1000);
        let sim = simulate(&input).unwrap();
        // 12000 * 12% / 12 = 120 interest in month 1
        assert_eq!(sim.schedule[0].interest, dec!(120));
        assert_eq!(sim.schedule[0].principal, dec!(880));
        assert_eq!(sim.schedule[0].remaining_debt, dec!(11120));
    }

    #[test]
    fn test_final_month_clamps_principal() {
        let mut input = base_input();
        input.principal = dec!(250);
        let sim = simulate(&input).unwrap();
        assert_eq!(sim.months, 3);
        let last = sim.schedule.last().unwrap();
        assert_eq!(last.principal, dec!(50));
        assert_eq!(last.remaining_debt, Decimal::ZERO);
        // The full regular payment is still counted in the final month
        assert_eq!(sim.total_payment, dec!(300));
    }

    #[test]
    fn test_extra_payment_on_year_end_only() {
        let mut input = base_input();
        input.principal = dec!(5000);
        input.annual_extra_payment = dec!(1000);
        let sim = simulate(&input).unwrap();
        for row in &sim.schedule {
            if row.month % 12 == 0 {
                assert_eq!(row.extra_payment, dec!(1000));
            } else {
                assert_eq!(row.extra_payment, Decimal::ZERO);
            }
        }
        // 3900 left after year one, 1700 after year two, then six more months
        assert_eq!(sim.months, 30);
    }

    #[test]
    fn test_clamp_drops_final_extra_payment() {
        let mut input = base_input();
        input.principal = dec!(1150);
        input.annual_extra_payment = dec!(500);
        let sim = simulate(&input).unwrap();
        // After 11 months 50 remains; month 12 would pay 100 + 500
        assert_eq!(sim.months, 12);
        let last = sim.schedule.last().unwrap();
        assert_eq!(last.principal, dec!(50));
        assert_eq!(last.extra_payment, Decimal::ZERO);
        assert_eq!(sim.total_payment, dec!(1200));
    }

    #[test]
    fn test_payment_below_interest() {
        let mut input = base_input();
        input.principal = dec!(200000);
        input.annual_rate_pct = dec!(5);
        input.monthly_payment = dec!(500);
        let err = simulate(&input).unwrap_err();
        assert!(matches!(
            err,
            LoanError::PaymentBelowInterest { month: 1, .. }
        ));
    }

    #[test]
    fn test_extra_payment_disables_interest_guard() {
        let mut input = base_input();
        input.principal = dec!(10000);
        input.annual_rate_pct = dec!(12);
        input.monthly_payment = dec!(50);
        input.annual_extra_payment = dec!(5000);
        let sim = simulate(&input).unwrap();
        assert!(sim.months > 12);
    }

    #[test]
    fn test_term_cap_exceeded() {
        let mut input = base_input();
        input.term_cap_months = Some(6);
        let err = simulate(&input).unwrap_err();
        assert_eq!(
            err,
            LoanError::TermExceeded {
                term_months: 6,
                remaining_debt: dec!(600),
            }
        );
    }

    #[test]
    fn test_term_cap_met_exactly() {
        let mut input = base_input();
        input.term_cap_months = Some(12);
        let sim = simulate(&input).unwrap();
        assert_eq!(sim.months, 12);
    }

    #[test]
    fn test_iteration_limit() {
        // Interest exceeds payment but the extra payment keeps the guard quiet
        let mut input = base_input();
        input.principal = dec!(100000);
        input.annual_rate_pct = dec!(10);
        input.monthly_payment = dec!(100);
        input.annual_extra_payment = dec!(1);
        let err = simulate(&input).unwrap_err();
        assert!(matches!(
            err,
            LoanError::IterationLimitExceeded { limit: 1200, .. }
        ));
    }

    #[test]
    fn test_runaway_balance_does_not_overflow() {
        let mut input = base_input();
        input.principal = dec!(1000000);
        input.annual_rate_pct = dec!(500);
        input.monthly_payment = Decimal::ZERO;
        input.annual_extra_payment = dec!(1);
        let err = simulate(&input).unwrap_err();
        assert!(matches!(err, LoanError::IterationLimitExceeded { .. }));
    }

    #[test]
    fn test_huge_payments_do_not_overflow_totals() {
        // Two payments of 5e28 exceed what total_payment can hold
        let mut input = base_input();
        input.principal = dec!(70000000000000000000000000000);
        input.monthly_payment = dec!(50000000000000000000000000000);
        let err = simulate(&input).unwrap_err();
        assert!(matches!(err, LoanError::IterationLimitExceeded { .. }));
    }

    #[test]
    fn test_zero_principal_is_empty_schedule() {
        let mut input = base_input();
        input.principal = Decimal::ZERO;
        let sim = simulate(&input).unwrap();
        assert!(sim.schedule.is_empty());
        assert_eq!(sim.months, 0);
        assert_eq!(sim.total_payment, Decimal::ZERO);
    }

    #[test]
    fn test_negative_input_rejected() {
        let mut input = base_input();
        input.monthly_payment = dec!(-1);
        assert!(matches!(
            simulate(&input),
            Err(LoanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_dates_follow_calendar_months() {
        let mut input = base_input();
        input.start_date = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        input.principal = dec!(300);
        let sim = simulate(&input).unwrap();
        assert_eq!(sim.schedule[0].date, input.start_date);
        assert_eq!(
            sim.schedule[1].date,
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(
            sim.schedule[2].date,
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
        );
    }

    #[test]
    fn test_year_rollover() {
        let d = advance_months(NaiveDate::from_ymd_opt(2026, 11, 15).unwrap(), 3).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2027, 2, 15).unwrap());
    }
}
