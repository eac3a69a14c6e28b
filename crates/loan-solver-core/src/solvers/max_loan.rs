use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::metrics::{self, BalancePoint};
use crate::amortization::schedule_warnings;
use crate::amortization::simulator::{self, ScheduleRow, SimulationInput};
use crate::solvers::bisection::{Bisection, Direction, Probe};
use crate::solvers::{horizon_residual, MAX_SOLVER_ITERATIONS};
use crate::types::*;
use crate::LoanResult;

/// Largest principal the search will consider.
pub const MAX_PRINCIPAL: Money = dec!(10000000);

/// Accepted when the payment headroom at the horizon is under one unit.
pub const PRINCIPAL_TOLERANCE: Money = dec!(1);

/// Input for the affordability query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxLoanInput {
    pub monthly_payment: Money,
    pub annual_rate_pct: Percent,
    pub term_months: u32,
    #[serde(default)]
    pub annual_extra_payment: Money,
    pub start_date: NaiveDate,
}

/// Output of the affordability query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxLoanOutput {
    pub max_loan_amount: Money,
    pub months: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    pub repayment_rate: Percent,
    pub solver_iterations: u32,
    pub balance_curve: Vec<BalancePoint>,
    pub schedule: Vec<ScheduleRow>,
}

/// Find the largest principal a fixed payment retires within the given term.
pub fn calculate_max_loan_amount(
    input: &MaxLoanInput,
) -> LoanResult<ComputationOutput<MaxLoanOutput>> {
    let start = Instant::now();

    require_positive("monthly_payment", input.monthly_payment)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_term("term_months", input.term_months)?;
    require_non_negative("annual_extra_payment", input.annual_extra_payment)?;

    let search = Bisection {
        function: "max loan amount",
        lower: Decimal::ZERO,
        upper: MAX_PRINCIPAL,
        tolerance: PRINCIPAL_TOLERANCE,
        max_iterations: MAX_SOLVER_ITERATIONS,
        when_infeasible: Direction::Down,
    };

    let root = search.solve(|principal| {
        let attempt = simulator::simulate(&SimulationInput {
            principal,
            annual_rate_pct: input.annual_rate_pct,
            monthly_payment: input.monthly_payment,
            annual_extra_payment: input.annual_extra_payment,
            start_date: input.start_date,
            term_cap_months: Some(input.term_months),
        });
        let Ok(simulation) = attempt else {
            return Probe::Infeasible;
        };
        // Headroom: what the payment stream has left over at the horizon
        match horizon_residual(
            &simulation,
            input.monthly_payment,
            input.annual_extra_payment,
            input.term_months,
            PRINCIPAL_TOLERANCE,
        ) {
            Some(residual) => Probe::Residual {
                residual: -residual,
                value: simulation,
            },
            None => Probe::Infeasible,
        }
    })?;

    let max_loan_amount = root.point;
    let simulation = root.value;
    let repayment_rate =
        metrics::repayment_rate(simulation.first_month_principal(), max_loan_amount)?;
    let warnings = schedule_warnings(
        &simulation,
        input.annual_rate_pct,
        input.annual_extra_payment,
    );

    let output = MaxLoanOutput {
        max_loan_amount,
        months: simulation.months,
        total_payment: simulation.total_payment,
        total_interest: simulation.total_interest,
        repayment_rate,
        solver_iterations: root.iterations,
        balance_curve: metrics::balance_curve(&simulation.schedule),
        schedule: simulation.schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Max Loan Amount (bisection over principal, fixed payment and term)",
        &serde_json::json!({
            "monthly_payment": input.monthly_payment.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "term_months": input.term_months,
            "annual_extra_payment": input.annual_extra_payment.to_string(),
            "start_date": input.start_date.to_string(),
            "search_bracket": [Decimal::ZERO.to_string(), MAX_PRINCIPAL.to_string()],
            "tolerance": PRINCIPAL_TOLERANCE.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::time_value::annuity_principal;

    fn sample_input() -> MaxLoanInput {
        MaxLoanInput {
            monthly_payment: dec!(1500),
            annual_rate_pct: dec!(5),
            term_months: 240,
            annual_extra_payment: Decimal::ZERO,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        }
    }

    #[test]
    fn test_max_loan_fills_term_exactly() {
        let out = calculate_max_loan_amount(&sample_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.schedule.len(), 240);
        assert!(r.schedule.last().unwrap().remaining_debt < dec!(10));
        assert!(r.total_payment > r.max_loan_amount);
        assert!(r.total_interest > Decimal::ZERO);
        assert!(r.repayment_rate > Decimal::ZERO);
    }

    #[test]
    fn test_max_loan_matches_annuity_formula() {
        let out = calculate_max_loan_amount(&sample_input()).unwrap();
        // ~227,287 for 1500/month over 20 years at 5%
        let expected = annuity_principal(dec!(1500), dec!(5), 240).unwrap();
        assert!(
            (out.result.max_loan_amount - expected).abs() < dec!(1),
            "solver {} vs annuity {}",
            out.result.max_loan_amount,
            expected
        );
    }

    #[test]
    fn test_tiny_payment_over_long_term() {
        // 1 per month for 40 years at 5% retires about 207
        let mut input = sample_input();
        input.monthly_payment = dec!(1);
        input.term_months = 480;
        let out = calculate_max_loan_amount(&input).unwrap();
        assert!(out.result.max_loan_amount > Decimal::ZERO);
        assert!(out.result.max_loan_amount < dec!(480));
    }

    #[test]
    fn test_zero_payment_rejected() {
        let mut input = sample_input();
        input.monthly_payment = Decimal::ZERO;
        let err = calculate_max_loan_amount(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
