use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::metrics::{self, BalancePoint};
use crate::amortization::schedule_warnings;
use crate::amortization::simulator::{self, ScheduleRow, SimulationInput};
use crate::error::LoanError;
use crate::solvers::bisection::{Bisection, Direction, Probe};
use crate::solvers::{horizon_residual, MAX_SOLVER_ITERATIONS};
use crate::types::*;
use crate::LoanResult;

/// Accepted when the debt left at the horizon is within a cent.
pub const PAYMENT_TOLERANCE: Money = dec!(0.01);

/// Input for the required-payment query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPaymentInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub term_months: u32,
    #[serde(default)]
    pub annual_extra_payment: Money,
    pub start_date: NaiveDate,
}

/// Output of the required-payment query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPaymentOutput {
    pub monthly_payment: Money,
    pub months: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    pub repayment_rate: Percent,
    pub solver_iterations: u32,
    pub balance_curve: Vec<BalancePoint>,
    pub schedule: Vec<ScheduleRow>,
}

/// Find the monthly payment that retires the principal in exactly the given term.
pub fn calculate_monthly_payment(
    input: &MonthlyPaymentInput,
) -> LoanResult<ComputationOutput<MonthlyPaymentOutput>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_term("term_months", input.term_months)?;
    require_non_negative("annual_extra_payment", input.annual_extra_payment)?;

    let upper = input
        .principal
        .checked_mul(dec!(2))
        .ok_or_else(|| LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Too large to bracket the payment search".into(),
        })?;
    let search = Bisection {
        function: "monthly payment",
        lower: Decimal::ZERO,
        upper,
        tolerance: PAYMENT_TOLERANCE,
        max_iterations: MAX_SOLVER_ITERATIONS,
        when_infeasible: Direction::Up,
    };

    let simulate_with = |payment: Money| {
        simulator::simulate(&SimulationInput {
            principal: input.principal,
            annual_rate_pct: input.annual_rate_pct,
            monthly_payment: payment,
            annual_extra_payment: input.annual_extra_payment,
            start_date: input.start_date,
            term_cap_months: Some(input.term_months),
        })
    };

    let mut warnings = Vec::new();

    // Year-end extra payments may retire the loan on their own
    let (monthly_payment, simulation, solver_iterations) = match simulate_with(Decimal::ZERO) {
        Ok(simulation) if !simulation.schedule.is_empty() => {
            debug!(
                months = simulation.months,
                "extra payments alone repay the loan within the term"
            );
            warnings.push(format!(
                "No monthly payment needed: annual extra payments of {} repay the loan in {} months",
                input.annual_extra_payment, simulation.months
            ));
            (Decimal::ZERO, simulation, 0)
        }
        _ => {
            let root = search.solve(|payment| {
                let Ok(simulation) = simulate_with(payment) else {
                    return Probe::Infeasible;
                };
                match horizon_residual(
                    &simulation,
                    payment,
                    input.annual_extra_payment,
                    input.term_months,
                    PAYMENT_TOLERANCE,
                ) {
                    Some(residual) => Probe::Residual {
                        residual,
                        value: simulation,
                    },
                    None => Probe::Infeasible,
                }
            })?;
            (root.point, root.value, root.iterations)
        }
    };

    let repayment_rate =
        metrics::repayment_rate(simulation.first_month_principal(), input.principal)?;
    warnings.extend(schedule_warnings(
        &simulation,
        input.annual_rate_pct,
        input.annual_extra_payment,
    ));

    let output = MonthlyPaymentOutput {
        monthly_payment,
        months: simulation.months,
        total_payment: simulation.total_payment,
        total_interest: simulation.total_interest,
        repayment_rate,
        solver_iterations,
        balance_curve: metrics::balance_curve(&simulation.schedule),
        schedule: simulation.schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly Payment (bisection over payment, fixed term)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "term_months": input.term_months,
            "annual_extra_payment": input.annual_extra_payment.to_string(),
            "start_date": input.start_date.to_string(),
            "search_bracket": [Decimal::ZERO.to_string(), search.upper.to_string()],
            "tolerance": PAYMENT_TOLERANCE.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
