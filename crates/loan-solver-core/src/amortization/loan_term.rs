use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::metrics::{self, BalancePoint, LoanTermSplit};
use crate::amortization::schedule_warnings;
use crate::amortization::simulator::{self, ScheduleRow, SimulationInput};
use crate::types::*;
use crate::LoanResult;

/// Input for the payoff-term query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTermInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub monthly_payment: Money,
    #[serde(default)]
    pub annual_extra_payment: Money,
    pub start_date: NaiveDate,
}

/// Output of the payoff-term query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTermOutput {
    pub loan_term: LoanTermSplit,
    pub months: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    pub repayment_rate: Percent,
    pub payoff_date: Option<NaiveDate>,
    pub balance_curve: Vec<BalancePoint>,
    pub schedule: Vec<ScheduleRow>,
}

/// How long a loan takes to pay off with a fixed monthly payment.
pub fn calculate_loan_term(input: &LoanTermInput) -> LoanResult<ComputationOutput<LoanTermOutput>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_non_negative("monthly_payment", input.monthly_payment)?;
    require_non_negative("annual_extra_payment", input.annual_extra_payment)?;

    let simulation = simulator::simulate(&SimulationInput {
        principal: input.principal,
        annual_rate_pct: input.annual_rate_pct,
        monthly_payment: input.monthly_payment,
        annual_extra_payment: input.annual_extra_payment,
        start_date: input.start_date,
        term_cap_months: None,
    })?;

    let repayment_rate =
        metrics::repayment_rate(simulation.first_month_principal(), input.principal)?;
    let warnings = schedule_warnings(
        &simulation,
        input.annual_rate_pct,
        input.annual_extra_payment,
    );

    let output = LoanTermOutput {
        loan_term: LoanTermSplit::from_months(simulation.months),
        months: simulation.months,
        total_payment: simulation.total_payment,
        total_interest: simulation.total_interest,
        repayment_rate,
        payoff_date: simulation.schedule.last().map(|row| row.date),
        balance_curve: metrics::balance_curve(&simulation.schedule),
        schedule: simulation.schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Term (monthly amortization to payoff)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "monthly_payment": input.monthly_payment.to_string(),
            "annual_extra_payment": input.annual_extra_payment.to_string(),
            "start_date": input.start_date.to_string(),
            "interest": "simple monthly interest on the declining balance",
        }),
        warnings,
        elapsed,
        output,
    ))
}
