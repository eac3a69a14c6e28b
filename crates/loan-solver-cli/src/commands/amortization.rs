use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_solver_core::amortization::loan_term::{self, LoanTermInput};

use crate::commands::default_start_date;
use crate::input;

/// Arguments for the loan term calculation
#[derive(Args)]
pub struct LoanTermArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Extra payment made at the end of every loan year
    #[arg(long, default_value = "0")]
    pub extra: Decimal,

    /// First payment month (YYYY-MM-DD); defaults to the start of this month
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_loan_term(args: LoanTermArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let term_input: LoanTermInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let payment = args
            .payment
            .ok_or("--payment is required (or provide --input)")?;

        LoanTermInput {
            principal,
            annual_rate_pct: rate,
            monthly_payment: payment,
            annual_extra_payment: args.extra,
            start_date: args.start_date.unwrap_or_else(default_start_date),
        }
    };

    let result = loan_term::calculate_loan_term(&term_input)?;
    Ok(serde_json::to_value(result)?)
}
