use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_solver_core::solvers::max_loan::{self, MaxLoanInput};
use loan_solver_core::solvers::monthly_payment::{self, MonthlyPaymentInput};

use crate::commands::default_start_date;
use crate::input;

/// Arguments for the monthly payment solver
#[derive(Args)]
pub struct MonthlyPaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Extra payment made at the end of every loan year
    #[arg(long, default_value = "0")]
    pub extra: Decimal,

    /// First payment month (YYYY-MM-DD); defaults to the start of this month
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_monthly_payment(
    args: MonthlyPaymentArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: MonthlyPaymentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let term_months = args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?;

        MonthlyPaymentInput {
            principal,
            annual_rate_pct: rate,
            term_months,
            annual_extra_payment: args.extra,
            start_date: args.start_date.unwrap_or_else(default_start_date),
        }
    };

    let result = monthly_payment::calculate_monthly_payment(&payment_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the maximum loan amount solver
#[derive(Args)]
pub struct MaxLoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Annual interest rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Extra payment made at the end of every loan year
    #[arg(long, default_value = "0")]
    pub extra: Decimal,

    /// First payment month (YYYY-MM-DD); defaults to the start of this month
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_max_loan(args: MaxLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let max_input: MaxLoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let payment = args
            .payment
            .ok_or("--payment is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let term_months = args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?;

        MaxLoanInput {
            monthly_payment: payment,
            annual_rate_pct: rate,
            term_months,
            annual_extra_payment: args.extra,
            start_date: args.start_date.unwrap_or_else(default_start_date),
        }
    };

    let result = max_loan::calculate_max_loan_amount(&max_input)?;
    Ok(serde_json::to_value(result)?)
}
