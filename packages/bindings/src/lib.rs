use napi::Result as NapiResult;
use napi_derive::napi;

use loan_solver_core::amortization::{loan_term, simulator};
use loan_solver_core::solvers::{max_loan, monthly_payment};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan_term(input_json: String) -> NapiResult<String> {
    let input: loan_term::LoanTermInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_term::calculate_loan_term(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Raw month-by-month schedule without the computation envelope.
#[napi]
pub fn simulate_schedule(input_json: String) -> NapiResult<String> {
    let input: simulator::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let simulation = simulator::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&simulation).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Solvers
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_monthly_payment(input_json: String) -> NapiResult<String> {
    let input: monthly_payment::MonthlyPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = monthly_payment::calculate_monthly_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_max_loan_amount(input_json: String) -> NapiResult<String> {
    let input: max_loan::MaxLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = max_loan::calculate_max_loan_amount(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
