pub mod loan_term;
pub mod metrics;
pub mod simulator;

use rust_decimal::Decimal;

use self::simulator::{is_year_end, Simulation};
use crate::types::Money;

/// Warnings shared by every query that returns a finished schedule.
pub(crate) fn schedule_warnings(
    simulation: &Simulation,
    annual_rate_pct: Decimal,
    annual_extra_payment: Money,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if annual_rate_pct.is_zero() {
        warnings.push("Zero interest rate: every payment goes to principal".into());
    }

    if let Some(last) = simulation.schedule.last() {
        if !annual_extra_payment.is_zero()
            && is_year_end(last.month - 1)
            && last.extra_payment.is_zero()
        {
            warnings.push(format!(
                "Month {}: annual extra payment of {} not applied; the final payment clears the balance",
                last.month, annual_extra_payment
            ));
        }
    }

    warnings
}
