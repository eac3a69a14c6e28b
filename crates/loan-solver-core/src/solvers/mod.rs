pub mod bisection;
pub mod max_loan;
pub mod monthly_payment;

use rust_decimal::Decimal;

use crate::amortization::simulator::{is_year_end, Simulation};
use crate::types::Money;

pub(crate) const MAX_SOLVER_ITERATIONS: u32 = 100;

/// Signed debt left at the end of `term_months` if every scheduled payment
/// were applied in full. Positive means debt remains, negative means the
/// schedule overpaid. A schedule that finishes before the horizon always
/// reads as overpaid by at least `tolerance`. `None` for an empty schedule
/// or when the scheduled payments overflow.
pub(crate) fn horizon_residual(
    simulation: &Simulation,
    monthly_payment: Money,
    annual_extra_payment: Money,
    term_months: u32,
    tolerance: Money,
) -> Option<Money> {
    let last = simulation.schedule.last()?;

    let scheduled_extra = if is_year_end(last.month - 1) {
        annual_extra_payment
    } else {
        Decimal::ZERO
    };
    let scheduled = (monthly_payment - last.interest).checked_add(scheduled_extra)?;
    let unused = scheduled.checked_sub(last.principal + last.extra_payment)?;

    let idle = (simulation.months..term_months).try_fold(Decimal::ZERO, |idle, m| {
        let due = if is_year_end(m) {
            monthly_payment.checked_add(annual_extra_payment)?
        } else {
            monthly_payment
        };
        idle.checked_add(due)
    })?;

    let residual = last
        .remaining_debt
        .checked_sub(unused)?
        .checked_sub(idle)?;
    if simulation.months < term_months {
        Some(residual.min(-tolerance))
    } else {
        Some(residual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::simulator::{simulate, SimulationInput};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn run(principal: Money, payment: Money, extra: Money) -> Simulation {
        simulate(&SimulationInput {
            principal,
            annual_rate_pct: Decimal::ZERO,
            monthly_payment: payment,
            annual_extra_payment: extra,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            term_cap_months: Some(12),
        })
        .unwrap()
    }

    #[test]
    fn test_exact_payoff_has_zero_residual() {
        let sim = run(dec!(1200), dec!(100), Decimal::ZERO);
        let r = horizon_residual(&sim, dec!(100), Decimal::ZERO, 12, dec!(0.01)).unwrap();
        assert_eq!(r, Decimal::ZERO);
    }

    #[test]
    fn test_final_month_overshoot_is_negative() {
        // 1150 at 100/month: month 12 only needs 50 of its 100
        let sim = run(dec!(1150), dec!(100), Decimal::ZERO);
        let r = horizon_residual(&sim, dec!(100), Decimal::ZERO, 12, dec!(0.01)).unwrap();
        assert_eq!(r, dec!(-50));
    }

    #[test]
    fn test_dropped_extra_counts_as_overshoot() {
        let sim = run(dec!(1150), dec!(100), dec!(500));
        let r = horizon_residual(&sim, dec!(100), dec!(500), 12, dec!(0.01)).unwrap();
        assert_eq!(r, dec!(-550));
    }

    #[test]
    fn test_early_payoff_counts_idle_months() {
        // Paid off in 10 months; months 11 and 12 (with its extra) are idle
        let sim = run(dec!(1000), dec!(100), dec!(500));
        assert_eq!(sim.months, 10);
        let r = horizon_residual(&sim, dec!(100), dec!(500), 12, dec!(0.01)).unwrap();
        assert_eq!(r, dec!(-700));
    }

    #[test]
    fn test_early_payoff_never_within_tolerance() {
        let sim = run(dec!(1000), dec!(100), Decimal::ZERO);
        let r = horizon_residual(&sim, Decimal::ZERO, Decimal::ZERO, 12, dec!(1)).unwrap();
        assert!(r <= dec!(-1));
    }

    #[test]
    fn test_empty_schedule_has_no_residual() {
        let sim = run(Decimal::ZERO, dec!(100), Decimal::ZERO);
        assert_eq!(
            horizon_residual(&sim, dec!(100), Decimal::ZERO, 12, dec!(0.01)),
            None
        );
    }

    #[test]
    fn test_overflowing_idle_payments_have_no_residual() {
        // One month at 1e27 clears the debt; 239 idle months overflow
        let sim = run(dec!(1000), dec!(1000000000000000000000000000), Decimal::ZERO);
        assert_eq!(sim.months, 1);
        assert_eq!(
            horizon_residual(
                &sim,
                dec!(1000000000000000000000000000),
                Decimal::ZERO,
                240,
                dec!(1)
            ),
            None
        );
    }
}
