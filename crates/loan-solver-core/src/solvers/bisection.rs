use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace, warn};

use crate::error::LoanError;
use crate::LoanResult;

/// What one evaluation of the objective says about a candidate.
#[derive(Debug, Clone)]
pub enum Probe<T> {
    /// The candidate produced no usable result (e.g. the simulation failed).
    Infeasible,
    /// Signed distance from the target. Positive means the root lies above
    /// the candidate.
    Residual { residual: Decimal, value: T },
}

/// Which bound an infeasible candidate replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Candidate too small: raise the lower bound.
    Up,
    /// Candidate too large: lower the upper bound.
    Down,
}

/// Bracketing search over a monotone, decreasing objective.
#[derive(Debug, Clone)]
pub struct Bisection {
    pub function: &'static str,
    pub lower: Decimal,
    pub upper: Decimal,
    pub tolerance: Decimal,
    pub max_iterations: u32,
    pub when_infeasible: Direction,
}

/// Accepted candidate and the objective's payload for it
#[derive(Debug, Clone)]
pub struct Root<T> {
    pub point: Decimal,
    pub residual: Decimal,
    pub iterations: u32,
    pub value: T,
}

impl Bisection {
    pub fn solve<T, F>(&self, mut objective: F) -> LoanResult<Root<T>>
    where
        F: FnMut(Decimal) -> Probe<T>,
    {
        let mut low = self.lower;
        let mut high = self.upper;
        let mut last_delta = Decimal::MAX;

        for i in 1..=self.max_iterations {
            let mid = low + (high - low) / dec!(2);
            trace!(function = self.function, iteration = i, %low, %high, %mid, "bisection step");

            match objective(mid) {
                Probe::Infeasible => match self.when_infeasible {
                    Direction::Up => low = mid,
                    Direction::Down => high = mid,
                },
                Probe::Residual { residual, value } => {
                    if residual.abs() < self.tolerance {
                        debug!(
                            function = self.function,
                            iterations = i,
                            point = %mid,
                            %residual,
                            "bisection converged"
                        );
                        return Ok(Root {
                            point: mid,
                            residual,
                            iterations: i,
                            value,
                        });
                    }
                    last_delta = residual;
                    if residual > Decimal::ZERO {
                        low = mid;
                    } else {
                        high = mid;
                    }
                }
            }
        }

        warn!(
            function = self.function,
            iterations = self.max_iterations,
            %last_delta,
            "bisection did not converge"
        );
        Err(LoanError::SolverDidNotConverge {
            function: self.function.into(),
            iterations: self.max_iterations,
            last_delta,
        })
    }
}
