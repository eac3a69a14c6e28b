pub mod amortization;
pub mod solvers;

use chrono::{Datelike, Local, NaiveDate};

/// First day of the current month, the schedule start when none is given.
pub fn default_start_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.with_day(1).unwrap_or(today)
}
