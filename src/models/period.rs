//! Budget period representation
//!
//! A period runs from its start day to the day before the same day of the
//! following month. Calendar days are kept for labels; the boundary instants
//! are what expenses are compared against.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// One budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetPeriod {
    /// First calendar day of the period
    pub start_date: NaiveDate,

    /// Last calendar day of the period
    pub end_date: NaiveDate,

    /// First instant counted in the period
    pub start: DateTime<Utc>,

    /// Last instant counted in the period (inclusive)
    pub end: DateTime<Utc>,
}

impl BudgetPeriod {
    /// Check if an instant falls within this period
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Short label such as "Feb 15 - Mar 14"
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%b %-d"),
            self.end_date.format("%b %-d")
        )
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}
