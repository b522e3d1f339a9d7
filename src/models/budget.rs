//! Budget configuration
//!
//! The monthly budget amount and the day of the month on which each budget
//! period begins.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::parse_amount;
use crate::error::{TrackerError, TrackerResult};

/// Budget amount used when none has been configured
pub const DEFAULT_MONTHLY_BUDGET: &str = "1000";

/// Day of the month on which a budget period starts
///
/// Limited to 1..=28 so that every month, February included, has the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PeriodStartDay(u32);

impl PeriodStartDay {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 28;

    /// Create a start day, rejecting days outside 1..=28
    pub fn new(day: u32) -> TrackerResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&day) {
            Ok(Self(day))
        } else {
            Err(TrackerError::Validation(format!(
                "Period start day must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                day
            )))
        }
    }

    /// Get the day number
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PeriodStartDay {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for PeriodStartDay {
    type Error = TrackerError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<PeriodStartDay> for u32 {
    fn from(day: PeriodStartDay) -> Self {
        day.0
    }
}

impl fmt::Display for PeriodStartDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user's budget settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfiguration {
    /// Budget per period, kept as entered
    pub monthly_budget: String,

    /// First day of each period
    pub period_start_day: PeriodStartDay,
}

impl Default for BudgetConfiguration {
    fn default() -> Self {
        Self {
            monthly_budget: DEFAULT_MONTHLY_BUDGET.to_string(),
            period_start_day: PeriodStartDay::default(),
        }
    }
}

impl BudgetConfiguration {
    /// Numeric value of the budget
    ///
    /// Text that does not parse as an amount counts as a zero budget.
    pub fn budget_value(&self) -> f64 {
        parse_amount(&self.monthly_budget).unwrap_or(0.0)
    }

    /// Replace the budget amount, keeping the text as entered
    pub fn set_monthly_budget(&mut self, text: &str) -> TrackerResult<()> {
        let text = text.trim();
        parse_amount(text)?;
        self.monthly_budget = text.to_string();
        Ok(())
    }
}
