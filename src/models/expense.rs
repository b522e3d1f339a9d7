//! Expense model
//!
//! An expense is a single spending entry. Entries are never edited after
//! creation; they are removed by deletion or replaced wholesale on import.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use crate::error::{TrackerError, TrackerResult};

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on (trimmed, never empty)
    pub description: String,

    /// Amount spent
    pub amount: f64,

    /// When the expense happened
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create an expense from form input
    ///
    /// The description is trimmed. Both the description and the amount text
    /// must be non-empty, and the amount must be a finite number that is not
    /// negative.
    pub fn new(description: &str, amount: &str, date: DateTime<Utc>) -> TrackerResult<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TrackerError::Validation("Description is required".into()));
        }

        let amount = parse_amount(amount)?;

        Ok(Self {
            id: ExpenseId::new(),
            description: description.to_string(),
            amount,
            date,
        })
    }

    /// Create an expense dated on a calendar day
    ///
    /// The day is stored as midnight UTC, matching how date-only inputs are
    /// normalized everywhere else in the dataset.
    pub fn on_day(description: &str, amount: &str, day: NaiveDate) -> TrackerResult<Self> {
        Self::new(description, amount, day_to_instant(day))
    }
}

/// Parse a user-entered amount
pub fn parse_amount(text: &str) -> TrackerResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TrackerError::Validation("Amount is required".into()));
    }

    let value: f64 = text
        .parse()
        .map_err(|_| TrackerError::Validation(format!("Invalid amount: {}", text)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(TrackerError::Validation(format!(
            "Amount must be zero or positive: {}",
            text
        )));
    }

    Ok(value)
}

/// Convert a calendar day to the instant it is stored as
pub fn day_to_instant(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
