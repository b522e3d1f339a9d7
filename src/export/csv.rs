//! CSV Export functionality
//!
//! Writes every expense, newest first, followed by a summary block with the
//! current period's totals.

use chrono::{NaiveDate, TimeZone};
use std::fmt::Display;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Expense;
use crate::services::period::{newest_first, PeriodSummary};

/// Default file name for an export made on `today`
pub fn default_file_name(today: NaiveDate) -> String {
    format!("expenses_{}.csv", today.format("%Y-%m-%d"))
}

/// Export expenses and the period summary to CSV
///
/// Dates are shown on the calendar of `tz`.
pub fn export_expenses_csv<W, Tz>(
    writer: &mut W,
    expenses: &[Expense],
    summary: &PeriodSummary,
    tz: &Tz,
) -> TrackerResult<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if expenses.is_empty() {
        return Err(TrackerError::Export("No expenses to export".into()));
    }

    let total_all: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut lines = vec!["Date,Description,Amount".to_string()];

    for expense in newest_first(expenses) {
        let date = expense.date.with_timezone(tz).format("%b %-d, %Y").to_string();
        lines.push(format!(
            "{},{},{:.2}",
            escape_csv(&date),
            quote(&expense.description),
            expense.amount
        ));
    }

    lines.push(String::new());
    lines.push("Summary,,".to_string());
    lines.push(format!("Total Expenses,,{:.2}", total_all));
    lines.push(format!("Current Period Total,,{:.2}", summary.total_spent));
    lines.push(format!("Budget,,{:.2}", summary.budget));
    lines.push(format!("Remaining Budget,,{:.2}", summary.remaining));
    lines.push(format!("Period,{},", escape_csv(&summary.label())));

    writer
        .write_all(lines.join("\n").as_bytes())
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        quote(s)
    } else {
        s.to_string()
    }
}

/// Always quote, doubling embedded quotes
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
