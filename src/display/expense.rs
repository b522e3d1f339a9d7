//! Expense display formatting
//!
//! Register-style listing of expenses for terminal output.

use chrono::TimeZone;
use std::fmt::Display;

use crate::models::Expense;

/// Format an amount with a currency symbol, sign first
pub fn format_amount(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, -amount)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Format a single expense for display (register row)
///
/// The date is shown on the calendar of `tz`.
pub fn format_expense_row<Tz>(expense: &Expense, symbol: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{:8} {:12} {:30} {:>12}",
        expense.id.short(),
        expense.date.with_timezone(tz).format("%b %-d, %Y").to_string(),
        truncate(&expense.description, 30),
        format_amount(expense.amount, symbol)
    )
}

/// Format a list of expenses as a register
pub fn format_expense_list<Tz>(expenses: &[&Expense], symbol: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if expenses.is_empty() {
        return "No expenses added yet for this period.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8} {:12} {:30} {:>12}\n",
        "ID", "Date", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(65));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol, tz));
        output.push('\n');
    }

    output
}

/// Truncate to a number of characters, marking the cut with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
