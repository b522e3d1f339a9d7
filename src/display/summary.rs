//! Period summary formatting

use super::expense::format_amount;
use crate::services::period::{BudgetStatus, PeriodSummary};

/// Width of the progress bar in characters
const BAR_WIDTH: usize = 30;

/// Create a simple bar representation of a fraction in 0.0..=1.0
pub fn format_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format the budget overview for the current period
pub fn format_summary(summary: &PeriodSummary, symbol: &str) -> String {
    let status = match summary.status() {
        BudgetStatus::OnTrack => "on track",
        BudgetStatus::NearLimit => "near limit",
        BudgetStatus::Critical => "over budget",
    };

    let mut output = String::new();
    output.push_str(&format!("Period:    {}\n", summary.label()));
    output.push_str(&format!(
        "Spent:     {} / {}\n",
        format_amount(summary.total_spent, symbol),
        format_amount(summary.budget, symbol)
    ));
    output.push_str(&format!(
        "Remaining: {}\n",
        format_amount(summary.remaining, symbol)
    ));
    output.push_str(&format!(
        "[{}] {:.0}% ({})\n",
        format_bar(summary.progress, BAR_WIDTH),
        summary.progress * 100.0,
        status
    ));
    output
}
