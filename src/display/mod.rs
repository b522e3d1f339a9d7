//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and period summaries for
//! terminal display.

pub mod expense;
pub mod summary;

pub use expense::{format_amount, format_expense_list, format_expense_row};
pub use summary::{format_bar, format_summary};
