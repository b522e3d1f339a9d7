//! Core data models for periodbook
//!
//! Expenses, the budget configuration, budget periods and the persisted
//! state that bundles them.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod period;
pub mod state;

pub use budget::{BudgetConfiguration, PeriodStartDay, DEFAULT_MONTHLY_BUDGET};
pub use expense::{day_to_instant, parse_amount, Expense};
pub use ids::ExpenseId;
pub use period::BudgetPeriod;
pub use state::PersistedState;
