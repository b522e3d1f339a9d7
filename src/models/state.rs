//! The persisted application state
//!
//! This is the unit of load, save, export and import.

use super::budget::BudgetConfiguration;
use super::expense::Expense;
use super::ids::ExpenseId;

/// Every expense plus the budget configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersistedState {
    /// All recorded expenses in insertion order
    pub expenses: Vec<Expense>,

    /// Budget amount and period start day
    pub budget: BudgetConfiguration,
}

impl PersistedState {
    /// Create a state from its parts
    pub fn new(expenses: Vec<Expense>, budget: BudgetConfiguration) -> Self {
        Self { expenses, budget }
    }

    /// Find an expense by ID
    pub fn find(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }
}
