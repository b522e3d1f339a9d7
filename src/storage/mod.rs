//! Storage layer for periodbook
//!
//! Persistence is a plain key-value surface with three string slots: the
//! expense list as JSON, the budget text and the period start day. Slots are
//! read once at startup and written after each committed change. Any slot
//! may be missing, and a slot that cannot be read falls back to its default
//! without stopping the session.

pub mod file_io;
pub mod file_store;
pub mod memory;

pub use file_io::{read_text, write_text_atomic};
pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, PeriodStartDay, PersistedState};

/// Slot holding the expense list
pub const EXPENSES_KEY: &str = "expenses";
/// Slot holding the monthly budget text
pub const BUDGET_KEY: &str = "budget";
/// Slot holding the period start day
pub const START_DAY_KEY: &str = "monthStartDate";

/// A string-keyed store of string values
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when it has never been written
    fn get(&self, key: &str) -> TrackerResult<Option<String>>;

    /// Write a slot
    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()>;
}

/// Rebuild the application state from the store
///
/// Never fails: missing slots take their defaults and unreadable ones are
/// logged and defaulted.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> PersistedState {
    let mut state = PersistedState::default();

    if let Some(text) = read_slot(store, EXPENSES_KEY) {
        match serde_json::from_str::<Vec<Expense>>(&text) {
            Ok(expenses) => state.expenses = expenses,
            Err(e) => tracing::warn!(error = %e, "stored expenses are unreadable, starting empty"),
        }
    }

    if let Some(text) = read_slot(store, BUDGET_KEY) {
        if !text.trim().is_empty() {
            state.budget.monthly_budget = text;
        }
    }

    if let Some(text) = read_slot(store, START_DAY_KEY) {
        match text
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|day| PeriodStartDay::new(day).ok())
        {
            Some(day) => state.budget.period_start_day = day,
            None => tracing::warn!(value = %text, "stored start day is invalid, using default"),
        }
    }

    tracing::debug!(expenses = state.expenses.len(), "loaded state");
    state
}

fn read_slot<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "storage unavailable, using default");
            None
        }
    }
}

/// Write every slot of the state to the store
pub fn save_state<S: KeyValueStore + ?Sized>(store: &mut S, state: &PersistedState) -> TrackerResult<()> {
    let expenses = serde_json::to_string(&state.expenses)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize expenses: {}", e)))?;

    store.set(EXPENSES_KEY, &expenses)?;
    store.set(BUDGET_KEY, &state.budget.monthly_budget)?;
    store.set(START_DAY_KEY, &state.budget.period_start_day.to_string())?;
    Ok(())
}

/// Save the state, logging instead of failing
///
/// Returns whether the write succeeded. The in-memory state is unaffected
/// either way.
pub fn persist<S: KeyValueStore + ?Sized>(store: &mut S, state: &PersistedState) -> bool {
    match save_state(store, state) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to save state, changes are kept in memory only");
            false
        }
    }
}
