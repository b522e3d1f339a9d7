//! The active session
//!
//! `Session` owns the in-memory state. Every mutating method either commits
//! a change or leaves the state untouched; saving is the caller's job, done
//! with [`Session::save`] after a change has been accepted.

use chrono::{DateTime, Utc};

use crate::error::{ImportError, TrackerError, TrackerResult};
use crate::models::{BudgetConfiguration, Expense, PeriodStartDay, PersistedState};
use crate::services::transfer::{export_state, PendingImport, TransferCode};
use crate::storage::{self, KeyValueStore};

/// Owner of the application state for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    state: PersistedState,
}

impl Session {
    /// Start a session from an existing state
    pub fn new(state: PersistedState) -> Self {
        Self { state }
    }

    /// Start a session from whatever the store holds
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self::new(storage::load_state(store))
    }

    /// Save the state to the store, logging failures
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> bool {
        storage::persist(store, &self.state)
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.state.expenses
    }

    pub fn budget(&self) -> &BudgetConfiguration {
        &self.state.budget
    }

    /// Record a new expense
    ///
    /// Fails with a validation error, and records nothing, when the
    /// description or amount is empty or the amount is not a valid number.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: &str,
        date: DateTime<Utc>,
    ) -> TrackerResult<&Expense> {
        let expense = Expense::new(description, amount, date)?;
        tracing::debug!(id = %expense.id, amount = expense.amount, "added expense");
        self.state.expenses.push(expense);
        Ok(&self.state.expenses[self.state.expenses.len() - 1])
    }

    /// Delete an expense by its ID or a unique prefix of it
    pub fn delete_expense(&mut self, id: &str) -> TrackerResult<Expense> {
        let index = self.resolve(id)?;
        let removed = self.state.expenses.remove(index);
        tracing::debug!(id = %removed.id, "deleted expense");
        Ok(removed)
    }

    fn resolve(&self, id: &str) -> TrackerResult<usize> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TrackerError::expense_not_found(id));
        }

        if let Some(index) = self.state.expenses.iter().position(|e| e.id.as_str() == id) {
            return Ok(index);
        }

        let mut matches = self
            .state
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| e.id.as_str().starts_with(id))
            .map(|(i, _)| i);

        match (matches.next(), matches.next()) {
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(TrackerError::Validation(format!(
                "Expense ID '{}' is ambiguous",
                id
            ))),
            (None, _) => Err(TrackerError::expense_not_found(id)),
        }
    }

    /// Change the budget per period
    pub fn set_monthly_budget(&mut self, text: &str) -> TrackerResult<()> {
        self.state.budget.set_monthly_budget(text)
    }

    /// Change the day each period starts on
    pub fn set_period_start_day(&mut self, day: u32) -> TrackerResult<()> {
        self.state.budget.period_start_day = PeriodStartDay::new(day)?;
        Ok(())
    }

    /// Encode the whole state as a transfer code
    pub fn export(&self, exported_at: DateTime<Utc>) -> TrackerResult<TransferCode> {
        export_state(&self.state, exported_at)
    }

    /// Validate a transfer code without applying it
    pub fn stage_import(&self, input: &str) -> Result<PendingImport, ImportError> {
        PendingImport::from_code(input)
    }

    /// Replace the whole state with a confirmed import
    pub fn commit_import(&mut self, pending: PendingImport) {
        let state = pending.into_state();
        tracing::info!(
            replaced = self.state.expenses.len(),
            imported = state.expenses.len(),
            "imported transfer code"
        );
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_add_expense() {
        let mut session = Session::default();
        let expense = session.add_expense(" Coffee ", "4.20", at(3)).unwrap().clone();

        assert_eq!(session.expenses().len(), 1);
        assert_eq!(expense.description, "Coffee");
        assert_eq!(session.state().find(&expense.id), Some(&expense));
    }

    #[test]
    fn test_invalid_input_adds_nothing() {
        let mut session = Session::default();
        assert!(session.add_expense("", "4.20", at(3)).unwrap_err().is_validation());
        assert!(session.add_expense("Tea", "", at(3)).unwrap_err().is_validation());
        assert!(session.expenses().is_empty());
    }

    #[test]
    fn test_delete_by_id_and_prefix() {
        let mut session = Session::default();
        session.state.expenses = vec![
            Expense {
                id: ExpenseId::from("abc-111"),
                description: "One".into(),
                amount: 1.0,
                date: at(1),
            },
            Expense {
                id: ExpenseId::from("abd-222"),
                description: "Two".into(),
                amount: 2.0,
                date: at(2),
            },
        ];

        assert!(session.delete_expense("ab").unwrap_err().is_validation());
        assert!(session.delete_expense("zzz").unwrap_err().is_not_found());

        let removed = session.delete_expense("abd").unwrap();
        assert_eq!(removed.description, "Two");
        let removed = session.delete_expense("abc-111").unwrap();
        assert_eq!(removed.description, "One");
        assert!(session.expenses().is_empty());
    }

    #[test]
    fn test_settings_validation() {
        let mut session = Session::default();
        session.set_period_start_day(28).unwrap();
        assert!(session.set_period_start_day(29).is_err());
        assert_eq!(session.budget().period_start_day.get(), 28);

        session.set_monthly_budget("2000").unwrap();
        assert!(session.set_monthly_budget("-5").is_err());
        assert_eq!(session.budget().monthly_budget, "2000");
    }

    #[test]
    fn test_import_is_two_step() {
        let mut source = Session::default();
        source.add_expense("Rent", "950", at(1)).unwrap();
        source.add_expense("Food", "120.25", at(2)).unwrap();
        source.set_monthly_budget("1800").unwrap();
        let code = source.export(at(5)).unwrap();

        let mut target = Session::default();
        target.add_expense("Existing", "1", at(4)).unwrap();

        let pending = target.stage_import(&code.payload).unwrap();
        assert_eq!(pending.expense_count(), 2);
        // Nothing changes until the import is committed
        assert_eq!(target.expenses().len(), 1);

        target.commit_import(pending);
        assert_eq!(target.state(), source.state());
    }

    #[test]
    fn test_cancelled_import_keeps_state() {
        let mut session = Session::default();
        session.add_expense("Existing", "1", at(4)).unwrap();
        let before = session.clone();

        let code = Session::default().export(at(5)).unwrap();
        let pending = session.stage_import(&code.payload).unwrap();
        drop(pending);

        assert_eq!(session, before);
    }

    #[test]
    fn test_rejected_import_keeps_state() {
        let mut session = Session::default();
        session.add_expense("Existing", "1", at(4)).unwrap();

        let code = session.export(at(5)).unwrap();
        assert_eq!(
            session.stage_import(&code.reference_code).unwrap_err(),
            ImportError::NeedsFullCode
        );
        assert_eq!(session.expenses().len(), 1);
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::new();
        let mut session = Session::load(&store);
        session.add_expense("Gift", "25", at(9)).unwrap();
        session.set_period_start_day(9).unwrap();
        assert!(session.save(&mut store));

        let reloaded = Session::load(&store);
        assert_eq!(reloaded, session);
    }
}
