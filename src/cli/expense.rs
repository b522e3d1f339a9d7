//! Expense CLI commands
//!
//! Adding, listing and deleting expenses, and the current period status.

use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_amount, format_expense_list, format_summary};
use crate::error::{TrackerError, TrackerResult};
use crate::models::day_to_instant;
use crate::services::period::{expenses_in_period, newest_first, PeriodService};
use crate::session::Session;
use crate::storage::KeyValueStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses in the current period, newest first
    List {
        /// Show every expense instead of the current period only
        #[arg(short, long)]
        all: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (or a unique prefix of it)
        id: String,
    },

    /// Show spending against the budget for the current period
    Status,
}

/// Handle an expense command
pub fn handle_expense_command<S: KeyValueStore + ?Sized>(
    session: &mut Session,
    store: &mut S,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            date,
        } => {
            let date = match date {
                Some(text) => day_to_instant(parse_date(&text)?),
                None => Utc::now(),
            };

            let expense = session.add_expense(&description, &amount, date)?;
            println!(
                "Added expense: {} {} (ID: {})",
                expense.description,
                format_amount(expense.amount, symbol),
                expense.id.short()
            );
            session.save(store);
        }

        ExpenseCommands::List { all } => {
            let service = PeriodService::new(settings);
            let expenses = if all {
                println!("All expenses");
                newest_first(session.expenses())
            } else {
                let period = service.current_period(session.budget().period_start_day);
                println!("Expenses for {}", period.label());
                newest_first(expenses_in_period(session.expenses(), &period))
            };
            println!();
            print!("{}", format_expense_list(&expenses, symbol, &Local));
        }

        ExpenseCommands::Delete { id } => {
            let removed = session.delete_expense(&id)?;
            println!(
                "Deleted expense: {} {}",
                removed.description,
                format_amount(removed.amount, symbol)
            );
            session.save(store);
        }

        ExpenseCommands::Status => {
            let summary = PeriodService::new(settings).summary(session.state());
            print!("{}", format_summary(&summary, symbol));
            println!("Expenses this period: {}", summary.expense_count);
        }
    }

    Ok(())
}

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(text: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD format.",
            text.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-03-10 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(parse_date("10/03/2024").unwrap_err().is_validation());
    }

    #[test]
    fn test_add_saves_to_store() {
        let mut session = Session::default();
        let mut store = MemoryStore::new();
        let cmd = ExpenseCommands::Add {
            description: "Lunch".into(),
            amount: "12.5".into(),
            date: Some("2024-03-10".into()),
        };

        handle_expense_command(&mut session, &mut store, &Settings::default(), cmd).unwrap();

        assert_eq!(session.expenses().len(), 1);
        let reloaded = Session::load(&store);
        assert_eq!(reloaded, session);
    }

    #[test]
    fn test_invalid_add_leaves_store_untouched() {
        let mut session = Session::default();
        let mut store = MemoryStore::new();
        let cmd = ExpenseCommands::Add {
            description: "Lunch".into(),
            amount: "abc".into(),
            date: None,
        };

        let err = handle_expense_command(&mut session, &mut store, &Settings::default(), cmd)
            .unwrap_err();

        assert!(err.is_validation());
        assert!(session.expenses().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut session = Session::default();
        let mut store = MemoryStore::new();
        let cmd = ExpenseCommands::Delete { id: "nope".into() };

        let err = handle_expense_command(&mut session, &mut store, &Settings::default(), cmd)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
