//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session and services.

pub mod budget;
pub mod expense;
pub mod export;
pub mod transfer;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use transfer::{handle_transfer_command, TransferCommands};
