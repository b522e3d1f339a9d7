//! Budget CLI commands
//!
//! Changing the budget per period and the day each period starts on.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_amount;
use crate::error::{TrackerError, TrackerResult};
use crate::services::period::PeriodService;
use crate::session::Session;
use crate::storage::KeyValueStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget configuration
    Show,

    /// Change the budget and/or the period start day
    Set {
        /// Budget per period (e.g., "1500" or "1500.00")
        #[arg(short, long)]
        amount: Option<String>,
        /// Day of the month each period starts on (1-28)
        #[arg(short, long)]
        start_day: Option<u32>,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: KeyValueStore + ?Sized>(
    session: &mut Session,
    store: &mut S,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    match cmd {
        BudgetCommands::Show => print_budget(session, settings),

        BudgetCommands::Set { amount, start_day } => {
            if amount.is_none() && start_day.is_none() {
                return Err(TrackerError::Validation(
                    "Nothing to change. Pass --amount and/or --start-day.".into(),
                ));
            }

            // Validate both before applying either
            let mut updated = session.clone();
            if let Some(amount) = amount {
                updated.set_monthly_budget(&amount)?;
            }
            if let Some(day) = start_day {
                updated.set_period_start_day(day)?;
            }
            *session = updated;

            println!("Budget updated.");
            print_budget(session, settings);
            session.save(store);
        }
    }

    Ok(())
}

fn print_budget(session: &Session, settings: &Settings) {
    let budget = session.budget();
    let period = PeriodService::new(settings).current_period(budget.period_start_day);

    println!(
        "Budget per period: {}",
        format_amount(budget.budget_value(), &settings.currency_symbol)
    );
    println!("Period starts on day: {}", budget.period_start_day);
    println!("Current period: {}", period.label());
}
