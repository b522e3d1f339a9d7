use anyhow::Result;
use clap::{Parser, Subcommand};

use periodbook::cli::{
    handle_budget_command, handle_expense_command, handle_export_command,
    handle_transfer_command,
};
use periodbook::config::{paths::TrackerPaths, settings::Settings};
use periodbook::services::period::PeriodService;
use periodbook::storage::FileStore;
use periodbook::Session;

#[derive(Parser)]
#[command(
    name = "periodbook",
    author = "Kaylee Beyene",
    version,
    about = "Track expenses against a recurring monthly budget",
    long_about = "periodbook records expenses and compares what you spent in the \
                  current budget period with your budget. Periods run for a month \
                  from a start day you choose, and all data can be moved to \
                  another device with a transfer code."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(periodbook::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(periodbook::cli::BudgetCommands),

    /// Move all data between devices
    #[command(subcommand)]
    Transfer(periodbook::cli::TransferCommands),

    /// Export data to a file
    #[command(subcommand)]
    Export(periodbook::cli::ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    periodbook::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut store = FileStore::open(&paths);
    let mut session = Session::load(&store);

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut session, &mut store, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut session, &mut store, &settings, cmd)?;
        }
        Some(Commands::Transfer(cmd)) => {
            handle_transfer_command(&mut session, &mut store, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&session, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            let period = PeriodService::new(&settings).current_period(session.budget().period_start_day);

            println!("periodbook Configuration");
            println!("========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Period boundary: {:?}", settings.period_boundary);
            println!("  QR image size:   {}px", settings.qr_size);
            println!();
            println!("Budget:");
            println!("  Budget per period: {}", session.budget().monthly_budget);
            println!("  Period start day:  {}", session.budget().period_start_day);
            println!("  Current period:    {}", period.label());
        }
        None => {
            println!("periodbook - expense tracking against a monthly budget");
            println!();
            println!("Run 'periodbook --help' for usage information.");
            println!("Run 'periodbook add <DESCRIPTION> <AMOUNT>' to record an expense.");
        }
    }

    Ok(())
}
