//! CLI commands for data export

use chrono::Local;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::export::csv::{default_file_name, export_expenses_csv};
use crate::services::period::PeriodService;
use crate::session::Session;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses and the current period summary to CSV
    Csv {
        /// Output file path (defaults to expenses_<today>.csv)
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    session: &Session,
    settings: &Settings,
    cmd: ExportCommands,
) -> TrackerResult<()> {
    match cmd {
        ExportCommands::Csv { output } => handle_export_csv(session, settings, output),
    }
}

fn handle_export_csv(
    session: &Session,
    settings: &Settings,
    output: Option<PathBuf>,
) -> TrackerResult<()> {
    let now = Local::now();
    let output =
        output.unwrap_or_else(|| PathBuf::from(default_file_name(now.date_naive())));

    let summary = PeriodService::new(settings).summary_at(session.state(), &now);

    // Render first so that nothing is written when there is nothing to export
    let mut buffer = Vec::new();
    export_expenses_csv(&mut buffer, session.expenses(), &summary, &Local)?;

    std::fs::write(&output, buffer).map_err(|e| {
        TrackerError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;

    println!(
        "Exported {} expenses to: {}",
        session.expenses().len(),
        output.display()
    );

    Ok(())
}
