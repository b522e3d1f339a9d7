//! Transfer CLI commands
//!
//! Moving the whole dataset between devices with a transfer code.

use chrono::Utc;
use clap::Subcommand;
use std::io::Read;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::export::qr::{is_scannable, render_transfer_qr, ChartApiRenderer};
use crate::session::Session;
use crate::storage::KeyValueStore;

/// Transfer subcommands
#[derive(Subcommand)]
pub enum TransferCommands {
    /// Print a transfer code for all data
    Export {
        /// Skip the QR image link
        #[arg(long)]
        no_qr: bool,
    },

    /// Replace all data with the contents of a transfer code
    Import {
        /// The full transfer code (read from --file or stdin when omitted)
        code: Option<String>,
        /// Read the code from a file
        #[arg(short, long, conflicts_with = "code")]
        file: Option<PathBuf>,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Handle a transfer command
pub fn handle_transfer_command<S: KeyValueStore + ?Sized>(
    session: &mut Session,
    store: &mut S,
    settings: &Settings,
    cmd: TransferCommands,
) -> TrackerResult<()> {
    match cmd {
        TransferCommands::Export { no_qr } => {
            let transfer = session.export(Utc::now())?;

            println!("Reference code: {}", transfer.reference_code);
            println!();
            println!("Full transfer code:");
            println!("{}", transfer.payload);

            if !no_qr {
                println!();
                if !is_scannable(&transfer.payload) {
                    println!("Note: this code is too long to scan; copy the full code instead.");
                }
                let renderer = ChartApiRenderer::default();
                println!(
                    "QR image: {}",
                    render_transfer_qr(&renderer, &transfer.payload, settings.qr_size)
                );
            }
        }

        TransferCommands::Import { code, file, force } => {
            let input = read_code(code, file)?;
            let pending = session.stage_import(&input)?;

            println!("{}", pending.confirmation_prompt());

            if !force {
                println!();
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  periodbook transfer import <CODE> --force");
                return Ok(());
            }

            let count = pending.expense_count();
            session.commit_import(pending);
            session.save(store);
            println!("Imported {} expenses.", count);
        }
    }

    Ok(())
}

fn read_code(code: Option<String>, file: Option<PathBuf>) -> TrackerResult<String> {
    if let Some(code) = code {
        return Ok(code);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path).map_err(|e| {
            TrackerError::Io(format!("Failed to read {}: {}", path.display(), e))
        });
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn exported() -> (Session, String) {
        let mut session = Session::default();
        let date = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        session.add_expense("Coffee", "3.50", date).unwrap();
        session.add_expense("Rent", "900", date).unwrap();
        let code = session.export(date).unwrap().payload;
        (session, code)
    }

    fn import(code: &str, force: bool) -> TransferCommands {
        TransferCommands::Import {
            code: Some(code.into()),
            file: None,
            force,
        }
    }

    #[test]
    fn test_import_without_force_changes_nothing() {
        let (_, code) = exported();
        let mut session = Session::default();
        let mut store = MemoryStore::new();

        handle_transfer_command(&mut session, &mut store, &Settings::default(), import(&code, false))
            .unwrap();

        assert!(session.expenses().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_forced_import_replaces_and_saves() {
        let (source, code) = exported();
        let mut session = Session::default();
        let mut store = MemoryStore::new();

        handle_transfer_command(&mut session, &mut store, &Settings::default(), import(&code, true))
            .unwrap();

        assert_eq!(session, source);
        assert_eq!(Session::load(&store), source);
    }

    #[test]
    fn test_reference_code_rejected() {
        let mut session = Session::default();
        let mut store = MemoryStore::new();

        let err = handle_transfer_command(
            &mut session,
            &mut store,
            &Settings::default(),
            import("EYJLEHBL", true),
        )
        .unwrap_err();

        assert!(matches!(err, TrackerError::Import(ImportError::NeedsFullCode)));
    }

    #[test]
    fn test_code_from_file() {
        let (_, code) = exported();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.txt");
        std::fs::write(&path, format!("{}\n", code)).unwrap();

        assert_eq!(read_code(None, Some(path)).unwrap().trim(), code);
    }
}
