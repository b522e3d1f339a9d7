//! Export module for periodbook
//!
//! Outward-facing projections of the data:
//! - CSV: expenses and the current period's totals (spreadsheet-compatible)
//! - QR: image references for transfer codes

pub mod csv;
pub mod qr;

pub use csv::{default_file_name, export_expenses_csv};
pub use qr::{render_transfer_qr, ChartApiRenderer, QrRenderer, MAX_SCANNABLE_PAYLOAD};
