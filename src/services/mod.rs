//! Service layer for periodbook
//!
//! Pure logic on top of the models: budget period accounting and transfer
//! code encoding and decoding.

pub mod period;
pub mod transfer;

pub use period::{
    current_period, expenses_in_period, newest_first, period_label, BudgetStatus, PeriodService,
    PeriodSummary,
};
pub use transfer::{export_state, import_state, PendingImport, TransferCode, TransferPayload};
