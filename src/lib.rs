//! periodbook - personal expense tracking against a recurring budget
//!
//! This library provides the core functionality for the periodbook expense
//! tracker. Expenses are summed per budget period, a month-long window that
//! starts on a configurable day of the month, and compared against a single
//! budget. The whole dataset can be moved between devices as a transfer code.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, budget configuration, periods)
//! - `storage`: Key-value slot storage
//! - `services`: Period accounting and the transfer code codec
//! - `session`: The in-memory state and its mutations
//! - `export`: CSV and QR output
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `periodbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use periodbook::config::{paths::TrackerPaths, settings::Settings};
//! use periodbook::storage::FileStore;
//! use periodbook::Session;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut store = FileStore::open(&paths);
//! let session = Session::load(&store);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{ImportError, TrackerError, TrackerResult};
pub use session::Session;
