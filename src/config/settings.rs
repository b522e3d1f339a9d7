//! User settings for periodbook
//!
//! Application preferences that are not part of the transferable budget data:
//! display currency, the end-of-period boundary rule and the QR image size.
//! The monthly budget and period start day live in the storage slots instead,
//! because they travel with transfer codes.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// Where the last day of a budget period ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodBoundary {
    /// The period ends at midnight at the start of its final day, so expenses
    /// timestamped later that day are not counted
    #[default]
    Midnight,
    /// The period ends at the last instant of its final day
    EndOfDay,
}

/// User settings for periodbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in summaries
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// End-of-period rule
    #[serde(default)]
    pub period_boundary: PeriodBoundary,

    /// Edge length in pixels of rendered QR images
    #[serde(default = "default_qr_size")]
    pub qr_size: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_qr_size() -> u32 {
    200
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            period_boundary: PeriodBoundary::default(),
            qr_size: default_qr_size(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
