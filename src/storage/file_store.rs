//! File-backed key-value store
//!
//! Each slot is a file named after its key inside the data directory.

use std::path::PathBuf;

use super::file_io::{read_text, write_text_atomic};
use super::KeyValueStore;
use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};

/// Key-value store keeping one file per slot
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at a directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create a store in the application's data directory
    ///
    /// A directory that cannot be created is logged, not returned: reads
    /// from such a store fail and fall back to defaults, and writes fail
    /// and leave the session in memory only.
    pub fn open(paths: &TrackerPaths) -> Self {
        if let Err(e) = paths.ensure_directories() {
            tracing::warn!(error = %e, "data directory unavailable, changes will not be saved");
        }
        Self::new(paths.data_dir())
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> TrackerResult<PathBuf> {
        if key.is_empty() || key.contains(|c: char| matches!(c, '/' | '\\' | '.')) {
            return Err(TrackerError::Storage(format!("Invalid slot name: {}", key)));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        read_text(self.slot_path(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        write_text_atomic(self.slot_path(key)?, value)
    }
}
