//! In-memory key-value store
//!
//! Used by tests and by callers that keep their own persistence.

use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::TrackerResult;

/// Key-value store backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots written so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("budget").unwrap(), None);

        store.set("budget", "500").unwrap();
        store.set("budget", "600").unwrap();
        assert_eq!(store.get("budget").unwrap().as_deref(), Some("600"));
        assert_eq!(store.len(), 1);
    }
}
