//! Expense identifiers
//!
//! Identifiers are opaque strings. New ones are random UUIDs so that entries
//! created in quick succession never collide; identifiers arriving from a
//! transfer code are kept verbatim whatever their shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form used in listings
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| ExpenseId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ExpenseId::from("1717171717171");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1717171717171\"");

        let back: ExpenseId = serde_json::from_str("\"1717171717171\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_short_form() {
        let id = ExpenseId::from("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(id.short(), "550e8400");

        let tiny = ExpenseId::from("42");
        assert_eq!(tiny.short(), "42");
    }
}
