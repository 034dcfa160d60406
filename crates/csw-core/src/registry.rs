//! Per-action codespace registry keyed by display name
//!
//! A [`Registry`] is the immutable snapshot an action works against. It is
//! built from one listing fetch, never cached, and discarded when the
//! action completes.

use std::collections::HashMap;

use crate::error::CodespaceError;
use crate::schema::{Codespace, RawCodespace};

/// Snapshot of codespaces keyed by display key
///
/// Display keys are unique within one snapshot. When two codespaces
/// resolve to the same key, the later record in fetch order overwrites the
/// earlier one (last-write-wins); the overwritten record keeps its
/// original position in the key order. This collision policy is
/// deliberate, not an error.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Codespace>,
    /// Display keys in fetch order, first occurrence keeps the slot
    order: Vec<String>,
}

impl Registry {
    /// Fold raw listing records into a registry
    ///
    /// # Errors
    ///
    /// Fails fast with [`CodespaceError::MalformedRecord`] on the first
    /// record missing a required field; a partial registry is never
    /// produced.
    pub fn from_records(records: Vec<RawCodespace>) -> Result<Self, CodespaceError> {
        let mut registry = Self::default();
        for raw in records {
            registry.insert(Codespace::from_raw(raw)?);
        }
        Ok(registry)
    }

    fn insert(&mut self, codespace: Codespace) {
        let key = codespace.display_key().to_string();
        if self.entries.insert(key.clone(), codespace).is_none() {
            self.order.push(key);
        }
    }

    /// Look up a codespace by display key
    pub fn get(&self, key: &str) -> Option<&Codespace> {
        self.entries.get(key)
    }

    /// Display keys in fetch order
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no codespaces were listed (or none survived a filter)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codespaces in fetch order
    pub fn iter(&self) -> impl Iterator<Item = &Codespace> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    /// Sub-registry of codespaces matching `predicate`, fetch order kept
    pub fn filtered(&self, predicate: impl Fn(&Codespace) -> bool) -> Self {
        let mut filtered = Self::default();
        for codespace in self.iter() {
            if predicate(codespace) {
                filtered.insert(codespace.clone());
            }
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CodespaceState;

    fn record(name: &str, display_name: &str, state: &str) -> RawCodespace {
        serde_json::from_str(&format!(
            r#"{{
                "name": "{name}",
                "displayName": "{display_name}",
                "repository": "acme/widgets",
                "state": "{state}"
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_keys_follow_fetch_order() {
        let registry = Registry::from_records(vec![
            record("b-1", "", "Available"),
            record("a-2", "", "Shutdown"),
            record("c-3", "", "Starting"),
        ])
        .unwrap();

        assert_eq!(registry.keys(), ["b-1", "a-2", "c-3"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_display_name_wins_over_name_as_key() {
        let registry = Registry::from_records(vec![
            record("fox-123", "frontend", "Available"),
            record("owl-456", "", "Available"),
        ])
        .unwrap();

        assert!(registry.get("frontend").is_some());
        assert!(registry.get("fox-123").is_none());
        assert!(registry.get("owl-456").is_some());
    }

    #[test]
    fn test_duplicate_keys_resolve_last_write_wins() {
        let registry = Registry::from_records(vec![
            record("fox-123", "shared", "Available"),
            record("owl-456", "shared", "Shutdown"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 1);
        let winner = registry.get("shared").unwrap();
        assert_eq!(winner.name, "owl-456");
        assert_eq!(winner.state, CodespaceState::Shutdown);
        // the overwritten record's slot is kept, not re-appended
        assert_eq!(registry.keys(), ["shared"]);
    }

    #[test]
    fn test_malformed_record_aborts_build() {
        let records = vec![
            record("fox-123", "", "Available"),
            serde_json::from_str(r#"{"state": "Available", "repository": "acme/widgets"}"#)
                .unwrap(),
        ];

        let err = Registry::from_records(records).unwrap_err();
        assert!(matches!(
            err,
            CodespaceError::MalformedRecord { field: "name" }
        ));
    }

    #[test]
    fn test_filtered_keeps_order_and_matches() {
        let registry = Registry::from_records(vec![
            record("a-1", "", "Available"),
            record("b-2", "", "Shutdown"),
            record("c-3", "", "Available"),
            record("d-4", "", "Starting"),
        ])
        .unwrap();

        let available = registry.filtered(Codespace::is_available);
        assert_eq!(available.keys(), ["a-1", "c-3"]);

        let shutdown = registry.filtered(Codespace::is_shutdown);
        assert_eq!(shutdown.keys(), ["b-2"]);
    }

    #[test]
    fn test_empty_listing_builds_empty_registry() {
        let registry = Registry::from_records(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.keys().is_empty());
    }
}
