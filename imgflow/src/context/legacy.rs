//! Unstructured legacy context mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value mapping retained for backward compatibility.
///
/// No validation is applied and nothing keeps this store in sync with the
/// carrier's typed records; callers supporting legacy consumers write to
/// both explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyContext {
    entries: BTreeMap<String, serde_json::Value>,
}

impl LegacyContext {
    /// Creates a new empty legacy mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a legacy mapping from existing entries.
    #[must_use]
    pub fn from_map(entries: BTreeMap<String, serde_json::Value>) -> Self {
        Self { entries }
    }

    /// Gets a value from the mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Sets a value, inserting or overwriting.
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.entries.insert(key.into(), value);
    }

    /// Removes a key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.entries.remove(key)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns all keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        self.entries.clone()
    }
}
