//! Handle map for resolving localization handles to text
//!
//! Built once from any number of localization documents, then lookups are
//! plain `HashMap` access with a case-tolerant fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A localized string entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedEntry {
    /// The localized text content
    pub text: String,
    /// Version of the localization, when the source declared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
}

/// Which source wins when two documents define the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// A later document overrides an earlier one.
    #[default]
    LaterWins,
    /// The first definition of a handle is kept.
    FirstWins,
}

/// Handle -> localized text lookup table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleMap {
    strings: HashMap<String, LocalizedEntry>,
}

impl HandleMap {
    /// Create a new empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of handles
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Insert one entry according to `policy`. Returns whether the map changed.
    pub fn insert(&mut self, handle: String, entry: LocalizedEntry, policy: MergePolicy) -> bool {
        match (self.strings.entry(handle), policy) {
            (Entry::Vacant(slot), _) => {
                slot.insert(entry);
                true
            }
            (Entry::Occupied(mut slot), MergePolicy::LaterWins) => {
                slot.insert(entry);
                true
            }
            (Entry::Occupied(_), MergePolicy::FirstWins) => false,
        }
    }

    /// Merge another map into this one, key by key.
    pub fn merge(&mut self, other: HandleMap, policy: MergePolicy) {
        for (handle, entry) in other.strings {
            self.insert(handle, entry, policy);
        }
    }

    /// Look up a handle: exact case first, then lowercase, then uppercase.
    #[must_use]
    pub fn get(&self, handle: &str) -> Option<&LocalizedEntry> {
        self.strings
            .get(handle)
            .or_else(|| self.strings.get(&handle.to_lowercase()))
            .or_else(|| self.strings.get(&handle.to_uppercase()))
    }

    /// Text for a handle, or `None` when it is unknown
    #[must_use]
    pub fn text(&self, handle: &str) -> Option<&str> {
        self.get(handle).map(|e| e.text.as_str())
    }

    /// Check if a handle resolves
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.get(handle).is_some()
    }

    /// Iterate all entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalizedEntry)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v))
    }
}
