//! Mapping raw identifiers to human-readable labels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ResultPrintError;
use crate::Result;

/// Lookup table from a raw identifier to its display label.
///
/// Used for column headers (`"ship_postal_code"` → `"postal code"`) and,
/// optionally, for text cell values (`"NEWYORK"` → `"New York"`).
/// Lookups fall back to the identifier itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayNameMap {
    names: BTreeMap<String, String>,
}

impl DisplayNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single mapping (builder style)
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.insert(from, to);
        self
    }

    /// Add or replace a single mapping
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.names.insert(from.into(), to.into());
    }

    /// Merge another map into this one; entries from `other` win
    pub fn merge(&mut self, other: DisplayNameMap) {
        self.names.extend(other.names);
    }

    /// Resolve a raw identifier to its label, or return it unchanged.
    pub fn resolve<'a>(&'a self, source_name: &'a str) -> &'a str {
        self.names
            .get(source_name)
            .map(String::as_str)
            .unwrap_or(source_name)
    }

    pub fn get(&self, source_name: &str) -> Option<&str> {
        self.names.get(source_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Load a map from a JSON object file (`{"product_id": "id", ...}`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            ResultPrintError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DisplayNameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for DisplayNameMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.names
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn northwind_names() -> DisplayNameMap {
        [
            ("product_id", "id"),
            ("unit_price", "unit price"),
            ("ship_postal_code", "postal code"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolve_mapped() {
        let names = northwind_names();
        assert_eq!(names.resolve("unit_price"), "unit price");
    }

    #[test]
    fn test_resolve_falls_back_to_input() {
        let names = northwind_names();
        assert_eq!(names.resolve("freight"), "freight");
        assert_eq!(DisplayNameMap::new().resolve(""), "");
    }

    #[test]
    fn test_resolve_idempotent() {
        let names = northwind_names();
        for key in ["product_id", "freight", "ship_postal_code"] {
            assert_eq!(names.resolve(key), names.resolve(key));
        }
    }

    #[test]
    fn test_insert_replaces() {
        let mut names = DisplayNameMap::new().with("order_id", "id");
        names.insert("order_id", "order");
        assert_eq!(names.resolve("order_id"), "order");
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_merge_and_extend() {
        let mut names = DisplayNameMap::new().with("a", "A");
        names.merge(DisplayNameMap::new().with("a", "alpha").with("b", "B"));
        names.extend([("c", "C")]);
        assert_eq!(names.resolve("a"), "alpha");
        assert_eq!(names.resolve("b"), "B");
        assert_eq!(names.resolve("c"), "C");
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.json");
        fs::write(&path, r#"{"WESTVIRGINIA": "West Virginia"}"#).unwrap();

        let names = DisplayNameMap::from_path(&path).unwrap();
        assert_eq!(names.get("WESTVIRGINIA"), Some("West Virginia"));
    }

    #[test]
    fn test_from_path_rejects_non_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = DisplayNameMap::from_path(&path).unwrap_err();
        assert!(matches!(err, ResultPrintError::Json(_)));
    }
}
