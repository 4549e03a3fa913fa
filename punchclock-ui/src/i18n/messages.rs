//! Message tables
//!
//! One table per locale, mapping message keys to localized strings. Locale
//! files are JSON objects; nested objects become dot-separated keys and
//! arrays are indexed (`{"nav": {"home": "Home"}}` gives `nav.home`).

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Localized strings of a single locale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageTable {
    entries: HashMap<String, String>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a locale file. The root must be a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (key, value) in &root {
            table.flatten(key, value);
        }
        Ok(table)
    }

    fn flatten(&mut self, key: &str, value: &Value) {
        match value {
            Value::Object(map) => {
                for (child, value) in map {
                    self.flatten(&format!("{}.{}", key, child), value);
                }
            }
            Value::Array(items) => {
                for (idx, value) in items.iter().enumerate() {
                    self.flatten(&format!("{}.{}", key, idx), value);
                }
            }
            Value::String(s) => self.insert(key, s.as_str()),
            Value::Number(n) => self.insert(key, n.to_string()),
            Value::Bool(b) => self.insert(key, b.to_string()),
            Value::Null => {}
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_keys_are_flattened() {
        let table = MessageTable::from_json(
            r#"{
                "nav": { "home": "Home", "admin": "Admin" },
                "title": "Terminal",
                "steps": ["scan", "wait"],
                "limit": 3,
                "unused": null
            }"#,
        )
        .unwrap();

        assert_eq!(table.get("nav.home"), Some("Home"));
        assert_eq!(table.get("nav.admin"), Some("Admin"));
        assert_eq!(table.get("title"), Some("Terminal"));
        assert_eq!(table.get("steps.1"), Some("wait"));
        assert_eq!(table.get("limit"), Some("3"));
        assert!(!table.contains("unused"));
        assert!(!table.contains("nav"));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(MessageTable::from_json(r#"["a", "b"]"#).is_err());
        assert!(MessageTable::from_json("not json").is_err());
        assert!(MessageTable::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let table: MessageTable = [("foo", "Foo"), ("bar", "Bar")].into_iter().collect();
        assert_eq!(table.get("foo"), Some("Foo"));
        assert_eq!(table.keys().count(), 2);
    }
}
