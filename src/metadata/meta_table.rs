// src/metadata/meta_table.rs
use crate::metadata::MetadataSink;
use crate::types::MetaValue;
use std::collections::HashMap;

/// Flat, insertion-ordered key/value table of header metadata
///
/// This structure collects everything the header decoder publishes:
/// - Namespaced binary fields (e.g. `MeasureInfo.cfdLL`)
/// - Top-level `key: value` pairs from the info block
/// - Top-level pairs from the setup block
///
/// Writing an existing key replaces its value but keeps the key's original
/// position, so iteration order is the order keys were first seen.
#[derive(Debug, Clone, Default)]
pub struct MetaTable {
    entries: Vec<(String, MetaValue)>,
    index: HashMap<String, usize>,
}

impl MetaTable {
    /// Create an empty table
    ///
    /// # Example
    ///
    /// ```
    /// use sdt_rs::metadata::{MetaTable, MetadataSink};
    /// use sdt_rs::types::MetaValue;
    ///
    /// let mut table = MetaTable::new();
    /// table.put("Title".to_string(), MetaValue::from("cells"));
    /// table.put("Title".to_string(), MetaValue::from("beads"));
    ///
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get_text("Title"), Some("beads"));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value
    ///
    /// # Returns
    ///
    /// The previous value stored under `key`, if any
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) -> Option<MetaValue> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(MetaValue::as_i64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys starting with `"{namespace}."`, with the prefix stripped
    pub fn namespace<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = (&'a str, &'a MetaValue)> + 'a {
        self.iter().filter_map(move |(k, v)| {
            k.strip_prefix(namespace)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|field| (field, v))
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl MetadataSink for MetaTable {
    fn put(&mut self, key: String, value: MetaValue) {
        self.insert(key, value);
    }
}

impl<'a> IntoIterator for &'a MetaTable {
    type Item = (&'a str, &'a MetaValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a MetaValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = MetaTable::new();
        table.put("a".into(), MetaValue::Int(1));
        table.put("b".into(), MetaValue::Int(2));
        let previous = table.insert("a", MetaValue::Int(3));

        assert_eq!(previous, Some(MetaValue::Int(1)));
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(table.get_int("a"), Some(3));
    }

    #[test]
    fn test_overwrite_can_change_kind() {
        let mut table = MetaTable::new();
        table.put("x".into(), MetaValue::Int(1));
        table.put("x".into(), MetaValue::from("one"));
        assert_eq!(table.get_text("x"), Some("one"));
        assert_eq!(table.get_int("x"), None);
    }

    #[test]
    fn test_namespace_view() {
        let mut table = MetaTable::new();
        table.put("MeasureInfo.scanX".into(), MetaValue::Int(128));
        table.put("MeasureInfoX".into(), MetaValue::Int(0));
        table.put("MeasStopInfo.status".into(), MetaValue::Int(4));

        let fields: Vec<(&str, &MetaValue)> = table.namespace("MeasureInfo").collect();
        assert_eq!(fields, vec![("scanX", &MetaValue::Int(128))]);
    }

    #[test]
    fn test_clear() {
        let mut table = MetaTable::new();
        table.put("k".into(), MetaValue::Short(1));
        table.clear();
        assert!(table.is_empty());
        assert!(!table.contains_key("k"));
    }
}
