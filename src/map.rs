//! Ordered map types for headers and materialized blocks.
//!
//! Header fields keep the order of their schema, and materialized maps keep
//! the header order followed by `"children"`. Both are backed by
//! [`IndexMap`] so iteration and serialized output follow insertion order.
//!
//! ```rust
//! use tblparse::{TableMap, Value};
//!
//! let mut map = TableMap::new();
//! map.insert("name".to_string(), Value::from("apples"));
//! map.insert("count".to_string(), Value::from("3"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "count"]);
//! ```

use indexmap::IndexMap;

/// Header of a block: field name to token, in schema order.
pub type Header = IndexMap<String, String>;

/// An ordered map of string keys to table values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMap(IndexMap<String, crate::Value>);

impl TableMap {
    /// Creates an empty `TableMap`.
    #[must_use]
    pub fn new() -> Self {
        TableMap(IndexMap::new())
    }

    /// Creates an empty `TableMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TableMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl Default for TableMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, crate::Value)> for TableMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        TableMap(IndexMap::from_iter(iter))
    }
}
