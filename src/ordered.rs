//! Insertion-ordered map for JSON objects.
//!
//! The general-purpose [`HashTable`](crate::HashTable) deliberately leaves
//! its iteration order unspecified, but object keys must serialize in
//! insertion order to give deterministic, diffable output. [`OrderedTable`]
//! provides that: entries live in an in-order vector, and a `HashTable` from
//! key to position makes lookups O(1). Overwriting an existing key keeps its
//! original position.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::OrderedTable;
//!
//! let mut map = OrderedTable::new();
//! map.insert("b".to_string(), 1);
//! map.insert("a".to_string(), 2);
//! map.insert("b".to_string(), 3);
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! assert_eq!(map.get("b"), Some(&3));
//! ```

use crate::table::HashTable;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// A map that preserves key insertion order.
///
/// Equality is order-sensitive: two tables are equal only if they hold equal
/// entries in the same insertion order.
pub struct OrderedTable<K, V> {
    entries: Vec<(K, V)>,
    index: HashTable<K, usize>,
}

impl<K, V> OrderedTable<K, V> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        OrderedTable {
            entries: Vec::new(),
            index: HashTable::new(),
        }
    }

    /// Creates an empty table sized for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedTable {
            entries: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Returns a borrowing iterator over `(key, value)` pairs in insertion
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns a borrowing iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns a borrowing iterator over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Hash + Eq + Clone, V> OrderedTable<K, V> {
    /// Inserts or overwrites `key`, returning the previous value if the key
    /// was already present. Overwriting keeps the key's original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&position) => {
                let slot = &mut self.entries[position].1;
                Some(std::mem::replace(slot, value))
            }
            None => {
                self.index.put(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }
}

impl<K: Hash + Eq, V> OrderedTable<K, V> {
    /// Returns a reference to the value stored under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.index.get(key) {
            Some(&position) => Some(&mut self.entries[position].1),
            None => None,
        }
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }
}

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for OrderedTable<K, V> {
    fn clone(&self) -> Self {
        OrderedTable {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedTable<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for OrderedTable<K, V> {}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = OrderedTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<K, V> IntoIterator for OrderedTable<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = OrderedTable::new();
        for key in ["z", "a", "m"] {
            map.insert(key.to_string(), ());
        }
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn overwrite_keeps_position_and_returns_old() {
        let mut map = OrderedTable::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        assert_eq!(map.insert("a".to_string(), 9), Some(1));
        let entries: Vec<_> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(entries, vec![("a".to_string(), 9), ("b".to_string(), 2)]);
    }

    #[test]
    fn lookup_by_borrowed_key() {
        let mut map = OrderedTable::new();
        map.insert("key".to_string(), 42);
        assert_eq!(map.get("key"), Some(&42));
        assert!(map.contains_key("key"));
        assert_eq!(map.get("other"), None);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a: OrderedTable<String, i32> =
            [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        let b: OrderedTable<String, i32> =
            [("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect();
        assert_ne!(a, b);
    }
}
