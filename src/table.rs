//! Open hash map with chaining and fail-fast cursors.
//!
//! [`HashTable`] maps keys to values under the standard equality + hash
//! contract (`Eq` + `Hash`: equal keys must hash equally). Entries live in
//! bucket chains that preserve insertion order within a chain; the table-wide
//! iteration order is unspecified and may change across rehashes.
//!
//! The bucket array holds a power-of-two number of chains and is rebuilt
//! (every entry redistributed) whenever the load factor would exceed 3/4.
//! Rehashing never invalidates keys or values, only bucket positions, and it
//! bumps the modification counter so live cursors fail fast.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::HashTable;
//!
//! let mut table = HashTable::new();
//! assert_eq!(table.put("x", 1), None);
//! assert_eq!(table.put("x", 2), Some(1));
//! assert_eq!(table.get("x"), Some(&2));
//! assert_eq!(table.remove("x"), Some(2));
//! assert_eq!(table.get("x"), None);
//! ```

use crate::error::{Error, Result};
use ahash::RandomState;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

const INITIAL_BUCKETS: usize = 16;

struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// A hash map with chained buckets, a 3/4 load-factor rehash policy, and
/// detached fail-fast cursors.
///
/// `get`/`remove` of an absent key return `None`, never an error, so callers
/// can choose between strict and defaulting access patterns.
pub struct HashTable<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
    mod_count: u64,
    state: RandomState,
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table. Buckets are allocated on the first insert.
    #[must_use]
    pub fn new() -> Self {
        HashTable {
            buckets: Vec::new(),
            len: 0,
            mod_count: 0,
            state: RandomState::new(),
        }
    }

    /// Creates an empty table sized so that `capacity` entries fit without
    /// rehashing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut table = Self::new();
        if capacity > 0 {
            let buckets = (capacity * 4 / 3 + 1)
                .next_power_of_two()
                .max(INITIAL_BUCKETS);
            table.buckets = Vec::with_capacity(buckets);
            table.buckets.resize_with(buckets, Vec::new);
        }
        table
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all entries. The bucket array is retained.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
        self.mod_count += 1;
    }

    /// Returns a borrowing iterator over `(key, value)` pairs in unspecified
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a borrowing iterator over the keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().flatten().map(|entry| &entry.key)
    }

    /// Returns a borrowing iterator over the values in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.buckets.iter().flatten().map(|entry| &entry.value)
    }

    /// Returns a detached fail-fast cursor over the entries.
    ///
    /// Any structural mutation after creation (including a rehash triggered
    /// by an insert) makes the cursor's next step fail with
    /// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification).
    #[must_use]
    pub fn cursor(&self) -> TableCursor {
        TableCursor {
            expected: self.mod_count,
            bucket: 0,
            slot: 0,
        }
    }

    fn position_from(&self, mut bucket: usize, mut slot: usize) -> Option<(usize, usize)> {
        while bucket < self.buckets.len() {
            if slot < self.buckets[bucket].len() {
                return Some((bucket, slot));
            }
            bucket += 1;
            slot = 0;
        }
        None
    }
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    fn hash_key<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut hasher = self.state.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn bucket_index(&self, hash: u64) -> usize {
        // bucket count is a power of two
        (hash as usize) & (self.buckets.len() - 1)
    }

    /// Returns a reference to the value stored under `key`, or `None` if the
    /// key is absent.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_key(key);
        let bucket = self.bucket_index(hash);
        self.buckets[bucket]
            .iter()
            .find(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_key(key);
        let bucket = self.bucket_index(hash);
        self.buckets[bucket]
            .iter_mut()
            .find(|entry| entry.hash == hash && entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Inserts or overwrites `key`, returning the previous value if the key
    /// was already present.
    ///
    /// Overwriting an existing key is not a structural modification; adding
    /// a new entry is, and may trigger a rehash.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.buckets.is_empty() {
            self.buckets.resize_with(INITIAL_BUCKETS, Vec::new);
        }
        let hash = self.hash_key(&key);
        let bucket = self.bucket_index(hash);
        if let Some(entry) = self.buckets[bucket]
            .iter_mut()
            .find(|entry| entry.hash == hash && entry.key == key)
        {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        self.buckets[bucket].push(Entry { hash, key, value });
        self.len += 1;
        self.mod_count += 1;
        if self.len > self.buckets.len() * 3 / 4 {
            self.rehash();
        }
        None
    }

    /// Removes `key`, returning the stored value if the key was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_key(key);
        let bucket = self.bucket_index(hash);
        let position = self.buckets[bucket]
            .iter()
            .position(|entry| entry.hash == hash && entry.key.borrow() == key)?;
        // Vec::remove keeps the chain's insertion order intact
        let entry = self.buckets[bucket].remove(position);
        self.len -= 1;
        self.mod_count += 1;
        Some(entry.value)
    }

    /// Copies every entry of `other` into this table; on key collision the
    /// incoming value wins.
    pub fn put_all(&mut self, other: &HashTable<K, V>)
    where
        K: Clone,
        V: Clone,
    {
        for (key, value) in other.entries() {
            self.put(key.clone(), value.clone());
        }
    }

    fn rehash(&mut self) {
        let new_count = (self.buckets.len() * 2).max(INITIAL_BUCKETS);
        let old = std::mem::take(&mut self.buckets);
        self.buckets.resize_with(new_count, Vec::new);
        for entry in old.into_iter().flatten() {
            let bucket = self.bucket_index(entry.hash);
            self.buckets[bucket].push(entry);
        }
        self.mod_count += 1;
    }
}

impl<K, V: PartialEq> HashTable<K, V> {
    /// Returns `true` if some entry stores a value equal to `value`.
    /// Linear scan over all entries.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.values().any(|v| v == value)
    }
}

impl<K: Hash, V: Hash> HashTable<K, V> {
    /// Order-independent combined hash: the wrapping sum of each entry's
    /// `key_hash ^ value_hash`. Equal tables produce equal hash codes.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        self.buckets
            .iter()
            .flatten()
            .fold(0u64, |acc, entry| {
                acc.wrapping_add(crate::hash_of(&entry.key) ^ crate::hash_of(&entry.value))
            })
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for HashTable<K, V> {
    fn clone(&self) -> Self {
        // cloning the RandomState keeps the seeds, so cached hashes stay valid
        HashTable {
            buckets: self
                .buckets
                .iter()
                .map(|bucket| {
                    bucket
                        .iter()
                        .map(|entry| Entry {
                            hash: entry.hash,
                            key: entry.key.clone(),
                            value: entry.value.clone(),
                        })
                        .collect()
                })
                .collect(),
            len: self.len,
            mod_count: 0,
            state: self.state.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for HashTable<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .entries()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for HashTable<K, V> {}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for HashTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// A detached fail-fast cursor over a [`HashTable`]'s entries.
///
/// Yields entries in unspecified order. Each step revalidates the table's
/// modification counter.
#[derive(Debug, Clone)]
pub struct TableCursor {
    expected: u64,
    bucket: usize,
    slot: usize,
}

impl TableCursor {
    /// Returns `true` if a following [`next`](TableCursor::next) can yield an
    /// entry (assuming the table was not modified).
    #[must_use]
    pub fn has_next<K, V>(&self, table: &HashTable<K, V>) -> bool {
        table.position_from(self.bucket, self.slot).is_some()
    }

    /// Yields the next entry.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if the table was structurally
    /// modified since the cursor was created; [`Error::NoSuchElement`] past
    /// the last entry.
    pub fn next<'a, K, V>(&mut self, table: &'a HashTable<K, V>) -> Result<(&'a K, &'a V)> {
        if table.mod_count != self.expected {
            return Err(Error::ConcurrentModification);
        }
        match table.position_from(self.bucket, self.slot) {
            Some((bucket, slot)) => {
                self.bucket = bucket;
                self.slot = slot + 1;
                let entry = &table.buckets[bucket][slot];
                Ok((&entry.key, &entry.value))
            }
            None => Err(Error::NoSuchElement),
        }
    }
}
