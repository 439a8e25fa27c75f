//! Hash set derived from [`HashTable`].
//!
//! [`DerivedSet`] stores members as keys of a `HashTable<T, ()>`; presence of
//! a key denotes membership. Every invariant of the backing table carries
//! over: unspecified iteration order, 3/4 load-factor rehashing, and
//! fail-fast cursors.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::DerivedSet;
//!
//! let set: DerivedSet<i32> = [1, 2, 2, 3].into_iter().collect();
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(&2));
//! ```

use crate::error::{Error, Result};
use crate::table::{HashTable, TableCursor};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// A set of unique elements under the `Eq` + `Hash` contract.
pub struct DerivedSet<T> {
    table: HashTable<T, ()>,
}

impl<T> DerivedSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        DerivedSet {
            table: HashTable::new(),
        }
    }

    /// Creates an empty set sized for `capacity` members.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DerivedSet {
            table: HashTable::with_capacity(capacity),
        }
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set holds no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns a borrowing iterator over the members in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.table.keys()
    }

    /// Returns a detached fail-fast cursor over the members.
    #[must_use]
    pub fn cursor(&self) -> SetCursor {
        SetCursor {
            inner: self.table.cursor(),
        }
    }
}

impl<T: Hash + Eq> DerivedSet<T> {
    /// Adds a member, returning `true` if it was newly inserted and `false`
    /// if it was already present.
    pub fn add(&mut self, element: T) -> bool {
        self.table.put(element, ()).is_none()
    }

    /// Removes a member, returning whether it was present.
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(element).is_some()
    }

    /// Returns `true` if `element` is a member.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains_key(element)
    }

    /// Adds every element produced by `items`, returning whether the set
    /// changed.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        let mut changed = false;
        for item in items {
            changed |= self.add(item);
        }
        changed
    }

    /// Returns `true` if every element of `others` is a member.
    #[must_use]
    pub fn contains_all<'a, I: IntoIterator<Item = &'a T>>(&self, others: I) -> bool
    where
        T: 'a,
    {
        others.into_iter().all(|e| self.contains(e))
    }

    /// Removes every element of `others`, returning whether the set changed.
    pub fn remove_all<'a, I: IntoIterator<Item = &'a T>>(&mut self, others: I) -> bool
    where
        T: 'a,
    {
        let mut changed = false;
        for element in others {
            changed |= self.remove(element);
        }
        changed
    }

    /// Keeps only members present in `others`, returning whether the set
    /// changed.
    pub fn retain_all(&mut self, others: &DerivedSet<T>) -> bool
    where
        T: Clone,
    {
        let stale: Vec<T> = self
            .iter()
            .filter(|member| !others.contains(member))
            .cloned()
            .collect();
        self.remove_all(&stale)
    }

    /// Order-independent combined hash: the wrapping sum of the member
    /// hashes. Equal sets produce equal hash codes.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, member| acc.wrapping_add(crate::hash_of(member)))
    }
}

impl<T> Default for DerivedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DerivedSet<T> {
    fn clone(&self) -> Self {
        DerivedSet {
            table: self.table.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DerivedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq> PartialEq for DerivedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<T: Hash + Eq> Eq for DerivedSet<T> {}

impl<T: Hash + Eq> FromIterator<T> for DerivedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = DerivedSet::new();
        set.add_all(iter);
        set
    }
}

impl<T: Hash + Eq> Extend<T> for DerivedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T> IntoIterator for &'a DerivedSet<T> {
    type Item = &'a T;
    type IntoIter = Box<dyn Iterator<Item = &'a T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A detached fail-fast cursor over a [`DerivedSet`]'s members.
#[derive(Debug, Clone)]
pub struct SetCursor {
    inner: TableCursor,
}

impl SetCursor {
    /// Returns `true` if a following [`next`](SetCursor::next) can yield a
    /// member (assuming the set was not modified).
    #[must_use]
    pub fn has_next<T>(&self, set: &DerivedSet<T>) -> bool {
        self.inner.has_next(&set.table)
    }

    /// Yields the next member.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if the set was structurally
    /// modified since the cursor was created; [`Error::NoSuchElement`] past
    /// the last member.
    pub fn next<'a, T>(&mut self, set: &'a DerivedSet<T>) -> Result<&'a T> {
        let (member, _) = self.inner.next(&set.table)?;
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let set: DerivedSet<i32> = [1, 2, 2, 3].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn add_reports_newness() {
        let mut set = DerivedSet::new();
        assert!(set.add("a"));
        assert!(!set.add("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut set: DerivedSet<i32> = [1].into_iter().collect();
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
    }

    #[test]
    fn bulk_operations() {
        let mut set: DerivedSet<i32> = [1, 2, 3, 4].into_iter().collect();
        assert!(set.contains_all(&[1, 4]));
        assert!(!set.contains_all(&[1, 9]));

        assert!(set.remove_all(&[1, 2]));
        assert_eq!(set.len(), 2);

        let keep: DerivedSet<i32> = [3].into_iter().collect();
        assert!(set.retain_all(&keep));
        assert!(set.contains(&3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn equality_is_order_independent() {
        let a: DerivedSet<i32> = (0..50).collect();
        let b: DerivedSet<i32> = (0..50).rev().collect();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn cursor_fails_fast() {
        let mut set: DerivedSet<i32> = [1, 2, 3].into_iter().collect();
        let mut cur = set.cursor();
        cur.next(&set).unwrap();
        set.add(4);
        assert_eq!(cur.next(&set), Err(Error::ConcurrentModification));
    }

    #[test]
    fn cursor_visits_all_members() {
        let set: DerivedSet<i32> = (0..10).collect();
        let mut cur = set.cursor();
        let mut seen = Vec::new();
        while cur.has_next(&set) {
            seen.push(*cur.next(&set).unwrap());
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }
}
