//! Growable indexable sequence with fail-fast cursors.
//!
//! [`DynamicArray`] is the list type of the container framework and also backs
//! the JSON array type. It keeps its elements in contiguous logical order,
//! grows by doubling (amortized O(1) append), and never shrinks implicitly.
//!
//! Every structural mutation (insert, remove, clear) bumps an internal
//! modification counter. Borrowing iteration via [`DynamicArray::iter`] is
//! the idiomatic fast path; [`DynamicArray::cursor`] returns a detached
//! [`ArrayCursor`] that revalidates the counter on every step and reports
//! [`Error::ConcurrentModification`](crate::Error::ConcurrentModification)
//! if the array changed underneath it.
//!
//! ## Examples
//!
//! ```rust
//! use coffer::DynamicArray;
//!
//! let mut list = DynamicArray::new();
//! list.add(1);
//! list.add(2);
//! list.add(3);
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.get(1), Ok(&2));
//! assert_eq!(list.index_of(&3), Some(2));
//!
//! let removed = list.remove_at(0).unwrap();
//! assert_eq!(removed, 1);
//! assert_eq!(list.to_vec(), vec![2, 3]);
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

const MIN_CAPACITY: usize = 8;

/// A growable, 0-indexed sequence with structural equality and an
/// order-dependent combined hash.
///
/// # Examples
///
/// ```rust
/// use coffer::DynamicArray;
///
/// let a: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
/// let b: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(a, b);
/// assert_eq!(a.hash_code(), b.hash_code());
/// ```
pub struct DynamicArray<T> {
    buf: Vec<T>,
    mod_count: u64,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array. No buffer is allocated until the first add.
    #[must_use]
    pub fn new() -> Self {
        DynamicArray {
            buf: Vec::new(),
            mod_count: 0,
        }
    }

    /// Creates an empty array with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DynamicArray {
            buf: Vec::with_capacity(capacity),
            mod_count: 0,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the current buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.buf
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.buf.len()))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.buf.len();
        self.buf
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }

    /// Replaces the element at `index`, returning the previous element.
    ///
    /// Replacement is not a structural modification: live cursors stay valid.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, element))
    }

    /// Appends an element, growing the buffer if needed.
    pub fn add(&mut self, element: T) {
        self.grow_for(1);
        self.buf.push(element);
        self.mod_count += 1;
    }

    /// Inserts an element at `index`, shifting later elements right.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        if index > self.buf.len() {
            return Err(Error::index_out_of_range(index, self.buf.len()));
        }
        self.grow_for(1);
        self.buf.insert(index, element);
        self.mod_count += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.buf.len() {
            return Err(Error::index_out_of_range(index, self.buf.len()));
        }
        self.mod_count += 1;
        Ok(self.buf.remove(index))
    }

    /// Removes all elements. The buffer capacity is retained.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.mod_count += 1;
    }

    /// Appends every element produced by `items`.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }

    /// Returns the elements as a shared slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// Returns the elements as a mutable slice.
    ///
    /// Reordering or overwriting elements through the slice is not a
    /// structural modification; live cursors stay valid.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Returns a borrowing iterator over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buf.iter()
    }

    /// Returns a detached fail-fast cursor positioned before the first
    /// element.
    ///
    /// The cursor captures the current modification counter; any structural
    /// mutation after that point makes its next step fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coffer::{DynamicArray, Error};
    ///
    /// let mut list: DynamicArray<i32> = [1, 2].into_iter().collect();
    /// let mut cur = list.cursor();
    /// assert_eq!(cur.next(&list), Ok(&1));
    ///
    /// list.add(3);
    /// assert_eq!(cur.next(&list), Err(Error::ConcurrentModification));
    /// ```
    #[must_use]
    pub fn cursor(&self) -> ArrayCursor {
        ArrayCursor {
            expected: self.mod_count,
            index: 0,
        }
    }

    /// Returns a mutable view of the half-open range `[start, end)`.
    ///
    /// The view borrows the parent, so mutations through it are visible in
    /// the parent once the view is dropped; its own bounds track inserts and
    /// removals made through it.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `start > end` or `end > len`.
    pub fn sub_list(&mut self, start: usize, end: usize) -> Result<SubList<'_, T>> {
        if start > end || end > self.buf.len() {
            return Err(Error::index_out_of_range(end, self.buf.len()));
        }
        Ok(SubList {
            parent: self,
            start,
            len: end - start,
        })
    }

    fn grow_for(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed <= self.buf.capacity() {
            return;
        }
        let mut new_cap = if self.buf.capacity() == 0 {
            MIN_CAPACITY
        } else {
            self.buf.capacity() * 2
        };
        while new_cap < needed {
            new_cap *= 2;
        }
        self.buf.reserve_exact(new_cap - self.buf.len());
    }
}

impl<T: PartialEq> DynamicArray<T> {
    /// Returns `true` if some element equals `element`.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.buf.contains(element)
    }

    /// Returns the index of the first element equal to `element`.
    #[must_use]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.buf.iter().position(|e| e == element)
    }

    /// Returns the index of the last element equal to `element`.
    #[must_use]
    pub fn last_index_of(&self, element: &T) -> Option<usize> {
        self.buf.iter().rposition(|e| e == element)
    }

    /// Removes the first element equal to `element`, returning whether one
    /// was found.
    pub fn remove_value(&mut self, element: &T) -> bool {
        match self.index_of(element) {
            Some(index) => {
                self.buf.remove(index);
                self.mod_count += 1;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if every element of `others` is contained here.
    #[must_use]
    pub fn contains_all(&self, others: &[T]) -> bool {
        others.iter().all(|e| self.contains(e))
    }

    /// Removes every element equal to any element of `others`, returning
    /// whether the array changed.
    pub fn remove_all(&mut self, others: &[T]) -> bool {
        let before = self.buf.len();
        self.buf.retain(|e| !others.contains(e));
        if self.buf.len() != before {
            self.mod_count += 1;
            true
        } else {
            false
        }
    }

    /// Keeps only elements equal to some element of `others`, returning
    /// whether the array changed.
    pub fn retain_all(&mut self, others: &[T]) -> bool {
        let before = self.buf.len();
        self.buf.retain(|e| others.contains(e));
        if self.buf.len() != before {
            self.mod_count += 1;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Returns a snapshot copy of the elements in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.buf.clone()
    }
}

impl<T: Hash> DynamicArray<T> {
    /// Order-dependent combined hash: a 31-polynomial accumulation of the
    /// element hashes. Equal arrays produce equal hash codes.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        let mut h: u64 = 1;
        for element in &self.buf {
            h = h.wrapping_mul(31).wrapping_add(crate::hash_of(element));
        }
        h
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        DynamicArray {
            buf: self.buf.clone(),
            mod_count: 0,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.buf).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buf.hash(state);
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(buf: Vec<T>) -> Self {
        DynamicArray { buf, mod_count: 0 }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        DynamicArray {
            buf: Vec::from_iter(iter),
            mod_count: 0,
        }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

/// A detached fail-fast cursor over a [`DynamicArray`].
///
/// The cursor does not borrow the array; each step re-presents the array and
/// is checked against the modification counter captured at creation.
#[derive(Debug, Clone)]
pub struct ArrayCursor {
    expected: u64,
    index: usize,
}

impl ArrayCursor {
    /// Returns `true` if a following [`next`](ArrayCursor::next) can yield an
    /// element (assuming the array was not modified).
    #[must_use]
    pub fn has_next<T>(&self, array: &DynamicArray<T>) -> bool {
        self.index < array.len()
    }

    /// Yields the next element.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if the array was structurally
    /// modified since the cursor was created; [`Error::NoSuchElement`] past
    /// the last element.
    pub fn next<'a, T>(&mut self, array: &'a DynamicArray<T>) -> Result<&'a T> {
        if array.mod_count != self.expected {
            return Err(Error::ConcurrentModification);
        }
        match array.buf.get(self.index) {
            Some(element) => {
                self.index += 1;
                Ok(element)
            }
            None => Err(Error::NoSuchElement),
        }
    }
}

/// A mutable view over a contiguous range of a [`DynamicArray`].
///
/// Writes through the view are bounds-checked against the view's own range
/// and land directly in the parent buffer.
///
/// # Examples
///
/// ```rust
/// use coffer::DynamicArray;
///
/// let mut list: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
/// {
///     let mut view = list.sub_list(1, 3).unwrap();
///     assert_eq!(view.as_slice(), &[2, 3]);
///     view.remove_at(0).unwrap();
/// }
/// assert_eq!(list.to_vec(), vec![1, 3]);
/// ```
pub struct SubList<'a, T> {
    parent: &'a mut DynamicArray<T>,
    start: usize,
    len: usize,
}

impl<'a, T> SubList<'a, T> {
    /// Returns the number of elements in the view's range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view's range is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the element at `index` within the view.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(Error::index_out_of_range(index, self.len));
        }
        self.parent.get(self.start + index)
    }

    /// Replaces the element at `index` within the view, returning the
    /// previous element.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        if index >= self.len {
            return Err(Error::index_out_of_range(index, self.len));
        }
        self.parent.set(self.start + index, element)
    }

    /// Appends an element at the end of the view's range, shifting the
    /// parent's later elements right. The view grows by one.
    pub fn add(&mut self, element: T) {
        // start + len <= parent.len holds by construction
        self.parent.grow_for(1);
        self.parent.buf.insert(self.start + self.len, element);
        self.parent.mod_count += 1;
        self.len += 1;
    }

    /// Inserts an element at `index` within the view. The view grows by one.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        if index > self.len {
            return Err(Error::index_out_of_range(index, self.len));
        }
        self.parent.insert(self.start + index, element)?;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index` within the view. The view
    /// shrinks by one.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(Error::index_out_of_range(index, self.len));
        }
        let removed = self.parent.remove_at(self.start + index)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Returns the viewed range as a shared slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.parent.buf[self.start..self.start + self.len]
    }
}

impl<'a, T: Clone> SubList<'a, T> {
    /// Returns a snapshot copy of the viewed range.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_order_and_size() {
        let mut list = DynamicArray::new();
        for i in 0..100 {
            list.add(i);
        }
        assert_eq!(list.len(), 100);
        assert_eq!(list.to_vec(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn growth_doubles_capacity() {
        let mut list = DynamicArray::new();
        list.add(0);
        assert_eq!(list.capacity(), MIN_CAPACITY);
        for i in 1..=MIN_CAPACITY {
            list.add(i);
        }
        assert_eq!(list.capacity(), MIN_CAPACITY * 2);
    }

    #[test]
    fn insert_and_remove_shift_elements() {
        let mut list: DynamicArray<i32> = [1, 3].into_iter().collect();
        list.insert(1, 2).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 3]);

        assert_eq!(list.remove_at(1), Ok(2));
        assert_eq!(list.to_vec(), vec![1, 3]);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut list: DynamicArray<i32> = [1].into_iter().collect();
        assert_eq!(list.get(1), Err(Error::index_out_of_range(1, 1)));
        assert_eq!(list.set(5, 9), Err(Error::index_out_of_range(5, 1)));
        assert_eq!(list.insert(3, 9), Err(Error::index_out_of_range(3, 1)));
        assert!(list.remove_at(1).is_err());
    }

    #[test]
    fn search_finds_first_and_last() {
        let list: DynamicArray<i32> = [1, 2, 2, 3].into_iter().collect();
        assert_eq!(list.index_of(&2), Some(1));
        assert_eq!(list.last_index_of(&2), Some(2));
        assert_eq!(list.index_of(&9), None);
    }

    #[test]
    fn remove_value_removes_first_match() {
        let mut list: DynamicArray<i32> = [1, 2, 2].into_iter().collect();
        assert!(list.remove_value(&2));
        assert_eq!(list.to_vec(), vec![1, 2]);
        assert!(!list.remove_value(&9));
    }

    #[test]
    fn bulk_operations() {
        let mut list: DynamicArray<i32> = [1, 2, 3, 4].into_iter().collect();
        assert!(list.contains_all(&[2, 4]));
        assert!(!list.contains_all(&[2, 5]));

        assert!(list.remove_all(&[2, 4]));
        assert_eq!(list.to_vec(), vec![1, 3]);

        list.add_all([5, 6]);
        assert!(list.retain_all(&[1, 5]));
        assert_eq!(list.to_vec(), vec![1, 5]);
    }

    #[test]
    fn structural_equality_and_hash() {
        let a: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        let b: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        let c: DynamicArray<i32> = [3, 2, 1].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a, c);
    }

    #[test]
    fn sub_list_writes_through_to_parent() {
        let mut list: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        {
            let mut view = list.sub_list(1, 3).unwrap();
            assert_eq!(view.to_vec(), vec![2, 3]);
            assert_eq!(view.remove_at(0), Ok(2));
            assert_eq!(view.len(), 1);
        }
        assert_eq!(list.to_vec(), vec![1, 3]);
    }

    #[test]
    fn sub_list_bounds_track_its_own_range() {
        let mut list: DynamicArray<i32> = [1, 2, 3, 4].into_iter().collect();
        let mut view = list.sub_list(1, 3).unwrap();
        assert!(view.get(2).is_err());
        view.add(9);
        assert_eq!(view.as_slice(), &[2, 3, 9]);
        assert_eq!(view.get(2), Ok(&9));
        drop(view);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 9, 4]);
    }

    #[test]
    fn sub_list_rejects_bad_range() {
        let mut list: DynamicArray<i32> = [1, 2].into_iter().collect();
        assert!(list.sub_list(2, 1).is_err());
        assert!(list.sub_list(0, 3).is_err());
    }

    #[test]
    fn cursor_walks_in_order() {
        let list: DynamicArray<i32> = [10, 20].into_iter().collect();
        let mut cur = list.cursor();
        assert!(cur.has_next(&list));
        assert_eq!(cur.next(&list), Ok(&10));
        assert_eq!(cur.next(&list), Ok(&20));
        assert!(!cur.has_next(&list));
        assert_eq!(cur.next(&list), Err(Error::NoSuchElement));
    }

    #[test]
    fn cursor_fails_fast_after_mutation() {
        let mut list: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        let mut cur = list.cursor();
        assert_eq!(cur.next(&list), Ok(&1));
        list.remove_at(0).unwrap();
        assert_eq!(cur.next(&list), Err(Error::ConcurrentModification));
    }

    #[test]
    fn set_is_not_structural() {
        let mut list: DynamicArray<i32> = [1, 2].into_iter().collect();
        let mut cur = list.cursor();
        list.set(0, 9).unwrap();
        assert_eq!(cur.next(&list), Ok(&9));
    }

    #[test]
    fn clear_retains_capacity() {
        let mut list: DynamicArray<i32> = (0..20).collect();
        let cap = list.capacity();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), cap);
    }
}
