//! Comparator-driven sorting for [`DynamicArray`].
//!
//! ## Examples
//!
//! ```rust
//! use coffer::{sort, DynamicArray};
//!
//! let mut array: DynamicArray<i32> = [3, 1, 2].into_iter().collect();
//! sort(&mut array, |a: &i32, b: &i32| b.cmp(a));
//! assert_eq!(array.as_slice(), &[3, 2, 1]);
//! ```

use crate::array::DynamicArray;
use std::cmp::Ordering;

/// An ordering between two values of the same type.
///
/// Implemented for all `Fn(&T, &T) -> Ordering` closures, so a plain closure
/// works anywhere a `Comparator` is expected.
pub trait Comparator<T> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Sorts the array in place by `comparator`.
///
/// The sort is stable: elements that compare equal keep their relative
/// order. Reordering is not a structural modification, so live cursors
/// remain valid (though they may observe elements in the new order).
pub fn sort<T>(array: &mut DynamicArray<T>, comparator: impl Comparator<T>) {
    array
        .as_mut_slice()
        .sort_by(|a, b| comparator.compare(a, b));
}

/// Collects `items` into a new array sorted by `comparator`.
#[must_use]
pub fn sorted<T>(
    items: impl IntoIterator<Item = T>,
    comparator: impl Comparator<T>,
) -> DynamicArray<T> {
    let mut array: DynamicArray<T> = items.into_iter().collect();
    sort(&mut array, comparator);
    array
}
