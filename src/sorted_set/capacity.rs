use super::SortedSet;
use crate::comparator::OrdComparator;
use crate::raw::RawSortedSet;

impl<T: Ord> SortedSet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set: SortedSet<i32> = SortedSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, OrdComparator)
    }
}

impl<T, C> SortedSet<T, C> {
    /// Creates an empty set compared by `cmp`, with capacity for at least
    /// `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        SortedSet {
            raw: RawSortedSet::with_capacity(capacity, cmp),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set: SortedSet<i32> = SortedSet::with_capacity(32);
    /// assert!(set.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::from([1]);
    /// set.reserve(10);
    /// assert!(set.capacity() >= 11);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }
}
