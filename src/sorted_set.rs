use core::fmt;

use crate::comparator::{Comparator, FnComparator, OrdComparator};
use crate::error::{Error, Result};
use crate::raw::{Dir, RawSortedSet};

mod capacity;
mod order_statistic;

/// An ordered set based on a weight-balanced binary search tree.
///
/// Every subtree caches its node count, so besides O(log n) membership,
/// insertion and removal the set answers order-statistic queries in
/// O(log n): the element at a given rank ([`get_by_rank`]) and the rank of a
/// given element ([`rank_of`]). Ranks are one-based.
///
/// Elements are compared only through a [`Comparator`], which supplies an
/// equality predicate and a strict less-than predicate independently. The
/// default [`OrdComparator`] uses the element's [`Ord`] implementation;
/// [`with_predicates`] accepts two closures. At most one element per
/// equality class is stored, and inserting a matching element overwrites the
/// stored one.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the comparator,
/// changes while it is in the set. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `SortedSet` that
/// observed the logic error and not result in undefined behavior.
///
/// Traversal is exposed only through [`walk_in_order`] and
/// [`walk_in_reverse`], which visit every element before returning.
///
/// [`get_by_rank`]: SortedSet::get_by_rank
/// [`rank_of`]: SortedSet::rank_of
/// [`with_predicates`]: SortedSet::with_predicates
/// [`walk_in_order`]: SortedSet::walk_in_order
/// [`walk_in_reverse`]: SortedSet::walk_in_reverse
///
/// # Examples
///
/// ```
/// use wabi_set::SortedSet;
///
/// let mut books = SortedSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.remove(&"The Odyssey");
///
/// // Second book in alphabetical order.
/// assert_eq!(*books.get_by_rank(2), "The Great Gatsby");
///
/// books.walk_in_order(|book| println!("{book}"));
/// ```
pub struct SortedSet<T, C = OrdComparator> {
    raw: RawSortedSet<T, C>,
}

impl<T: Ord> SortedSet<T> {
    /// Makes a new, empty `SortedSet` ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set: SortedSet<i32> = SortedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(OrdComparator)
    }
}

impl<T, E, L> SortedSet<T, FnComparator<E, L>>
where
    E: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    /// Makes a new, empty `SortedSet` compared by an equality predicate and a
    /// strict less-than predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// // (id, score) records, unique and ordered by id.
    /// let mut scores = SortedSet::with_predicates(
    ///     |a: &(u32, u32), b: &(u32, u32)| a.0 == b.0,
    ///     |a: &(u32, u32), b: &(u32, u32)| a.0 < b.0,
    /// );
    /// scores.insert((7, 10));
    /// scores.insert((3, 55));
    ///
    /// // Same id: the stored record is overwritten.
    /// assert!(scores.insert((7, 99)));
    /// assert_eq!(scores.get(&(7, 0)), Some(&(7, 99)));
    /// assert_eq!(scores.rank_of(&(7, 0)), Some(2));
    /// ```
    #[must_use]
    pub fn with_predicates(is_match: E, is_less: L) -> Self {
        Self::with_comparator(FnComparator::new(is_match, is_less))
    }
}

impl<T, C> SortedSet<T, C> {
    /// Makes a new, empty `SortedSet` compared by `cmp`.
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        SortedSet {
            raw: RawSortedSet::new(cmp),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut v = SortedSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the size in bytes of one stored element.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set: SortedSet<u64> = SortedSet::new();
    /// assert_eq!(set.element_size(), 8);
    /// ```
    #[must_use]
    pub const fn element_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Returns the comparator the set was built with.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut v = SortedSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Calls `visit` once per element, in ascending order.
    ///
    /// The walk always runs to completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([3, 1, 2]);
    /// let mut seen = Vec::new();
    /// set.walk_in_order(|&x| seen.push(x));
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn walk_in_order<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.raw.walk(Dir::Right, visit);
    }

    /// Calls `visit` once per element, in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([3, 1, 2]);
    /// let mut seen = Vec::new();
    /// set.walk_in_reverse(|&x| seen.push(x));
    /// assert_eq!(seen, [3, 2, 1]);
    /// ```
    pub fn walk_in_reverse<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.raw.walk(Dir::Left, visit);
    }

    /// Copies the elements into a `Vec` in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> alloc::vec::Vec<T>
    where
        T: Clone,
    {
        let mut out = alloc::vec::Vec::with_capacity(self.len());
        self.walk_in_order(|x| out.push(x.clone()));
        out
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C> {
    /// Returns `true` if the set contains an element matching `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains(&self, value: &T) -> bool {
        self.raw.search(value).node.is_some()
    }

    /// Returns a reference to the stored element matching `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.get_with_rank(value).map(|(stored, _)| stored)
    }

    /// Returns the stored element matching `value` together with its rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([10, 20, 30]);
    /// assert_eq!(set.get_with_rank(&20), Some((&20, 2)));
    /// assert_eq!(set.get_with_rank(&25), None);
    /// ```
    pub fn get_with_rank(&self, value: &T) -> Option<(&T, usize)> {
        self.raw.get_with_rank(value)
    }

    /// Adds a value to the set, overwriting a matching element if present.
    ///
    /// Returns `true` if a matching element was already present (and has
    /// been overwritten), `false` if the value was newly added.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    ///
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value).0.is_some()
    }

    /// Like [`insert`](Self::insert), also returning the rank the value now
    /// holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::from([10, 30]);
    /// assert_eq!(set.insert_with_rank(20), (false, 2));
    /// assert_eq!(set.insert_with_rank(30), (true, 3));
    /// ```
    pub fn insert_with_rank(&mut self, value: T) -> (bool, usize) {
        let (old, rank) = self.raw.insert(value);
        (old.is_some(), rank)
    }

    /// Adds a value to the set, returning the matching element it replaced,
    /// if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::with_predicates(
    ///     |a: &(char, i32), b: &(char, i32)| a.0 == b.0,
    ///     |a: &(char, i32), b: &(char, i32)| a.0 < b.0,
    /// );
    /// assert_eq!(set.replace(('a', 1)), None);
    /// assert_eq!(set.replace(('a', 2)), Some(('a', 1)));
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.raw.insert(value).0
    }

    /// Like [`insert`](Self::insert), but reports a failure to grow the node
    /// storage instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if a new node could not be allocated.
    /// The set is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    /// assert_eq!(set.try_insert(5), Ok(false));
    /// assert_eq!(set.try_insert(5), Ok(true));
    /// ```
    pub fn try_insert(&mut self, value: T) -> Result<bool> {
        self.raw.try_reserve_one().map_err(Error::OutOfMemory)?;
        Ok(self.insert(value))
    }

    /// Removes the element matching `value`. Returns whether one was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, value: &T) -> bool {
        self.raw.remove(value).is_some()
    }

    /// Removes the element matching `value`, returning the rank it held
    /// before removal, or `None` if it was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::from([10, 20, 30]);
    /// assert_eq!(set.remove_with_rank(&20), Some(2));
    /// assert_eq!(set.remove_with_rank(&20), None);
    /// ```
    pub fn remove_with_rank(&mut self, value: &T) -> Option<usize> {
        self.raw.remove(value).map(|(_, rank)| rank)
    }

    /// Removes and returns the element matching `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.raw.remove(value).map(|(removed, _)| removed)
    }

    /// Returns a reference to the first element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> {
        self.try_get_by_rank(1).ok()
    }

    /// Returns a reference to the last element in the set, if any.
    pub fn last(&self) -> Option<&T> {
        self.try_get_by_rank(self.len()).ok()
    }

    /// Removes the first element from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::from([1, 2]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.try_remove_by_rank(1).ok()
    }

    /// Removes the last element from the set and returns it, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        self.try_remove_by_rank(self.len()).ok()
    }
}

impl<T: Clone, C: Clone> Clone for SortedSet<T, C> {
    fn clone(&self) -> Self {
        SortedSet {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.walk_in_order(|x| {
            set.entry(x);
        });
        set.finish()
    }
}

impl<T, C: Default> Default for SortedSet<T, C> {
    fn default() -> Self {
        SortedSet::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for SortedSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SortedSet::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for SortedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SortedSet<T> {
    /// Converts a `[T; N]` into a `SortedSet<T>`.
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set1 = SortedSet::from([1, 2, 3, 4]);
    /// let set2: SortedSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1.to_vec(), set2.to_vec());
    /// ```
    fn from(arr: [T; N]) -> Self {
        let mut set = SortedSet::with_capacity(N);
        set.extend(arr);
        set
    }
}
