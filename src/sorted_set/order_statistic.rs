use core::ops::Index;

use super::SortedSet;
use crate::comparator::Comparator;
use crate::error::{Error, Result};
use crate::Rank;

impl<T, C> SortedSet<T, C> {
    fn check_rank(&self, rank: usize) -> Result<()> {
        let len = self.len();
        if (1..=len).contains(&rank) {
            Ok(())
        } else {
            Err(Error::RankOutOfRange {
                rank,
                len,
            })
        }
    }

    /// Returns the element at one-based position `rank` in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not in `1..=len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([10, 20, 30]);
    /// assert_eq!(*set.get_by_rank(1), 10);
    /// assert_eq!(*set.get_by_rank(3), 30);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> &T {
        assert!(self.check_rank(rank).is_ok(), "`SortedSet::get_by_rank()` - `rank` out of range!");
        self.raw.get_by_rank(rank)
    }

    /// Returns the element at one-based position `rank`, or an error if
    /// `rank` is not in `1..=len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] for a rank outside `1..=len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::{Error, SortedSet};
    ///
    /// let set = SortedSet::from([10, 20]);
    /// assert_eq!(set.try_get_by_rank(2), Ok(&20));
    /// assert_eq!(set.try_get_by_rank(0), Err(Error::RankOutOfRange { rank: 0, len: 2 }));
    /// ```
    pub fn try_get_by_rank(&self, rank: usize) -> Result<&T> {
        self.check_rank(rank)?;
        Ok(self.raw.get_by_rank(rank))
    }

    /// Removes and returns the element at one-based position `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not in `1..=len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let mut set = SortedSet::from([10, 20, 30]);
    /// assert_eq!(set.remove_by_rank(2), 20);
    /// assert_eq!(set.to_vec(), [10, 30]);
    /// ```
    pub fn remove_by_rank(&mut self, rank: usize) -> T {
        assert!(self.check_rank(rank).is_ok(), "`SortedSet::remove_by_rank()` - `rank` out of range!");
        self.raw.remove_by_rank(rank)
    }

    /// Removes and returns the element at one-based position `rank`, or
    /// returns an error and leaves the set unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] for a rank outside `1..=len`.
    pub fn try_remove_by_rank(&mut self, rank: usize) -> Result<T> {
        self.check_rank(rank)?;
        Ok(self.raw.remove_by_rank(rank))
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C> {
    /// Returns the one-based rank of the element matching `value` in sorted
    /// order, or `None` if no element matches.
    ///
    /// The rank equals one plus the number of elements strictly less than
    /// `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_set::SortedSet;
    ///
    /// let set = SortedSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(2));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.raw.get_with_rank(value).map(|(_, rank)| rank)
    }
}

/// Indexes into the set by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use wabi_set::{Rank, SortedSet};
///
/// let set = SortedSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(2)], 20);
/// ```
impl<T, C> Index<Rank> for SortedSet<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.try_get_by_rank(rank.0).expect("index out of bounds")
    }
}
