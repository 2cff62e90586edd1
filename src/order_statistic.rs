/// A one-based rank into the sorted order of a set: `Rank(1)` is the smallest
/// element and `Rank(set.len())` the largest.
///
/// # Examples
///
/// ```
/// use wabi_set::{Rank, SortedSet};
///
/// let set = SortedSet::from([30, 10, 20]);
///
/// assert_eq!(set[Rank(1)], 10);
/// assert_eq!(set[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
