//! Element comparison.
//!
//! A [`SortedSet`](crate::SortedSet) never inspects its elements directly. It
//! asks a [`Comparator`] two independent questions: do these two elements
//! match, and is one strictly less than the other. Equality is not derived
//! from "neither is less", so a comparator may treat two elements as equal
//! while ordering them by a different projection, or order composite
//! elements by a key while matching on the same key with differing payloads.

use core::fmt;

/// Equality and strict ordering over `T`, supplied separately.
///
/// The two predicates must agree on the elements actually stored: for any two
/// elements `a` and `b` that do not match, exactly one of `is_less(a, b)` and
/// `is_less(b, a)` holds. Violating this is a logic error; the set stays
/// memory-safe but lookups may miss.
pub trait Comparator<T: ?Sized> {
    /// Returns `true` if `a` and `b` belong to the same equality class.
    fn is_match(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if `a` sorts strictly before `b`.
    fn is_less(&self, a: &T, b: &T) -> bool;
}

/// Compares with the element's own [`Eq`] and [`Ord`] implementations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct OrdComparator;

impl<T: ?Sized + Ord> Comparator<T> for OrdComparator {
    #[inline]
    fn is_match(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn is_less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// A comparator built from two closures.
///
/// # Examples
///
/// ```
/// use wabi_set::{Comparator, FnComparator};
///
/// // Order `(key, payload)` pairs by key alone.
/// let by_key = FnComparator::new(
///     |a: &(u32, char), b: &(u32, char)| a.0 == b.0,
///     |a: &(u32, char), b: &(u32, char)| a.0 < b.0,
/// );
/// assert!(by_key.is_match(&(1, 'x'), &(1, 'y')));
/// assert!(by_key.is_less(&(1, 'x'), &(2, 'a')));
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<E, L> {
    is_match: E,
    is_less: L,
}

impl<E, L> FnComparator<E, L> {
    /// Wraps an equality predicate and a strict less-than predicate.
    pub const fn new(is_match: E, is_less: L) -> Self {
        Self {
            is_match,
            is_less,
        }
    }
}

impl<T: ?Sized, E, L> Comparator<T> for FnComparator<E, L>
where
    E: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    #[inline]
    fn is_match(&self, a: &T, b: &T) -> bool {
        (self.is_match)(a, b)
    }

    #[inline]
    fn is_less(&self, a: &T, b: &T) -> bool {
        (self.is_less)(a, b)
    }
}

impl<E, L> fmt::Debug for FnComparator<E, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparator").finish_non_exhaustive()
    }
}
