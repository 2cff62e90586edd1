use core::num::NonZero;

use super::handle::{Handle, RawHandle};

/// Number of nodes in a non-empty subtree, including its root.
///
/// An empty subtree has no `Weight`; see [`weight_of`](super::node::weight_of).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Weight(NonZero<RawHandle>);

impl Weight {
    /// The arena never holds more than `Handle::MAX` nodes.
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(weight: usize) -> Self {
        assert!(weight != 0, "`Weight::from_usize()` - `weight` == 0!");
        assert!(weight <= Self::MAX, "`Weight::from_usize()` - `weight` > `Weight::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new(weight as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get() as usize
    }
}
