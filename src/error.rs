//! Recoverable errors for the `try_*` operations.

use alloc::collections::TryReserveError;

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the fallible [`SortedSet`](crate::SortedSet) operations.
///
/// The panicking counterparts treat the same conditions as caller bugs.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A rank outside `1..=len` was requested.
    #[error("rank {rank} is out of range for a set of {len} elements")]
    RankOutOfRange { rank: usize, len: usize },

    /// Growing the node storage failed.
    #[error("node allocation failed: {0}")]
    OutOfMemory(TryReserveError),
}
