//! Weight-balanced order-statistic sorted set for Rust.
//!
//! This crate provides [`SortedSet`], an ordered set of unique elements with
//! O(log n) membership, insertion and removal plus O(log n) order-statistic
//! operations:
//!
//! - [`get_by_rank`](SortedSet::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](SortedSet::rank_of) - Get the sorted position of an element
//! - [`remove_by_rank`](SortedSet::remove_by_rank) - Remove the element at a given sorted position
//! - Indexing by [`Rank`] - e.g., `set[Rank(1)]` for the smallest element
//!
//! Ranks are one-based.
//!
//! # Example
//!
//! ```
//! use wabi_set::{Rank, SortedSet};
//!
//! let mut set = SortedSet::new();
//! for x in [5, 8, 22, 46, 19, 93, 80, 6] {
//!     set.insert(x);
//! }
//!
//! assert_eq!(set.len(), 8);
//! assert!(set.contains(&46));
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(*set.get_by_rank(3), 8);
//! assert_eq!(set.rank_of(&80), Some(7));
//! assert_eq!(set[Rank(1)], 5);
//!
//! assert_eq!(set.remove_by_rank(4), 19);
//! assert_eq!(set.to_vec(), [5, 6, 8, 22, 46, 80, 93]);
//! ```
//!
//! # Comparators
//!
//! Elements are compared through a [`Comparator`], which supplies equality
//! and strict ordering as two independent predicates. [`OrdComparator`] uses
//! [`Ord`]; [`FnComparator`] (see [`SortedSet::with_predicates`]) wraps two
//! closures, which allows ordering composite elements by a key while
//! carrying a payload that is overwritten on re-insertion.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Every node caches the size of its subtree
//! - **Arena storage** - Nodes live in one contiguous slab and freed slots are reused
//!
//! # Implementation
//!
//! The set is a weight-balanced binary search tree. A node of weight `w`
//! (its subtree's node count) satisfies `5 * (w(light) + 1) >= 2 * (w(heavy) + 1)`
//! for both children; insertions and removals restore this on the way back
//! up their search path with single or double rotations.

#![no_std]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod error;
mod order_statistic;
mod raw;

pub mod sorted_set;

pub use comparator::{Comparator, FnComparator, OrdComparator};
pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use sorted_set::SortedSet;
