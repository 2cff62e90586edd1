//! Root-to-target walks, by element or by rank.
//!
//! A mutating caller passes a [`Path`] to record every `(node, direction)`
//! decision; read-only callers pass `None` and nothing is stored.

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Dir, Node, weight_of};
use crate::comparator::Comparator;

/// Steps kept inline. Under the 5:2 ratio a child's `weight + 1` is at most
/// 5/7 of its parent's, so a tree of `n` nodes is less than
/// `log(n + 1) / log(7/5)` deep. 64 steps stay inline up to about 2.2e9
/// nodes; deeper paths in larger trees spill to the heap.
pub(crate) const PATH_INLINE: usize = 64;

/// One decision on the way down: at `node` we descended into `dir`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Step {
    pub(crate) node: Handle,
    pub(crate) dir: Dir,
}

/// Ancestors of the target, root first. The target's owning slot is
/// `last().node`'s child on `last().dir`, or the root slot when empty.
pub(crate) type Path = SmallVec<[Step; PATH_INLINE]>;

/// Where a search by element ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Search {
    /// The node holding a matching element, if any.
    pub(crate) node: Link,
    /// 1-based rank of the match, or the rank the element would take if
    /// inserted.
    pub(crate) rank: usize,
}

/// Walks from `root` towards `probe`, testing the equality predicate before
/// the ordering predicate at every node.
pub(crate) fn search_by_element<T, C>(
    nodes: &Arena<Node<T>>,
    root: Link,
    cmp: &C,
    probe: &T,
    mut path: Option<&mut Path>,
) -> Search
where
    C: Comparator<T> + ?Sized,
{
    debug_assert!(path.as_ref().is_none_or(|p| p.is_empty()), "`search_by_element()` - path is not empty!");

    // Elements passed by on right turns, plus one.
    let mut rank = 1;
    let mut current = root;

    while let Some(handle) = current {
        let node = nodes.get(handle);
        let left_weight = weight_of(nodes, node.child(Dir::Left));

        if cmp.is_match(probe, node.element()) {
            return Search {
                node: Some(handle),
                rank: rank + left_weight,
            };
        }

        let dir = if cmp.is_less(probe, node.element()) {
            Dir::Left
        } else {
            rank += 1 + left_weight;
            Dir::Right
        };
        if let Some(path) = path.as_mut() {
            path.push(Step {
                node: handle,
                dir,
            });
        }
        current = node.child(dir);
    }

    Search {
        node: None,
        rank,
    }
}

/// Walks from `root` to the node at 1-based `rank`.
///
/// # Panics
///
/// Panics if `rank` is not in `1..=weight(root)`.
pub(crate) fn search_by_rank<T>(nodes: &Arena<Node<T>>, root: Link, rank: usize, mut path: Option<&mut Path>) -> Handle {
    assert!(
        (1..=weight_of(nodes, root)).contains(&rank),
        "`search_by_rank()` - `rank` out of range!"
    );
    debug_assert!(path.as_ref().is_none_or(|p| p.is_empty()), "`search_by_rank()` - path is not empty!");

    let mut remaining = rank;
    let mut current = root;

    loop {
        let handle = current.expect("`search_by_rank()` - subtree weights are inconsistent!");
        let node = nodes.get(handle);
        let here = 1 + weight_of(nodes, node.child(Dir::Left));

        let dir = match remaining.cmp(&here) {
            core::cmp::Ordering::Equal => return handle,
            core::cmp::Ordering::Less => Dir::Left,
            core::cmp::Ordering::Greater => {
                remaining -= here;
                Dir::Right
            }
        };
        if let Some(path) = path.as_mut() {
            path.push(Step {
                node: handle,
                dir,
            });
        }
        current = node.child(dir);
    }
}
