//! Weight-ratio rebalancing.
//!
//! Uses the integer parameters `(Δ, Γ) = (5/2, 3/2)`, which are known to keep
//! insert and delete balanced with single and double rotations (Hirai &
//! Yamamoto, "Balancing weight-balanced trees", JFP 2011).

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Dir, Node, weight_of};
use super::rotation::{double_rotate, rotate};

/// `sibling * (w(opposite) + 1) < child * (w(dir) + 1)` means "too heavy on `dir`".
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ratio {
    sibling: usize,
    child: usize,
}

/// A node is deficient on `dir` when `5 * (w(opposite) + 1) < 2 * (w(dir) + 1)`.
pub(crate) const DELTA: Ratio = Ratio {
    sibling: 5,
    child: 2,
};

/// The heavy child takes a single rotation when it is skewed outward by this ratio.
pub(crate) const GAMMA: Ratio = Ratio {
    sibling: 2,
    child: 3,
};

/// Returns whether `node` is heavier on `dir` than `ratio` allows.
#[inline]
pub(crate) fn is_skewed<T>(nodes: &Arena<Node<T>>, node: Handle, dir: Dir, ratio: Ratio) -> bool {
    let n = nodes.get(node);
    let toward = weight_of(nodes, n.child(dir)) + 1;
    let away = weight_of(nodes, n.child(dir.opposite())) + 1;
    ratio.sibling * away < ratio.child * toward
}

/// Restores the balance criterion at `node`, whose children are balanced and
/// whose weight is current. Returns the root of the (possibly rotated)
/// subtree, which the caller must store in the slot that owned `node`.
///
/// At most one side can be deficient: the two tests together would need
/// `25 * (w(left) + 1) < 4 * (w(left) + 1)`.
pub(crate) fn rebalance<T>(nodes: &mut Arena<Node<T>>, node: Handle) -> Handle {
    for dir in [Dir::Left, Dir::Right] {
        if !is_skewed(nodes, node, dir, DELTA) {
            continue;
        }
        let heavy = nodes.get(node).child(dir).expect("`rebalance()` - heavy child is empty!");
        return if is_skewed(nodes, heavy, dir, GAMMA) {
            rotate(nodes, node, dir.opposite())
        } else {
            double_rotate(nodes, node, dir.opposite())
        };
    }
    node
}
