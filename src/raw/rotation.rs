//! Single and double rotations.
//!
//! Both take the current subtree root and return the new one; the caller
//! stores the result in whichever slot owned the old root.

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Dir, Node, update_weight};

/// Promotes `y.child[dir.opposite()]` to the subtree root; `y` becomes its
/// child on `dir`.
///
/// ```text
///         y                   x
///        / \                 / \
///       x   A     ==>       B   y
///      / \                     / \
///     B   C                   C   A
/// ```
///
/// (drawn for `dir == Right`)
pub(crate) fn rotate<T>(nodes: &mut Arena<Node<T>>, y: Handle, dir: Dir) -> Handle {
    let total = nodes.get(y).weight();
    let x = nodes.get(y).child(dir.opposite()).expect("`rotate()` - promoted child is empty!");

    let inner = nodes.get(x).child(dir);
    nodes.get_mut(y).set_child(dir.opposite(), inner);
    nodes.get_mut(x).set_child(dir, Some(y));

    update_weight(nodes, y);
    update_weight(nodes, x);
    debug_assert_eq!(nodes.get(x).weight(), total, "`rotate()` changed the subtree weight");

    tracing::trace!("rotated {y:?} {dir:?}, new subtree root {x:?}");
    x
}

/// Promotes the inner grandchild `x = z.child[dir.opposite()].child[dir]` to
/// the subtree root, with `y` and `z` as its children.
///
/// ```text
///         z                     x
///        / \                  /   \
///       y   A                y     z
///      / \        ==>       / \   / \
///     B   x                B   C D   A
///        / \
///       C   D
/// ```
///
/// (drawn for `dir == Right`)
pub(crate) fn double_rotate<T>(nodes: &mut Arena<Node<T>>, z: Handle, dir: Dir) -> Handle {
    let total = nodes.get(z).weight();
    let y = nodes.get(z).child(dir.opposite()).expect("`double_rotate()` - child is empty!");
    let x = nodes.get(y).child(dir).expect("`double_rotate()` - grandchild is empty!");

    let toward_y = nodes.get(x).child(dir.opposite());
    let toward_z = nodes.get(x).child(dir);
    nodes.get_mut(y).set_child(dir, toward_y);
    nodes.get_mut(x).set_child(dir.opposite(), Some(y));
    nodes.get_mut(z).set_child(dir.opposite(), toward_z);
    nodes.get_mut(x).set_child(dir, Some(z));

    update_weight(nodes, z);
    update_weight(nodes, y);
    update_weight(nodes, x);
    debug_assert_eq!(nodes.get(x).weight(), total, "`double_rotate()` changed the subtree weight");

    tracing::trace!("double-rotated {z:?} {dir:?}, new subtree root {x:?}");
    x
}
