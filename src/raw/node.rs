use super::arena::Arena;
use super::handle::{Handle, Link};
use super::weight::Weight;

/// Which child slot a walk took. Left and right cases share one
/// implementation indexed by `Dir`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Dir {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A weight-balanced tree node owning its element and its two child slots.
#[derive(Clone)]
pub(crate) struct Node<T> {
    children: [Link; 2],
    weight: Weight,
    element: T,
}

impl<T> Node<T> {
    /// Creates a node with no children.
    pub(crate) const fn leaf(element: T) -> Self {
        Self {
            children: [None, None],
            weight: Weight::ONE,
            element,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, dir: Dir) -> Link {
        self.children[dir.index()]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Link) {
        self.children[dir.index()] = child;
    }

    #[inline]
    pub(crate) const fn weight(&self) -> Weight {
        self.weight
    }

    #[inline]
    pub(crate) const fn element(&self) -> &T {
        &self.element
    }

    /// Swaps in a new element, returning the old one. The caller keeps the
    /// ordering invariant.
    #[inline]
    pub(crate) fn replace_element(&mut self, element: T) -> T {
        core::mem::replace(&mut self.element, element)
    }

    pub(crate) fn into_element(self) -> T {
        self.element
    }
}

/// Weight of the subtree behind `link`; the empty subtree weighs 0.
#[inline]
pub(crate) fn weight_of<T>(nodes: &Arena<Node<T>>, link: Link) -> usize {
    link.map_or(0, |h| nodes.get(h).weight.to_usize())
}

/// Recomputes `1 + left.weight + right.weight` for a node whose children
/// already carry correct weights.
pub(crate) fn update_weight<T>(nodes: &mut Arena<Node<T>>, handle: Handle) {
    let node = nodes.get(handle);
    let weight = 1 + weight_of(nodes, node.child(Dir::Left)) + weight_of(nodes, node.child(Dir::Right));
    nodes.get_mut(handle).weight = Weight::from_usize(weight);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn dir_opposite() {
        assert_eq!(Dir::Left.opposite(), Dir::Right);
        assert_eq!(Dir::Right.opposite(), Dir::Left);
        assert_eq!(Dir::Left.index(), 0);
        assert_eq!(Dir::Right.index(), 1);
    }

    #[test]
    fn leaf_has_weight_one_and_empty_children() {
        let mut nodes = Arena::new();
        let h = nodes.alloc(Node::leaf(7u64));
        let node = nodes.get(h);
        assert_eq!(node.weight().to_usize(), 1);
        assert_eq!(node.child(Dir::Left), None);
        assert_eq!(node.child(Dir::Right), None);
        assert_eq!(*node.element(), 7);
        assert_eq!(weight_of(&nodes, None), 0);
        assert_eq!(weight_of(&nodes, Some(h)), 1);
    }

    #[test]
    fn update_weight_sums_children() {
        let mut nodes = Arena::new();
        let a = nodes.alloc(Node::leaf(1));
        let c = nodes.alloc(Node::leaf(3));
        let b = nodes.alloc(Node::leaf(2));
        nodes.get_mut(b).set_child(Dir::Left, Some(a));
        nodes.get_mut(b).set_child(Dir::Right, Some(c));
        update_weight(&mut nodes, b);
        assert_eq!(nodes.get(b).weight().to_usize(), 3);
    }
}
