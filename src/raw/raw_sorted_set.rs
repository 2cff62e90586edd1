use alloc::collections::TryReserveError;

use smallvec::SmallVec;

use super::arena::Arena;
use super::balance::rebalance;
use super::handle::{Handle, Link};
use super::node::{Dir, Node, update_weight, weight_of};
use super::path::{PATH_INLINE, Path, Search, Step, search_by_element, search_by_rank};
use crate::comparator::Comparator;

/// The weight-balanced tree backing `SortedSet`.
#[derive(Clone)]
pub(crate) struct RawSortedSet<T, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// The root slot; `None` for an empty set.
    root: Link,
    /// Equality and ordering predicates.
    cmp: C,
}

impl<T, C> RawSortedSet<T, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            cmp,
        }
    }

    /// Returns the number of elements, read from the root's weight.
    pub(crate) fn len(&self) -> usize {
        weight_of(&self.nodes, self.root)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn try_reserve_one(&mut self) -> Result<(), TryReserveError> {
        self.nodes.try_reserve_one()
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Drops every element.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the element at 1-based `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not in `1..=len`.
    pub(crate) fn get_by_rank(&self, rank: usize) -> &T {
        let handle = search_by_rank(&self.nodes, self.root, rank, None);
        self.nodes.get(handle).element()
    }

    /// Removes and returns the element at 1-based `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not in `1..=len`.
    pub(crate) fn remove_by_rank(&mut self, rank: usize) -> T {
        let mut path = Path::new();
        let target = search_by_rank(&self.nodes, self.root, rank, Some(&mut path));
        let removed = self.unlink(target, &mut path);
        self.retrace(&mut path);
        removed
    }

    /// Calls `visit` on every element, in order for `Dir::Right` and in
    /// reverse order for `Dir::Left`.
    pub(crate) fn walk<F>(&self, toward: Dir, mut visit: F)
    where
        F: FnMut(&T),
    {
        // Nodes whose element and far subtree are still pending.
        let mut pending: SmallVec<[Handle; PATH_INLINE]> = SmallVec::new();
        let near = toward.opposite();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                pending.push(handle);
                current = self.nodes.get(handle).child(near);
            }
            let Some(handle) = pending.pop() else {
                break;
            };
            let node = self.nodes.get(handle);
            visit(node.element());
            current = node.child(toward);
        }
    }

    /// Writes `link` into the slot that `parent` points at, or into the root
    /// slot when there is no parent.
    fn set_slot(&mut self, parent: Option<Step>, link: Link) {
        match parent {
            Some(step) => self.nodes.get_mut(step.node).set_child(step.dir, link),
            None => self.root = link,
        }
    }

    /// Detaches `target` from the tree and returns its element. `path` holds
    /// the ancestors of `target` and is extended through the successor walk
    /// when `target` has two children.
    fn unlink(&mut self, target: Handle, path: &mut Path) -> T {
        let node = self.nodes.get(target);
        let (left, right) = (node.child(Dir::Left), node.child(Dir::Right));

        let (victim, replacement) = match (left, right) {
            (None, only) | (only, None) => (target, only),
            (Some(_), Some(right)) => {
                // The in-order successor is the leftmost node of the right subtree.
                path.push(Step {
                    node: target,
                    dir: Dir::Right,
                });
                let mut successor = right;
                while let Some(next) = self.nodes.get(successor).child(Dir::Left) {
                    path.push(Step {
                        node: successor,
                        dir: Dir::Left,
                    });
                    successor = next;
                }
                (successor, self.nodes.get(successor).child(Dir::Right))
            }
        };

        self.set_slot(path.last().copied(), replacement);
        let removed = self.nodes.take(victim).into_element();
        if victim == target {
            tracing::trace!("spliced out {target:?}");
            removed
        } else {
            tracing::trace!("moved successor {victim:?} into {target:?}");
            self.nodes.get_mut(target).replace_element(removed)
        }
    }

    /// Walks `path` back to the root, refreshing each ancestor's weight and
    /// rebalancing it in its owning slot. Every level is visited: a local fix
    /// can still leave a shallower ancestor out of balance.
    fn retrace(&mut self, path: &mut Path) {
        while let Some(step) = path.pop() {
            update_weight(&mut self.nodes, step.node);
            let subtree = rebalance(&mut self.nodes, step.node);
            if subtree != step.node {
                self.set_slot(path.last().copied(), Some(subtree));
            }
        }
        debug_assert_eq!(self.len(), self.nodes.len(), "`retrace()` - root weight disagrees with node count!");
    }
}

impl<T, C: Comparator<T>> RawSortedSet<T, C> {
    /// Looks up `probe` without recording a path.
    pub(crate) fn search(&self, probe: &T) -> Search {
        search_by_element(&self.nodes, self.root, &self.cmp, probe, None)
    }

    /// Returns the stored element matching `probe` and its 1-based rank.
    pub(crate) fn get_with_rank(&self, probe: &T) -> Option<(&T, usize)> {
        let found = self.search(probe);
        found.node.map(|h| (self.nodes.get(h).element(), found.rank))
    }

    /// Inserts `value`, overwriting a matching element in place.
    ///
    /// Returns the overwritten element, if any, and the 1-based rank `value`
    /// now holds.
    pub(crate) fn insert(&mut self, value: T) -> (Option<T>, usize) {
        let mut path = Path::new();
        let found = search_by_element(&self.nodes, self.root, &self.cmp, &value, Some(&mut path));

        if let Some(handle) = found.node {
            // Same equality class: the shape does not change.
            let old = self.nodes.get_mut(handle).replace_element(value);
            return (Some(old), found.rank);
        }

        let leaf = self.nodes.alloc(Node::leaf(value));
        self.set_slot(path.last().copied(), Some(leaf));
        tracing::trace!("attached leaf {leaf:?} at depth {}", path.len());
        self.retrace(&mut path);
        (None, found.rank)
    }

    /// Removes the element matching `probe`.
    ///
    /// Returns the removed element and the rank it held before removal.
    pub(crate) fn remove(&mut self, probe: &T) -> Option<(T, usize)> {
        let mut path = Path::new();
        let found = search_by_element(&self.nodes, self.root, &self.cmp, probe, Some(&mut path));
        let target = found.node?;

        let removed = self.unlink(target, &mut path);
        self.retrace(&mut path);
        Some((removed, found.rank))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::comparator::{FnComparator, OrdComparator};
    use crate::raw::balance::{DELTA, is_skewed};
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<T, C: Comparator<T>> RawSortedSet<T, C> {
        /// Validates order, weight, balance and uniqueness. Panics with a
        /// descriptive message if any are violated.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let mut elements: Vec<&T> = Vec::new();
            let counted = self.validate_node(self.root, &mut elements, &mut errors);

            if counted != self.nodes.len() {
                errors.push(alloc::format!("reachable nodes={counted}, arena nodes={}", self.nodes.len()));
            }
            for pair in elements.windows(2) {
                if !self.cmp.is_less(pair[0], pair[1]) {
                    errors.push("in-order walk is not strictly increasing".into());
                }
                if self.cmp.is_match(pair[0], pair[1]) {
                    errors.push("neighbouring elements match".into());
                }
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn validate_node<'a>(&'a self, link: Link, elements: &mut Vec<&'a T>, errors: &mut Vec<String>) -> usize {
            let Some(handle) = link else {
                return 0;
            };
            let node = self.nodes.get(handle);
            let left = self.validate_node(node.child(Dir::Left), elements, errors);
            elements.push(node.element());
            let right = self.validate_node(node.child(Dir::Right), elements, errors);

            let weight = node.weight().to_usize();
            if weight != 1 + left + right {
                errors.push(alloc::format!("weight mismatch at {handle:?}: stored={weight}, actual={}", 1 + left + right));
            }
            for dir in [Dir::Left, Dir::Right] {
                if is_skewed(&self.nodes, handle, dir, DELTA) {
                    errors.push(alloc::format!("{handle:?} is out of balance toward {dir:?} ({left} vs {right})"));
                }
            }
            1 + left + right
        }

        fn to_vec(&self) -> Vec<T>
        where
            T: Clone,
        {
            let mut out = Vec::with_capacity(self.len());
            self.walk(Dir::Right, |e| out.push(e.clone()));
            out
        }
    }

    /// Fixed shuffle of 1..=100.
    const SHUFFLED: [u64; 100] = [
        5, 8, 22, 46, 19, 93, 80, 6, 64, 97, 71, 63, 85, 11, 44, 43, 41, 59, 68, 91, 87, 72, 15, 30, 77, 100, 83, 61,
        12, 98, 13, 73, 48, 16, 84, 28, 32, 82, 24, 50, 7, 53, 26, 78, 60, 92, 95, 18, 67, 21, 33, 89, 38, 27, 17, 52,
        79, 86, 56, 76, 45, 54, 20, 58, 66, 37, 2, 70, 81, 9, 1, 94, 40, 55, 42, 36, 96, 14, 74, 51, 4, 57, 75, 39, 62,
        90, 29, 69, 3, 49, 31, 47, 34, 65, 25, 10, 23, 99, 88, 35,
    ];

    fn shuffled_tree() -> RawSortedSet<u64, OrdComparator> {
        let mut tree = RawSortedSet::new(OrdComparator);
        for value in SHUFFLED {
            assert_eq!(tree.insert(value).0, None);
            tree.validate_invariants();
        }
        tree
    }

    #[test]
    fn shuffled_insert_then_rank_lookup() {
        let tree = shuffled_tree();
        assert_eq!(tree.len(), 100);
        assert_eq!(*tree.get_by_rank(7), 7);
        assert_eq!(tree.to_vec(), (1..=100).collect::<Vec<u64>>());
    }

    #[test]
    fn shuffled_remove_by_rank_then_membership() {
        let mut tree = shuffled_tree();
        assert_eq!(tree.remove_by_rank(52), 52);
        tree.validate_invariants();
        assert_eq!(tree.len(), 99);

        for i in 0..120u64 {
            let expected = (1..=100).contains(&i) && i != 52;
            assert_eq!(tree.search(&i).node.is_some(), expected, "membership of {i}");
        }
    }

    #[test]
    #[should_panic(expected = "`search_by_rank()` - `rank` out of range!")]
    fn empty_get_by_rank_panics() {
        let tree: RawSortedSet<u64, OrdComparator> = RawSortedSet::new(OrdComparator);
        let _ = tree.get_by_rank(1);
    }

    #[test]
    #[should_panic(expected = "`search_by_rank()` - `rank` out of range!")]
    fn empty_remove_by_rank_panics() {
        let mut tree: RawSortedSet<u64, OrdComparator> = RawSortedSet::new(OrdComparator);
        let _ = tree.remove_by_rank(1);
    }

    #[test]
    fn insert_reports_rank_and_overwrite() {
        let mut tree = RawSortedSet::new(OrdComparator);
        assert_eq!(tree.insert(20), (None, 1));
        assert_eq!(tree.insert(10), (None, 1));
        assert_eq!(tree.insert(30), (None, 3));
        assert_eq!(tree.insert(25), (None, 3));
        assert_eq!(tree.insert(25), (Some(25), 3));
        assert_eq!(tree.len(), 4);
        tree.validate_invariants();
    }

    #[test]
    fn overwrite_replaces_payload_of_matching_key() {
        let by_key = FnComparator::new(|a: &(u32, u32), b: &(u32, u32)| a.0 == b.0, |a: &(u32, u32), b: &(u32, u32)| a.0 < b.0);
        let mut tree = RawSortedSet::new(by_key);
        tree.insert((1, 100));
        tree.insert((2, 200));
        assert_eq!(tree.insert((1, 111)), (Some((1, 100)), 1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get_with_rank(&(1, 0)), Some((&(1, 111), 1)));
    }

    #[test]
    fn remove_reports_rank_before_removal() {
        let mut tree = RawSortedSet::new(OrdComparator);
        for v in [50, 20, 80, 10, 30, 70, 90] {
            tree.insert(v);
        }
        assert_eq!(tree.remove(&70), Some((70, 5)));
        assert_eq!(tree.remove(&70), None);
        // Two children: the successor takes its place.
        assert_eq!(tree.remove(&50), Some((50, 4)));
        tree.validate_invariants();
        assert_eq!(tree.to_vec(), [10, 20, 30, 80, 90]);
    }

    #[test]
    fn walk_in_both_directions() {
        let tree = shuffled_tree();
        let mut forward = Vec::new();
        tree.walk(Dir::Right, |e| forward.push(*e));
        let mut backward = Vec::new();
        tree.walk(Dir::Left, |e| backward.push(*e));
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 100);
    }

    #[test]
    fn sequential_inserts_stay_balanced() {
        let mut tree = RawSortedSet::new(OrdComparator);
        for i in 0..1000u32 {
            tree.insert(i);
        }
        tree.validate_invariants();
        for i in (0..1000u32).rev() {
            tree.insert(i + 1000);
        }
        tree.validate_invariants();
        for i in 0..1000u32 {
            assert_eq!(tree.remove_by_rank(1), i);
        }
        tree.validate_invariants();
        assert_eq!(tree.len(), 1000);
    }

    #[test]
    fn freed_nodes_are_reused() {
        let mut tree = RawSortedSet::new(OrdComparator);
        for i in 0..64u32 {
            tree.insert(i);
        }
        let capacity = tree.capacity();
        for i in 0..64u32 {
            tree.remove(&i);
        }
        for i in 0..64u32 {
            tree.insert(i + 100);
        }
        assert_eq!(tree.capacity(), capacity);
        tree.validate_invariants();
    }

    #[test]
    fn search_paths_stay_inline() {
        let mut tree = RawSortedSet::new(OrdComparator);
        for i in 0..20_000u32 {
            tree.insert(i);
        }
        tree.validate_invariants();

        for probe in [0, 1, 9_999, 19_999, 20_000] {
            let mut path = Path::new();
            let _ = search_by_element(&tree.nodes, tree.root, &tree.cmp, &probe, Some(&mut path));
            assert!(!path.spilled(), "path to {probe} has {} steps", path.len());
        }
        for rank in [1, 10_000, 20_000] {
            let mut path = Path::new();
            let _ = search_by_rank(&tree.nodes, tree.root, rank, Some(&mut path));
            assert!(!path.spilled(), "path to rank {rank} has {} steps", path.len());
        }

        let mut count = 0;
        tree.walk(Dir::Left, |_| count += 1);
        assert_eq!(count, 20_000);
        assert_eq!(tree.remove_by_rank(20_000), 19_999);
        tree.validate_invariants();
    }

    // Test operations enum for property testing
    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        RemoveByRank(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0i32..1000).prop_map(Op::Insert),
            2 => (0i32..1000).prop_map(Op::Remove),
            1 => any::<usize>().prop_map(Op::RemoveByRank),
        ]
    }

    fn unique_values() -> impl Strategy<Value = (Vec<i32>, Vec<i32>)> {
        prop::collection::btree_set(-100_000i32..100_000, 1..400).prop_flat_map(|set| {
            let values: Vec<i32> = set.into_iter().collect();
            (Just(values.clone()).prop_shuffle(), Just(values).prop_shuffle())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree = RawSortedSet::new(OrdComparator);
            let mut expected: BTreeSet<i32> = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(value) => {
                        let (old, rank) = tree.insert(value);
                        prop_assert_eq!(old.is_some(), !expected.insert(value));
                        prop_assert_eq!(rank, 1 + expected.range(..value).count());
                    }
                    Op::Remove(value) => {
                        let rank = 1 + expected.range(..value).count();
                        let removed = tree.remove(&value);
                        if expected.remove(&value) {
                            prop_assert_eq!(removed, Some((value, rank)));
                        } else {
                            prop_assert_eq!(removed, None);
                        }
                    }
                    Op::RemoveByRank(which) => {
                        if expected.is_empty() {
                            continue;
                        }
                        let rank = 1 + which % expected.len();
                        let value = *expected.iter().nth(rank - 1).unwrap();
                        expected.remove(&value);
                        prop_assert_eq!(tree.remove_by_rank(rank), value);
                    }
                }
                tree.validate_invariants();
                prop_assert_eq!(tree.len(), expected.len());
            }
            prop_assert_eq!(tree.to_vec(), expected.into_iter().collect::<Vec<_>>());
        }

        #[test]
        fn insert_all_then_remove_all((inserts, removes) in unique_values()) {
            let mut tree = RawSortedSet::new(OrdComparator);
            for &value in &inserts {
                prop_assert_eq!(tree.insert(value).0, None);
                tree.validate_invariants();
            }
            prop_assert_eq!(tree.len(), inserts.len());

            for &value in &removes {
                prop_assert!(tree.remove(&value).is_some());
                tree.validate_invariants();
            }
            prop_assert_eq!(tree.len(), 0);
            prop_assert_eq!(tree.root, None);
            prop_assert_eq!(tree.nodes.len(), 0);
        }

        #[test]
        fn rank_round_trip(values in prop::collection::vec(0i32..500, 1..200)) {
            let mut tree = RawSortedSet::new(OrdComparator);
            for &value in &values {
                tree.insert(value);
            }
            let in_order = tree.to_vec();
            for (index, value) in in_order.iter().enumerate() {
                prop_assert_eq!(tree.get_by_rank(index + 1), value);
                prop_assert_eq!(tree.get_with_rank(value).map(|(_, rank)| rank), Some(index + 1));
            }
        }
    }
}
