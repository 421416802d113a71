//! Red-black tree augmented with subtree sizes.
//!
//! Nodes live in an arena; index `0` is a black sentinel of size `0` that
//! stands for every absent child, so links are plain indices. Each node owns
//! its children through `left`/`right`, and `parent` is only a back
//! reference kept in sync whenever a child link is assigned.
//!
//! Insertion and deletion are both single top-down passes (splitting
//! 4-nodes on the way down, and never entering a 2-node on the way down,
//! respectively), so no bottom-up fixup is needed beyond refreshing the
//! subtree sizes along one path.

use std::{cmp::Ordering, fmt};

use usize_bounds::UsizeBounds;

mod balance;
mod build;
mod debug;
mod iter;

pub use debug::Violation;
pub use iter::Iter;

const NIL: usize = 0;

#[derive(Clone, Copy, Debug)]
struct Node {
    left: usize,
    right: usize,
    parent: usize,
    size: usize,
    red: bool,
}

impl Node {
    const NIL: Self =
        Self { left: NIL, right: NIL, parent: NIL, size: 0, red: false };

    fn leaf(red: bool) -> Self { Self { size: 1, red, ..Self::NIL } }
}

pub trait Compare<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// The order given by [`Ord`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering { lhs.cmp(rhs) }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Compare<K> for F {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering { self(lhs, rhs) }
}

/// An ordered set (or multiset) with `O(log n)` rank and select.
///
/// # Examples
/// ```
/// use ordered_tree::OrderedTree;
///
/// let mut tree: OrderedTree<_> = vec![5, 1, 4, 1, 3].into();
/// assert_eq!(tree.len(), 4);
/// assert!(tree.iter().eq(&[1, 3, 4, 5]));
///
/// tree.insert(2);
/// assert_eq!(tree.get(1), Some(&2));
/// assert_eq!(tree.index_of(&4), Some(3));
/// assert_eq!(tree.lower_bound(&6), (5, None));
///
/// assert!(tree.remove(&3));
/// assert!(tree.iter().rev().eq(&[5, 4, 2, 1]));
/// ```
#[derive(Clone)]
pub struct OrderedTree<K, C = Natural> {
    nodes: Vec<Node>,
    // `keys[i - 1]` belongs to `nodes[i]`
    keys: Vec<K>,
    root: usize,
    compare: C,
    multi: bool,
}

impl<K: Ord> OrderedTree<K> {
    pub fn new() -> Self { Self::with_compare(Natural, false) }
    /// Equal keys are kept, in insertion order.
    pub fn new_multi() -> Self { Self::with_compare(Natural, true) }
}

impl<K: Ord> Default for OrderedTree<K> {
    fn default() -> Self { Self::new() }
}

impl<K, C: Compare<K>> OrderedTree<K, C> {
    pub fn with_compare(compare: C, multi: bool) -> Self {
        Self { nodes: vec![Node::NIL], keys: vec![], root: NIL, compare, multi }
    }

    pub fn len(&self) -> usize { self.keys.len() }
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }
    pub fn is_multi(&self) -> bool { self.multi }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.keys.clear();
        self.root = NIL;
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cur = self.root;
        while cur != NIL {
            match self.compare.compare(key, self.key(cur)) {
                Ordering::Less => cur = self.nodes[cur].left,
                Ordering::Equal => return true,
                Ordering::Greater => cur = self.nodes[cur].right,
            }
        }
        false
    }

    /// The key at in-order position `index`, or `None` if `index >= len`.
    pub fn get(&self, index: usize) -> Option<&K> {
        self.select(index).map(|i| self.key(i))
    }

    /// Position of the first key equal to `key`.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        let mut cur = self.root;
        let mut found = NIL;
        while cur != NIL {
            match self.compare.compare(key, self.key(cur)) {
                Ordering::Greater => cur = self.nodes[cur].right,
                Ordering::Equal => {
                    found = cur;
                    cur = self.nodes[cur].left;
                }
                Ordering::Less => cur = self.nodes[cur].left,
            }
        }
        (found != NIL).then(|| self.rank_of(found))
    }

    /// The first key not less than `key`, with its position. The position
    /// is `len` when there is no such key.
    pub fn lower_bound(&self, key: &K) -> (usize, Option<&K>) {
        self.bound(key, |o| o != Ordering::Greater)
    }

    /// The first key greater than `key`, with its position.
    pub fn upper_bound(&self, key: &K) -> (usize, Option<&K>) {
        self.bound(key, |o| o == Ordering::Less)
    }

    pub fn count(&self, key: &K) -> usize {
        self.upper_bound(key).0 - self.lower_bound(key).0
    }

    pub fn first(&self) -> Option<&K> { self.extreme(|node| node.left) }
    pub fn last(&self) -> Option<&K> { self.extreme(|node| node.right) }

    pub fn iter(&self) -> Iter<'_, K> { self.range(..) }

    /// Keys at positions in `range`.
    ///
    /// # Panics
    /// Panics if `range` is out of `0..=len` or decreasing.
    pub fn range(&self, range: impl UsizeBounds) -> Iter<'_, K> {
        let range = range.to_range(self.len());
        Iter::new(&self.nodes, &self.keys, self.root, range)
    }

    fn key(&self, i: usize) -> &K { &self.keys[i - 1] }

    fn select(&self, mut index: usize) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        let mut cur = self.root;
        loop {
            let left = self.nodes[cur].left;
            let left_size = self.nodes[left].size;
            match index.cmp(&left_size) {
                Ordering::Less => cur = left,
                Ordering::Equal => return Some(cur),
                Ordering::Greater => {
                    index -= left_size + 1;
                    cur = self.nodes[cur].right;
                }
            }
        }
    }

    fn rank_of(&self, mut i: usize) -> usize {
        let mut rank = self.nodes[self.nodes[i].left].size;
        while i != self.root {
            let parent = self.nodes[i].parent;
            if self.nodes[parent].right == i {
                rank += self.nodes[self.nodes[parent].left].size + 1;
            }
            i = parent;
        }
        rank
    }

    fn bound(
        &self,
        key: &K,
        goes_left: impl Fn(Ordering) -> bool,
    ) -> (usize, Option<&K>) {
        let mut cur = self.root;
        let mut skipped = 0;
        let mut best = (self.len(), NIL);
        while cur != NIL {
            let left = self.nodes[cur].left;
            if goes_left(self.compare.compare(key, self.key(cur))) {
                best = (skipped + self.nodes[left].size, cur);
                cur = left;
            } else {
                skipped += self.nodes[left].size + 1;
                cur = self.nodes[cur].right;
            }
        }
        let (rank, i) = best;
        (rank, (i != NIL).then(|| self.key(i)))
    }

    fn extreme(&self, next: impl Fn(&Node) -> usize) -> Option<&K> {
        if self.root == NIL {
            return None;
        }
        let mut cur = self.root;
        while next(&self.nodes[cur]) != NIL {
            cur = next(&self.nodes[cur]);
        }
        Some(self.key(cur))
    }

    fn after_mutation(&self) {
        #[cfg(feature = "check-invariants")]
        if let Err(e) = self.check() {
            panic!("ordered tree corrupted: {e}");
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for OrderedTree<K, C>
where
    C: Compare<K>,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K, C: Compare<K>> IntoIterator for &'a OrderedTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Iter<'a, K> { self.iter() }
}

impl<K, C: Compare<K>> Extend<K> for OrderedTree<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> From<Vec<K>> for OrderedTree<K> {
    fn from(keys: Vec<K>) -> Self { Self::from_vec(keys, Natural, false) }
}

impl<K: Ord> FromIterator<K> for OrderedTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let keys: Vec<_> = iter.into_iter().collect();
        keys.into()
    }
}

impl<K, C: Compare<K>> From<OrderedTree<K, C>> for Vec<K> {
    /// Keys in order.
    fn from(tree: OrderedTree<K, C>) -> Vec<K> {
        let mut rank = vec![0; tree.nodes.len()];
        for (r, i) in tree.iter_nodes().enumerate() {
            rank[i] = r;
        }
        let mut ranked: Vec<_> = (1..tree.nodes.len())
            .map(|i| rank[i])
            .zip(tree.keys)
            .collect();
        ranked.sort_unstable_by_key(|&(r, _)| r);
        ranked.into_iter().map(|(_, key)| key).collect()
    }
}
