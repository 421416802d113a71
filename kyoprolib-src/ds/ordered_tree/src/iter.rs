use std::{iter::FusedIterator, ops::Range};

use crate::{Compare, Node, OrderedTree, NIL};

/// In-order iterator over a range of positions.
///
/// Each end keeps the stack of nodes still to be visited from that side;
/// `len` tells when the two ends have met.
pub struct Iter<'a, K> {
    nodes: &'a [Node],
    keys: &'a [K],
    front: Vec<usize>,
    back: Vec<usize>,
    len: usize,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            keys: self.keys,
            front: self.front.clone(),
            back: self.back.clone(),
            len: self.len,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(
        nodes: &'a [Node],
        keys: &'a [K],
        root: usize,
        range: Range<usize>,
    ) -> Self {
        let len = range.end - range.start;
        let mut res =
            Self { nodes, keys, front: vec![], back: vec![], len };
        if len > 0 {
            res.seek_front(root, range.start);
            res.seek_back(root, range.end - 1);
        }
        res
    }

    fn left_size(&self, i: usize) -> usize {
        self.nodes[self.nodes[i].left].size
    }

    fn seek_front(&mut self, mut cur: usize, mut index: usize) {
        loop {
            let ls = self.left_size(cur);
            if index < ls {
                self.front.push(cur);
                cur = self.nodes[cur].left;
            } else if index == ls {
                self.front.push(cur);
                return;
            } else {
                index -= ls + 1;
                cur = self.nodes[cur].right;
            }
        }
    }

    fn seek_back(&mut self, mut cur: usize, mut index: usize) {
        loop {
            let ls = self.left_size(cur);
            if index > ls {
                self.back.push(cur);
                index -= ls + 1;
                cur = self.nodes[cur].right;
            } else if index == ls {
                self.back.push(cur);
                return;
            } else {
                cur = self.nodes[cur].left;
            }
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let i = self.front.pop()?;
        let mut cur = self.nodes[i].right;
        while cur != NIL {
            self.front.push(cur);
            cur = self.nodes[cur].left;
        }
        Some(i)
    }

    fn next_back_node(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let i = self.back.pop()?;
        let mut cur = self.nodes[i].left;
        while cur != NIL {
            self.back.push(cur);
            cur = self.nodes[cur].right;
        }
        Some(i)
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let keys = self.keys;
        self.next_node().map(|i| &keys[i - 1])
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        let keys = self.keys;
        self.next_back_node().map(|i| &keys[i - 1])
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

impl<K, C: Compare<K>> OrderedTree<K, C> {
    /// Arena indices in key order.
    pub(crate) fn iter_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        let mut it = self.iter();
        std::iter::from_fn(move || it.next_node())
    }
}
