use std::cmp::Ordering;

use crate::{Compare, Node, OrderedTree, NIL};

impl<K, C> OrderedTree<K, C> {
    fn alloc(&mut self, key: K, red: bool) -> usize {
        self.nodes.push(Node::leaf(red));
        self.keys.push(key);
        self.nodes.len() - 1
    }

    /// Moves the last arena slot into the detached slot `i`.
    fn free(&mut self, i: usize) -> K {
        let last = self.nodes.len() - 1;
        if i != last {
            let Node { left, right, parent, .. } = self.nodes[last];
            if parent == NIL {
                debug_assert_eq!(self.root, last);
                self.root = i;
            } else if self.nodes[parent].left == last {
                self.nodes[parent].left = i;
            } else {
                self.nodes[parent].right = i;
            }
            if left != NIL {
                self.nodes[left].parent = i;
            }
            if right != NIL {
                self.nodes[right].parent = i;
            }
        }
        self.nodes.swap_remove(i);
        self.keys.swap_remove(i - 1)
    }

    fn is_red(&self, i: usize) -> bool { self.nodes[i].red }

    fn is_2node(&self, i: usize) -> bool {
        let Node { left, right, red, .. } = self.nodes[i];
        !red && !self.is_red(left) && !self.is_red(right)
    }

    fn is_4node(&self, i: usize) -> bool {
        let Node { left, right, .. } = self.nodes[i];
        self.is_red(left) && self.is_red(right)
    }

    fn sibling(&self, parent: usize, child: usize) -> usize {
        let Node { left, right, .. } = self.nodes[parent];
        if left == child { right } else { left }
    }

    fn update(&mut self, i: usize) {
        if i != NIL {
            let Node { left, right, .. } = self.nodes[i];
            self.nodes[i].size = 1 + self.nodes[left].size + self.nodes[right].size;
        }
    }

    fn update_to_root(&mut self, mut i: usize) {
        while i != NIL {
            self.update(i);
            i = self.nodes[i].parent;
        }
    }

    pub(crate) fn set_left(&mut self, parent: usize, child: usize) {
        self.nodes[parent].left = child;
        if child != NIL {
            self.nodes[child].parent = parent;
        }
    }

    pub(crate) fn set_right(&mut self, parent: usize, child: usize) {
        self.nodes[parent].right = child;
        if child != NIL {
            self.nodes[child].parent = parent;
        }
    }

    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.nodes[parent].left == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
        if new != NIL {
            self.nodes[new].parent = parent;
        }
    }

    //     x            y
    //    / \          / \
    //   a   y   ->   x   c
    //      / \      / \
    //     b   c    a   b
    fn rotate_left(&mut self, x: usize) -> usize {
        let y = self.nodes[x].right;
        debug_assert_ne!(y, NIL);
        let parent = self.nodes[x].parent;
        let b = self.nodes[y].left;
        self.set_right(x, b);
        self.set_left(y, x);
        self.replace_child(parent, x, y);
        self.update(x);
        self.update(y);
        y
    }

    fn rotate_right(&mut self, x: usize) -> usize {
        let y = self.nodes[x].left;
        debug_assert_ne!(y, NIL);
        let parent = self.nodes[x].parent;
        let b = self.nodes[y].right;
        self.set_left(x, b);
        self.set_right(y, x);
        self.replace_child(parent, x, y);
        self.update(x);
        self.update(y);
        y
    }

    fn rotate_left_right(&mut self, x: usize) -> usize {
        self.rotate_left(self.nodes[x].left);
        self.rotate_right(x)
    }

    fn rotate_right_left(&mut self, x: usize) -> usize {
        self.rotate_right(self.nodes[x].right);
        self.rotate_left(x)
    }

    fn split_4node(&mut self, i: usize) {
        let Node { left, right, .. } = self.nodes[i];
        self.nodes[i].red = true;
        self.nodes[left].red = false;
        self.nodes[right].red = false;
    }

    /// `cur` and its parent are both red. Rotates at the grandparent so that
    /// the middle key of the three moves to the top and becomes black.
    fn insertion_balance(&mut self, cur: usize) {
        let parent = self.nodes[cur].parent;
        let grand = self.nodes[parent].parent;
        debug_assert_ne!(grand, NIL);

        let parent_on_right = self.nodes[grand].right == parent;
        let cur_on_right = self.nodes[parent].right == cur;
        let top = match (parent_on_right, cur_on_right) {
            (true, true) => self.rotate_left(grand),
            (false, false) => self.rotate_right(grand),
            (false, true) => self.rotate_left_right(grand),
            (true, false) => self.rotate_right_left(grand),
        };
        self.nodes[grand].red = true;
        self.nodes[top].red = false;
    }

    /// `cur` is a non-root 2-node whose parent is not. Borrows redness from
    /// the sibling side so that `cur` is no longer a 2-node.
    fn fix_2node(&mut self, cur: usize) {
        let parent = self.nodes[cur].parent;
        if parent == NIL {
            self.nodes[cur].red = true;
            return;
        }

        let mut sibling = self.sibling(parent, cur);
        if self.is_red(sibling) {
            debug_assert!(!self.is_red(parent));
            if self.nodes[parent].right == sibling {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            self.nodes[parent].red = true;
            self.nodes[sibling].red = false;
            sibling = self.sibling(parent, cur);
        }
        debug_assert_ne!(sibling, NIL);

        if self.is_2node(sibling) {
            // merge parent, cur and sibling into one 4-node
            self.nodes[parent].red = false;
            self.nodes[cur].red = true;
            self.nodes[sibling].red = true;
        } else {
            let parent_red = self.is_red(parent);
            let top = self.rotate_from_sibling(parent, cur, sibling);
            self.nodes[top].red = parent_red;
            self.nodes[parent].red = false;
            self.nodes[cur].red = true;
        }
    }

    fn rotate_from_sibling(
        &mut self,
        parent: usize,
        cur: usize,
        sibling: usize,
    ) -> usize {
        let cur_on_left = self.nodes[parent].left == cur;
        let Node { left: sl, right: sr, .. } = self.nodes[sibling];
        if self.is_red(sl) {
            if cur_on_left {
                self.rotate_right_left(parent)
            } else {
                self.nodes[sl].red = false;
                self.rotate_right(parent)
            }
        } else if cur_on_left {
            self.nodes[sr].red = false;
            self.rotate_left(parent)
        } else {
            self.rotate_left_right(parent)
        }
    }

    /// Replaces `matched` by `succ`, the last node visited on the way down
    /// (its in-order successor, or itself if it has no right child).
    fn splice(&mut self, matched: usize, succ: usize) {
        let parent_of_match = self.nodes[matched].parent;
        let (succ, lowest) = if succ == matched {
            debug_assert_eq!(self.nodes[matched].right, NIL);
            (self.nodes[matched].left, parent_of_match)
        } else {
            debug_assert_eq!(self.nodes[succ].left, NIL);
            let parent_of_succ = self.nodes[succ].parent;
            let right = self.nodes[succ].right;
            if right != NIL {
                self.nodes[right].red = false;
            }
            let lowest = if parent_of_succ == matched {
                succ
            } else {
                self.set_left(parent_of_succ, right);
                self.set_right(succ, self.nodes[matched].right);
                parent_of_succ
            };
            self.set_left(succ, self.nodes[matched].left);
            (succ, lowest)
        };
        if succ != NIL {
            self.nodes[succ].red = self.nodes[matched].red;
        }
        self.replace_child(parent_of_match, matched, succ);
        self.update_to_root(lowest);
    }

    fn blacken_root(&mut self) {
        let root = self.root;
        self.nodes[root].red = false;
    }

    fn remove_by<F>(&mut self, mut dir: F) -> Option<K>
    where
        F: FnMut(&Self, usize) -> Ordering,
        C: Compare<K>,
    {
        if self.root == NIL {
            return None;
        }

        let mut cur = self.root;
        let mut matched = NIL;
        let mut last = NIL;
        while cur != NIL {
            if self.is_2node(cur) {
                self.fix_2node(cur);
            }
            let order =
                if matched != NIL { Ordering::Less } else { dir(&*self, cur) };
            if order == Ordering::Equal {
                matched = cur;
            }
            last = cur;
            cur = match order {
                Ordering::Less => self.nodes[cur].left,
                _ => self.nodes[cur].right,
            };
        }

        if matched == NIL {
            self.blacken_root();
            return None;
        }
        self.splice(matched, last);
        self.blacken_root();
        let key = self.free(matched);
        self.after_mutation();
        Some(key)
    }
}

impl<K, C: Compare<K>> OrderedTree<K, C> {
    /// Returns `false` if the tree is not a multiset and already holds an
    /// equal key; the tree is left unchanged as a set in that case.
    pub fn insert(&mut self, key: K) -> bool {
        if self.root == NIL {
            self.root = self.alloc(key, false);
            self.after_mutation();
            return true;
        }

        let mut cur = self.root;
        let mut parent = NIL;
        let mut order = Ordering::Equal;
        while cur != NIL {
            order = match self.compare.compare(&key, self.key(cur)) {
                Ordering::Equal if !self.multi => {
                    self.blacken_root();
                    self.after_mutation();
                    return false;
                }
                Ordering::Equal => Ordering::Greater,
                o => o,
            };
            if self.is_4node(cur) {
                self.split_4node(cur);
                if self.is_red(parent) {
                    self.insertion_balance(cur);
                }
            }
            parent = cur;
            cur = match order {
                Ordering::Less => self.nodes[cur].left,
                _ => self.nodes[cur].right,
            };
        }

        let new = self.alloc(key, true);
        match order {
            Ordering::Less => self.set_left(parent, new),
            _ => self.set_right(parent, new),
        }
        if self.is_red(parent) {
            self.insertion_balance(new);
        }
        self.update_to_root(new);
        self.blacken_root();
        self.after_mutation();
        true
    }

    /// Removes one key equal to `key`.
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_by(|tree, i| tree.compare.compare(key, tree.key(i))).is_some()
    }

    /// Removes the key at position `index`; `None` if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Option<K> {
        if index >= self.len() {
            return None;
        }
        let mut rank = index;
        self.remove_by(move |tree, i| {
            let left_size = tree.nodes[tree.nodes[i].left].size;
            let order = rank.cmp(&left_size);
            if order == Ordering::Greater {
                rank -= left_size + 1;
            }
            order
        })
    }

    pub fn pop_first(&mut self) -> Option<K> { self.remove_at(0) }

    pub fn pop_last(&mut self) -> Option<K> {
        let index = self.len().checked_sub(1)?;
        self.remove_at(index)
    }
}
