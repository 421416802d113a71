use std::cmp::Ordering;

use crate::{Compare, Node, OrderedTree, NIL};

struct Frame {
    start: usize,
    end: usize,
    // a red leaf to hang below the leftmost node of this subtree
    red: usize,
    parent: usize,
    right: bool,
}

impl<K, C: Compare<K>> OrderedTree<K, C> {
    /// Builds a tree from unsorted keys in linear time after sorting.
    ///
    /// Equal keys keep their relative order; unless `multi`, only the first
    /// of them is kept.
    pub fn from_vec(mut items: Vec<K>, compare: C, multi: bool) -> Self {
        items.sort_by(|l, r| compare.compare(l, r));
        if !multi {
            items.dedup_by(|l, r| compare.compare(l, r) == Ordering::Equal);
        }

        let n = items.len();
        let mut tree = Self::with_compare(compare, multi);
        tree.nodes.extend((0..n).map(|_| Node::leaf(false)));
        tree.keys = items;
        tree.build(n);
        log::trace!("ordered tree built from {n} sorted keys");
        tree.after_mutation();
        tree
    }

    // positions are 0-based; the node at position `i` is `nodes[i + 1]`
    fn build(&mut self, n: usize) {
        let mut stack =
            vec![Frame { start: 0, end: n, red: NIL, parent: NIL, right: false }];
        while let Some(Frame { start, end, red, parent, right }) = stack.pop() {
            let len = end - start;
            let node = |pos: usize| pos + 1;
            let top = match len {
                0 => NIL,
                1 => {
                    let x = node(start);
                    self.set_left(x, red);
                    x
                }
                2 => {
                    let x = node(start);
                    let y = node(start + 1);
                    self.nodes[y].red = true;
                    self.set_right(x, y);
                    self.set_left(x, red);
                    x
                }
                3 => {
                    let (l, x, r) = (node(start), node(start + 1), node(start + 2));
                    self.set_left(x, l);
                    self.set_right(x, r);
                    self.set_left(l, red);
                    self.nodes[l].size = 1 + (red != NIL) as usize;
                    x
                }
                _ => {
                    let mid = start + (len - 1) / 2;
                    let x = node(mid);
                    stack.push(Frame { start, end: mid, red, parent: x, right: false });
                    if len % 2 == 0 {
                        let y = node(mid + 1);
                        self.nodes[y].red = true;
                        stack.push(Frame {
                            start: mid + 2,
                            end,
                            red: y,
                            parent: x,
                            right: true,
                        });
                    } else {
                        stack.push(Frame {
                            start: mid + 1,
                            end,
                            red: NIL,
                            parent: x,
                            right: true,
                        });
                    }
                    x
                }
            };
            if top == NIL {
                continue;
            }
            self.nodes[top].size = len + (red != NIL) as usize;
            if parent == NIL {
                self.root = top;
            } else if right {
                self.set_right(parent, top);
            } else {
                self.set_left(parent, top);
            }
        }
    }
}
