use std::{cmp::Ordering, fmt};

use crate::{Compare, OrderedTree, NIL};

/// A broken tree invariant, located by in-order position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    Sentinel,
    RedRoot,
    RedRed { rank: usize },
    BlackHeight { rank: usize },
    Size { rank: usize },
    Parent { rank: usize },
    Order { index: usize },
    Len,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentinel => write!(f, "sentinel is not a black node of size 0"),
            Self::RedRoot => write!(f, "root is red"),
            Self::RedRed { rank } => {
                write!(f, "red node at {rank} has a red child")
            }
            Self::BlackHeight { rank } => {
                write!(f, "black heights differ below node at {rank}")
            }
            Self::Size { rank } => write!(f, "wrong size at node {rank}"),
            Self::Parent { rank } => write!(f, "wrong parent link at node {rank}"),
            Self::Order { index } => {
                write!(f, "keys at {index} and {} are out of order", index + 1)
            }
            Self::Len => write!(f, "node count disagrees with the key count"),
        }
    }
}

impl std::error::Error for Violation {}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Branch {
    Root,
    Left,
    Right,
}

impl<K, C: Compare<K>> OrderedTree<K, C> {
    pub fn check(&self) -> Result<(), Violation> {
        let sentinel = self.nodes[NIL];
        if sentinel.red || sentinel.size != 0 {
            return Err(Violation::Sentinel);
        }
        if self.nodes[self.root].red {
            return Err(Violation::RedRoot);
        }
        if self.nodes.len() != self.keys.len() + 1
            || self.nodes[self.root].size != self.len()
        {
            return Err(Violation::Len);
        }
        self.check_subtree(self.root, NIL, &mut 0)?;

        let bad = |o: Ordering| {
            if self.multi { o == Ordering::Greater } else { o != Ordering::Less }
        };
        let mut prev = None;
        for (index, key) in self.iter().enumerate() {
            if let Some(prev) = prev {
                if bad(self.compare.compare(prev, key)) {
                    return Err(Violation::Order { index: index - 1 });
                }
            }
            prev = Some(key);
        }
        Ok(())
    }

    // returns the black height
    fn check_subtree(
        &self,
        i: usize,
        parent: usize,
        pos: &mut usize,
    ) -> Result<usize, Violation> {
        if i == NIL {
            return Ok(1);
        }
        let node = self.nodes[i];
        let left = self.check_subtree(node.left, i, pos)?;
        let rank = *pos;
        *pos += 1;
        if node.parent != parent {
            return Err(Violation::Parent { rank });
        }
        if node.red && (self.nodes[node.left].red || self.nodes[node.right].red)
        {
            return Err(Violation::RedRed { rank });
        }
        let size = 1 + self.nodes[node.left].size + self.nodes[node.right].size;
        if node.size != size {
            return Err(Violation::Size { rank });
        }
        let right = self.check_subtree(node.right, i, pos)?;
        if left != right {
            return Err(Violation::BlackHeight { rank });
        }
        Ok(left + !node.red as usize)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut res = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((i, depth)) = stack.pop() {
            if i == NIL {
                res = res.max(depth);
                continue;
            }
            stack.push((self.nodes[i].left, depth + 1));
            stack.push((self.nodes[i].right, depth + 1));
        }
        res
    }

    /// Renders the tree sideways, right subtrees above.
    pub fn draw(&self) -> String
    where
        K: fmt::Debug,
    {
        let mut out = String::new();
        if self.root != NIL {
            self.draw_subtree(self.root, "", Branch::Root, &mut out);
        }
        out
    }

    fn draw_subtree(&self, i: usize, prefix: &str, branch: Branch, out: &mut String)
    where
        K: fmt::Debug,
    {
        let node = self.nodes[i];
        let ext = |side| match (branch, side) {
            (Branch::Root, _) => "",
            (Branch::Right, Branch::Right) | (Branch::Left, Branch::Left) => "    ",
            _ => "│   ",
        };
        if node.right != NIL {
            let prefix = format!("{prefix}{}", ext(Branch::Right));
            self.draw_subtree(node.right, &prefix, Branch::Right, out);
        }
        let head = match branch {
            Branch::Root => "",
            Branch::Right => "┌── ",
            Branch::Left => "└── ",
        };
        let color = if node.red { 'R' } else { 'B' };
        out.push_str(&format!(
            "{prefix}{head}{:?} [{color}{}]\n",
            self.key(i),
            node.size,
        ));
        if node.left != NIL {
            let prefix = format!("{prefix}{}", ext(Branch::Left));
            self.draw_subtree(node.left, &prefix, Branch::Left, out);
        }
    }
}
