//! Disjoint-set forests.
//!
//! `buf[u]` is the parent of `u`, or the negated size of the component if
//! `u` is a representative; a value `>= len` marks a root.

use std::{cell::RefCell, fmt};

#[derive(Clone)]
pub struct UnionFind(RefCell<Vec<usize>>, usize);

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self(RefCell::new(vec![1_usize.wrapping_neg(); n]), n)
    }
    pub fn unite(&mut self, u: usize, v: usize) -> bool {
        let u = self.repr(u);
        let v = self.repr(v);
        if u == v {
            return false;
        }
        let buf = self.0.get_mut();
        let (par, child) = by_size(buf, u, v);
        buf[par] = buf[par].wrapping_add(buf[child]);
        buf[child] = par;
        self.1 -= 1;
        true
    }
    pub fn equiv(&self, u: usize, v: usize) -> bool {
        self.repr(u) == self.repr(v)
    }
    pub fn repr(&self, u: usize) -> usize {
        let mut buf = self.0.borrow_mut();
        let root = root_of(&buf, u);
        let mut cur = u;
        while cur != root {
            let next = buf[cur];
            buf[cur] = root;
            cur = next;
        }
        root
    }
    pub fn count(&self, u: usize) -> usize {
        let repr = self.repr(u);
        self.0.borrow()[repr].wrapping_neg()
    }
    pub fn partition(&self) -> Vec<Vec<usize>> {
        let len = self.0.borrow().len();
        let mut ptn = vec![vec![]; len];
        for i in 0..len {
            ptn[self.repr(i)].push(i);
        }
        ptn
    }
    pub fn partition_len(&self) -> usize { self.1 }
}

fn root_of(buf: &[usize], mut u: usize) -> usize {
    while buf[u] < buf.len() {
        u = buf[u];
    }
    u
}

// the larger component becomes the parent; ties go to `v`
fn by_size(buf: &[usize], u: usize, v: usize) -> (usize, usize) {
    if buf[u].wrapping_neg() > buf[v].wrapping_neg() { (u, v) } else { (v, u) }
}

/// Union by size without path compression, so that every `unite` can be
/// undone in `O(1)`.
///
/// # Examples
/// ```
/// use union_find::RollbackUnionFind;
///
/// let mut uf = RollbackUnionFind::new(4);
/// uf.unite(0, 1);
/// let snapshot = uf.snapshot();
/// uf.unite(1, 2);
/// uf.unite(2, 3);
/// assert!(uf.equiv(0, 3));
///
/// uf.rollback(snapshot);
/// assert!(uf.equiv(0, 1));
/// assert!(!uf.equiv(0, 2));
/// ```
#[derive(Clone)]
pub struct RollbackUnionFind {
    buf: Vec<usize>,
    // (parent, child, old value of the parent's slot)
    history: Vec<(usize, usize, usize)>,
    partition_len: usize,
}

impl RollbackUnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            buf: vec![1_usize.wrapping_neg(); n],
            history: vec![],
            partition_len: n,
        }
    }
    pub fn unite(&mut self, u: usize, v: usize) -> bool {
        let u = self.repr(u);
        let v = self.repr(v);
        if u == v {
            return false;
        }
        let (par, child) = by_size(&self.buf, u, v);
        self.history.push((par, child, self.buf[par]));
        self.buf[par] = self.buf[par].wrapping_add(self.buf[child]);
        self.buf[child] = par;
        self.partition_len -= 1;
        true
    }
    pub fn equiv(&self, u: usize, v: usize) -> bool {
        self.repr(u) == self.repr(v)
    }
    pub fn repr(&self, u: usize) -> usize { root_of(&self.buf, u) }
    pub fn count(&self, u: usize) -> usize {
        self.buf[self.repr(u)].wrapping_neg()
    }
    pub fn partition(&self) -> Vec<Vec<usize>> {
        let len = self.buf.len();
        let mut ptn = vec![vec![]; len];
        for i in 0..len {
            ptn[self.repr(i)].push(i);
        }
        ptn
    }
    pub fn partition_len(&self) -> usize { self.partition_len }

    /// The number of successful `unite`s so far.
    pub fn snapshot(&self) -> usize { self.history.len() }

    /// Reverts the latest successful `unite`.
    pub fn undo(&mut self) -> bool {
        let Some((par, child, old)) = self.history.pop() else {
            return false;
        };
        self.buf[child] = self.buf[par].wrapping_sub(old);
        self.buf[par] = old;
        self.partition_len += 1;
        true
    }

    pub fn rollback(&mut self, snapshot: usize) {
        assert!(snapshot <= self.history.len(), "snapshot from the future");
        while self.history.len() > snapshot {
            self.undo();
        }
    }
}

struct AsSet<'a>(&'a Vec<usize>);
impl fmt::Debug for AsSet<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.0.iter()).finish()
    }
}

fn fmt_debug(ptn: &[Vec<usize>], fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt.debug_map()
        .entries(
            (0..ptn.len())
                .filter(|&i| !ptn[i].is_empty())
                .map(|i| (i, AsSet(&ptn[i]))),
        )
        .finish()
}

fn fmt_display(ptn: &[Vec<usize>], fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt.debug_set()
        .entries(ptn.iter().filter(|set| !set.is_empty()).map(AsSet))
        .finish()
}

impl fmt::Debug for UnionFind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_debug(&self.partition(), fmt)
    }
}

impl fmt::Display for UnionFind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_display(&self.partition(), fmt)
    }
}

impl fmt::Debug for RollbackUnionFind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_debug(&self.partition(), fmt)
    }
}

impl fmt::Display for RollbackUnionFind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_display(&self.partition(), fmt)
    }
}

#[cfg(test)]
mod tests {
    use disjoint_set::DisjointSet;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::*;

    #[test]
    fn sanity_check() {
        let n = 10;
        let mut actual = UnionFind::new(n);
        let mut expected = DisjointSet::new(n);

        let f = |(u, v)| 2_u128.pow(u as _) * 3_u128.pow(v as _) % 625;
        let query = {
            let mut query: Vec<_> =
                (0..n).flat_map(|u| (0..u).map(move |v| (u, v))).collect();
            query.sort_unstable_by_key(|&(u, v)| f((u, v)));
            query
        };

        for (u, v) in query {
            assert_eq!(actual.unite(u, v), expected.unite(u, v));
            for i in 0..n {
                for j in 0..n {
                    assert_eq!(actual.equiv(i, j), expected.equiv(i, j));
                }
                assert_eq!(actual.count(i), expected.count(i));
            }
            assert_eq!(actual.partition_len(), expected.partition_len());
        }
    }

    #[test]
    fn long_chain() {
        let n = 1 << 20;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.unite(i - 1, i);
        }
        assert_eq!(uf.count(0), n);
        assert_eq!(uf.partition_len(), 1);
    }

    #[test]
    fn debug_fmt() {
        let mut uf = UnionFind::new(8);
        uf.unite(1, 5);
        uf.unite(2, 4);
        uf.unite(0, 2);
        uf.unite(1, 6);
        uf.unite(6, 7);
        assert_eq!(format!("{uf}"), "{{3}, {0, 2, 4}, {1, 5, 6, 7}}");
        assert_eq!(format!("{uf:?}"), "{3: {3}, 4: {0, 2, 4}, 5: {1, 5, 6, 7}}");
    }

    #[test]
    fn rollback_random() {
        let n = 30;
        let mut rng = ChaCha20Rng::from_seed([0x3C; 32]);
        let mut actual = RollbackUnionFind::new(n);
        let mut history = vec![DisjointSet::new(n)];

        for _ in 0..3000 {
            if rng.gen_range(0..3) == 0 {
                let undone = actual.undo();
                assert_eq!(undone, history.len() > 1);
                if undone {
                    history.pop();
                }
            } else {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                let mut next = history[history.len() - 1].clone();
                let united = next.unite(u, v);
                assert_eq!(actual.unite(u, v), united);
                if united {
                    history.push(next);
                }
            }
            let expected = &history[history.len() - 1];
            assert_eq!(actual.snapshot(), history.len() - 1);
            assert_eq!(actual.partition_len(), expected.partition_len());
            for i in 0..n {
                assert_eq!(actual.count(i), expected.count(i));
                for j in 0..n {
                    assert_eq!(actual.equiv(i, j), expected.equiv(i, j));
                }
            }
        }
    }

    #[test]
    fn rollback_restores_partition() {
        let mut uf = RollbackUnionFind::new(6);
        uf.unite(0, 1);
        uf.unite(2, 3);
        let before = uf.partition();
        let snapshot = uf.snapshot();
        uf.unite(1, 2);
        assert!(!uf.unite(0, 3));
        uf.unite(4, 5);
        uf.unite(5, 0);
        assert_eq!(uf.partition_len(), 1);

        uf.rollback(snapshot);
        assert_eq!(uf.partition(), before);
        assert_eq!(uf.partition_len(), 4);
        assert_eq!(format!("{uf}"), "{{0, 1}, {2, 3}, {4}, {5}}");
    }
}
