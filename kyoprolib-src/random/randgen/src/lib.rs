use std::{collections::BTreeSet, ops::Range};

use rand::{
    distributions::{Distribution, Uniform},
    seq::SliceRandom,
    Rng,
};

pub trait Gen {
    type Output;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output;
}

macro_rules! impl_range {
    ( $($ty:ty)* ) => { $(
        impl Gen for Range<$ty> {
            type Output = $ty;
            fn generate<R: Rng>(&self, rng: &mut R) -> $ty {
                Uniform::from(self.clone()).sample(rng)
            }
        }
    )* };
}

impl_range! { i32 i64 usize }

/// A uniformly random `len`-subset of `bound`, sorted.
pub struct StrictAsc {
    pub bound: Range<i64>,
    pub len: usize,
}

/// A uniformly random non-decreasing sequence of `len` values in `bound`.
pub struct Asc {
    pub bound: Range<i64>,
    pub len: usize,
}

/// A uniformly random permutation of `0..n`.
pub struct Permutation(pub usize);

/// Edges `(from, to, cap, cost)` of a random directed graph on `n` vertices.
///
/// With `acyclic`, every edge goes from a smaller vertex to a larger one.
/// Parallel edges and (unless `acyclic`) self loops may appear.
pub struct Digraph {
    pub n: usize,
    pub m: usize,
    pub cap: Range<i64>,
    pub cost: Range<i64>,
    pub acyclic: bool,
}

impl Gen for StrictAsc {
    type Output = Vec<i64>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<i64> {
        let Range { start, end } = self.bound;
        let width = (end - start) as usize;
        assert!(self.len <= width);

        // pick whichever of the subset and its complement is smaller
        let dense = 2 * self.len > width;
        let count = if dense { width - self.len } else { self.len };

        let mut seen = BTreeSet::new();
        while seen.len() < count {
            seen.insert(self.bound.generate(rng));
        }

        if dense {
            (start..end).filter(|x| !seen.contains(x)).collect()
        } else {
            seen.into_iter().collect()
        }
    }
}

impl Gen for Asc {
    type Output = Vec<i64>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<i64> {
        let Range { start, end } = self.bound;
        let len = self.len;
        let bound = start..end + len as i64 - 1;
        let mut strict = StrictAsc { bound, len }.generate(rng);
        for (i, x) in strict.iter_mut().enumerate() {
            *x -= i as i64;
        }
        strict
    }
}

impl Gen for Permutation {
    type Output = Vec<usize>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut res: Vec<_> = (0..self.0).collect();
        res.shuffle(rng);
        res
    }
}

impl Gen for Digraph {
    type Output = Vec<(usize, usize, i64, i64)>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output {
        let &Self { n, m, acyclic, .. } = self;
        assert!(n >= if acyclic { 2 } else { 1 } || m == 0);
        (0..m)
            .map(|_| {
                let (from, to) = if acyclic {
                    let u = (0..n).generate(rng);
                    let v = (0..n - 1).generate(rng);
                    let (u, v) = if v >= u { (u, v + 1) } else { (u, v) };
                    (u.min(v), u.max(v))
                } else {
                    ((0..n).generate(rng), (0..n).generate(rng))
                };
                let cap = self.cap.generate(rng);
                let cost = self.cost.generate(rng);
                (from, to, cap, cost)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    #[test]
    fn uniformity() {
        let mut rng = ChaCha20Rng::from_seed([0; 32]);
        let n = 10_usize.pow(5);

        let mut map = BTreeMap::new();
        for _ in 0..n {
            let tmp = StrictAsc { bound: 0..4, len: 3 }.generate(&mut rng);
            *map.entry(tmp).or_insert(0) += 1;
        }
        let k = 4;
        assert_eq!(map.len(), k);
        for &v in map.values() {
            assert!(v >= (n / k) * 95 / 100);
            assert!(v <= (n / k) * 105 / 100);
        }

        // multisets of size 3 from 4 values
        let mut map = BTreeMap::new();
        for _ in 0..n {
            let tmp = Asc { bound: 0..4, len: 3 }.generate(&mut rng);
            assert!(tmp.windows(2).all(|w| w[0] <= w[1]));
            *map.entry(tmp).or_insert(0) += 1;
        }
        let k = 20;
        assert_eq!(map.len(), k);
        for &v in map.values() {
            assert!(v >= (n / k) * 90 / 100);
            assert!(v <= (n / k) * 110 / 100);
        }
    }

    #[test]
    fn permutation() {
        let mut rng = ChaCha20Rng::from_seed([1; 32]);
        for n in [0, 1, 10, 1000] {
            let mut p = Permutation(n).generate(&mut rng);
            p.sort_unstable();
            assert!(p.into_iter().eq(0..n));
        }
    }

    #[test]
    fn digraph() {
        let mut rng = ChaCha20Rng::from_seed([2; 32]);
        let g = Digraph { n: 5, m: 100, cap: 0..10, cost: -3..4, acyclic: true }
            .generate(&mut rng);
        assert_eq!(g.len(), 100);
        for (from, to, cap, cost) in g {
            assert!(from < to && to < 5);
            assert!((0..10).contains(&cap));
            assert!((-3..4).contains(&cost));
        }
    }
}
