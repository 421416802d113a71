//! Difference arrays: range updates first, point values at the end.

use std::ops::Range;

use group::{CommutativeGroup, OpAdd};
use usize_bounds::UsizeBounds;

/// # Examples
/// ```
/// use imos::Imos;
///
/// let mut imos: Imos = Imos::new(5);
/// imos.add(1..4, 2);
/// imos.add(3.., 10);
/// assert_eq!(imos.build(), [0, 2, 2, 12, 10]);
/// ```
#[derive(Clone)]
pub struct Imos<G: CommutativeGroup = OpAdd<i64>> {
    buf: Vec<G::Set>,
    group: G,
}

impl<G: CommutativeGroup + Default> Imos<G> {
    pub fn new(len: usize) -> Self { Self::with_group(len, G::default()) }
}

impl<G: CommutativeGroup> Imos<G> {
    pub fn with_group(len: usize, group: G) -> Self {
        let buf = (0..=len).map(|_| group.id()).collect();
        Self { buf, group }
    }

    pub fn len(&self) -> usize { self.buf.len() - 1 }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn add(&mut self, range: impl UsizeBounds, x: G::Set) {
        let Range { start, end } = range.to_range(self.len());
        if start == end {
            return;
        }
        let g = &self.group;
        self.buf[start] = g.op(&self.buf[start], &x);
        self.buf[end] = g.op(&self.buf[end], &g.recip(&x));
    }

    pub fn build(self) -> Vec<G::Set> {
        let Self { mut buf, group } = self;
        buf.pop();
        for i in 1..buf.len() {
            buf[i] = group.op(&buf[i - 1], &buf[i]);
        }
        buf
    }
}

/// Rectangle updates on an `h` by `w` grid.
#[derive(Clone)]
pub struct Imos2d<G: CommutativeGroup = OpAdd<i64>> {
    buf: Vec<Vec<G::Set>>,
    group: G,
}

impl<G: CommutativeGroup + Default> Imos2d<G> {
    pub fn new(h: usize, w: usize) -> Self {
        Self::with_group(h, w, G::default())
    }
}

impl<G: CommutativeGroup> Imos2d<G> {
    pub fn with_group(h: usize, w: usize, group: G) -> Self {
        let buf = (0..=h)
            .map(|_| (0..=w).map(|_| group.id()).collect())
            .collect();
        Self { buf, group }
    }

    pub fn height(&self) -> usize { self.buf.len() - 1 }
    pub fn width(&self) -> usize { self.buf[0].len() - 1 }

    pub fn add(
        &mut self,
        rows: impl UsizeBounds,
        cols: impl UsizeBounds,
        x: G::Set,
    ) {
        let Range { start: i0, end: i1 } = rows.to_range(self.height());
        let Range { start: j0, end: j1 } = cols.to_range(self.width());
        if i0 == i1 || j0 == j1 {
            return;
        }
        let g = &self.group;
        let neg = g.recip(&x);
        for (i, j, d) in [(i0, j0, &x), (i0, j1, &neg), (i1, j0, &neg), (i1, j1, &x)]
        {
            self.buf[i][j] = g.op(&self.buf[i][j], d);
        }
    }

    pub fn build(self) -> Vec<Vec<G::Set>> {
        let Self { mut buf, group } = self;
        buf.pop();
        for row in &mut buf {
            row.pop();
            for j in 1..row.len() {
                row[j] = group.op(&row[j - 1], &row[j]);
            }
        }
        for i in 1..buf.len() {
            for j in 0..buf[i].len() {
                buf[i][j] = group.op(&buf[i - 1][j], &buf[i][j]);
            }
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use group::OpXor;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use super::*;

    #[test]
    fn random_1d() {
        let mut rng = ChaCha20Rng::from_seed([0x1D; 32]);
        for len in [0, 1, 2, 10, 50] {
            let mut imos = Imos::<OpAdd<i64>>::new(len);
            let mut naive = vec![0; len];
            for _ in 0..100 {
                let l = rng.gen_range(0..=len);
                let r = rng.gen_range(l..=len);
                let x = rng.gen_range(-100..=100);
                imos.add(l..r, x);
                for y in &mut naive[l..r] {
                    *y += x;
                }
            }
            assert_eq!(imos.build(), naive);
        }
    }

    #[test]
    fn random_2d() {
        let mut rng = ChaCha20Rng::from_seed([0x2D; 32]);
        let (h, w) = (7, 11);
        let mut imos = Imos2d::<OpXor<u32>>::new(h, w);
        let mut naive = vec![vec![0; w]; h];
        for _ in 0..200 {
            let i0 = rng.gen_range(0..=h);
            let i1 = rng.gen_range(i0..=h);
            let j0 = rng.gen_range(0..=w);
            let j1 = rng.gen_range(j0..=w);
            let x = rng.gen();
            imos.add(i0..i1, j0..j1, x);
            for row in &mut naive[i0..i1] {
                for y in &mut row[j0..j1] {
                    *y ^= x;
                }
            }
        }
        assert_eq!(imos.build(), naive);
    }

    #[test]
    fn clone_then_diverge() {
        let mut imos: Imos = Imos::new(4);
        imos.add(..2, 3);
        let mut other = imos.clone();
        other.add(1.., -1);
        assert_eq!(imos.build(), [3, 3, 0, 0]);
        assert_eq!(other.build(), [3, 2, -1, -1]);

        let mut grid: Imos2d = Imos2d::new(2, 2);
        grid.add(.., 1.., 5);
        let copy = grid.clone();
        grid.add(..1, .., 1);
        assert_eq!(copy.build(), [[0, 5], [0, 5]]);
        assert_eq!(grid.build(), [[1, 6], [0, 5]]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds() {
        let mut imos = Imos::<OpAdd<i64>>::new(3);
        imos.add(2..5, 1);
    }
}
