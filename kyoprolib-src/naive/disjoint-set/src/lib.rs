/// Partition of `0..n` as a label per element; every query is `O(n)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisjointSet(Vec<usize>);

impl DisjointSet {
    pub fn new(n: usize) -> Self { Self((0..n).collect()) }
    pub fn unite(&mut self, u: usize, v: usize) -> bool {
        let (from, to) = (self.0[u], self.0[v]);
        if from == to {
            return false;
        }
        for label in &mut self.0 {
            if *label == from {
                *label = to;
            }
        }
        true
    }
    pub fn equiv(&self, u: usize, v: usize) -> bool {
        self.repr(u) == self.repr(v)
    }
    pub fn repr(&self, u: usize) -> usize { self.0[u] }
    pub fn count(&self, u: usize) -> usize {
        self.0.iter().filter(|&&label| label == self.0[u]).count()
    }
    pub fn partition_len(&self) -> usize {
        let n = self.0.len();
        (0..n).filter(|&i| self.0[i] == i).count()
    }
}
