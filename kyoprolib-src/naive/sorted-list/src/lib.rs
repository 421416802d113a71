/// Sorted `Vec` with the interface of an ordered (multi)set; every update is
/// `O(n)`.
#[derive(Clone, Debug)]
pub struct SortedList<T> {
    buf: Vec<T>,
    multi: bool,
}

impl<T: Ord> SortedList<T> {
    pub fn new(multi: bool) -> Self { Self { buf: vec![], multi } }

    pub fn len(&self) -> usize { self.buf.len() }
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }

    pub fn insert(&mut self, x: T) -> bool {
        if !self.multi && self.contains(&x) {
            return false;
        }
        let i = self.upper_bound(&x);
        self.buf.insert(i, x);
        true
    }
    pub fn remove(&mut self, x: &T) -> bool {
        match self.index_of(x) {
            Some(i) => {
                self.buf.remove(i);
                true
            }
            None => false,
        }
    }
    pub fn remove_at(&mut self, i: usize) -> Option<T> {
        (i < self.buf.len()).then(|| self.buf.remove(i))
    }

    pub fn contains(&self, x: &T) -> bool { self.buf.contains(x) }
    pub fn index_of(&self, x: &T) -> Option<usize> {
        self.buf.iter().position(|y| y == x)
    }
    pub fn lower_bound(&self, x: &T) -> usize {
        self.buf.iter().take_while(|&y| y < x).count()
    }
    pub fn upper_bound(&self, x: &T) -> usize {
        self.buf.iter().take_while(|&y| y <= x).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.buf.iter() }
}
