use std::{
    fmt,
    ops::{
        Bound::{Excluded, Included, Unbounded},
        Range, RangeBounds,
    },
};

/// A range rejected by [`UsizeBounds::checked_to_range`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UsizeOob {
    Start { start: usize, len: usize },
    End { end: usize, len: usize },
    Order { start: usize, end: usize },
}

impl fmt::Display for UsizeOob {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsizeOob::Start { start, len } => write!(
                fmt,
                "range start index {start} out of range for length {len}"
            ),
            UsizeOob::End { end, len } => write!(
                fmt,
                "range end index {end} out of range for length {len}"
            ),
            UsizeOob::Order { start, end } => {
                write!(fmt, "range starts at {start} but ends at {end}")
            }
        }
    }
}

impl std::error::Error for UsizeOob {}

pub trait UsizeBounds {
    /// # Panics
    /// Panics where slice indexing with the same range would.
    fn to_range(&self, len: usize) -> Range<usize>;
    fn checked_to_range(&self, len: usize) -> Result<Range<usize>, UsizeOob>;
}

impl<R: RangeBounds<usize>> UsizeBounds for R {
    fn to_range(&self, len: usize) -> Range<usize> {
        match self.checked_to_range(len) {
            Ok(range) => range,
            Err(e) => panic!("{e}"),
        }
    }

    fn checked_to_range(&self, len: usize) -> Result<Range<usize>, UsizeOob> {
        let start = match self.start_bound() {
            Included(&s) => s,
            Excluded(&s) => s.saturating_add(1),
            Unbounded => 0,
        };
        let end = match self.end_bound() {
            Included(&e) => e.saturating_add(1),
            Excluded(&e) => e,
            Unbounded => len,
        };

        if start > len {
            Err(UsizeOob::Start { start, len })
        } else if end > len {
            Err(UsizeOob::End { end, len })
        } else if start > end {
            Err(UsizeOob::Order { start, end })
        } else {
            Ok(start..end)
        }
    }
}

#[test]
fn resolve() {
    assert_eq!((..).to_range(5), 0..5);
    assert_eq!((1..).to_range(5), 1..5);
    assert_eq!((..=2).to_range(5), 0..3);
    assert_eq!((2..2).to_range(5), 2..2);
    assert_eq!((5..).to_range(5), 5..5);

    assert_eq!((6..).checked_to_range(5), Err(UsizeOob::Start { start: 6, len: 5 }));
    assert_eq!((..=5).checked_to_range(5), Err(UsizeOob::End { end: 6, len: 5 }));
    assert_eq!((3..2).checked_to_range(5), Err(UsizeOob::Order { start: 3, end: 2 }));
}

#[test]
#[should_panic = "range end index 6 out of range for length 5"]
fn out_of_bounds() { (0..6).to_range(5); }
