//! The canonical ordering of integer cells.
//!
//! Sorting a column and reordering the rows of a table by a column must
//! agree with each other, so both go through [compare_values].

use std::cmp::Ordering;

#[inline]
/// Compares two integer cells by their numeric value.
///
/// The missing value sentinel is `i32::MIN` and so orders before every
/// present value.
pub fn compare_values(a: i32, b: i32) -> Ordering {
    a.cmp(&b)
}

#[derive(Debug, Copy, Clone)]
/// Orders row ordinals by the values stored at those rows.
///
/// This allows an external operation to permute an entire table by the
/// values of a single column without materialising the values.
pub struct RowComparator<'a> {
    values: &'a [i32],
}

impl<'a> RowComparator<'a> {
    pub(crate) fn new(values: &'a [i32]) -> Self {
        Self { values }
    }

    #[inline]
    /// Compares the values at rows `a` and `b`.
    ///
    /// Panics if either row is out of bounds.
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        compare_values(self.values[a], self.values[b])
    }
}
