//! A growable column of `i32` values.
//!
//! Missing cells are stored as [MISSING_VALUE] and are excluded from every
//! predicate and from `sum`, `min` and `max`. They still count as a value in
//! [IntColumn::count_unique] and order by their numeric value when sorting
//! (i.e. first when ascending).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::io::{self, Write};
use std::iter::FusedIterator;
use std::sync::Arc;

use ahash::AHashSet;
use roaring::RoaringBitmap;
use tracing::{debug, trace};

use super::{Column, ColumnAccess};
use crate::predicate::{is_missing, IntPredicate, MISSING_VALUE};
use crate::sorting::{compare_values, RowComparator};
use crate::{ColumnConfig, ColumnError, ColumnType};

/// The maximum number of rows a column can hold.
///
/// Rows are addressed by `u32` ordinals in the bitmaps produced by predicates.
pub const MAX_ROWS: usize = u32::MAX as usize;

#[derive(Debug, Clone)]
/// A column that contains signed integer values.
///
/// Cloning a column deep copies its values, the copy never aliases the
/// buffer of the original.
pub struct IntColumn {
    /// The name of the column.
    name: Arc<str>,
    /// The populated values, the capacity of the vec is the column capacity.
    values: Vec<i32>,
    /// Config shared with every copy of the column.
    config: Arc<ColumnConfig>,
}

impl IntColumn {
    /// Creates a new empty column with the default config.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_config(name, Arc::new(ColumnConfig::default()))
    }

    /// Creates a new empty column with room for `capacity` values.
    pub fn with_capacity(name: impl Into<Arc<str>>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            values: Vec::with_capacity(capacity),
            config: Arc::new(ColumnConfig::default()),
        }
    }

    /// Creates a new empty column using the given config.
    pub fn with_config(name: impl Into<Arc<str>>, config: Arc<ColumnConfig>) -> Self {
        Self {
            name: name.into(),
            values: Vec::with_capacity(config.default_capacity),
            config,
        }
    }

    /// Creates a column taking ownership of an existing set of values.
    pub fn from_values(
        name: impl Into<Arc<str>>,
        values: Vec<i32>,
    ) -> Result<Self, ColumnError> {
        let name = name.into();

        if values.len() > MAX_ROWS {
            return Err(ColumnError::CapacityOverflow {
                column: name.to_string(),
                requested: values.len(),
            });
        }

        Ok(Self {
            name,
            values,
            config: Arc::new(ColumnConfig::default()),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    /// The config of the column.
    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    #[inline]
    /// The number of populated rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    /// The number of rows the column can hold before it must grow.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Appends a value to the end of the column.
    ///
    /// If the column is full the capacity is doubled first.
    pub fn add(&mut self, value: i32) -> Result<(), ColumnError> {
        if self.values.len() == self.values.capacity() {
            self.grow()?;
        }
        self.values.push(value);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), ColumnError> {
        let len = self.values.len();
        if len >= MAX_ROWS {
            return Err(ColumnError::CapacityOverflow {
                column: self.name.to_string(),
                requested: len.saturating_add(1),
            });
        }

        let current = self.values.capacity().max(1);
        let target = current
            .checked_mul(2)
            .ok_or_else(|| ColumnError::CapacityOverflow {
                column: self.name.to_string(),
                requested: current,
            })?
            .min(MAX_ROWS);

        self.values
            .try_reserve_exact(target - len)
            .map_err(|source| ColumnError::Allocation {
                column: self.name.to_string(),
                source,
            })?;

        debug!(
            column = %self.name,
            old_capacity = current,
            new_capacity = self.values.capacity(),
            "Grew column buffer"
        );

        Ok(())
    }

    /// Reallocates the buffer to the number of rows plus `compaction_slack`.
    ///
    /// This reclaims most of the unused capacity of a sparse buffer while
    /// leaving headroom for a few more values, a full column gains headroom.
    pub fn compact(&mut self) -> Result<(), ColumnError> {
        let before = self.values.capacity();
        let len = self.values.len();
        let target = len.saturating_add(self.config.compaction_slack);

        if before > target {
            self.values.shrink_to(target);
        } else if before < target {
            self.values
                .try_reserve_exact(target - len)
                .map_err(|source| ColumnError::Allocation {
                    column: self.name.to_string(),
                    source,
                })?;
        }

        debug!(
            column = %self.name,
            old_capacity = before,
            new_capacity = self.values.capacity(),
            "Compacted column buffer"
        );

        Ok(())
    }

    /// Removes all values and resets the capacity to the configured default.
    pub fn clear(&mut self) {
        self.values = Vec::with_capacity(self.config.default_capacity);
        debug!(column = %self.name, "Cleared column");
    }

    #[inline]
    /// Returns the value at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    #[inline]
    /// Replaces the value at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: i32) {
        self.values[index] = value;
    }

    /// Returns the value at `index` or an error if it is out of bounds.
    pub fn try_get(&self, index: usize) -> Result<i32, ColumnError> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Replaces the value at `index` or returns an error if it is out of bounds.
    pub fn try_set(&mut self, index: usize, value: i32) -> Result<(), ColumnError> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            },
            None => Err(ColumnError::IndexOutOfBounds {
                column: self.name.to_string(),
                index,
                len,
            }),
        }
    }

    fn out_of_bounds(&self, index: usize) -> ColumnError {
        ColumnError::IndexOutOfBounds {
            column: self.name.to_string(),
            index,
            len: self.values.len(),
        }
    }

    #[inline]
    /// Returns an iterator over the values in row order.
    ///
    /// Each iterator keeps its own position, any number of them can be
    /// alive on the same column at once.
    pub fn iter(&self) -> Values<'_> {
        Values {
            inner: self.values.iter(),
        }
    }

    fn present(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().filter(|v| !is_missing(*v))
    }

    /// Returns the row ordinals of every cell matching the predicate.
    pub fn select(&self, predicate: &IntPredicate) -> RoaringBitmap {
        let rows = self.rows_where(|value| predicate.matches(value));
        trace!(
            column = %self.name,
            predicate = %predicate,
            matches = rows.len(),
            "Evaluated predicate"
        );
        rows
    }

    fn rows_where(&self, mut matches: impl FnMut(i32) -> bool) -> RoaringBitmap {
        let mut rows = RoaringBitmap::new();
        for (value, row) in self.values.iter().zip(0u32..) {
            if matches(*value) {
                rows.insert(row);
            }
        }
        rows
    }

    pub fn is_less_than(&self, operand: i32) -> RoaringBitmap {
        self.select(&IntPredicate::LessThan(operand))
    }

    pub fn is_greater_than(&self, operand: i32) -> RoaringBitmap {
        self.select(&IntPredicate::GreaterThan(operand))
    }

    pub fn is_less_than_or_equal_to(&self, operand: i32) -> RoaringBitmap {
        self.select(&IntPredicate::LessThanOrEqual(operand))
    }

    pub fn is_greater_than_or_equal_to(&self, operand: i32) -> RoaringBitmap {
        self.select(&IntPredicate::GreaterThanOrEqual(operand))
    }

    pub fn is_equal_to(&self, operand: i32) -> RoaringBitmap {
        self.select(&IntPredicate::Equal(operand))
    }

    pub fn is_not_equal_to(&self, operand: i32) -> RoaringBitmap {
        self.select(&IntPredicate::NotEqual(operand))
    }

    pub fn is_positive(&self) -> RoaringBitmap {
        self.select(&IntPredicate::Positive)
    }

    pub fn is_negative(&self) -> RoaringBitmap {
        self.select(&IntPredicate::Negative)
    }

    pub fn is_non_negative(&self) -> RoaringBitmap {
        self.select(&IntPredicate::NonNegative)
    }

    pub fn is_zero(&self) -> RoaringBitmap {
        self.select(&IntPredicate::Zero)
    }

    pub fn is_even(&self) -> RoaringBitmap {
        self.select(&IntPredicate::Even)
    }

    pub fn is_odd(&self) -> RoaringBitmap {
        self.select(&IntPredicate::Odd)
    }

    /// Returns the row ordinals of every missing cell.
    pub fn is_missing(&self) -> RoaringBitmap {
        self.rows_where(is_missing)
    }

    /// Returns the row ordinals of every present cell.
    pub fn is_not_missing(&self) -> RoaringBitmap {
        self.rows_where(|value| !is_missing(value))
    }

    /// Returns a bitmap containing every row ordinal of the column.
    ///
    /// Subtracting a predicate result from this gives its negation.
    pub fn all_rows(&self) -> RoaringBitmap {
        let mut rows = RoaringBitmap::new();
        // `len` is bounded by `MAX_ROWS` so always fits.
        rows.insert_range(0..self.values.len() as u32);
        rows
    }

    /// Sums the present values using `i32` arithmetic.
    ///
    /// The sum wraps on overflow, use [Self::checked_sum] to detect it.
    pub fn sum(&self) -> i32 {
        self.present().fold(0, i32::wrapping_add)
    }

    /// Sums the present values, returning `None` if the sum overflows.
    pub fn checked_sum(&self) -> Option<i32> {
        self.present().try_fold(0i32, i32::checked_add)
    }

    /// Returns the smallest present value or `None` if there are none.
    pub fn min(&self) -> Option<i32> {
        self.present().min()
    }

    /// Returns the largest present value or `None` if there are none.
    pub fn max(&self) -> Option<i32> {
        self.present().max()
    }

    /// The number of missing cells in the column.
    pub fn count_missing(&self) -> usize {
        self.iter().filter(|v| is_missing(*v)).count()
    }

    /// The number of distinct values in the column.
    ///
    /// Every populated row takes part, all missing cells count as a single
    /// distinct value.
    pub fn count_unique(&self) -> usize {
        self.iter().collect::<AHashSet<i32>>().len()
    }

    /// Returns a new column with the values sorted in ascending order.
    ///
    /// Missing cells come first.
    pub fn sort_ascending(&self) -> IntColumn {
        let mut values = self.values.clone();
        values.sort_unstable_by(|a, b| compare_values(*a, *b));
        debug!(column = %self.name, rows = values.len(), "Sorted column ascending");
        self.with_values(values)
    }

    /// Returns a new column with the values sorted in descending order.
    ///
    /// This is always the exact reverse of [Self::sort_ascending], missing
    /// cells come last.
    pub fn sort_descending(&self) -> IntColumn {
        let mut sorted = self.sort_ascending();
        sorted.values.reverse();
        sorted
    }

    /// Returns a comparator ordering row ordinals by their values.
    pub fn row_comparator(&self) -> RowComparator<'_> {
        RowComparator::new(&self.values)
    }

    /// Creates a new empty column with the same name and config.
    pub fn empty_copy(&self) -> IntColumn {
        Self::with_config(self.name.clone(), self.config.clone())
    }

    fn with_values(&self, values: Vec<i32>) -> IntColumn {
        Self {
            name: self.name.clone(),
            values,
            config: self.config.clone(),
        }
    }

    /// Parses cell text into a value.
    ///
    /// Empty text, an absent cell and any configured missing token become
    /// [MISSING_VALUE]. Commas are removed before parsing, no other
    /// characters (including whitespace) are tolerated.
    pub fn convert(&self, cell: Option<&str>) -> Result<i32, ColumnError> {
        let Some(text) = cell else {
            if self.config.null_as_missing {
                return Ok(MISSING_VALUE);
            }
            return Err(ColumnError::NullCell {
                column: self.name.to_string(),
                input: "null".to_string(),
            });
        };

        if text.is_empty() || self.config.missing_indicators.is_missing_token(text) {
            return Ok(MISSING_VALUE);
        }

        let digits = if text.contains(',') {
            Cow::Owned(text.replace(',', ""))
        } else {
            Cow::Borrowed(text)
        };

        digits
            .parse::<i32>()
            .map_err(|source| ColumnError::Format {
                column: self.name.to_string(),
                input: text.to_string(),
                source,
            })
    }

    /// Parses the cell text and appends it to the column.
    pub fn add_cell(&mut self, cell: Option<&str>) -> Result<(), ColumnError> {
        let value = self.convert(cell)?;
        self.add(value)
    }

    /// Renders the value at `row`, missing cells render as an empty string.
    ///
    /// Panics if `row` is out of bounds.
    pub fn get_string(&self, row: usize) -> String {
        let value = self.values[row];
        if is_missing(value) {
            String::new()
        } else {
            value.to_string()
        }
    }

    /// Returns the values widened to `f32`, missing cells become `NaN`.
    pub fn to_float_vec(&self) -> Vec<f32> {
        self.iter()
            .map(|v| if is_missing(v) { f32::NAN } else { v as f32 })
            .collect()
    }

    /// Writes each value on its own line in row order.
    pub fn write_values<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for value in self.iter() {
            if is_missing(value) {
                writeln!(writer)?;
            } else {
                writeln!(writer, "{value}")?;
            }
        }
        writer.flush()
    }

    /// Prints each value on its own line to stdout.
    pub fn print(&self) -> io::Result<()> {
        self.write_values(io::stdout().lock())
    }
}

impl ColumnAccess<i32> for IntColumn {
    #[inline]
    fn values(&self) -> &[i32] {
        &self.values
    }
}

impl Column for IntColumn {
    fn name(&self) -> &str {
        IntColumn::name(self)
    }

    fn column_type(&self) -> ColumnType {
        ColumnType::Integer
    }

    fn len(&self) -> usize {
        IntColumn::len(self)
    }

    fn count_unique(&self) -> usize {
        IntColumn::count_unique(self)
    }

    fn get_string(&self, row: usize) -> String {
        IntColumn::get_string(self, row)
    }

    fn add_cell(&mut self, cell: Option<&str>) -> Result<(), ColumnError> {
        IntColumn::add_cell(self, cell)
    }

    fn clear(&mut self) {
        IntColumn::clear(self)
    }

    fn empty_copy(&self) -> Box<dyn Column> {
        Box::new(IntColumn::empty_copy(self))
    }

    fn sort_ascending(&self) -> Box<dyn Column> {
        Box::new(IntColumn::sort_ascending(self))
    }

    fn sort_descending(&self) -> Box<dyn Column> {
        Box::new(IntColumn::sort_descending(self))
    }

    fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        self.row_comparator().compare(a, b)
    }
}

impl<'a> IntoIterator for &'a IntColumn {
    type Item = i32;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
/// An iterator over the values of an [IntColumn] in row order.
pub struct Values<'a> {
    inner: std::slice::Iter<'a, i32>,
}

impl Values<'_> {
    #[inline]
    /// Returns `true` if there are values left to yield.
    pub fn has_next(&self) -> bool {
        self.inner.len() > 0
    }
}

impl Iterator for Values<'_> {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Values<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Values<'_> {}

impl FusedIterator for Values<'_> {}
