mod integer;

use std::cmp::Ordering;
use std::fmt::Debug;

pub use self::integer::{IntColumn, Values, MAX_ROWS};
use crate::{ColumnError, ColumnType};

/// Accessor methods for a given column.
///
/// This provides zero-copy access to the logical values of a column,
/// unused capacity is never exposed.
pub trait ColumnAccess<T> {
    /// Returns a slice reference to the values in the column where the
    /// index of each value is its row ordinal.
    fn values(&self) -> &[T];
}

/// The contract every typed column implements.
///
/// The owning table holds columns of different types behind this trait
/// and drives ingestion, sorting and row reordering through it.
pub trait Column: Debug + Send + Sync {
    /// The name of the column, assigned at construction.
    fn name(&self) -> &str;

    /// The declared type of the column.
    fn column_type(&self) -> ColumnType;

    /// The number of populated rows in the column.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of distinct present values in the column.
    fn count_unique(&self) -> usize;

    /// Renders the cell at `row` as text.
    ///
    /// Panics if `row` is out of bounds.
    fn get_string(&self, row: usize) -> String;

    /// Parses the cell text and appends it to the column.
    fn add_cell(&mut self, cell: Option<&str>) -> Result<(), ColumnError>;

    /// Removes all rows and resets the column to its default capacity.
    fn clear(&mut self);

    /// Creates a new empty column with the same name and type.
    fn empty_copy(&self) -> Box<dyn Column>;

    /// Returns a new column containing the values in ascending order.
    fn sort_ascending(&self) -> Box<dyn Column>;

    /// Returns a new column containing the values in descending order.
    fn sort_descending(&self) -> Box<dyn Column>;

    /// Compares the values stored at rows `a` and `b`.
    fn compare_rows(&self, a: usize, b: usize) -> Ordering;
}
