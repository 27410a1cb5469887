//! Typed in-memory columns for the lnx table engine.
//!
//! A column stores the cells of a single field in row order and answers
//! value level predicates with [RoaringBitmap](roaring::RoaringBitmap)s of
//! matching row ordinals, which the table layer combines across columns.

mod column;
mod config;
mod datatype;
mod error;
mod missing;
mod predicate;
mod sorting;

pub use roaring::RoaringBitmap;

pub use self::column::{Column, ColumnAccess, IntColumn, Values, MAX_ROWS};
pub use self::config::{ColumnConfig, COMPACTION_SLACK, DEFAULT_CAPACITY};
pub use self::datatype::ColumnType;
pub use self::error::ColumnError;
pub use self::missing::{MissingIndicator, MissingTokens, DEFAULT_MISSING_TOKENS};
pub use self::predicate::{is_missing, IntPredicate, MISSING_VALUE};
pub use self::sorting::{compare_values, RowComparator};
