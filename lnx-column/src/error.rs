use std::collections::TryReserveError;
use std::num::ParseIntError;

#[derive(Debug, thiserror::Error)]
/// An error that can occur while mutating or ingesting values into a column.
pub enum ColumnError {
    #[error("{column}: {source} for input string {input:?}")]
    /// The cell text was not a valid base-10 integer and was not
    /// recognised as a missing value token.
    Format {
        column: String,
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{column}: {input}: null cell is not accepted as a missing value")]
    /// An absent cell was ingested into a column which does not treat
    /// absent cells as missing values.
    NullCell { column: String, input: String },
    #[error("{column}: index {index} is out of bounds for column of length {len}")]
    /// A row was accessed outside of `[0, len)`.
    IndexOutOfBounds {
        column: String,
        index: usize,
        len: usize,
    },
    #[error("{column}: cannot grow column beyond {requested} rows")]
    /// Growing the column would exceed the number of rows that can be
    /// addressed by a row ordinal.
    CapacityOverflow { column: String, requested: usize },
    #[error("{column}: failed to allocate column buffer: {source}")]
    /// The allocator refused to provide the requested buffer.
    Allocation {
        column: String,
        #[source]
        source: TryReserveError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_column() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = ColumnError::Format {
            column: "age".to_string(),
            input: "abc".to_string(),
            source,
        };
        assert_eq!(
            err.to_string(),
            r#"age: invalid digit found in string for input string "abc""#
        );
    }

    #[test]
    fn test_null_cell_error_names_input() {
        let err = ColumnError::NullCell {
            column: "age".to_string(),
            input: "None".to_string(),
        };
        assert!(err.to_string().starts_with("age: None:"));
    }
}
