#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
/// The declared data type of a column.
///
/// Every column type shares the same [Column](crate::Column) contract,
/// this tag is how the owning table tells them apart without downcasting.
pub enum ColumnType {
    Integer = 1,
    Float = 2,
    String = 3,
    Boolean = 4,
    LocalDate = 5,
    LocalTime = 6,
    LocalDateTime = 7,
}

impl ColumnType {
    /// Returns the sentinel used to encode a missing cell for types which
    /// store one in place of the value, or `None` if the type encodes
    /// missing values some other way.
    pub const fn missing_value(&self) -> Option<i64> {
        match self {
            ColumnType::Integer => Some(i32::MIN as i64),
            ColumnType::LocalDate => Some(i32::MIN as i64),
            ColumnType::LocalTime => Some(i32::MIN as i64),
            ColumnType::LocalDateTime => Some(i64::MIN),
            ColumnType::Float | ColumnType::String | ColumnType::Boolean => None,
        }
    }
}
