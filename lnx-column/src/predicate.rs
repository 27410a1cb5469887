//! Value level predicates evaluated against integer columns.
//!
//! A predicate is evaluated one row at a time and the matching row ordinals
//! are collected into a [RoaringBitmap](roaring::RoaringBitmap), which the
//! owning table can union, intersect and negate across columns.

use std::fmt::{Display, Formatter};

use crate::ColumnType;

/// The sentinel stored in place of a missing integer cell.
pub const MISSING_VALUE: i32 = match ColumnType::Integer.missing_value() {
    Some(value) => value as i32,
    None => panic!("integer columns must declare a missing value sentinel"),
};

#[inline]
/// Returns `true` if the value is the missing value sentinel.
///
/// This is the single policy every aggregate and predicate consults,
/// missing cells never match a value predicate.
pub fn is_missing(value: i32) -> bool {
    value == MISSING_VALUE
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// A comparison of each present cell against a fixed operand or property.
pub enum IntPredicate {
    LessThan(i32),
    GreaterThan(i32),
    LessThanOrEqual(i32),
    GreaterThanOrEqual(i32),
    Equal(i32),
    NotEqual(i32),
    Positive,
    Negative,
    NonNegative,
    Zero,
    Even,
    Odd,
}

impl IntPredicate {
    #[inline]
    /// Returns `true` if the given cell satisfies the predicate.
    ///
    /// Missing cells never match.
    pub fn matches(&self, value: i32) -> bool {
        if is_missing(value) {
            return false;
        }

        match *self {
            IntPredicate::LessThan(operand) => value < operand,
            IntPredicate::GreaterThan(operand) => value > operand,
            IntPredicate::LessThanOrEqual(operand) => value <= operand,
            IntPredicate::GreaterThanOrEqual(operand) => value >= operand,
            IntPredicate::Equal(operand) => value == operand,
            IntPredicate::NotEqual(operand) => value != operand,
            IntPredicate::Positive => value > 0,
            IntPredicate::Negative => value < 0,
            IntPredicate::NonNegative => value >= 0,
            IntPredicate::Zero => value == 0,
            IntPredicate::Even => value & 1 == 0,
            IntPredicate::Odd => value & 1 != 0,
        }
    }
}

impl Display for IntPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IntPredicate::LessThan(operand) => write!(f, "< {operand}"),
            IntPredicate::GreaterThan(operand) => write!(f, "> {operand}"),
            IntPredicate::LessThanOrEqual(operand) => write!(f, "<= {operand}"),
            IntPredicate::GreaterThanOrEqual(operand) => write!(f, ">= {operand}"),
            IntPredicate::Equal(operand) => write!(f, "== {operand}"),
            IntPredicate::NotEqual(operand) => write!(f, "!= {operand}"),
            IntPredicate::Positive => write!(f, "is positive"),
            IntPredicate::Negative => write!(f, "is negative"),
            IntPredicate::NonNegative => write!(f, "is non-negative"),
            IntPredicate::Zero => write!(f, "is zero"),
            IntPredicate::Even => write!(f, "is even"),
            IntPredicate::Odd => write!(f, "is odd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(IntPredicate::LessThan(5), 4, true)]
    #[case(IntPredicate::LessThan(5), 5, false)]
    #[case(IntPredicate::GreaterThan(5), 6, true)]
    #[case(IntPredicate::GreaterThan(5), 5, false)]
    #[case(IntPredicate::LessThanOrEqual(5), 5, true)]
    #[case(IntPredicate::GreaterThanOrEqual(5), 4, false)]
    #[case(IntPredicate::Equal(-3), -3, true)]
    #[case(IntPredicate::NotEqual(-3), -3, false)]
    #[case(IntPredicate::Positive, 0, false)]
    #[case(IntPredicate::Negative, -1, true)]
    #[case(IntPredicate::NonNegative, 0, true)]
    #[case(IntPredicate::Zero, 0, true)]
    #[case(IntPredicate::Even, -4, true)]
    #[case(IntPredicate::Odd, -3, true)]
    #[case(IntPredicate::Odd, 2, false)]
    fn test_predicate_matches(
        #[case] predicate: IntPredicate,
        #[case] value: i32,
        #[case] expected: bool,
    ) {
        assert_eq!(
            predicate.matches(value),
            expected,
            "Expected {value} {predicate} to be {expected}"
        );
    }

    #[test]
    fn test_missing_value_matches_declared_type() {
        assert_eq!(ColumnType::Integer.missing_value(), Some(MISSING_VALUE as i64));
        assert_eq!(MISSING_VALUE, i32::MIN);
    }

    #[rstest::rstest]
    #[case(IntPredicate::LessThan(0))]
    #[case(IntPredicate::LessThanOrEqual(i32::MIN))]
    #[case(IntPredicate::Equal(MISSING_VALUE))]
    #[case(IntPredicate::NotEqual(0))]
    #[case(IntPredicate::Negative)]
    #[case(IntPredicate::Even)]
    fn test_missing_never_matches(#[case] predicate: IntPredicate) {
        assert!(!predicate.matches(MISSING_VALUE));
    }
}
