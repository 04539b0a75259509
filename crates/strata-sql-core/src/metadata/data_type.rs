//! Column data types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Logical column data types.
///
/// Width and scale travel alongside the type on [`Column`](super::Column)
/// and [`Cast`](crate::ast::Cast); they are only meaningful for
/// [`DataType::String`] and [`DataType::Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Variable-length character string.
    String,
    /// Fixed-point decimal.
    Decimal,
    /// Calendar date.
    Date,
    /// Boolean.
    Boolean,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInteger,
    /// Binary large object.
    Blob,
    /// Character large object.
    Clob,
    /// The type of an untyped NULL literal. Never a column type.
    Null,
}

impl DataType {
    /// Returns true if width is part of the type's declaration.
    #[must_use]
    pub const fn has_width(self) -> bool {
        matches!(self, Self::String | Self::Decimal)
    }

    /// Returns true if scale is part of the type's declaration.
    #[must_use]
    pub const fn has_scale(self) -> bool {
        matches!(self, Self::Decimal)
    }

    /// Returns the canonical upper-case name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::BigInteger => "BIG_INTEGER",
            Self::Blob => "BLOB",
            Self::Clob => "CLOB",
            Self::Null => "NULL",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_and_scale() {
        assert!(DataType::String.has_width());
        assert!(!DataType::String.has_scale());
        assert!(DataType::Decimal.has_width());
        assert!(DataType::Decimal.has_scale());
        assert!(!DataType::Integer.has_width());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::BigInteger.to_string(), "BIG_INTEGER");
        assert_eq!(DataType::Clob.to_string(), "CLOB");
    }
}
