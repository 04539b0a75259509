//! Error types for SQL rendering.

use crate::metadata::DataType;

/// Errors raised while turning metadata or AST values into SQL text.
///
/// Every variant is a deterministic function of the input: retrying the same
/// input never succeeds. Use [`DialectError::is_configuration`] and
/// [`DialectError::is_unsupported`] to tell malformed input apart from
/// constructs the dialect cannot express.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// A table or table reference has a blank name.
    #[error("Cannot create SQL for a blank table name")]
    BlankTableName,

    /// Two columns of one table share a name (case-insensitively).
    #[error("Table '{table}' declares column '{column}' more than once")]
    DuplicateColumn {
        /// The owning table.
        table: String,
        /// The duplicated column name.
        column: String,
    },

    /// An index references a column the table does not have.
    #[error("Index '{index}' on table '{table}' references unknown column '{column}'")]
    UnknownIndexColumn {
        /// The owning table.
        table: String,
        /// The offending index.
        index: String,
        /// The missing column.
        column: String,
    },

    /// A decimal literal is not a plain number.
    #[error("Invalid decimal literal [{0}]")]
    InvalidDecimal(String),

    /// A column default cannot be read as a value of the column's type.
    #[error("Column '{column}' on table '{table}' has invalid default [{value}]")]
    InvalidDefault {
        /// The owning table.
        table: String,
        /// The column.
        column: String,
        /// The rejected default.
        value: String,
    },

    /// The data type has no column representation in this dialect.
    #[error("Cannot map column with type [{0}]")]
    UnmappedDataType(DataType),

    /// Neither side of an index rename exists on the table.
    #[error("Neither index '{from}' nor index '{to}' exists on table '{table}'")]
    IndexNotFound {
        /// The table that was searched.
        table: String,
        /// The name being renamed from.
        from: String,
        /// The name being renamed to.
        to: String,
    },

    /// A function was built with the wrong number of arguments.
    #[error("Function {function} expects {expected} argument(s) but was given {actual}")]
    InvalidArguments {
        /// Function name.
        function: &'static str,
        /// Expected argument count.
        expected: usize,
        /// Actual argument count.
        actual: usize,
    },

    /// A statement field that names a target column has no implied name.
    #[error("Statement on '{0}' has a field without an implied name")]
    UnnamedField(String),

    /// A merge unique key has no implied column name.
    #[error("Merge into '{0}' has a unique key field without a name")]
    UnnamedMergeKey(String),

    /// The dialect cannot express the requested construct.
    #[error("Unsupported by the {dialect} dialect: {message}")]
    Unsupported {
        /// Dialect name.
        dialect: &'static str,
        /// What was requested.
        message: String,
    },
}

impl DialectError {
    /// Returns true for malformed rendering input.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !self.is_unsupported()
    }

    /// Returns true when the dialect cannot express a valid construct.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Builds an [`DialectError::Unsupported`] error.
    #[must_use]
    pub fn unsupported(dialect: &'static str, message: impl Into<String>) -> Self {
        Self::Unsupported {
            dialect,
            message: message.into(),
        }
    }
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, DialectError>;
