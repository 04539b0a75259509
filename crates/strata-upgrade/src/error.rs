//! Error types for the upgrade runner.

use strata_sql_core::DialectError;

/// Errors that can occur while applying upgrade steps.
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    /// The dialect could not render a change.
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// An edit names a table the snapshot does not have.
    #[error("Table '{0}' does not exist")]
    UnknownTable(String),

    /// An edit adds a table the snapshot already has.
    #[error("Table '{0}' already exists")]
    TableExists(String),

    /// An edit names a column the table does not have.
    #[error("Column '{column}' does not exist in table '{table}'")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// An edit adds a column the table already has.
    #[error("Column '{column}' already exists in table '{table}'")]
    ColumnExists {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// An edit names an index the table does not have.
    #[error("Index '{index}' does not exist on table '{table}'")]
    UnknownIndex {
        /// Table name.
        table: String,
        /// Index name.
        index: String,
    },

    /// An edit adds an index the table already has.
    #[error("Index '{index}' already exists on table '{table}'")]
    IndexExists {
        /// Table name.
        table: String,
        /// Index name.
        index: String,
    },

    /// An edit names a view the snapshot does not have.
    #[error("View '{0}' does not exist")]
    UnknownView(String),

    /// A step's sequence number does not follow the last applied one.
    #[error("Upgrade step '{id}' has sequence {sequence}, which does not follow {previous}")]
    NonIncreasingSequence {
        /// Step id.
        id: String,
        /// The step's sequence number.
        sequence: u64,
        /// The last applied sequence number.
        previous: u64,
    },

    /// A step id was seen before.
    #[error("Upgrade step '{0}' has already been applied")]
    DuplicateStepId(String),

    /// The SQL executor rejected a statement.
    #[error("Executor failed in upgrade step '{step}': {message}")]
    Executor {
        /// Step id.
        step: String,
        /// The executor's error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl UpgradeError {
    /// Returns true if the error comes from the step stream itself rather
    /// than from the schema or the database.
    #[must_use]
    pub const fn is_ordering(&self) -> bool {
        matches!(
            self,
            Self::NonIncreasingSequence { .. } | Self::DuplicateStepId(_)
        )
    }
}

/// Result type for upgrade operations.
pub type Result<T> = std::result::Result<T, UpgradeError>;
