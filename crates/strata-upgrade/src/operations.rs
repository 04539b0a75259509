//! Schema edits.
//!
//! An edit states an intent against the current schema snapshot, naming
//! tables, columns and indexes by name. The snapshot resolves it into a
//! [`SchemaChange`](strata_sql_core::SchemaChange) carrying the full
//! before/after metadata the dialects need.

use serde::{Deserialize, Serialize};
use strata_sql_core::metadata::{Column, Index, Table};

/// A single schema edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaEdit {
    /// Create a new table.
    AddTable {
        /// The new table.
        table: Table,
    },

    /// Drop a table.
    RemoveTable {
        /// Table name.
        table: String,
    },

    /// Rename a table.
    RenameTable {
        /// Current table name.
        from: String,
        /// New table name.
        to: String,
    },

    /// Add a column to a table.
    AddColumn {
        /// Table name.
        table: String,
        /// Column definition.
        column: Column,
    },

    /// Replace a column's definition, possibly renaming it.
    ChangeColumn {
        /// Table name.
        table: String,
        /// Current column name.
        column: String,
        /// The new definition.
        to: Column,
    },

    /// Drop a column from a table.
    RemoveColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// Create an index.
    AddIndex {
        /// Table name.
        table: String,
        /// Index definition.
        index: Index,
    },

    /// Drop an index.
    RemoveIndex {
        /// Table name.
        table: String,
        /// Index name.
        index: String,
    },

    /// Rename an index.
    RenameIndex {
        /// Table name.
        table: String,
        /// Current index name.
        from: String,
        /// New index name.
        to: String,
    },

    /// Replace the primary key. Key order follows column declaration order.
    ChangePrimaryKey {
        /// Table name.
        table: String,
        /// The new key columns.
        columns: Vec<String>,
    },

    /// Drop a view.
    RemoveView {
        /// View name.
        view: String,
    },
}

impl SchemaEdit {
    /// Creates an `AddTable` edit.
    #[must_use]
    pub const fn add_table(table: Table) -> Self {
        Self::AddTable { table }
    }

    /// Creates a `RemoveTable` edit.
    #[must_use]
    pub fn remove_table(table: impl Into<String>) -> Self {
        Self::RemoveTable {
            table: table.into(),
        }
    }

    /// Creates a `RenameTable` edit.
    #[must_use]
    pub fn rename_table(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::RenameTable {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates an `AddColumn` edit.
    #[must_use]
    pub fn add_column(table: impl Into<String>, column: Column) -> Self {
        Self::AddColumn {
            table: table.into(),
            column,
        }
    }

    /// Creates a `ChangeColumn` edit.
    #[must_use]
    pub fn change_column(table: impl Into<String>, column: impl Into<String>, to: Column) -> Self {
        Self::ChangeColumn {
            table: table.into(),
            column: column.into(),
            to,
        }
    }

    /// Creates a `RemoveColumn` edit.
    #[must_use]
    pub fn remove_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::RemoveColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates an `AddIndex` edit.
    #[must_use]
    pub fn add_index(table: impl Into<String>, index: Index) -> Self {
        Self::AddIndex {
            table: table.into(),
            index,
        }
    }

    /// Creates a `RemoveIndex` edit.
    #[must_use]
    pub fn remove_index(table: impl Into<String>, index: impl Into<String>) -> Self {
        Self::RemoveIndex {
            table: table.into(),
            index: index.into(),
        }
    }

    /// Creates a `RenameIndex` edit.
    #[must_use]
    pub fn rename_index(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::RenameIndex {
            table: table.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates a `ChangePrimaryKey` edit.
    #[must_use]
    pub fn change_primary_key<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ChangePrimaryKey {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a `RemoveView` edit.
    #[must_use]
    pub fn remove_view(view: impl Into<String>) -> Self {
        Self::RemoveView { view: view.into() }
    }

    /// The table or view the edit applies to, under its current name.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::AddTable { table } => &table.name,
            Self::RemoveTable { table }
            | Self::AddColumn { table, .. }
            | Self::ChangeColumn { table, .. }
            | Self::RemoveColumn { table, .. }
            | Self::AddIndex { table, .. }
            | Self::RemoveIndex { table, .. }
            | Self::RenameIndex { table, .. }
            | Self::ChangePrimaryKey { table, .. } => table,
            Self::RenameTable { from, .. } => from,
            Self::RemoveView { view } => view,
        }
    }
}
