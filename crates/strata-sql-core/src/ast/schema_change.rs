//! Schema-change statements.

use crate::metadata::{Column, Index, Table, View};

/// A single structural change to a schema.
///
/// `table` is the table as it stands after the change, except for
/// [`SchemaChange::RemoveTable`], which carries the table being removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaChange {
    /// Deploy a new table.
    AddTable {
        /// The new table.
        table: Table,
    },
    /// Drop a table.
    RemoveTable {
        /// The table being dropped.
        table: Table,
    },
    /// Rename a table.
    RenameTable {
        /// The table before the rename.
        from: Table,
        /// The table after the rename.
        to: Table,
    },
    /// Add a column.
    AddColumn {
        /// The table after the change.
        table: Table,
        /// The new column.
        column: Column,
    },
    /// Change a column's name, type, nullability, default or flags.
    ChangeColumn {
        /// The table after the change.
        table: Table,
        /// The column before the change.
        from: Column,
        /// The column after the change.
        to: Column,
    },
    /// Drop a column.
    RemoveColumn {
        /// The table after the change.
        table: Table,
        /// The dropped column.
        column: Column,
    },
    /// Add an index.
    AddIndex {
        /// The table after the change.
        table: Table,
        /// The new index.
        index: Index,
    },
    /// Drop an index.
    RemoveIndex {
        /// The table after the change.
        table: Table,
        /// The dropped index.
        index: Index,
    },
    /// Rename an index.
    RenameIndex {
        /// The table, with the index under either name.
        table: Table,
        /// Current index name.
        from: String,
        /// New index name.
        to: String,
    },
    /// Replace the primary key.
    ChangePrimaryKey {
        /// The table after the change.
        table: Table,
        /// Primary-key columns before the change.
        from: Vec<String>,
        /// Primary-key columns after the change.
        to: Vec<String>,
    },
    /// Drop a view.
    RemoveView {
        /// The view being dropped.
        view: View,
    },
}

impl SchemaChange {
    /// A short name for the kind of change, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddTable { .. } => "add-table",
            Self::RemoveTable { .. } => "remove-table",
            Self::RenameTable { .. } => "rename-table",
            Self::AddColumn { .. } => "add-column",
            Self::ChangeColumn { .. } => "change-column",
            Self::RemoveColumn { .. } => "remove-column",
            Self::AddIndex { .. } => "add-index",
            Self::RemoveIndex { .. } => "remove-index",
            Self::RenameIndex { .. } => "rename-index",
            Self::ChangePrimaryKey { .. } => "change-primary-key",
            Self::RemoveView { .. } => "remove-view",
        }
    }

    /// The name of the table or view the change applies to.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::AddTable { table }
            | Self::RemoveTable { table }
            | Self::AddColumn { table, .. }
            | Self::ChangeColumn { table, .. }
            | Self::RemoveColumn { table, .. }
            | Self::AddIndex { table, .. }
            | Self::RemoveIndex { table, .. }
            | Self::RenameIndex { table, .. }
            | Self::ChangePrimaryKey { table, .. } => &table.name,
            Self::RenameTable { to, .. } => &to.name,
            Self::RemoveView { view } => &view.name,
        }
    }
}
