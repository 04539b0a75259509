//! Schema snapshot tracking.
//!
//! The snapshot is the schema as the upgrade steps applied so far have left
//! it. Applying an edit checks it against the snapshot, updates the snapshot
//! and returns the [`SchemaChange`] that carries the metadata on both sides
//! of the edit.

use serde::{Deserialize, Serialize};
use strata_sql_core::metadata::{view, Column, Table};
use strata_sql_core::SchemaChange;
use tracing::debug;

use crate::error::{Result, UpgradeError};
use crate::operations::SchemaEdit;

/// The tables and views an upgrade run knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSnapshot {
    /// Tables in creation order.
    pub tables: Vec<Table>,
    /// View names.
    pub views: Vec<String>,
}

impl SchemaSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: Vec::new(),
            views: Vec::new(),
        }
    }

    /// Parses a snapshot from JSON and validates every table in it.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, on an invalid table and on two tables with
    /// the same name.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        for (position, table) in snapshot.tables.iter().enumerate() {
            table.validate()?;
            if snapshot.tables[..position]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&table.name))
            {
                return Err(UpgradeError::TableExists(table.name.clone()));
            }
        }
        Ok(snapshot)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates serialization errors.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds a table.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Adds a view.
    #[must_use]
    pub fn with_view(mut self, name: impl Into<String>) -> Self {
        self.views.push(name.into());
        self
    }

    /// Looks up a table by name, ignoring case.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Returns true if the snapshot has a view called `name` (ignoring case).
    #[must_use]
    pub fn has_view(&self, name: &str) -> bool {
        self.views.iter().any(|v| v.eq_ignore_ascii_case(name))
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.tables
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| UpgradeError::UnknownTable(name.to_string()))
    }

    /// Validates `after` and stores it in place of the table at `position`.
    fn replace(&mut self, position: usize, after: &Table) -> Result<()> {
        after.validate()?;
        self.tables[position] = after.clone();
        Ok(())
    }

    /// Applies an edit and returns the resulting schema change.
    ///
    /// The snapshot is left untouched when the edit fails.
    ///
    /// # Errors
    ///
    /// Fails when the edit names a missing table, column, index or view,
    /// adds one that already exists, or leaves a table invalid. Dropping a
    /// column an index still uses is invalid; remove the index first.
    pub fn apply(&mut self, edit: &SchemaEdit) -> Result<SchemaChange> {
        debug!(target_name = edit.target(), "Applying schema edit to snapshot");

        let change = match edit {
            SchemaEdit::AddTable { table } => {
                if self.table(&table.name).is_some() {
                    return Err(UpgradeError::TableExists(table.name.clone()));
                }
                table.validate()?;
                self.tables.push(table.clone());
                SchemaChange::AddTable {
                    table: table.clone(),
                }
            }

            SchemaEdit::RemoveTable { table } => {
                let position = self.position(table)?;
                SchemaChange::RemoveTable {
                    table: self.tables.remove(position),
                }
            }

            SchemaEdit::RenameTable { from, to } => {
                let position = self.position(from)?;
                if !from.eq_ignore_ascii_case(to) && self.table(to).is_some() {
                    return Err(UpgradeError::TableExists(to.clone()));
                }
                let before = self.tables[position].clone();
                let after = before.clone().renamed(to.as_str());
                self.replace(position, &after)?;
                SchemaChange::RenameTable {
                    from: before,
                    to: after,
                }
            }

            SchemaEdit::AddColumn { table, column } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                if current.column(&column.name).is_some() {
                    return Err(UpgradeError::ColumnExists {
                        table: current.name.clone(),
                        column: column.name.clone(),
                    });
                }
                let after = current.clone().with_column(column.clone());
                self.replace(position, &after)?;
                SchemaChange::AddColumn {
                    table: after,
                    column: column.clone(),
                }
            }

            SchemaEdit::ChangeColumn { table, column, to } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                let from = current
                    .column(column)
                    .cloned()
                    .ok_or_else(|| UpgradeError::UnknownColumn {
                        table: current.name.clone(),
                        column: column.clone(),
                    })?;
                if !to.is_named(column) && current.column(&to.name).is_some() {
                    return Err(UpgradeError::ColumnExists {
                        table: current.name.clone(),
                        column: to.name.clone(),
                    });
                }
                let after = current.clone().with_column_replaced(column, to.clone());
                self.replace(position, &after)?;
                SchemaChange::ChangeColumn {
                    table: after,
                    from,
                    to: to.clone(),
                }
            }

            SchemaEdit::RemoveColumn { table, column } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                let removed = current
                    .column(column)
                    .cloned()
                    .ok_or_else(|| UpgradeError::UnknownColumn {
                        table: current.name.clone(),
                        column: column.clone(),
                    })?;
                let after = current.clone().without_column(column);
                self.replace(position, &after)?;
                SchemaChange::RemoveColumn {
                    table: after,
                    column: removed,
                }
            }

            SchemaEdit::AddIndex { table, index } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                if current.index(&index.name).is_some() {
                    return Err(UpgradeError::IndexExists {
                        table: current.name.clone(),
                        index: index.name.clone(),
                    });
                }
                let after = current.clone().with_index(index.clone());
                self.replace(position, &after)?;
                SchemaChange::AddIndex {
                    table: after,
                    index: index.clone(),
                }
            }

            SchemaEdit::RemoveIndex { table, index } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                let removed = current
                    .index(index)
                    .cloned()
                    .ok_or_else(|| UpgradeError::UnknownIndex {
                        table: current.name.clone(),
                        index: index.clone(),
                    })?;
                let after = current.clone().without_index(index);
                self.replace(position, &after)?;
                SchemaChange::RemoveIndex {
                    table: after,
                    index: removed,
                }
            }

            SchemaEdit::RenameIndex { table, from, to } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                let existing = current
                    .index(from)
                    .ok_or_else(|| UpgradeError::UnknownIndex {
                        table: current.name.clone(),
                        index: from.clone(),
                    })?;
                if current.index(to).is_some() {
                    return Err(UpgradeError::IndexExists {
                        table: current.name.clone(),
                        index: to.clone(),
                    });
                }
                let renamed = existing.renamed(to.as_str());
                let after = current.clone().without_index(from).with_index(renamed);
                self.replace(position, &after)?;
                SchemaChange::RenameIndex {
                    table: after,
                    from: from.clone(),
                    to: to.clone(),
                }
            }

            SchemaEdit::ChangePrimaryKey { table, columns } => {
                let position = self.position(table)?;
                let current = &self.tables[position];
                if let Some(missing) = columns.iter().find(|name| current.column(name).is_none()) {
                    return Err(UpgradeError::UnknownColumn {
                        table: current.name.clone(),
                        column: missing.clone(),
                    });
                }
                let from = current.primary_key();
                let mut after = current.clone();
                for column in &mut after.columns {
                    column.primary_key = columns.iter().any(|name| column.is_named(name));
                }

                // Key columns take over the key's slots in the requested order.
                let mut keyed: Vec<Column> = Vec::new();
                for name in columns {
                    if let Some(column) = after.column(name) {
                        if !keyed.iter().any(|k| k.is_named(&column.name)) {
                            keyed.push(column.clone());
                        }
                    }
                }
                let slots: Vec<usize> = after
                    .columns
                    .iter()
                    .enumerate()
                    .filter(|(_, column)| column.primary_key)
                    .map(|(slot, _)| slot)
                    .collect();
                for (slot, column) in slots.into_iter().zip(keyed) {
                    after.columns[slot] = column;
                }
                self.replace(position, &after)?;
                SchemaChange::ChangePrimaryKey {
                    to: after.primary_key(),
                    table: after,
                    from,
                }
            }

            SchemaEdit::RemoveView { view: name } => {
                let position = self
                    .views
                    .iter()
                    .position(|v| v.eq_ignore_ascii_case(name))
                    .ok_or_else(|| UpgradeError::UnknownView(name.clone()))?;
                SchemaChange::RemoveView {
                    view: view(self.views.remove(position)),
                }
            }
        };

        Ok(change)
    }
}
