//! Table and view metadata.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Column, Index};
use crate::ast::SelectStatement;
use crate::error::{DialectError, Result};

/// Metadata for a table.
///
/// Columns and indexes keep their declaration order for rendering, but
/// equality treats them as name-keyed sets. The primary key is the
/// declaration-ordered list of primary-key columns and its order is
/// significant for equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Indexes in declaration order.
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// Whether the table is a session temporary table.
    #[serde(default)]
    pub temporary: bool,
}

/// Creates an empty, permanent table.
#[must_use]
pub fn table(name: impl Into<String>) -> Table {
    Table {
        name: name.into(),
        columns: Vec::new(),
        indexes: Vec::new(),
        temporary: false,
    }
}

impl Table {
    /// Sets the columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Sets the indexes.
    #[must_use]
    pub fn indexes(mut self, indexes: impl IntoIterator<Item = Index>) -> Self {
        self.indexes = indexes.into_iter().collect();
        self
    }

    /// Marks the table as temporary.
    #[must_use]
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// Renames the table.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Replaces the column named `name` (ignoring case) in place, renaming
    /// index references if the replacement has a different name.
    #[must_use]
    pub fn with_column_replaced(mut self, name: &str, column: Column) -> Self {
        if !column.is_named(name) {
            self.indexes = self
                .indexes
                .into_iter()
                .map(|index| index.with_column_renamed(name, &column.name))
                .collect();
        }
        if let Some(slot) = self.columns.iter_mut().find(|c| c.is_named(name)) {
            *slot = column;
        }
        self
    }

    /// Removes the column named `name` (ignoring case).
    #[must_use]
    pub fn without_column(mut self, name: &str) -> Self {
        self.columns.retain(|c| !c.is_named(name));
        self
    }

    /// Appends an index.
    #[must_use]
    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Removes the index named `name` (ignoring case).
    #[must_use]
    pub fn without_index(mut self, name: &str) -> Self {
        self.indexes.retain(|i| !i.name.eq_ignore_ascii_case(name));
        self
    }

    /// Looks up a column by name, ignoring case.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_named(name))
    }

    /// Looks up an index by exact name.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Names of the primary-key columns, in declaration order.
    #[must_use]
    pub fn primary_key(&self) -> Vec<String> {
        names_of_columns(primary_keys_for_table(self))
    }

    /// Checks the table invariants.
    ///
    /// # Errors
    ///
    /// Fails on a blank name, on duplicate column names and on index columns
    /// missing from the table.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DialectError::BlankTableName);
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.to_ascii_lowercase()) {
                return Err(DialectError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        for index in &self.indexes {
            if let Some(missing) = index
                .columns
                .iter()
                .find(|name| !seen.contains(&name.to_ascii_lowercase()))
            {
                return Err(DialectError::UnknownIndexColumn {
                    table: self.name.clone(),
                    index: index.name.clone(),
                    column: missing.clone(),
                });
            }
        }

        Ok(())
    }

    fn sorted_columns(&self) -> Vec<(String, &Column)> {
        let mut columns: Vec<_> = self
            .columns
            .iter()
            .map(|c| (c.name.to_ascii_lowercase(), c))
            .collect();
        columns.sort_by(|a, b| a.0.cmp(&b.0));
        columns
    }

    fn sorted_indexes(&self) -> Vec<&Index> {
        let mut indexes: Vec<_> = self.indexes.iter().collect();
        indexes.sort_by(|a, b| a.name.cmp(&b.name));
        indexes
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.temporary == other.temporary
            && self.primary_key() == other.primary_key()
            && self.sorted_columns() == other.sorted_columns()
            && self.sorted_indexes() == other.sorted_indexes()
    }
}

impl Eq for Table {}

impl Hash for Table {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.temporary.hash(state);
        self.primary_key().hash(state);
        self.sorted_columns().hash(state);
        self.sorted_indexes().hash(state);
    }
}

/// Metadata for a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct View {
    /// View name.
    pub name: String,
    /// The defining query, when known.
    pub select: Option<SelectStatement>,
}

/// Creates a view with no known definition.
#[must_use]
pub fn view(name: impl Into<String>) -> View {
    View {
        name: name.into(),
        select: None,
    }
}

impl View {
    /// Sets the defining query.
    #[must_use]
    pub fn as_select(mut self, select: SelectStatement) -> Self {
        self.select = Some(select);
        self
    }
}

/// The primary-key columns of a table, in declaration order.
#[must_use]
pub fn primary_keys_for_table(table: &Table) -> Vec<&Column> {
    table.columns.iter().filter(|c| c.primary_key).collect()
}

/// The names of the given columns.
#[must_use]
pub fn names_of_columns<'a>(columns: impl IntoIterator<Item = &'a Column>) -> Vec<String> {
    columns.into_iter().map(|c| c.name.clone()).collect()
}

/// The indexes of `table` covering any of the named columns.
#[must_use]
pub fn indexes_referencing_column<'a>(table: &'a Table, names: &[&str]) -> Vec<&'a Index> {
    table
        .indexes
        .iter()
        .filter(|index| names.iter().any(|name| index.references_column(name)))
        .collect()
}
