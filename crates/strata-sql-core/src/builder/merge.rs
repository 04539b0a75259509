//! MERGE statement builder using the typestate pattern.
//!
//! `build()` only exists once both the target table and the source select
//! have been given.

use std::marker::PhantomData;

use crate::ast::{Expr, MergeStatement, SelectStatement, TableReference};

// Typestate markers

/// Marker: No target table specified yet.
#[derive(Debug, Clone, Copy)]
pub struct NoTable;
/// Marker: Target table has been specified.
#[derive(Debug, Clone, Copy)]
pub struct HasTable;
/// Marker: No source select specified yet.
#[derive(Debug, Clone, Copy)]
pub struct NoSource;
/// Marker: Source select has been specified.
#[derive(Debug, Clone, Copy)]
pub struct HasSource;

/// A type-safe MERGE builder.
#[derive(Debug, Clone)]
pub struct MergeBuilder<Table, Source> {
    table: Option<TableReference>,
    source: Option<SelectStatement>,
    table_unique_key: Vec<Expr>,
    _state: PhantomData<(Table, Source)>,
}

/// Starts a MERGE statement.
#[must_use]
pub fn merge() -> MergeBuilder<NoTable, NoSource> {
    MergeBuilder::new()
}

impl MergeBuilder<NoTable, NoSource> {
    /// Creates a new MERGE builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: None,
            source: None,
            table_unique_key: Vec::new(),
            _state: PhantomData,
        }
    }
}

impl Default for MergeBuilder<NoTable, NoSource> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoTable -> HasTable
impl<Source> MergeBuilder<NoTable, Source> {
    /// Specifies the table to merge into.
    #[must_use]
    pub fn into_table(self, table: TableReference) -> MergeBuilder<HasTable, Source> {
        MergeBuilder {
            table: Some(table),
            source: self.source,
            table_unique_key: self.table_unique_key,
            _state: PhantomData,
        }
    }
}

// Transition: NoSource -> HasSource
impl<Table> MergeBuilder<Table, NoSource> {
    /// Specifies the rows to merge.
    #[must_use]
    pub fn from(self, source: SelectStatement) -> MergeBuilder<Table, HasSource> {
        MergeBuilder {
            table: self.table,
            source: Some(source),
            table_unique_key: self.table_unique_key,
            _state: PhantomData,
        }
    }
}

impl<Table, Source> MergeBuilder<Table, Source> {
    /// Sets the fields identifying an existing row.
    #[must_use]
    pub fn table_unique_key(mut self, fields: impl IntoIterator<Item = Expr>) -> Self {
        self.table_unique_key = fields.into_iter().collect();
        self
    }
}

impl MergeBuilder<HasTable, HasSource> {
    /// Builds the statement.
    #[must_use]
    pub fn build(self) -> MergeStatement {
        // Both options are set by the typestate transitions.
        MergeStatement {
            table: self.table.unwrap_or_else(|| TableReference::new("")),
            source: self.source.unwrap_or_default(),
            table_unique_key: self.table_unique_key,
        }
    }
}
