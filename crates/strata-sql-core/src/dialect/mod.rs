//! SQL Dialect support.
//!
//! [`SqlDialect`] turns metadata, schema changes and statements into SQL text.
//! Every method has an ANSI default implemented by a free function in
//! [`ansi`]. Those functions call back through the trait, so a vendor dialect
//! overrides a hook once and every statement built from it picks the change
//! up, including nested expressions.
//!
//! ```rust
//! use strata_sql_core::dialect::{AnsiDialect, SqlDialect};
//! use strata_sql_core::metadata::{column, table, DataType};
//!
//! let dialect = AnsiDialect::default();
//! let currency = table("Currency").columns([
//!     column("code", DataType::String).width(3).primary_key(),
//!     column("name", DataType::String).width(20).nullable(),
//! ]);
//!
//! let statements = dialect.table_deployment_statements(&currency).unwrap();
//! assert_eq!(
//!     statements,
//!     vec![
//!         "CREATE TABLE Currency (code VARCHAR(3) NOT NULL, name VARCHAR(20), \
//!          CONSTRAINT Currency_PK PRIMARY KEY (code))"
//!     ]
//! );
//! ```

pub mod ansi;
mod config;
mod temporary;

use std::fmt;

pub use ansi::AnsiDialect;
pub use config::DialectConfig;
pub use temporary::TemporaryTables;

use crate::ast::{
    Criterion, DeleteStatement, Expr, InsertStatement, Literal, MergeStatement, OrderBy,
    SchemaChange, SelectStatement, Statement, TableReference, UpdateStatement,
};
use crate::error::Result;
use crate::metadata::{Column, DataType, Index, Table, View};

/// Which name an index rename found on the table it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRenameDirection {
    /// The table already carries the new name.
    AfterRename,
    /// The table still carries the old name.
    BeforeRename,
}

impl fmt::Display for IndexRenameDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AfterRename => write!(f, "after-rename"),
            Self::BeforeRename => write!(f, "before-rename"),
        }
    }
}

/// A table holding the next value of each autonumber series, one row per
/// series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTable {
    /// Table name.
    pub name: String,
    /// Column holding the series name.
    pub name_column: String,
    /// Column holding the next value.
    pub value_column: String,
}

impl IdTable {
    /// Creates an id table description.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        name_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            name_column: name_column.into(),
            value_column: value_column.into(),
        }
    }
}

/// Trait for dialect-specific SQL generation.
///
/// Only [`SqlDialect::name`], [`SqlDialect::config`] and
/// [`SqlDialect::temporary_tables`] are required. Everything else defaults to
/// ANSI SQL.
pub trait SqlDialect {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the dialect configuration.
    fn config(&self) -> &DialectConfig;

    /// Returns the temporary tables deployed through this dialect.
    fn temporary_tables(&self) -> &TemporaryTables;

    // Naming

    /// The schema prefix (`"schema."`) for objects of the configured schema.
    fn schema_name_prefix(&self) -> String {
        ansi::schema_name_prefix(self)
    }

    /// The schema prefix used when qualifying `table` in DDL.
    fn schema_name_prefix_for_table(&self, table: &Table) -> String {
        ansi::schema_name_prefix_for_table(self, table)
    }

    /// The schema prefix used when referencing a table from a statement.
    /// Registered temporary tables get no prefix.
    fn schema_name_prefix_for_reference(&self, table: &TableReference) -> String {
        ansi::schema_name_prefix_for_reference(self, table)
    }

    /// The schema-qualified name of `table`.
    fn qualified_table_name(&self, table: &Table) -> String {
        ansi::qualified_table_name(self, table)
    }

    /// The physical name for a temporary table called `name`.
    fn decorate_temporary_table_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// The name of the sequence backing an autonumbered column.
    fn autonumber_sequence_name(&self, table: &Table, column: &Column) -> String {
        ansi::autonumber_sequence_name(self, table, column)
    }

    // Table deployment and removal

    /// Sequences, then the table, then its indexes.
    ///
    /// # Errors
    ///
    /// Fails if the table is invalid or a column type cannot be mapped.
    fn table_deployment_statements(&self, table: &Table) -> Result<Vec<String>> {
        ansi::table_deployment_statements(self, table)
    }

    /// Index drops, then sequence drops, then the table drop.
    ///
    /// # Errors
    ///
    /// Fails if the table name is blank.
    fn drop_statements(&self, table: &Table) -> Result<Vec<String>> {
        ansi::drop_statements(self, table)
    }

    /// Drops a view.
    ///
    /// # Errors
    ///
    /// Fails if the view name is blank.
    fn drop_view_statements(&self, view: &View) -> Result<Vec<String>> {
        ansi::drop_view_statements(self, view)
    }

    /// Removes every row with TRUNCATE.
    ///
    /// # Errors
    ///
    /// Fails if the table name is blank.
    fn truncate_table_statements(&self, table: &Table) -> Result<Vec<String>> {
        ansi::truncate_table_statements(self, table)
    }

    /// Removes every row with DELETE.
    ///
    /// # Errors
    ///
    /// Fails if the table name is blank.
    fn delete_all_from_table_statements(&self, table: &Table) -> Result<Vec<String>> {
        ansi::delete_all_from_table_statements(self, table)
    }

    // Columns

    /// Adds `column` to `table`, which already includes it.
    ///
    /// # Errors
    ///
    /// Fails if the table is invalid or the column type cannot be mapped.
    fn alter_table_add_column_statements(
        &self,
        table: &Table,
        column: &Column,
    ) -> Result<Vec<String>> {
        ansi::alter_table_add_column_statements(self, table, column)
    }

    /// Changes `from` into `to` on `table`, which already includes `to`.
    ///
    /// # Errors
    ///
    /// Fails if the table is invalid or the column type cannot be mapped.
    fn alter_table_change_column_statements(
        &self,
        table: &Table,
        from: &Column,
        to: &Column,
    ) -> Result<Vec<String>> {
        ansi::alter_table_change_column_statements(self, table, from, to)
    }

    /// Drops `column` from `table`, which no longer includes it.
    ///
    /// # Errors
    ///
    /// Fails if the table is invalid.
    fn alter_table_drop_column_statements(
        &self,
        table: &Table,
        column: &Column,
    ) -> Result<Vec<String>> {
        ansi::alter_table_drop_column_statements(self, table, column)
    }

    /// The SQL type for a column of the given type, width and scale.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::DialectError::UnmappedDataType`] for
    /// [`DataType::Null`].
    fn column_representation(&self, data_type: DataType, width: u32, scale: u32) -> Result<String> {
        ansi::column_representation(self, data_type, width, scale)
    }

    /// Renames a column.
    fn rename_column_statement(&self, table: &Table, from: &str, to: &str) -> String {
        ansi::rename_column_statement(self, table, from, to)
    }

    /// Changes a column's type, width or scale.
    ///
    /// # Errors
    ///
    /// Fails if the column type cannot be mapped.
    fn alter_column_type_statement(&self, table: &Table, column: &Column) -> Result<String> {
        ansi::alter_column_type_statement(self, table, column)
    }

    /// Changes a column's nullability and default value.
    ///
    /// # Errors
    ///
    /// Fails if the default value cannot be rendered.
    fn alter_column_nullability_statements(
        &self,
        table: &Table,
        from: &Column,
        to: &Column,
    ) -> Result<Vec<String>> {
        ansi::alter_column_nullability_statements(self, table, from, to)
    }

    // Autonumbering

    /// Creates the sequence behind an autonumbered column.
    fn create_sequence_statements(&self, table: &Table, column: &Column) -> Vec<String> {
        ansi::create_sequence_statements(self, table, column)
    }

    /// Drops the sequence behind an autonumbered column.
    fn drop_sequence_statements(&self, table: &Table, column: &Column) -> Vec<String> {
        ansi::drop_sequence_statements(self, table, column)
    }

    /// The clause appended to an autonumbered column's definition.
    fn autonumber_column_clause(&self, table: &Table, column: &Column) -> String {
        ansi::autonumber_column_clause(self, table, column)
    }

    /// Raises the id table's entry for `data_table` to one past the highest
    /// value in `column`. Tables whose series is `autonumber` are skipped.
    ///
    /// # Errors
    ///
    /// Fails on a blank table name.
    fn autonumber_update_statements(
        &self,
        data_table: &TableReference,
        column: &str,
        id_table: &IdTable,
    ) -> Result<Vec<String>> {
        ansi::autonumber_update_statements(self, data_table, column, id_table)
    }

    // Primary keys

    /// The primary-key clause of a CREATE TABLE.
    fn primary_key_constraint_clause(&self, table: &Table, columns: &[String]) -> String {
        ansi::primary_key_constraint_clause(self, table, columns)
    }

    /// Drops the primary-key constraint of `table`.
    fn drop_primary_key_constraint_statement(&self, table: &Table) -> String {
        ansi::drop_primary_key_constraint_statement(self, table)
    }

    /// Adds a primary-key constraint on `columns`.
    fn add_primary_key_constraint_statement(&self, table: &Table, columns: &[String]) -> String {
        ansi::add_primary_key_constraint_statement(self, table, columns)
    }

    /// Replaces the primary key: drop the old constraint, then add the new
    /// one. Empty keys emit nothing.
    ///
    /// # Errors
    ///
    /// Fails if the table name is blank.
    fn change_primary_key_columns(
        &self,
        table: &Table,
        from: &[String],
        to: &[String],
    ) -> Result<Vec<String>> {
        ansi::change_primary_key_columns(self, table, from, to)
    }

    /// Renames a table, rebuilding its primary-key constraint.
    ///
    /// # Errors
    ///
    /// Fails if either table name is blank.
    fn rename_table_statements(&self, from: &Table, to: &Table) -> Result<Vec<String>> {
        ansi::rename_table_statements(self, from, to)
    }

    // Indexes

    /// Creates an index.
    fn index_deployment_statement(&self, table: &Table, index: &Index) -> String {
        ansi::index_deployment_statement(self, table, index)
    }

    /// Adds an index to an existing table.
    fn add_index_statements(&self, table: &Table, index: &Index) -> Vec<String> {
        ansi::add_index_statements(self, table, index)
    }

    /// Drops an index.
    fn index_drop_statements(&self, table: &Table, index: &Index) -> Vec<String> {
        ansi::index_drop_statements(self, table, index)
    }

    /// Index drops emitted ahead of a table drop.
    fn table_drop_index_statements(&self, table: &Table, index: &Index) -> Vec<String> {
        ansi::table_drop_index_statements(self, table, index)
    }

    /// Renames an index by dropping it and creating it under the new name.
    /// `table` may carry the index under either name.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::DialectError::IndexNotFound`] if neither name is
    /// present.
    fn rename_index_statements(&self, table: &Table, from: &str, to: &str) -> Result<Vec<String>> {
        ansi::rename_index_statements(self, table, from, to)
    }

    /// Dispatches a schema change to the matching operation.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    fn schema_change_statements(&self, change: &SchemaChange) -> Result<Vec<String>> {
        ansi::schema_change_statements(self, change)
    }

    // Statements and expressions

    /// Escapes a string for use inside a single-quoted literal.
    fn escape_sql(&self, value: &str) -> String {
        ansi::escape_sql(value)
    }

    /// Renders a literal.
    ///
    /// # Errors
    ///
    /// Fails if the dialect cannot express the literal.
    fn render_literal(&self, literal: &Literal) -> Result<String> {
        ansi::render_literal(self, literal)
    }

    /// Renders an expression. Aliases are not rendered here.
    ///
    /// # Errors
    ///
    /// Fails on a function with the wrong number of arguments or one the
    /// dialect cannot express.
    fn render_expr(&self, expr: &Expr) -> Result<String> {
        ansi::render_expr(self, expr)
    }

    /// Renders a criterion.
    ///
    /// # Errors
    ///
    /// Propagates expression rendering errors.
    fn render_criterion(&self, criterion: &Criterion) -> Result<String> {
        ansi::render_criterion(self, criterion)
    }

    /// Renders an ORDER BY entry.
    ///
    /// # Errors
    ///
    /// Propagates expression rendering errors.
    fn render_order_by(&self, order_by: &OrderBy) -> Result<String> {
        ansi::render_order_by(self, order_by)
    }

    /// Renders a SELECT.
    ///
    /// # Errors
    ///
    /// Fails on a blank table name or an expression that cannot be rendered.
    fn render_select(&self, statement: &SelectStatement) -> Result<String> {
        ansi::render_select(self, statement)
    }

    /// Renders a MERGE.
    ///
    /// # Errors
    ///
    /// Fails on a blank table name or a field without an implied name.
    fn render_merge(&self, statement: &MergeStatement) -> Result<String> {
        ansi::render_merge(self, statement)
    }

    /// Renders an INSERT.
    ///
    /// # Errors
    ///
    /// Fails on a blank table name or an expression that cannot be rendered.
    fn render_insert(&self, statement: &InsertStatement) -> Result<String> {
        ansi::render_insert(self, statement)
    }

    /// Renders an UPDATE.
    ///
    /// # Errors
    ///
    /// Fails on a blank table name or an unnamed assignment.
    fn render_update(&self, statement: &UpdateStatement) -> Result<String> {
        ansi::render_update(self, statement)
    }

    /// Renders a DELETE.
    ///
    /// # Errors
    ///
    /// Fails on a blank table name or a criterion that cannot be rendered.
    fn render_delete(&self, statement: &DeleteStatement) -> Result<String> {
        ansi::render_delete(self, statement)
    }

    /// Renders any statement.
    ///
    /// # Errors
    ///
    /// Propagates the error of the statement-specific renderer.
    fn render_statement(&self, statement: &Statement) -> Result<String> {
        match statement {
            Statement::Select(s) => self.render_select(s),
            Statement::Merge(s) => self.render_merge(s),
            Statement::Insert(s) => self.render_insert(s),
            Statement::Update(s) => self.render_update(s),
            Statement::Delete(s) => self.render_delete(s),
        }
    }

    // Small syntax hooks

    /// Appended to LIKE criteria to declare the escape character.
    fn like_escape_suffix(&self) -> &'static str {
        " ESCAPE '\\'"
    }

    /// Appended to a SELECT without a FROM clause.
    fn from_dummy_table(&self) -> &'static str {
        ""
    }

    /// A cheap statement for checking a connection is alive.
    fn connection_test_statement(&self) -> &'static str {
        "SELECT 1"
    }
}
