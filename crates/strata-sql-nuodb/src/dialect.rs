//! NuoDB dialect implementation.

use strata_sql_core::ast::{Expr, Literal, MergeStatement, OrderBy, TableReference};
use strata_sql_core::dialect::{ansi, DialectConfig, IdTable, SqlDialect, TemporaryTables};
use strata_sql_core::error::{DialectError, Result};
use strata_sql_core::metadata::{Column, DataType, Index, Table, View};
use tracing::debug;

use crate::{expressions, merge};

/// Prefix given to temporary table names.
pub const TEMPORARY_TABLE_PREFIX: &str = "TEMP_";

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(DialectError::BlankTableName)
    } else {
        Ok(())
    }
}

/// NuoDB dialect.
#[derive(Debug, Default)]
pub struct NuoDbDialect {
    config: DialectConfig,
    temporary_tables: TemporaryTables,
}

impl NuoDbDialect {
    /// Creates a NuoDB dialect with the given configuration.
    #[must_use]
    pub const fn new(config: DialectConfig) -> Self {
        Self {
            config,
            temporary_tables: TemporaryTables::new(),
        }
    }

    fn alter_column_prefix(&self, table: &Table, column: &Column) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {}",
            self.qualified_table_name(table),
            column.name
        )
    }

    fn optional_drop_index_statement(&self, table: &Table, index: &Index) -> String {
        format!(
            "DROP INDEX IF EXISTS {}{}",
            self.schema_name_prefix_for_table(table),
            index.name
        )
    }
}

impl SqlDialect for NuoDbDialect {
    fn name(&self) -> &'static str {
        "NuoDB"
    }

    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn temporary_tables(&self) -> &TemporaryTables {
        &self.temporary_tables
    }

    // Naming

    fn schema_name_prefix_for_table(&self, table: &Table) -> String {
        if table.temporary {
            String::new()
        } else {
            self.schema_name_prefix().to_uppercase()
        }
    }

    fn schema_name_prefix_for_reference(&self, table: &TableReference) -> String {
        match table.schema.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(schema) => format!("{}.", schema.to_uppercase()),
            None => ansi::schema_name_prefix_for_reference(self, table),
        }
    }

    fn decorate_temporary_table_name(&self, name: &str) -> String {
        format!("{TEMPORARY_TABLE_PREFIX}{name}")
    }

    fn autonumber_sequence_name(&self, table: &Table, column: &Column) -> String {
        format!(
            "{}_IDS_{}",
            table.name,
            column.effective_auto_number_start()
        )
    }

    // Table deployment and removal

    fn drop_view_statements(&self, view: &View) -> Result<Vec<String>> {
        check_name(&view.name)?;
        Ok(vec![format!(
            "DROP VIEW {}{} IF EXISTS CASCADE",
            self.schema_name_prefix(),
            view.name
        )])
    }

    fn truncate_table_statements(&self, table: &Table) -> Result<Vec<String>> {
        check_name(&table.name)?;
        Ok(vec![format!(
            "truncate table {}",
            self.qualified_table_name(table)
        )])
    }

    fn delete_all_from_table_statements(&self, table: &Table) -> Result<Vec<String>> {
        check_name(&table.name)?;
        Ok(vec![format!("delete from {}", self.qualified_table_name(table))])
    }

    // Columns

    fn alter_table_add_column_statements(
        &self,
        table: &Table,
        column: &Column,
    ) -> Result<Vec<String>> {
        let mut statements = ansi::alter_table_add_column_statements(self, table, column)?;

        // Existing rows of a nullable column are not filled by DEFAULT.
        if column.nullable {
            if let Some(default) = ansi::default_value_sql(self, table, column)? {
                debug!(table = %table.name, column = %column.name, "Back-filling new column");
                statements.push(format!(
                    "UPDATE {} SET {} = {default}",
                    self.qualified_table_name(table),
                    column.name
                ));
            }
        }
        Ok(statements)
    }

    fn column_representation(&self, data_type: DataType, width: u32, scale: u32) -> Result<String> {
        match data_type {
            DataType::Clob => Ok("NCLOB".to_string()),
            other => ansi::column_representation(self, other, width, scale),
        }
    }

    fn alter_column_type_statement(&self, table: &Table, column: &Column) -> Result<String> {
        Ok(format!(
            "{} TYPE {}",
            self.alter_column_prefix(table, column),
            self.column_representation(column.data_type, column.width, column.scale)?
        ))
    }

    /// NuoDB only applies a DEFAULT to existing rows of a NOT NULL column, so
    /// a new default goes in as `NOT NULL DEFAULT v` and the column is made
    /// nullable again afterwards if it should be. Making a column without a
    /// default NOT NULL goes through a temporary `DEFAULT 0`.
    fn alter_column_nullability_statements(
        &self,
        table: &Table,
        from: &Column,
        to: &Column,
    ) -> Result<Vec<String>> {
        let prefix = self.alter_column_prefix(table, to);
        let default_changed = from.non_blank_default() != to.non_blank_default();
        let nullability_changed = from.nullable != to.nullable;
        let nullability = if to.nullable { "NULL" } else { "NOT NULL" };

        let mut statements = Vec::new();
        match ansi::default_value_sql(self, table, to)? {
            Some(default) if default_changed || (nullability_changed && !to.nullable) => {
                statements.push(format!("{prefix} NOT NULL DEFAULT {default}"));
                if to.nullable {
                    statements.push(format!("{prefix} NULL"));
                }
            }
            Some(_) if nullability_changed => statements.push(format!("{prefix} NULL")),
            None if default_changed => {
                statements.push(format!("{prefix} DROP DEFAULT"));
                statements.push(format!("{prefix} {nullability}"));
            }
            None if nullability_changed => {
                if to.nullable {
                    statements.push(format!("{prefix} NULL"));
                } else {
                    statements.push(format!("{prefix} NOT NULL DEFAULT 0"));
                    statements.push(format!("{prefix} DROP DEFAULT"));
                }
            }
            _ => {}
        }
        Ok(statements)
    }

    // Autonumbering

    fn create_sequence_statements(&self, table: &Table, column: &Column) -> Vec<String> {
        let sequence = format!(
            "{}{}",
            self.schema_name_prefix(),
            self.autonumber_sequence_name(table, column)
        );
        vec![
            format!("DROP SEQUENCE IF EXISTS {sequence}"),
            format!(
                "CREATE SEQUENCE {sequence} START WITH {}",
                column.effective_auto_number_start()
            ),
        ]
    }

    fn drop_sequence_statements(&self, table: &Table, column: &Column) -> Vec<String> {
        vec![format!(
            "DROP SEQUENCE IF EXISTS {}{}",
            self.schema_name_prefix(),
            self.autonumber_sequence_name(table, column)
        )]
    }

    fn autonumber_column_clause(&self, table: &Table, column: &Column) -> String {
        format!(
            "GENERATED BY DEFAULT AS IDENTITY({})",
            self.autonumber_sequence_name(table, column)
        )
    }

    fn autonumber_update_statements(
        &self,
        data_table: &TableReference,
        column: &str,
        id_table: &IdTable,
    ) -> Result<Vec<String>> {
        check_name(&data_table.name)?;
        check_name(&id_table.name)?;

        let series = ansi::autonumber_name(&data_table.name);
        if series == "autonumber" {
            return Ok(Vec::new());
        }
        let existing = ansi::existing_max_autonumber_value(self, data_table, column)?;
        let IdTable {
            name,
            name_column,
            value_column,
        } = id_table;

        Ok(vec![format!(
            "INSERT INTO {}{name} ({name_column}, {value_column}) VALUES('{}', ({existing})) \
             ON DUPLICATE KEY UPDATE {value_column} = GREATEST({value_column}, VALUES({value_column}))",
            self.schema_name_prefix(),
            self.escape_sql(series)
        )])
    }

    // Primary keys

    fn primary_key_constraint_clause(&self, _table: &Table, columns: &[String]) -> String {
        format!("PRIMARY KEY ({})", columns.join(", "))
    }

    fn drop_primary_key_constraint_statement(&self, table: &Table) -> String {
        format!(
            "DROP INDEX IF EXISTS {}\"{}..PRIMARY_KEY\"",
            self.schema_name_prefix_for_table(table),
            table.name.to_uppercase()
        )
    }

    fn add_primary_key_constraint_statement(&self, table: &Table, columns: &[String]) -> String {
        format!(
            "ALTER TABLE {} ADD PRIMARY KEY ({})",
            self.qualified_table_name(table),
            columns.join(", ")
        )
    }

    // Indexes

    /// The index name is never qualified: it lives in the table's schema.
    fn index_deployment_statement(&self, table: &Table, index: &Index) -> String {
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            if index.unique { "UNIQUE " } else { "" },
            index.name,
            self.qualified_table_name(table),
            index.columns.join(",")
        )
    }

    fn add_index_statements(&self, table: &Table, index: &Index) -> Vec<String> {
        vec![
            self.optional_drop_index_statement(table, index),
            self.index_deployment_statement(table, index),
        ]
    }

    fn table_drop_index_statements(&self, table: &Table, index: &Index) -> Vec<String> {
        vec![self.optional_drop_index_statement(table, index)]
    }

    // Statements and expressions

    fn escape_sql(&self, value: &str) -> String {
        expressions::escape_sql(value)
    }

    fn render_literal(&self, literal: &Literal) -> Result<String> {
        expressions::render_literal(self, literal)
    }

    fn render_expr(&self, expr: &Expr) -> Result<String> {
        expressions::render_expr(self, expr)
    }

    fn render_order_by(&self, order_by: &OrderBy) -> Result<String> {
        expressions::render_order_by(self, order_by)
    }

    fn render_merge(&self, statement: &MergeStatement) -> Result<String> {
        merge::render_merge(self, statement)
    }

    // Small syntax hooks

    fn like_escape_suffix(&self) -> &'static str {
        ""
    }

    fn from_dummy_table(&self) -> &'static str {
        " FROM dual"
    }

    fn connection_test_statement(&self) -> &'static str {
        "select 1 from dual"
    }
}
