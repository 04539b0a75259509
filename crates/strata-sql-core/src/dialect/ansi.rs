//! ANSI SQL rendering.
//!
//! Each function here is the default body of the [`SqlDialect`] method of the
//! same name. They are generic over the dialect and call back through the
//! trait for every sub-part, so a vendor that overrides, say,
//! [`SqlDialect::render_literal`] sees its literals inside selects, merges
//! and column defaults too. Vendor overrides call these functions to fall
//! back to the standard rendering.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{DialectConfig, IdTable, IndexRenameDirection, SqlDialect, TemporaryTables};
use crate::ast::{
    Criterion, DeleteStatement, Expr, FieldReference, Function, FunctionKind, InsertSource,
    InsertStatement, Literal, MergeStatement, OrderBy, SchemaChange, SelectStatement,
    TableReference, UpdateStatement,
};
use crate::builder::{coalesce, field, literal, max, plus, select};
use crate::error::{DialectError, Result};
use crate::metadata::{indexes_referencing_column, Column, DataType, Index, Table, View};

/// Alias of the source rows in a rendered MERGE.
pub const MERGE_SOURCE_ALIAS: &str = "xmergesource";

/// The ANSI SQL dialect.
#[derive(Debug, Default)]
pub struct AnsiDialect {
    config: DialectConfig,
    temporary_tables: TemporaryTables,
}

impl AnsiDialect {
    /// Creates an ANSI dialect with the given configuration.
    #[must_use]
    pub const fn new(config: DialectConfig) -> Self {
        Self {
            config,
            temporary_tables: TemporaryTables::new(),
        }
    }
}

impl SqlDialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ANSI"
    }

    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn temporary_tables(&self) -> &TemporaryTables {
        &self.temporary_tables
    }
}

fn check_table_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(DialectError::BlankTableName)
    } else {
        Ok(())
    }
}

// Naming

/// `"schema."` for the configured schema, or empty.
pub fn schema_name_prefix<D: SqlDialect + ?Sized>(dialect: &D) -> String {
    dialect
        .config()
        .schema_name()
        .map_or_else(String::new, |schema| format!("{schema}."))
}

/// The configured schema prefix.
pub fn schema_name_prefix_for_table<D: SqlDialect + ?Sized>(dialect: &D, _table: &Table) -> String {
    dialect.schema_name_prefix()
}

/// The reference's own schema, nothing for registered temporary tables, and
/// the configured schema otherwise.
pub fn schema_name_prefix_for_reference<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &TableReference,
) -> String {
    match table.schema.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(schema) => format!("{schema}."),
        None if dialect.temporary_tables().contains(&table.name) => String::new(),
        None => dialect.schema_name_prefix(),
    }
}

/// `prefix` + table name.
pub fn qualified_table_name<D: SqlDialect + ?Sized>(dialect: &D, table: &Table) -> String {
    format!("{}{}", dialect.schema_name_prefix_for_table(table), table.name)
}

/// `<table>_<column>_SEQ`.
pub fn autonumber_sequence_name<D: SqlDialect + ?Sized>(
    _dialect: &D,
    table: &Table,
    column: &Column,
) -> String {
    format!("{}_{}_SEQ", table.name, column.name)
}

// Types and column definitions

/// Maps a data type onto an ANSI column type.
///
/// # Errors
///
/// [`DataType::Null`] has no column type.
pub fn column_representation<D: SqlDialect + ?Sized>(
    _dialect: &D,
    data_type: DataType,
    width: u32,
    scale: u32,
) -> Result<String> {
    Ok(match data_type {
        DataType::String => format!("VARCHAR({width})"),
        DataType::Decimal => format!("DECIMAL({width},{scale})"),
        DataType::Date => "DATE".to_string(),
        DataType::Boolean => "BOOLEAN".to_string(),
        DataType::Integer => "INTEGER".to_string(),
        DataType::BigInteger => "BIGINT".to_string(),
        DataType::Blob => "BLOB".to_string(),
        DataType::Clob => "CLOB".to_string(),
        DataType::Null => return Err(DialectError::UnmappedDataType(data_type)),
    })
}

/// The column's default value as a literal of the column's type.
///
/// Dates that do not parse stay quoted strings.
///
/// # Errors
///
/// [`DialectError::InvalidDefault`] for a numeric default that is not a
/// number and a boolean default that is not one of `true`/`false`, `1`/`0`
/// or `y`/`n`.
pub fn default_value_literal(table: &Table, column: &Column) -> Result<Option<Literal>> {
    let Some(value) = column.non_blank_default() else {
        return Ok(None);
    };
    let invalid = || DialectError::InvalidDefault {
        table: table.name.clone(),
        column: column.name.clone(),
        value: value.to_string(),
    };
    Ok(Some(match column.data_type {
        DataType::Integer | DataType::BigInteger => match value.parse() {
            Ok(integer) => Literal::Integer(integer),
            Err(_) => Literal::decimal(value).map_err(|_| invalid())?,
        },
        DataType::Decimal => Literal::decimal(value).map_err(|_| invalid())?,
        DataType::Boolean => match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "y" => Literal::Boolean(true),
            "false" | "0" | "n" => Literal::Boolean(false),
            _ => return Err(invalid()),
        },
        DataType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_or_else(|_| Literal::String(value.to_string()), Literal::Date),
        DataType::String | DataType::Clob | DataType::Blob | DataType::Null => {
            Literal::String(value.to_string())
        }
    }))
}

/// The rendered default value of `column`, if it has one.
///
/// # Errors
///
/// Fails if the default does not fit the column type.
pub fn default_value_sql<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Result<Option<String>> {
    default_value_literal(table, column)?
        .map(|literal| dialect.render_literal(&literal))
        .transpose()
}

/// `name TYPE [DEFAULT v] [NOT NULL] [autonumber clause]`.
///
/// # Errors
///
/// Fails if the column type cannot be mapped.
pub fn column_definition<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Result<String> {
    let mut sql = format!(
        "{} {}",
        column.name,
        dialect.column_representation(column.data_type, column.width, column.scale)?
    );
    if !column.auto_numbered {
        if let Some(default) = default_value_sql(dialect, table, column)? {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default);
        }
    }
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    if column.auto_numbered {
        sql.push(' ');
        sql.push_str(&dialect.autonumber_column_clause(table, column));
    }
    Ok(sql)
}

// Table deployment and removal

/// `CREATE [TEMPORARY] TABLE name (columns[, primary key])`.
///
/// # Errors
///
/// Fails if a column type cannot be mapped.
pub fn create_table_statement<D: SqlDialect + ?Sized>(dialect: &D, table: &Table) -> Result<String> {
    let columns = table
        .columns
        .iter()
        .map(|column| column_definition(dialect, table, column))
        .collect::<Result<Vec<_>>>()?;

    let mut sql = String::from("CREATE ");
    if table.temporary {
        sql.push_str("TEMPORARY ");
    }
    sql.push_str("TABLE ");
    sql.push_str(&dialect.qualified_table_name(table));
    sql.push_str(" (");
    sql.push_str(&columns.join(", "));

    let primary_key = table.primary_key();
    if !primary_key.is_empty() {
        sql.push_str(", ");
        sql.push_str(&dialect.primary_key_constraint_clause(table, &primary_key));
    }

    sql.push(')');
    Ok(sql)
}

/// Sequences, then the table, then its indexes. Temporary tables are
/// registered once rendering succeeds.
///
/// # Errors
///
/// Fails if the table is invalid or a column type cannot be mapped.
pub fn table_deployment_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
) -> Result<Vec<String>> {
    table.validate()?;

    let mut statements = Vec::new();
    for column in table.columns.iter().filter(|c| c.auto_numbered) {
        statements.extend(dialect.create_sequence_statements(table, column));
    }
    statements.push(create_table_statement(dialect, table)?);
    for index in &table.indexes {
        statements.extend(dialect.add_index_statements(table, index));
    }

    if table.temporary {
        dialect.temporary_tables().register(&table.name);
    }

    debug!(
        dialect = dialect.name(),
        table = %table.name,
        statements = statements.len(),
        "Rendered table deployment"
    );
    Ok(statements)
}

/// Index drops, then sequence drops, then the table drop. Temporary tables
/// are unregistered.
///
/// # Errors
///
/// Fails if the table name is blank.
pub fn drop_statements<D: SqlDialect + ?Sized>(dialect: &D, table: &Table) -> Result<Vec<String>> {
    check_table_name(&table.name)?;

    let mut statements = Vec::new();
    for index in &table.indexes {
        statements.extend(dialect.table_drop_index_statements(table, index));
    }
    for column in table.columns.iter().filter(|c| c.auto_numbered) {
        statements.extend(dialect.drop_sequence_statements(table, column));
    }
    statements.push(format!("DROP TABLE {}", dialect.qualified_table_name(table)));

    if table.temporary {
        dialect.temporary_tables().unregister(&table.name);
    }

    debug!(
        dialect = dialect.name(),
        table = %table.name,
        statements = statements.len(),
        "Rendered table drop"
    );
    Ok(statements)
}

/// `DROP VIEW name`.
///
/// # Errors
///
/// Fails if the view name is blank.
pub fn drop_view_statements<D: SqlDialect + ?Sized>(dialect: &D, view: &View) -> Result<Vec<String>> {
    check_table_name(&view.name)?;
    Ok(vec![format!(
        "DROP VIEW {}{}",
        dialect.schema_name_prefix(),
        view.name
    )])
}

/// `TRUNCATE TABLE name`.
///
/// # Errors
///
/// Fails if the table name is blank.
pub fn truncate_table_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
) -> Result<Vec<String>> {
    check_table_name(&table.name)?;
    Ok(vec![format!(
        "TRUNCATE TABLE {}",
        dialect.qualified_table_name(table)
    )])
}

/// `DELETE FROM name`.
///
/// # Errors
///
/// Fails if the table name is blank.
pub fn delete_all_from_table_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
) -> Result<Vec<String>> {
    check_table_name(&table.name)?;
    Ok(vec![format!(
        "DELETE FROM {}",
        dialect.qualified_table_name(table)
    )])
}

// Columns

/// Adds a column. A new primary-key column rebuilds the primary-key
/// constraint around the ADD COLUMN.
///
/// # Errors
///
/// Fails if the table is invalid or the column type cannot be mapped.
pub fn alter_table_add_column_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Result<Vec<String>> {
    table.validate()?;

    let primary_key = table.primary_key();
    let existing_key = primary_key.iter().any(|name| !column.is_named(name));

    let mut statements = Vec::new();
    if column.primary_key && existing_key {
        statements.push(dialect.drop_primary_key_constraint_statement(table));
    }
    if column.auto_numbered {
        statements.extend(dialect.create_sequence_statements(table, column));
    }
    statements.push(format!(
        "ALTER TABLE {} ADD COLUMN {}",
        dialect.qualified_table_name(table),
        column_definition(dialect, table, column)?
    ));
    if column.primary_key && !primary_key.is_empty() {
        statements.push(dialect.add_primary_key_constraint_statement(table, &primary_key));
    }

    debug!(table = %table.name, column = %column.name, "Rendered add column");
    Ok(statements)
}

/// Changes a column.
///
/// Indexes on the old or new name are dropped first and recreated last. The
/// primary-key constraint is dropped if the column was or becomes part of an
/// existing key and is re-added only if the resulting key is non-empty. A
/// rename comes before any statement that uses the new name. Toggling
/// autonumbering drops the old column and adds the new one through
/// [`SqlDialect::alter_table_drop_column_statements`] and
/// [`SqlDialect::alter_table_add_column_statements`], losing its data.
///
/// # Errors
///
/// Fails if the table is invalid or the column type cannot be mapped.
pub fn alter_table_change_column_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    from: &Column,
    to: &Column,
) -> Result<Vec<String>> {
    table.validate()?;
    dialect.column_representation(to.data_type, to.width, to.scale)?;

    let indexes: Vec<Index> =
        indexes_referencing_column(table, &[from.name.as_str(), to.name.as_str()])
            .into_iter()
            .cloned()
            .collect();
    let primary_key = table.primary_key();
    let other_key_columns = primary_key.iter().any(|name| !to.is_named(name));

    let mut statements = Vec::new();
    for index in &indexes {
        statements.extend(dialect.index_drop_statements(table, index));
    }

    if from.primary_key || (to.primary_key && other_key_columns) {
        statements.push(dialect.drop_primary_key_constraint_statement(table));
    }

    if from.auto_numbered == to.auto_numbered {
        if from.name != to.name {
            statements.push(dialect.rename_column_statement(table, &from.name, &to.name));
        }
        if from.type_differs_from(to) {
            statements.push(dialect.alter_column_type_statement(table, to)?);
        }
        statements.extend(dialect.alter_column_nullability_statements(table, from, to)?);
    } else {
        warn!(
            table = %table.name,
            column = %to.name,
            "Autonumber change rendered as drop and re-add; existing values in the column are lost"
        );
        // The key is already handled around this block.
        let mut dropped = from.clone();
        dropped.primary_key = false;
        let mut added = to.clone();
        added.primary_key = false;
        statements.extend(dialect.alter_table_drop_column_statements(table, &dropped)?);
        statements.extend(dialect.alter_table_add_column_statements(table, &added)?);
    }

    if (from.primary_key || to.primary_key) && !primary_key.is_empty() {
        statements.push(dialect.add_primary_key_constraint_statement(table, &primary_key));
    }

    for index in &indexes {
        statements.push(dialect.index_deployment_statement(table, index));
    }

    debug!(
        table = %table.name,
        from = %from.name,
        to = %to.name,
        statements = statements.len(),
        "Rendered change column"
    );
    Ok(statements)
}

/// Drops a column. Dropping a primary-key column rebuilds the constraint on
/// the remaining key columns, if any.
///
/// # Errors
///
/// Fails if the table is invalid.
pub fn alter_table_drop_column_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Result<Vec<String>> {
    table.validate()?;

    let primary_key = table.primary_key();
    let mut statements = Vec::new();
    if column.primary_key {
        statements.push(dialect.drop_primary_key_constraint_statement(table));
    }
    statements.push(format!(
        "ALTER TABLE {} DROP COLUMN {}",
        dialect.qualified_table_name(table),
        column.name
    ));
    if column.auto_numbered {
        statements.extend(dialect.drop_sequence_statements(table, column));
    }
    if column.primary_key && !primary_key.is_empty() {
        statements.push(dialect.add_primary_key_constraint_statement(table, &primary_key));
    }

    debug!(table = %table.name, column = %column.name, "Rendered drop column");
    Ok(statements)
}

/// `ALTER TABLE t RENAME COLUMN a TO b`.
pub fn rename_column_statement<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    from: &str,
    to: &str,
) -> String {
    format!(
        "ALTER TABLE {} RENAME COLUMN {from} TO {to}",
        dialect.qualified_table_name(table)
    )
}

/// `ALTER TABLE t ALTER COLUMN c SET DATA TYPE type`.
///
/// # Errors
///
/// Fails if the column type cannot be mapped.
pub fn alter_column_type_statement<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} ALTER COLUMN {} SET DATA TYPE {}",
        dialect.qualified_table_name(table),
        column.name,
        dialect.column_representation(column.data_type, column.width, column.scale)?
    ))
}

/// SET/DROP DEFAULT when the default changes, then SET/DROP NOT NULL when
/// the nullability changes.
///
/// # Errors
///
/// Fails if the new default cannot be rendered.
pub fn alter_column_nullability_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    from: &Column,
    to: &Column,
) -> Result<Vec<String>> {
    let prefix = format!(
        "ALTER TABLE {} ALTER COLUMN {}",
        dialect.qualified_table_name(table),
        to.name
    );

    let mut statements = Vec::new();
    if from.non_blank_default() != to.non_blank_default() {
        statements.push(match default_value_sql(dialect, table, to)? {
            Some(default) => format!("{prefix} SET DEFAULT {default}"),
            None => format!("{prefix} DROP DEFAULT"),
        });
    }
    if from.nullable != to.nullable {
        let change = if to.nullable { "DROP NOT NULL" } else { "SET NOT NULL" };
        statements.push(format!("{prefix} {change}"));
    }
    Ok(statements)
}

// Autonumbering

/// `CREATE SEQUENCE name START WITH n`.
pub fn create_sequence_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Vec<String> {
    vec![format!(
        "CREATE SEQUENCE {}{} START WITH {}",
        dialect.schema_name_prefix(),
        dialect.autonumber_sequence_name(table, column),
        column.effective_auto_number_start()
    )]
}

/// `DROP SEQUENCE name`.
pub fn drop_sequence_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> Vec<String> {
    vec![format!(
        "DROP SEQUENCE {}{}",
        dialect.schema_name_prefix(),
        dialect.autonumber_sequence_name(table, column)
    )]
}

/// `DEFAULT NEXT VALUE FOR sequence`.
pub fn autonumber_column_clause<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    column: &Column,
) -> String {
    format!(
        "DEFAULT NEXT VALUE FOR {}{}",
        dialect.schema_name_prefix(),
        dialect.autonumber_sequence_name(table, column)
    )
}

/// The autonumber series of a table: its name up to the last underscore.
#[must_use]
pub fn autonumber_name(table_name: &str) -> &str {
    table_name
        .rfind('_')
        .map_or(table_name, |end| &table_name[..end])
}

/// `SELECT COALESCE(MAX(column) + 1, 1) AS CurrentValue FROM table`.
///
/// # Errors
///
/// Propagates select rendering errors.
pub fn existing_max_autonumber_value<D: SqlDialect + ?Sized>(
    dialect: &D,
    data_table: &TableReference,
    column: &str,
) -> Result<String> {
    let next = coalesce([plus(max(field(column)), literal(1)), literal(1)]).alias("CurrentValue");
    dialect.render_select(&select([next]).from(data_table.clone()))
}

/// A MERGE that inserts the series or raises its value, never lowering it.
///
/// # Errors
///
/// Fails on a blank table name.
pub fn autonumber_update_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    data_table: &TableReference,
    column: &str,
    id_table: &IdTable,
) -> Result<Vec<String>> {
    check_table_name(&data_table.name)?;
    check_table_name(&id_table.name)?;

    let series = autonumber_name(&data_table.name);
    if series == "autonumber" {
        return Ok(Vec::new());
    }
    let existing = existing_max_autonumber_value(dialect, data_table, column)?;
    let IdTable {
        name,
        name_column,
        value_column,
    } = id_table;

    Ok(vec![format!(
        "MERGE INTO {}{name} USING (SELECT '{}' AS {name_column}, ({existing}) AS {value_column}{}) \
         {MERGE_SOURCE_ALIAS} ON ({name}.{name_column} = {MERGE_SOURCE_ALIAS}.{name_column}) \
         WHEN MATCHED AND {MERGE_SOURCE_ALIAS}.{value_column} > {name}.{value_column} \
         THEN UPDATE SET {value_column} = {MERGE_SOURCE_ALIAS}.{value_column} \
         WHEN NOT MATCHED THEN INSERT ({name_column}, {value_column}) \
         VALUES ({MERGE_SOURCE_ALIAS}.{name_column}, {MERGE_SOURCE_ALIAS}.{value_column})",
        dialect.schema_name_prefix(),
        dialect.escape_sql(series),
        dialect.from_dummy_table()
    )])
}

// Primary keys

fn primary_key_constraint_name(table: &Table) -> String {
    format!("{}_PK", table.name)
}

/// `CONSTRAINT <table>_PK PRIMARY KEY (columns)`.
pub fn primary_key_constraint_clause<D: SqlDialect + ?Sized>(
    _dialect: &D,
    table: &Table,
    columns: &[String],
) -> String {
    format!(
        "CONSTRAINT {} PRIMARY KEY ({})",
        primary_key_constraint_name(table),
        columns.join(", ")
    )
}

/// `ALTER TABLE t DROP CONSTRAINT <table>_PK`.
pub fn drop_primary_key_constraint_statement<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
) -> String {
    format!(
        "ALTER TABLE {} DROP CONSTRAINT {}",
        dialect.qualified_table_name(table),
        primary_key_constraint_name(table)
    )
}

/// `ALTER TABLE t ADD <primary key clause>`.
pub fn add_primary_key_constraint_statement<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    columns: &[String],
) -> String {
    format!(
        "ALTER TABLE {} ADD {}",
        dialect.qualified_table_name(table),
        dialect.primary_key_constraint_clause(table, columns)
    )
}

/// Drops the old key constraint, then adds the new one. Empty keys emit
/// nothing.
///
/// # Errors
///
/// Fails if the table name is blank.
pub fn change_primary_key_columns<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    from: &[String],
    to: &[String],
) -> Result<Vec<String>> {
    check_table_name(&table.name)?;

    let mut statements = Vec::new();
    if !from.is_empty() {
        statements.push(dialect.drop_primary_key_constraint_statement(table));
    }
    if !to.is_empty() {
        statements.push(dialect.add_primary_key_constraint_statement(table, to));
    }
    Ok(statements)
}

/// Drops the key constraint under the old name, renames, and adds it back
/// under the new name.
///
/// # Errors
///
/// Fails if either table name is blank.
pub fn rename_table_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    from: &Table,
    to: &Table,
) -> Result<Vec<String>> {
    check_table_name(&from.name)?;
    check_table_name(&to.name)?;

    let mut statements = Vec::new();
    if !from.primary_key().is_empty() {
        statements.push(dialect.drop_primary_key_constraint_statement(from));
    }
    statements.push(format!(
        "ALTER TABLE {} RENAME TO {}",
        dialect.qualified_table_name(from),
        dialect.qualified_table_name(to)
    ));
    let primary_key = to.primary_key();
    if !primary_key.is_empty() {
        statements.push(dialect.add_primary_key_constraint_statement(to, &primary_key));
    }
    Ok(statements)
}

// Indexes

/// `CREATE [UNIQUE] INDEX name ON table (columns)`.
pub fn index_deployment_statement<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    index: &Index,
) -> String {
    format!(
        "CREATE {}INDEX {}{} ON {} ({})",
        if index.unique { "UNIQUE " } else { "" },
        dialect.schema_name_prefix_for_table(table),
        index.name,
        dialect.qualified_table_name(table),
        index.columns.join(", ")
    )
}

/// The index deployment statement alone.
pub fn add_index_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    index: &Index,
) -> Vec<String> {
    vec![dialect.index_deployment_statement(table, index)]
}

/// `DROP INDEX name`.
pub fn index_drop_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    index: &Index,
) -> Vec<String> {
    vec![format!(
        "DROP INDEX {}{}",
        dialect.schema_name_prefix_for_table(table),
        index.name
    )]
}

/// Nothing: dropping the table drops its indexes.
pub fn table_drop_index_statements<D: SqlDialect + ?Sized>(
    _dialect: &D,
    _table: &Table,
    _index: &Index,
) -> Vec<String> {
    Vec::new()
}

/// The two sides of an index rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRename {
    /// The index as it exists before the rename.
    pub existing: Index,
    /// The index as it exists after the rename.
    pub replacement: Index,
    /// Which name the table carried.
    pub direction: IndexRenameDirection,
}

/// Works out both sides of an index rename from a table carrying the index
/// under either name. The new name is looked for first.
///
/// # Errors
///
/// Fails with [`DialectError::IndexNotFound`] if neither name is present.
pub fn resolve_index_rename(table: &Table, from: &str, to: &str) -> Result<IndexRename> {
    if let Some(renamed) = table.index(to) {
        Ok(IndexRename {
            existing: renamed.renamed(from),
            replacement: renamed.clone(),
            direction: IndexRenameDirection::AfterRename,
        })
    } else if let Some(existing) = table.index(from) {
        Ok(IndexRename {
            existing: existing.clone(),
            replacement: existing.renamed(to),
            direction: IndexRenameDirection::BeforeRename,
        })
    } else {
        Err(DialectError::IndexNotFound {
            table: table.name.clone(),
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Drops the index under its old name and creates it under the new one.
///
/// # Errors
///
/// Fails with [`DialectError::IndexNotFound`] if neither name is present.
pub fn rename_index_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &Table,
    from: &str,
    to: &str,
) -> Result<Vec<String>> {
    let rename = resolve_index_rename(table, from, to)?;
    debug!(
        table = %table.name,
        from,
        to,
        direction = %rename.direction,
        "Resolved index rename"
    );

    let mut statements = dialect.index_drop_statements(table, &rename.existing);
    statements.push(dialect.index_deployment_statement(table, &rename.replacement));
    Ok(statements)
}

/// Dispatches a schema change to the matching operation.
///
/// # Errors
///
/// Propagates the error of the underlying operation.
pub fn schema_change_statements<D: SqlDialect + ?Sized>(
    dialect: &D,
    change: &SchemaChange,
) -> Result<Vec<String>> {
    match change {
        SchemaChange::AddTable { table } => dialect.table_deployment_statements(table),
        SchemaChange::RemoveTable { table } => dialect.drop_statements(table),
        SchemaChange::RenameTable { from, to } => dialect.rename_table_statements(from, to),
        SchemaChange::AddColumn { table, column } => {
            dialect.alter_table_add_column_statements(table, column)
        }
        SchemaChange::ChangeColumn { table, from, to } => {
            dialect.alter_table_change_column_statements(table, from, to)
        }
        SchemaChange::RemoveColumn { table, column } => {
            dialect.alter_table_drop_column_statements(table, column)
        }
        SchemaChange::AddIndex { table, index } => {
            table.validate()?;
            Ok(dialect.add_index_statements(table, index))
        }
        SchemaChange::RemoveIndex { table, index } => {
            check_table_name(&table.name)?;
            Ok(dialect.index_drop_statements(table, index))
        }
        SchemaChange::RenameIndex { table, from, to } => {
            dialect.rename_index_statements(table, from, to)
        }
        SchemaChange::ChangePrimaryKey { table, from, to } => {
            dialect.change_primary_key_columns(table, from, to)
        }
        SchemaChange::RemoveView { view } => dialect.drop_view_statements(view),
    }
}

// Literals and expressions

/// Doubles single quotes.
#[must_use]
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}

/// Renders a literal: quoted strings, `DATE 'yyyy-mm-dd'`, `TRUE`/`FALSE`.
///
/// # Errors
///
/// Fails for a decimal literal that is not a plain number.
pub fn render_literal<D: SqlDialect + ?Sized>(dialect: &D, literal: &Literal) -> Result<String> {
    literal.validate()?;
    Ok(match literal {
        Literal::Null => "null".to_string(),
        Literal::String(value) => format!("'{}'", dialect.escape_sql(value)),
        Literal::Integer(value) => value.to_string(),
        Literal::Decimal(value) => value.clone(),
        Literal::Boolean(true) => "TRUE".to_string(),
        Literal::Boolean(false) => "FALSE".to_string(),
        Literal::Date(value) => format!("DATE '{}'", value.format("%Y-%m-%d")),
    })
}

/// `qualifier.name` or `name`.
#[must_use]
pub fn render_field_reference(field: &FieldReference) -> String {
    match &field.table {
        Some(table) => format!("{}.{}", table.qualifier(), field.name),
        None => field.name.clone(),
    }
}

/// Renders the expressions separated by `", "`.
///
/// # Errors
///
/// Propagates expression rendering errors.
pub fn render_list<D: SqlDialect + ?Sized>(dialect: &D, exprs: &[Expr]) -> Result<String> {
    Ok(exprs
        .iter()
        .map(|expr| dialect.render_expr(expr))
        .collect::<Result<Vec<_>>>()?
        .join(", "))
}

fn render_operand<D: SqlDialect + ?Sized>(dialect: &D, expr: &Expr) -> Result<String> {
    let sql = dialect.render_expr(expr)?;
    Ok(if matches!(expr.unaliased(), Expr::Maths(_)) {
        format!("({sql})")
    } else {
        sql
    })
}

/// Renders an expression, ignoring its alias.
///
/// # Errors
///
/// Fails on a function with the wrong number of arguments or one the
/// dialect cannot express.
pub fn render_expr<D: SqlDialect + ?Sized>(dialect: &D, expr: &Expr) -> Result<String> {
    match expr {
        Expr::Field(field) => Ok(render_field_reference(field)),
        Expr::Literal(literal) => dialect.render_literal(literal),
        Expr::Function(function) => render_function(dialect, function),
        Expr::Cast(cast) => Ok(format!(
            "CAST({} AS {})",
            dialect.render_expr(&cast.expr)?,
            dialect.column_representation(cast.data_type, cast.width, cast.scale)?
        )),
        Expr::Maths(maths) => Ok(format!(
            "{} {} {}",
            render_operand(dialect, &maths.left)?,
            maths.operator.as_str(),
            render_operand(dialect, &maths.right)?
        )),
        Expr::Concat(concat) => Ok(format!("CONCAT({})", render_list(dialect, &concat.fields)?)),
        Expr::Aliased { expr, .. } => dialect.render_expr(expr),
    }
}

/// Renders a function call.
///
/// # Errors
///
/// Fails on the wrong number of arguments, and for `RANDOM_STRING`, which
/// has no ANSI form.
pub fn render_function<D: SqlDialect + ?Sized>(dialect: &D, function: &Function) -> Result<String> {
    let args = function.checked_args()?;
    let arg = |i: usize| dialect.render_expr(&args[i]);

    Ok(match function.kind {
        FunctionKind::Count if args.is_empty() => "COUNT(*)".to_string(),
        FunctionKind::Count
        | FunctionKind::Sum
        | FunctionKind::Min
        | FunctionKind::Max
        | FunctionKind::Average
        | FunctionKind::Trim
        | FunctionKind::Length
        | FunctionKind::Upper
        | FunctionKind::Lower
        | FunctionKind::Floor => format!("{}({})", function.kind.name(), arg(0)?),
        FunctionKind::Coalesce | FunctionKind::IsNull => {
            format!("COALESCE({})", render_list(dialect, args)?)
        }
        FunctionKind::Mod | FunctionKind::Round | FunctionKind::Substring => {
            format!("{}({})", function.kind.name(), render_list(dialect, args)?)
        }
        FunctionKind::Now => "CURRENT_TIMESTAMP".to_string(),
        FunctionKind::DaysBetween => {
            format!("EXTRACT(DAY FROM ({} - {}))", arg(0)?, arg(1)?)
        }
        FunctionKind::MonthsBetween => format!("MONTHS_BETWEEN({}, {})", arg(0)?, arg(1)?),
        FunctionKind::AddDays => format!("({} + {} * INTERVAL '1' DAY)", arg(0)?, arg(1)?),
        FunctionKind::AddMonths => format!("ADD_MONTHS({}, {})", arg(0)?, arg(1)?),
        FunctionKind::YyyymmddToDate => {
            let value = arg(0)?;
            format!(
                "CAST(SUBSTRING({value}, 1, 4) || '-' || SUBSTRING({value}, 5, 2) || '-' || \
                 SUBSTRING({value}, 7, 2) AS DATE)"
            )
        }
        FunctionKind::DateToYyyymmdd => {
            format!("CAST(TO_CHAR({}, 'YYYYMMDD') AS INTEGER)", arg(0)?)
        }
        FunctionKind::DateToYyyymmddHhmmss => {
            format!("CAST(TO_CHAR({}, 'YYYYMMDDHH24MISS') AS BIGINT)", arg(0)?)
        }
        FunctionKind::LeftTrim => format!("TRIM(LEADING ' ' FROM {})", arg(0)?),
        FunctionKind::RightTrim => format!("TRIM(TRAILING ' ' FROM {})", arg(0)?),
        FunctionKind::LeftPad => format!("LPAD({})", render_list(dialect, args)?),
        FunctionKind::LastDayOfMonth => format!("LAST_DAY({})", arg(0)?),
        FunctionKind::RandomString => {
            return Err(DialectError::unsupported(
                dialect.name(),
                "RANDOM_STRING has no standard form",
            ))
        }
    })
}

/// Renders a criterion. AND and OR groups are parenthesised.
///
/// # Errors
///
/// Propagates expression rendering errors.
pub fn render_criterion<D: SqlDialect + ?Sized>(dialect: &D, criterion: &Criterion) -> Result<String> {
    let binary = |left: &Expr, operator: &str, right: &Expr| -> Result<String> {
        Ok(format!(
            "{} {operator} {}",
            dialect.render_expr(left)?,
            dialect.render_expr(right)?
        ))
    };
    let group = |criteria: &[Criterion], separator: &str| -> Result<String> {
        let parts = criteria
            .iter()
            .map(|c| dialect.render_criterion(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("({})", parts.join(separator)))
    };

    match criterion {
        Criterion::Eq(l, r) => binary(l, "=", r),
        Criterion::NotEq(l, r) => binary(l, "<>", r),
        Criterion::Lt(l, r) => binary(l, "<", r),
        Criterion::LessThanOrEqual(l, r) => binary(l, "<=", r),
        Criterion::Gt(l, r) => binary(l, ">", r),
        Criterion::GreaterThanOrEqual(l, r) => binary(l, ">=", r),
        Criterion::Like(l, r) => Ok(format!(
            "{}{}",
            binary(l, "LIKE", r)?,
            dialect.like_escape_suffix()
        )),
        Criterion::IsNull(e) => Ok(format!("{} IS NULL", dialect.render_expr(e)?)),
        Criterion::IsNotNull(e) => Ok(format!("{} IS NOT NULL", dialect.render_expr(e)?)),
        Criterion::In(e, values) => Ok(format!(
            "{} IN ({})",
            dialect.render_expr(e)?,
            render_list(dialect, values)?
        )),
        Criterion::And(criteria) => group(criteria, " AND "),
        Criterion::Or(criteria) => group(criteria, " OR "),
        Criterion::Not(inner) => Ok(format!("NOT ({})", dialect.render_criterion(inner)?)),
    }
}

/// `expr ASC|DESC [NULLS FIRST|LAST]`.
///
/// # Errors
///
/// Propagates expression rendering errors.
pub fn render_order_by<D: SqlDialect + ?Sized>(dialect: &D, order_by: &OrderBy) -> Result<String> {
    let mut sql = format!(
        "{} {}",
        dialect.render_expr(&order_by.expr)?,
        order_by.direction.as_str()
    );
    if let Some(nulls) = order_by.nulls {
        sql.push(' ');
        sql.push_str(nulls.as_str());
    }
    Ok(sql)
}

// Statements

/// `prefix` + name + optional alias.
///
/// # Errors
///
/// Fails if the table name is blank.
pub fn render_table_reference<D: SqlDialect + ?Sized>(
    dialect: &D,
    table: &TableReference,
) -> Result<String> {
    check_table_name(&table.name)?;
    let mut sql = format!(
        "{}{}",
        dialect.schema_name_prefix_for_reference(table),
        table.name
    );
    if let Some(alias) = &table.alias {
        sql.push(' ');
        sql.push_str(alias);
    }
    Ok(sql)
}

fn render_select_field<D: SqlDialect + ?Sized>(dialect: &D, field: &Expr) -> Result<String> {
    match field {
        Expr::Aliased { expr, alias } => Ok(format!("{} AS {alias}", dialect.render_expr(expr)?)),
        other => dialect.render_expr(other),
    }
}

/// The implied names of `fields`.
///
/// # Errors
///
/// Fails with [`DialectError::UnnamedField`] if a field has no implied name.
pub fn implied_names(fields: &[Expr], table: &str) -> Result<Vec<String>> {
    fields
        .iter()
        .map(|field| {
            field
                .implied_name()
                .map(str::to_string)
                .ok_or_else(|| DialectError::UnnamedField(table.to_string()))
        })
        .collect()
}

/// Renders a SELECT. Hints are ignored. A SELECT without FROM gets the
/// dialect's dummy table.
///
/// # Errors
///
/// Fails on a blank table name or an expression that cannot be rendered.
pub fn render_select<D: SqlDialect + ?Sized>(
    dialect: &D,
    statement: &SelectStatement,
) -> Result<String> {
    let mut sql = String::from("SELECT ");
    if statement.distinct {
        sql.push_str("DISTINCT ");
    }

    if statement.fields.is_empty() {
        sql.push('*');
    } else {
        let fields = statement
            .fields
            .iter()
            .map(|field| render_select_field(dialect, field))
            .collect::<Result<Vec<_>>>()?;
        sql.push_str(&fields.join(", "));
    }

    match &statement.from {
        Some(table) => {
            sql.push_str(" FROM ");
            sql.push_str(&render_table_reference(dialect, table)?);
        }
        None => sql.push_str(dialect.from_dummy_table()),
    }

    for join in &statement.joins {
        sql.push(' ');
        sql.push_str(join.join_type.as_str());
        sql.push(' ');
        sql.push_str(&render_table_reference(dialect, &join.table)?);
        sql.push_str(" ON ");
        sql.push_str(&dialect.render_criterion(&join.on)?);
    }

    if let Some(criterion) = &statement.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(&dialect.render_criterion(criterion)?);
    }

    if !statement.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&render_list(dialect, &statement.group_by)?);
    }

    if let Some(criterion) = &statement.having {
        sql.push_str(" HAVING ");
        sql.push_str(&dialect.render_criterion(criterion)?);
    }

    if !statement.order_by.is_empty() {
        let entries = statement
            .order_by
            .iter()
            .map(|entry| dialect.render_order_by(entry))
            .collect::<Result<Vec<_>>>()?;
        sql.push_str(" ORDER BY ");
        sql.push_str(&entries.join(", "));
    }

    Ok(sql)
}

/// Renders a standard MERGE matching on the unique key.
///
/// # Errors
///
/// Fails on a blank table name, a source field without an implied name or an
/// unnamed unique-key field.
pub fn render_merge<D: SqlDialect + ?Sized>(dialect: &D, statement: &MergeStatement) -> Result<String> {
    let target = render_table_reference(dialect, &statement.table)?;
    let qualifier = statement.table.qualifier();
    let fields = implied_names(&statement.source.fields, &statement.table.name)?;
    let keys = statement
        .table_unique_key
        .iter()
        .map(|key| {
            key.implied_name()
                .map(str::to_string)
                .ok_or_else(|| DialectError::UnnamedMergeKey(statement.table.name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let on = keys
        .iter()
        .map(|key| format!("{qualifier}.{key} = {MERGE_SOURCE_ALIAS}.{key}"))
        .collect::<Vec<_>>()
        .join(" AND ");
    let updates = fields
        .iter()
        .filter(|field| !keys.iter().any(|key| key.eq_ignore_ascii_case(field)))
        .map(|field| format!("{field} = {MERGE_SOURCE_ALIAS}.{field}"))
        .collect::<Vec<_>>();
    let values = fields
        .iter()
        .map(|field| format!("{MERGE_SOURCE_ALIAS}.{field}"))
        .collect::<Vec<_>>();

    let mut sql = format!(
        "MERGE INTO {target} USING ({}) {MERGE_SOURCE_ALIAS} ON ({on})",
        dialect.render_select(&statement.source)?
    );
    if !updates.is_empty() {
        sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
        sql.push_str(&updates.join(", "));
    }
    sql.push_str(" WHEN NOT MATCHED THEN INSERT (");
    sql.push_str(&fields.join(", "));
    sql.push_str(") VALUES (");
    sql.push_str(&values.join(", "));
    sql.push(')');
    Ok(sql)
}

/// `INSERT INTO t [(columns)] VALUES (...)` or `INSERT INTO t [(columns)] SELECT ...`.
///
/// # Errors
///
/// Fails on a blank table name or an expression that cannot be rendered.
pub fn render_insert<D: SqlDialect + ?Sized>(dialect: &D, statement: &InsertStatement) -> Result<String> {
    let mut sql = format!("INSERT INTO {}", render_table_reference(dialect, &statement.table)?);
    if !statement.columns.is_empty() {
        sql.push_str(" (");
        sql.push_str(&statement.columns.join(", "));
        sql.push(')');
    }
    match &statement.source {
        InsertSource::Values(values) => {
            sql.push_str(" VALUES (");
            sql.push_str(&render_list(dialect, values)?);
            sql.push(')');
        }
        InsertSource::Select(select) => {
            sql.push(' ');
            sql.push_str(&dialect.render_select(select)?);
        }
    }
    Ok(sql)
}

/// `UPDATE t SET a = x, ... [WHERE ...]`.
///
/// # Errors
///
/// Fails on a blank table name or an assignment without an implied name.
pub fn render_update<D: SqlDialect + ?Sized>(dialect: &D, statement: &UpdateStatement) -> Result<String> {
    let table = render_table_reference(dialect, &statement.table)?;
    let names = implied_names(&statement.assignments, &statement.table.name)?;
    let assignments = names
        .iter()
        .zip(&statement.assignments)
        .map(|(name, value)| Ok(format!("{name} = {}", dialect.render_expr(value)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
    if let Some(criterion) = &statement.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(&dialect.render_criterion(criterion)?);
    }
    Ok(sql)
}

/// `DELETE FROM t [WHERE ...]`.
///
/// # Errors
///
/// Fails on a blank table name or a criterion that cannot be rendered.
pub fn render_delete<D: SqlDialect + ?Sized>(dialect: &D, statement: &DeleteStatement) -> Result<String> {
    let mut sql = format!("DELETE FROM {}", render_table_reference(dialect, &statement.table)?);
    if let Some(criterion) = &statement.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(&dialect.render_criterion(criterion)?);
    }
    Ok(sql)
}
