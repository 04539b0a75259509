//! MERGE rendered as `INSERT ... ON DUPLICATE KEY UPDATE`.
//!
//! The target's own unique index decides which rows collide, so the unique
//! key of the statement does not appear in the SQL. Every source field is
//! assumed to be aliased to its target column.

use strata_sql_core::ast::MergeStatement;
use strata_sql_core::dialect::{ansi, SqlDialect};
use strata_sql_core::error::{DialectError, Result};

use crate::NuoDbDialect;

/// Renders a MERGE, rejecting hints and blank target tables.
pub fn render_merge(dialect: &NuoDbDialect, statement: &MergeStatement) -> Result<String> {
    let table = &statement.table;
    if table.name.trim().is_empty() {
        return Err(DialectError::BlankTableName);
    }
    if !statement.source.hints.is_empty() {
        return Err(DialectError::unsupported(
            dialect.name(),
            "MERGE may not be used with SELECT statement hints",
        ));
    }

    let fields = ansi::implied_names(&statement.source.fields, &table.name)?;
    let updates = fields
        .iter()
        .map(|field| format!("{field} = values({field})"))
        .collect::<Vec<_>>();

    Ok(format!(
        "INSERT INTO {}{}({}) {} ON DUPLICATE KEY UPDATE {}",
        dialect.schema_name_prefix_for_reference(table),
        table.name,
        fields.join(", "),
        dialect.render_select(&statement.source)?,
        updates.join(", ")
    ))
}
