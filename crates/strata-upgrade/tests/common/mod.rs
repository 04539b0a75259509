#![allow(dead_code)]

use std::fmt;

use strata_sql_core::metadata::{column, index, table, DataType, Table};
use strata_upgrade::SqlExecutor;

/// Records every statement, failing on the `fail_on`-th one (counting from 0).
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub statements: Vec<String>,
    pub fail_on: Option<usize>,
}

#[derive(Debug)]
pub struct ExecutionFailed(pub String);

impl fmt::Display for ExecutionFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statement failed: {}", self.0)
    }
}

impl RecordingExecutor {
    pub fn failing_on(position: usize) -> Self {
        Self {
            statements: Vec::new(),
            fail_on: Some(position),
        }
    }
}

impl SqlExecutor for RecordingExecutor {
    type Error = ExecutionFailed;

    fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
        if self.fail_on == Some(self.statements.len()) {
            return Err(ExecutionFailed(sql.to_string()));
        }
        self.statements.push(sql.to_string());
        Ok(())
    }
}

pub fn basic_table() -> Table {
    table("BasicTable").columns([
        column("id", DataType::Integer).primary_key().auto_numbered(1),
        column("nullableStringCol", DataType::String)
            .width(10)
            .nullable(),
    ])
}

pub fn agreement_table() -> Table {
    table("Agreement")
        .columns([
            column("agreementNumber", DataType::String)
                .width(17)
                .primary_key(),
            column("currencyCode", DataType::String).width(3),
            column("amount", DataType::Decimal).width(13).scale(2).nullable(),
        ])
        .indexes([index("Agreement_1").columns(["currencyCode"])])
}
