//! DELETE statement builder.

use crate::ast::{Criterion, DeleteStatement, TableReference};

/// Starts a DELETE from `table`. Without a WHERE clause every row goes.
#[must_use]
pub const fn delete(table: TableReference) -> DeleteStatement {
    DeleteStatement {
        table,
        where_clause: None,
    }
}

impl DeleteStatement {
    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, criterion: Criterion) -> Self {
        self.where_clause = Some(criterion);
        self
    }
}
