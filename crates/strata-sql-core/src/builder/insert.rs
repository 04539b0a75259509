//! INSERT statement builder.

use crate::ast::{Expr, InsertSource, InsertStatement, SelectStatement, TableReference};

/// Starts an INSERT into `table`; finish with [`InsertBuilder::values`] or
/// [`InsertBuilder::from_select`].
#[must_use]
pub fn insert(table: TableReference) -> InsertBuilder {
    InsertBuilder {
        table,
        columns: Vec::new(),
    }
}

/// Builder for an INSERT statement.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: TableReference,
    columns: Vec<String>,
}

impl InsertBuilder {
    /// Specifies the columns to insert into.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Inserts a single row of values.
    #[must_use]
    pub fn values(self, values: impl IntoIterator<Item = Expr>) -> InsertStatement {
        InsertStatement {
            table: self.table,
            columns: self.columns,
            source: InsertSource::Values(values.into_iter().collect()),
        }
    }

    /// Inserts the rows of a query.
    #[must_use]
    pub fn from_select(self, select: SelectStatement) -> InsertStatement {
        InsertStatement {
            table: self.table,
            columns: self.columns,
            source: InsertSource::Select(Box::new(select)),
        }
    }
}
