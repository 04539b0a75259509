//! UPDATE statement builder.

use crate::ast::{Criterion, Expr, TableReference, UpdateStatement};

/// Starts an UPDATE of `table` with no assignments.
#[must_use]
pub const fn update(table: TableReference) -> UpdateStatement {
    UpdateStatement {
        table,
        assignments: Vec::new(),
        where_clause: None,
    }
}

impl UpdateStatement {
    /// Sets the assignments. Each expression's implied name is the column
    /// it writes, so values are usually aliased: `literal(0).alias("total")`.
    #[must_use]
    pub fn set(mut self, assignments: impl IntoIterator<Item = Expr>) -> Self {
        self.assignments = assignments.into_iter().collect();
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, criterion: Criterion) -> Self {
        self.where_clause = Some(criterion);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{field, literal, table_ref};

    #[test]
    fn test_update_builder() {
        let statement = update(table_ref("Agreement"))
            .set([literal(0).alias("total")])
            .where_clause(field("id").eq(literal(7)));
        assert_eq!(statement.assignments[0].implied_name(), Some("total"));
        assert!(statement.where_clause.is_some());
    }
}
