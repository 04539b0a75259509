//! SELECT statement builder.
//!
//! `select(..)` returns a [`SelectStatement`] and every further method takes
//! and returns it by value, so a partly built query can be cloned and
//! finished two different ways.

use crate::ast::{
    Criterion, Expr, Hint, JoinClause, JoinType, OrderBy, SelectStatement, TableReference,
};

/// Starts a SELECT of the given fields. No fields selects `*`.
#[must_use]
pub fn select(fields: impl IntoIterator<Item = Expr>) -> SelectStatement {
    SelectStatement {
        fields: fields.into_iter().collect(),
        ..SelectStatement::default()
    }
}

impl SelectStatement {
    /// Selects DISTINCT rows.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the FROM table.
    #[must_use]
    pub fn from(mut self, table: TableReference) -> Self {
        self.from = Some(table);
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn inner_join(mut self, table: TableReference, on: Criterion) -> Self {
        self.joins.push(JoinClause {
            join_type: JoinType::Inner,
            table,
            on,
        });
        self
    }

    /// Adds a LEFT OUTER JOIN.
    #[must_use]
    pub fn left_outer_join(mut self, table: TableReference, on: Criterion) -> Self {
        self.joins.push(JoinClause {
            join_type: JoinType::Left,
            table,
            on,
        });
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, criterion: Criterion) -> Self {
        self.where_clause = Some(criterion);
        self
    }

    /// Sets the GROUP BY expressions.
    #[must_use]
    pub fn group_by(mut self, exprs: impl IntoIterator<Item = Expr>) -> Self {
        self.group_by = exprs.into_iter().collect();
        self
    }

    /// Sets the HAVING clause.
    #[must_use]
    pub fn having(mut self, criterion: Criterion) -> Self {
        self.having = Some(criterion);
        self
    }

    /// Sets the ORDER BY entries.
    #[must_use]
    pub fn order_by(mut self, entries: impl IntoIterator<Item = OrderBy>) -> Self {
        self.order_by = entries.into_iter().collect();
        self
    }

    /// Hints that `index` should be used to read `table`.
    #[must_use]
    pub fn use_index(mut self, table: TableReference, index: impl Into<String>) -> Self {
        self.hints.push(Hint::UseIndex {
            table,
            index: index.into(),
        });
        self
    }

    /// Hints that tables should be joined in declaration order.
    #[must_use]
    pub fn use_implicit_join_order(mut self) -> Self {
        self.hints.push(Hint::UseImplicitJoinOrder);
        self
    }

    /// Hints that the first `rows` rows matter most.
    #[must_use]
    pub fn optimise_for_row_count(mut self, rows: u32) -> Self {
        self.hints.push(Hint::OptimiseForRowCount(rows));
        self
    }

    /// Hints that the query may run in parallel.
    #[must_use]
    pub fn with_parallel_query_plan(mut self) -> Self {
        self.hints.push(Hint::Parallel);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{field, literal, table_ref};

    #[test]
    fn test_select_builder() {
        let query = select([field("id"), field("code")])
            .from(table_ref("Agreement"))
            .where_clause(field("code").eq(literal("A1")))
            .order_by([field("id").desc()]);
        assert_eq!(query.fields.len(), 2);
        assert_eq!(query.from, Some(table_ref("Agreement")));
        assert!(query.where_clause.is_some());
        assert_eq!(query.order_by, vec![OrderBy::desc(field("id"))]);
        assert!(query.hints.is_empty());
    }

    #[test]
    fn test_clone_then_diverge() {
        let base = select([field("id")]).from(table_ref("Agreement"));
        let hinted = base.clone().use_implicit_join_order();
        assert!(base.hints.is_empty());
        assert_eq!(hinted.hints, vec![Hint::UseImplicitJoinOrder]);
    }
}
