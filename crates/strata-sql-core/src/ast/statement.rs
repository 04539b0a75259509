//! SQL statement AST types.

use super::criterion::Criterion;
use super::expression::Expr;

/// A reference to a table, optionally schema-qualified and aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    /// Explicit schema name. When absent the dialect decides.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
}

impl TableReference {
    /// Creates an unqualified, unaliased table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Sets an explicit schema.
    #[must_use]
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The name used to qualify fields: the alias, or else the table name.
    #[must_use]
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

impl OrderBy {
    /// Ascending order on `expr` with the database's null placement.
    #[must_use]
    pub const fn asc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Asc,
            nulls: None,
        }
    }

    /// Descending order on `expr` with the database's null placement.
    #[must_use]
    pub const fn desc(expr: Expr) -> Self {
        Self {
            expr,
            direction: OrderDirection::Desc,
            nulls: None,
        }
    }

    /// Places NULLs first.
    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullOrdering::First);
        self
    }

    /// Places NULLs last.
    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullOrdering::Last);
        self
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT OUTER JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableReference,
    /// The join condition.
    pub on: Criterion,
}

/// Optimizer hints attached to a SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hint {
    /// Prefer an index when reading a table.
    UseIndex {
        /// The table read through the index.
        table: TableReference,
        /// The index name.
        index: String,
    },
    /// Join tables in the order they appear.
    UseImplicitJoinOrder,
    /// Optimise for returning the first rows.
    OptimiseForRowCount(u32),
    /// Run the query in parallel.
    Parallel,
}

/// A SELECT statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The selected expressions. Empty means `*`.
    pub fields: Vec<Expr>,
    /// The FROM table.
    pub from: Option<TableReference>,
    /// JOIN clauses, in order.
    pub joins: Vec<JoinClause>,
    /// The WHERE clause.
    pub where_clause: Option<Criterion>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Criterion>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// Optimizer hints.
    pub hints: Vec<Hint>,
}

impl SelectStatement {
    /// Returns an independent copy of the statement.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// A MERGE (upsert) statement.
///
/// The source select's fields, by implied name, are the columns written to
/// the target table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeStatement {
    /// The target table.
    pub table: TableReference,
    /// The rows to merge.
    pub source: SelectStatement,
    /// Fields identifying an existing row, in order.
    pub table_unique_key: Vec<Expr>,
}

impl MergeStatement {
    /// Returns an independent copy of the statement.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsertSource {
    /// A single row of values.
    Values(Vec<Expr>),
    /// SELECT query.
    Select(Box<SelectStatement>),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertStatement {
    /// The target table.
    pub table: TableReference,
    /// Target column names. May be empty for a select source.
    pub columns: Vec<String>,
    /// The source of the inserted rows.
    pub source: InsertSource,
}

impl InsertStatement {
    /// Returns an independent copy of the statement.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// An UPDATE statement.
///
/// Each assignment is an expression whose implied name is the column it
/// writes, usually `value.alias("column")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateStatement {
    /// The target table.
    pub table: TableReference,
    /// The assignments.
    pub assignments: Vec<Expr>,
    /// The WHERE clause.
    pub where_clause: Option<Criterion>,
}

impl UpdateStatement {
    /// Returns an independent copy of the statement.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeleteStatement {
    /// The target table.
    pub table: TableReference,
    /// The WHERE clause.
    pub where_clause: Option<Criterion>,
}

impl DeleteStatement {
    /// Returns an independent copy of the statement.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// A DML statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// MERGE statement.
    Merge(MergeStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
}

impl From<SelectStatement> for Statement {
    fn from(statement: SelectStatement) -> Self {
        Self::Select(statement)
    }
}

impl From<MergeStatement> for Statement {
    fn from(statement: MergeStatement) -> Self {
        Self::Merge(statement)
    }
}

impl From<InsertStatement> for Statement {
    fn from(statement: InsertStatement) -> Self {
        Self::Insert(statement)
    }
}

impl From<UpdateStatement> for Statement {
    fn from(statement: UpdateStatement) -> Self {
        Self::Update(statement)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(statement: DeleteStatement) -> Self {
        Self::Delete(statement)
    }
}
