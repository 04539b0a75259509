//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node owns its children, so `clone()` is a deep copy and equality and
//! hashing are structural.

mod criterion;
mod expression;
mod schema_change;
mod statement;

pub use criterion::Criterion;
pub use expression::{
    is_decimal_text, Cast, ConcatenatedField, Expr, FieldReference, Function, FunctionKind, Literal, MathsField,
    MathsOperator,
};
pub use schema_change::SchemaChange;
pub use statement::{
    DeleteStatement, Hint, InsertSource, InsertStatement, JoinClause, JoinType, MergeStatement,
    NullOrdering, OrderBy, OrderDirection, SelectStatement, Statement, TableReference,
    UpdateStatement,
};
