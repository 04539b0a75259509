//! # strata-sql-core
//!
//! Database-agnostic SQL modelling with dialect-aware rendering.
//!
//! This crate provides:
//! - Schema metadata for tables, columns, indexes and views
//! - An immutable SQL AST with fluent builders, including a typestate MERGE builder
//! - Schema changes that describe one step of an upgrade
//! - The [`SqlDialect`] trait with an ANSI implementation that vendor crates
//!   specialise hook by hook
//!
//! ## Rendering a statement
//!
//! ```rust
//! use strata_sql_core::builder::{field, literal, select, table_ref};
//! use strata_sql_core::{AnsiDialect, SqlDialect};
//!
//! let query = select([field("id"), field("code")])
//!     .from(table_ref("Agreement"))
//!     .where_clause(field("code").eq(literal("O'Brien")));
//!
//! let sql = AnsiDialect::default().render_select(&query).unwrap();
//! assert_eq!(sql, "SELECT id, code FROM Agreement WHERE code = 'O''Brien'");
//! ```
//!
//! ## Rendering a schema change
//!
//! ```rust
//! use strata_sql_core::ast::SchemaChange;
//! use strata_sql_core::metadata::{column, table, DataType};
//! use strata_sql_core::{AnsiDialect, SqlDialect};
//!
//! let before = column("description", DataType::String).width(10).nullable();
//! let after = before.clone().width(20);
//! let change = SchemaChange::ChangeColumn {
//!     table: table("Product").columns([after.clone()]),
//!     from: before,
//!     to: after,
//! };
//!
//! let statements = AnsiDialect::default().schema_change_statements(&change).unwrap();
//! assert_eq!(
//!     statements,
//!     vec!["ALTER TABLE Product ALTER COLUMN description SET DATA TYPE VARCHAR(20)"]
//! );
//! ```

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod error;
pub mod metadata;

pub use ast::{Criterion, Expr, SchemaChange, Statement};
pub use dialect::{AnsiDialect, DialectConfig, IdTable, SqlDialect, TemporaryTables};
pub use error::{DialectError, Result};
pub use metadata::{Column, DataType, Index, Table, View};
