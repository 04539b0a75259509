//! # strata-sql-nuodb
//!
//! NuoDB dialect for `strata-sql-core`.
//!
//! # How NuoDB differs from ANSI SQL
//!
//! - **Autonumbering**: columns take their values from a named sequence
//!   through `GENERATED BY DEFAULT AS IDENTITY(seq)`. Sequences are named
//!   `<table>_IDS_<start>` and are dropped with `IF EXISTS` before being
//!   created, so a redeployment never collides with a leftover sequence.
//!   Id-table entries are raised with `ON DUPLICATE KEY UPDATE` and
//!   `GREATEST`, so they never go down.
//! - **Primary keys**: the key is an index called `"<TABLE>..PRIMARY_KEY"`
//!   and is removed with `DROP INDEX IF EXISTS`, not `DROP CONSTRAINT`.
//! - **Indexes**: dropping a table does not always drop its indexes, so
//!   every index is dropped explicitly, and every index creation is preceded
//!   by an idempotent drop.
//! - **Temporary tables**: they live outside any schema and are never
//!   qualified.
//! - **Schema names**: schema prefixes are upper-cased.
//! - **Expressions**: arithmetic results are cast back to `NUMBER`,
//!   concatenation treats NULL as an empty string, date functions use
//!   `DATE_ADD`/`DATE_SUB`/`DATE_TO_STR`/`DATE_FROM_STR`, and NULL ordering
//!   is emulated with a leading `IS NULL` sort key.
//! - **Escaping**: the backslash escapes the closing quote, so backslashes
//!   in literals are spliced in with `TRIM('\ ')`.
//! - **MERGE**: rendered as `INSERT ... ON DUPLICATE KEY UPDATE`.
//!
//! ## Example
//!
//! ```rust
//! use strata_sql_core::metadata::{column, table, DataType};
//! use strata_sql_core::{DialectConfig, SqlDialect};
//! use strata_sql_nuodb::NuoDbDialect;
//!
//! let dialect = NuoDbDialect::new(DialectConfig::with_schema("core"));
//! let currency = table("Currency").columns([
//!     column("id", DataType::BigInteger).primary_key().auto_numbered(10),
//!     column("code", DataType::String).width(3),
//! ]);
//!
//! assert_eq!(
//!     dialect.table_deployment_statements(&currency).unwrap(),
//!     vec![
//!         "DROP SEQUENCE IF EXISTS core.Currency_IDS_10",
//!         "CREATE SEQUENCE core.Currency_IDS_10 START WITH 10",
//!         "CREATE TABLE CORE.Currency (id BIGINT NOT NULL \
//!          GENERATED BY DEFAULT AS IDENTITY(Currency_IDS_10), \
//!          code VARCHAR(3) NOT NULL, PRIMARY KEY (id))",
//!     ]
//! );
//! ```

mod dialect;
mod expressions;
mod merge;

pub use dialect::{NuoDbDialect, TEMPORARY_TABLE_PREFIX};
