//! Ordered schema upgrades on top of `strata-sql-core`.
//!
//! `strata-upgrade` consumes upgrade steps in the order the caller supplies
//! them. It never discovers, sorts or reverses steps: sequence numbers only
//! have to increase, and each id may appear once.
//!
//! # Architecture
//!
//! - **Edits** ([`SchemaEdit`]) - intents such as "rename column X of table
//!   T", naming things by their current names
//! - **Snapshot** ([`SchemaSnapshot`]) - the schema the applied steps have
//!   produced; it turns each edit into a full before/after
//!   [`SchemaChange`](strata_sql_core::SchemaChange)
//! - **Runner** ([`UpgradeRunner`]) - renders the changes through a
//!   [`SqlDialect`](strata_sql_core::SqlDialect) and hands the statements
//!   to a [`SqlExecutor`]
//! - **History** ([`UpgradeHistory`]) - which steps have run, for ordering
//!   checks across runs
//!
//! # Example
//!
//! ```rust
//! use strata_sql_core::metadata::{column, table, DataType};
//! use strata_sql_core::AnsiDialect;
//! use strata_upgrade::prelude::*;
//!
//! let steps = [
//!     UpgradeStep::new("create-currency", 1).edit(SchemaEdit::add_table(
//!         table("Currency").columns([column("code", DataType::String).width(3).primary_key()]),
//!     )),
//!     UpgradeStep::new("widen-code", 2).edit(SchemaEdit::change_column(
//!         "Currency",
//!         "code",
//!         column("code", DataType::String).width(5).primary_key(),
//!     )),
//! ];
//!
//! let mut runner = UpgradeRunner::new(AnsiDialect::default(), Vec::new());
//! runner.apply_all(&steps).unwrap();
//!
//! let (executed, snapshot, _history) = runner.into_parts();
//! assert_eq!(
//!     executed,
//!     vec![
//!         "CREATE TABLE Currency (code VARCHAR(3) NOT NULL, \
//!          CONSTRAINT Currency_PK PRIMARY KEY (code))",
//!         "ALTER TABLE Currency DROP CONSTRAINT Currency_PK",
//!         "ALTER TABLE Currency ALTER COLUMN code SET DATA TYPE VARCHAR(5)",
//!         "ALTER TABLE Currency ADD CONSTRAINT Currency_PK PRIMARY KEY (code)",
//!     ]
//! );
//! assert_eq!(snapshot.table("Currency").unwrap().columns[0].width, 5);
//! ```

pub mod error;
pub mod executor;
pub mod history;
pub mod operations;
pub mod state;

pub use error::{Result, UpgradeError};
pub use executor::{SqlExecutor, UpgradeRunner, UpgradeStep};
pub use history::{AppliedStep, UpgradeHistory};
pub use operations::SchemaEdit;
pub use state::SchemaSnapshot;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, UpgradeError};
    pub use crate::executor::{SqlExecutor, UpgradeRunner, UpgradeStep};
    pub use crate::history::{AppliedStep, UpgradeHistory};
    pub use crate::operations::SchemaEdit;
    pub use crate::state::SchemaSnapshot;
}
