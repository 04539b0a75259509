//! Schema metadata: the static shape of tables, columns, indexes and views.
//!
//! Metadata values are built with small constructor functions and fluent
//! `self -> Self` methods:
//!
//! ```rust
//! use strata_sql_core::metadata::{column, index, table, DataType};
//!
//! let agreement = table("Agreement")
//!     .columns([
//!         column("id", DataType::BigInteger).primary_key().auto_numbered(1),
//!         column("agreementNumber", DataType::String).width(17),
//!     ])
//!     .indexes([index("Agreement_1").columns(["agreementNumber"]).unique()]);
//!
//! assert!(agreement.validate().is_ok());
//! assert_eq!(agreement.primary_key(), vec!["id"]);
//! ```

mod column;
mod data_type;
mod index;
mod table;

pub use column::{column, Column, AUTO_NUMBER_DEFAULT_START};
pub use data_type::DataType;
pub use index::{index, Index};
pub use table::{
    indexes_referencing_column, names_of_columns, primary_keys_for_table, table, view, Table, View,
};
