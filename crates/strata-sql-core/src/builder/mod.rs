//! Builders for expressions and statements.
//!
//! Free functions start a value and fluent `self -> Self` methods refine it.
//! Builders own their data outright, so any partly built value can be cloned
//! and finished independently.
//!
//! # Example
//!
//! ```rust
//! use strata_sql_core::builder::{field, merge, select, table_ref};
//!
//! let staging = table_ref("AgreementStaging");
//! let statement = merge()
//!     .into_table(table_ref("Agreement"))
//!     .from(select([staging.field("id"), staging.field("code")]).from(staging.clone()))
//!     .table_unique_key([field("id")])
//!     .build();
//!
//! assert_eq!(statement.source.fields.len(), 2);
//! assert_eq!(statement, statement.deep_copy());
//! ```

mod delete;
mod expr;
mod insert;
mod merge;
mod select;
mod update;

pub use delete::delete;
pub use expr::{
    add_days, add_months, average, cast, coalesce, concat, count, count_of, date_to_yyyymmdd,
    date_to_yyyymmddhhmmss, days_between, decimal, divide, field, floor, function, is_null,
    last_day_of_month, left_pad, left_trim, length, literal, lower, max, min, minus, modulo,
    months_between, multiply, now, null_literal, plus, random_string, right_trim, round,
    substring, sum, table_ref, trim, upper, yyyymmdd_to_date, CastBuilder,
};
pub use insert::{insert, InsertBuilder};
pub use merge::{merge, HasSource, HasTable, MergeBuilder, NoSource, NoTable};
pub use select::select;
pub use update::update;
