#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use strata_sql_core::metadata::{column, index, table, Column, DataType, Table};

/// The integer primary key of [`basic_table`], auto-numbered from 1.
pub fn id_column() -> Column {
    column("id", DataType::Integer).primary_key().auto_numbered(1)
}

/// The nullable `STRING(10)` column of [`basic_table`].
pub fn nullable_string_column() -> Column {
    column("nullableStringCol", DataType::String)
        .width(10)
        .nullable()
}

/// `BasicTable`: an auto-numbered key and one nullable string column.
pub fn basic_table() -> Table {
    table("BasicTable").columns([id_column(), nullable_string_column()])
}

/// `Agreement`: a composite key, a defaulted column and two indexes.
pub fn agreement_table() -> Table {
    table("Agreement")
        .columns([
            column("agreementNumber", DataType::String)
                .width(17)
                .primary_key(),
            column("version", DataType::Integer).primary_key(),
            column("currencyCode", DataType::String)
                .width(3)
                .default_value("GBP"),
            column("amount", DataType::Decimal).width(13).scale(2).nullable(),
            column("startDate", DataType::Date).nullable(),
        ])
        .indexes([
            index("Agreement_1").columns(["currencyCode"]),
            index("Agreement_2")
                .columns(["agreementNumber", "startDate"])
                .unique(),
        ])
}

/// A temporary staging table.
pub fn staging_table() -> Table {
    table("AgreementStaging")
        .columns([
            column("agreementNumber", DataType::String).width(17),
            column("amount", DataType::Decimal).width(13).scale(2).nullable(),
        ])
        .temporary()
}

pub fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Position of the first statement containing `needle`.
pub fn position_of(statements: &[String], needle: &str) -> usize {
    statements
        .iter()
        .position(|s| s.contains(needle))
        .unwrap_or_else(|| panic!("No statement contains {needle:?} in {statements:#?}"))
}
