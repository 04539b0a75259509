#![allow(dead_code)]

use strata_sql_core::metadata::{column, index, table, Column, DataType, Table};
use strata_sql_core::DialectConfig;
use strata_sql_nuodb::NuoDbDialect;

pub fn nuodb() -> NuoDbDialect {
    NuoDbDialect::default()
}

pub fn nuodb_in_core_schema() -> NuoDbDialect {
    NuoDbDialect::new(DialectConfig::with_schema("core"))
}

pub fn nullable_string_column() -> Column {
    column("nullableStringCol", DataType::String)
        .width(10)
        .nullable()
}

/// `BasicTable`: an auto-numbered key and one nullable string column.
pub fn basic_table() -> Table {
    table("BasicTable").columns([
        column("id", DataType::Integer).primary_key().auto_numbered(1),
        nullable_string_column(),
    ])
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

/// `Product`: unindexed columns for nullability and default changes.
pub fn product_table() -> Table {
    table("Product").columns([
        column("id", DataType::BigInteger).primary_key(),
        column("description", DataType::String).width(20).nullable(),
        column("quantity", DataType::Integer),
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

/// Position of the first statement containing `needle`.
pub fn position_of(statements: &[String], needle: &str) -> usize {
    statements
        .iter()
        .position(|s| s.contains(needle))
        .unwrap_or_else(|| panic!("No statement contains {needle:?} in {statements:#?}"))
}
