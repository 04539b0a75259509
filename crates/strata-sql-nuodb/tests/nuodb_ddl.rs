//! NuoDB schema deployment and schema change statements.

mod common;

use common::{
    agreement_table, basic_table, nullable_string_column, nuodb, nuodb_in_core_schema,
    position_of, product_table, staging_table,
};
use strata_sql_core::builder::{field, select, table_ref};
use strata_sql_core::metadata::{column, table, view, DataType};
use strata_sql_core::{DialectError, IdTable, SchemaChange, SqlDialect};

// =============================================================================
// Deployment and removal
// =============================================================================

#[test]
fn test_basic_table_deployment() {
    assert_eq!(
        nuodb().table_deployment_statements(&basic_table()).unwrap(),
        vec![
            "DROP SEQUENCE IF EXISTS BasicTable_IDS_1",
            "CREATE SEQUENCE BasicTable_IDS_1 START WITH 1",
            "CREATE TABLE BasicTable (id INTEGER NOT NULL \
             GENERATED BY DEFAULT AS IDENTITY(BasicTable_IDS_1), \
             nullableStringCol VARCHAR(10), PRIMARY KEY (id))",
        ]
    );
}

#[test]
fn test_indexed_table_deployment_in_schema() {
    assert_eq!(
        nuodb_in_core_schema()
            .table_deployment_statements(&agreement_table())
            .unwrap(),
        vec![
            "CREATE TABLE CORE.Agreement (agreementNumber VARCHAR(17) NOT NULL, \
             version INTEGER NOT NULL, currencyCode VARCHAR(3) DEFAULT 'GBP' NOT NULL, \
             amount DECIMAL(13,2), startDate DATE, \
             PRIMARY KEY (agreementNumber, version))",
            "DROP INDEX IF EXISTS CORE.Agreement_1",
            "CREATE INDEX Agreement_1 ON CORE.Agreement (currencyCode)",
            "DROP INDEX IF EXISTS CORE.Agreement_2",
            "CREATE UNIQUE INDEX Agreement_2 ON CORE.Agreement (agreementNumber,startDate)",
        ]
    );
}

#[test]
fn test_drop_statements_remove_indexes_sequences_then_table() {
    assert_eq!(
        nuodb_in_core_schema()
            .drop_statements(&agreement_table())
            .unwrap(),
        vec![
            "DROP INDEX IF EXISTS CORE.Agreement_1",
            "DROP INDEX IF EXISTS CORE.Agreement_2",
            "DROP TABLE CORE.Agreement",
        ]
    );
    assert_eq!(
        nuodb().drop_statements(&basic_table()).unwrap(),
        vec![
            "DROP SEQUENCE IF EXISTS BasicTable_IDS_1",
            "DROP TABLE BasicTable",
        ]
    );
}

#[test]
fn test_view_truncate_and_delete_all() {
    let dialect = nuodb_in_core_schema();
    let agreement = agreement_table();
    let agreement_view = view("AgreementView")
        .as_select(select([field("agreementNumber")]).from(table_ref("Agreement")));

    assert_eq!(
        dialect.drop_view_statements(&agreement_view).unwrap(),
        vec!["DROP VIEW core.AgreementView IF EXISTS CASCADE"]
    );
    assert_eq!(
        dialect.truncate_table_statements(&agreement).unwrap(),
        vec!["truncate table CORE.Agreement"]
    );
    assert_eq!(
        dialect.delete_all_from_table_statements(&agreement).unwrap(),
        vec!["delete from CORE.Agreement"]
    );
    assert_eq!(
        dialect.truncate_table_statements(&table(" ")),
        Err(DialectError::BlankTableName)
    );
}

// =============================================================================
// Temporary tables
// =============================================================================

#[test]
fn test_temporary_tables_are_never_qualified() {
    let dialect = nuodb_in_core_schema();
    let staging_select = select([field("amount")]).from(table_ref("AgreementStaging"));

    assert_eq!(
        dialect.render_select(&staging_select).unwrap(),
        "SELECT amount FROM core.AgreementStaging"
    );

    assert_eq!(
        dialect.table_deployment_statements(&staging_table()).unwrap(),
        vec![
            "CREATE TEMPORARY TABLE AgreementStaging \
             (agreementNumber VARCHAR(17) NOT NULL, amount DECIMAL(13,2))"
        ]
    );
    assert_eq!(
        dialect.render_select(&staging_select).unwrap(),
        "SELECT amount FROM AgreementStaging"
    );

    assert_eq!(
        dialect.drop_statements(&staging_table()).unwrap(),
        vec!["DROP TABLE AgreementStaging"]
    );
    assert_eq!(
        dialect.render_select(&staging_select).unwrap(),
        "SELECT amount FROM core.AgreementStaging"
    );
}

// =============================================================================
// Column changes
// =============================================================================

#[test]
fn test_narrowing_a_string_column_is_a_single_statement() {
    let from = nullable_string_column();
    let to = nullable_string_column().width(8);
    let table = basic_table().with_column_replaced(&from.name, to.clone());

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&table, &from, &to)
            .unwrap(),
        vec!["ALTER TABLE BasicTable ALTER COLUMN nullableStringCol TYPE VARCHAR(8)"]
    );
}

#[test]
fn test_renaming_a_key_column_rebuilds_key_and_indexes() {
    let original = agreement_table();
    let from = original.column("agreementNumber").unwrap().clone();
    let to = from.clone().renamed("agreementRef");
    let table = original.with_column_replaced("agreementNumber", to.clone());

    let statements = nuodb()
        .alter_table_change_column_statements(&table, &from, &to)
        .unwrap();
    assert_eq!(
        statements,
        vec![
            "DROP INDEX Agreement_2",
            "DROP INDEX IF EXISTS \"AGREEMENT..PRIMARY_KEY\"",
            "ALTER TABLE Agreement RENAME COLUMN agreementNumber TO agreementRef",
            "ALTER TABLE Agreement ADD PRIMARY KEY (agreementRef, version)",
            "CREATE UNIQUE INDEX Agreement_2 ON Agreement (agreementRef,startDate)",
        ]
    );
    assert!(position_of(&statements, "PRIMARY_KEY") < position_of(&statements, "RENAME COLUMN"));
}

#[test]
fn test_key_column_type_changes_happen_without_the_key() {
    let before = agreement_table();

    let from = before.column("agreementNumber").unwrap().clone();
    let to = from.clone().width(20);
    let after = before.clone().with_column_replaced("agreementNumber", to.clone());
    let statements = nuodb()
        .alter_table_change_column_statements(&after, &from, &to)
        .unwrap();
    let drop_key = position_of(&statements, "\"AGREEMENT..PRIMARY_KEY\"");
    let alter_type = position_of(&statements, "ALTER COLUMN agreementNumber TYPE VARCHAR(20)");
    let add_key = position_of(&statements, "ADD PRIMARY KEY (agreementNumber, version)");
    assert!(drop_key < alter_type, "{statements:#?}");
    assert!(alter_type < add_key, "{statements:#?}");

    let from = before.column("version").unwrap().clone();
    let to = column("version", DataType::BigInteger).primary_key();
    let after = before.with_column_replaced("version", to.clone());
    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&after, &from, &to)
            .unwrap(),
        vec![
            "DROP INDEX IF EXISTS \"AGREEMENT..PRIMARY_KEY\"",
            "ALTER TABLE Agreement ALTER COLUMN version TYPE BIGINT",
            "ALTER TABLE Agreement ADD PRIMARY KEY (agreementNumber, version)",
        ]
    );
}

#[test]
fn test_autonumber_toggle_goes_through_add_column() {
    let before = table("Ledger").columns([
        column("code", DataType::String).width(5).primary_key(),
        column("entryNo", DataType::Integer).auto_numbered(5),
    ]);
    let from = before.column("entryNo").unwrap().clone();
    let to = column("entryNo", DataType::Integer)
        .nullable()
        .default_value("0");
    let after = before.with_column_replaced("entryNo", to.clone());

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&after, &from, &to)
            .unwrap(),
        vec![
            "ALTER TABLE Ledger DROP COLUMN entryNo",
            "DROP SEQUENCE IF EXISTS Ledger_IDS_5",
            "ALTER TABLE Ledger ADD COLUMN entryNo INTEGER DEFAULT 0",
            "UPDATE Ledger SET entryNo = 0",
        ]
    );
}

#[test]
fn test_defaults_that_do_not_fit_the_column_type_are_rejected() {
    let t = table("T").columns([
        column("amount", DataType::Decimal)
            .width(13)
            .scale(2)
            .default_value("0); DROP TABLE T; --"),
        column("n", DataType::Integer).default_value("abc"),
    ]);
    assert_eq!(
        nuodb().table_deployment_statements(&t),
        Err(DialectError::InvalidDefault {
            table: "T".to_string(),
            column: "amount".to_string(),
            value: "0); DROP TABLE T; --".to_string(),
        })
    );
}

#[test]
fn test_new_default_on_nullable_column_restores_nullability() {
    let from = product_table().column("description").unwrap().clone();
    let to = from.clone().default_value("none");
    let table = product_table().with_column_replaced("description", to.clone());

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&table, &from, &to)
            .unwrap(),
        vec![
            "ALTER TABLE Product ALTER COLUMN description NOT NULL DEFAULT 'none'",
            "ALTER TABLE Product ALTER COLUMN description NULL",
        ]
    );
}

#[test]
fn test_new_default_on_not_null_column() {
    let from = product_table().column("quantity").unwrap().clone();
    let to = from.clone().default_value("0");
    let table = product_table().with_column_replaced("quantity", to.clone());

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&table, &from, &to)
            .unwrap(),
        vec!["ALTER TABLE Product ALTER COLUMN quantity NOT NULL DEFAULT 0"]
    );
}

#[test]
fn test_removing_a_default() {
    let from = product_table()
        .column("quantity")
        .unwrap()
        .clone()
        .default_value("0");
    let to = product_table().column("quantity").unwrap().clone();
    let table = product_table();

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&table, &from, &to)
            .unwrap(),
        vec![
            "ALTER TABLE Product ALTER COLUMN quantity DROP DEFAULT",
            "ALTER TABLE Product ALTER COLUMN quantity NOT NULL",
        ]
    );
}

#[test]
fn test_making_a_column_not_null_without_a_default() {
    let from = product_table().column("description").unwrap().clone();
    let to = column("description", DataType::String).width(20);
    let table = product_table().with_column_replaced("description", to.clone());

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&table, &from, &to)
            .unwrap(),
        vec![
            "ALTER TABLE Product ALTER COLUMN description NOT NULL DEFAULT 0",
            "ALTER TABLE Product ALTER COLUMN description DROP DEFAULT",
        ]
    );
}

#[test]
fn test_making_a_column_nullable() {
    let from = product_table().column("quantity").unwrap().clone();
    let to = from.clone().nullable();
    let table = product_table().with_column_replaced("quantity", to.clone());

    assert_eq!(
        nuodb()
            .alter_table_change_column_statements(&table, &from, &to)
            .unwrap(),
        vec!["ALTER TABLE Product ALTER COLUMN quantity NULL"]
    );
}

#[test]
fn test_unchanged_column_renders_nothing() {
    let column = product_table().column("quantity").unwrap().clone();
    assert!(nuodb()
        .alter_table_change_column_statements(&product_table(), &column, &column)
        .unwrap()
        .is_empty());
}

#[test]
fn test_new_nullable_column_with_default_is_back_filled() {
    let status = column("status", DataType::String)
        .width(1)
        .nullable()
        .default_value("A");
    let table = product_table().with_column(status.clone());

    assert_eq!(
        nuodb_in_core_schema()
            .alter_table_add_column_statements(&table, &status)
            .unwrap(),
        vec![
            "ALTER TABLE CORE.Product ADD COLUMN status VARCHAR(1) DEFAULT 'A'",
            "UPDATE CORE.Product SET status = 'A'",
        ]
    );
}

#[test]
fn test_new_not_null_column_is_not_back_filled() {
    let status = column("status", DataType::String).width(1).default_value("A");
    let table = product_table().with_column(status.clone());

    assert_eq!(
        nuodb()
            .alter_table_add_column_statements(&table, &status)
            .unwrap(),
        vec!["ALTER TABLE Product ADD COLUMN status VARCHAR(1) DEFAULT 'A' NOT NULL"]
    );
}

// =============================================================================
// Autonumber id table
// =============================================================================

#[test]
fn test_autonumber_update_uses_on_duplicate_key() {
    let id_table = IdTable::new("IdTable", "name", "nextValue");
    assert_eq!(
        nuodb_in_core_schema()
            .autonumber_update_statements(&table_ref("Agreement"), "id", &id_table)
            .unwrap(),
        vec![
            "INSERT INTO core.IdTable (name, nextValue) VALUES('Agreement', \
             (SELECT COALESCE(CAST((MAX(id) + 1) AS NUMBER), 1) AS CurrentValue \
             FROM core.Agreement)) \
             ON DUPLICATE KEY UPDATE nextValue = GREATEST(nextValue, VALUES(nextValue))"
        ]
    );
    assert!(nuodb()
        .autonumber_update_statements(&table_ref("autonumber"), "id", &id_table)
        .unwrap()
        .is_empty());
}

// =============================================================================
// Keys, tables and indexes
// =============================================================================

#[test]
fn test_change_primary_key() {
    let statements = nuodb()
        .change_primary_key_columns(
            &product_table(),
            &["id".to_string()],
            &["id".to_string(), "quantity".to_string()],
        )
        .unwrap();
    assert_eq!(
        statements,
        vec![
            "DROP INDEX IF EXISTS \"PRODUCT..PRIMARY_KEY\"",
            "ALTER TABLE Product ADD PRIMARY KEY (id, quantity)",
        ]
    );
}

#[test]
fn test_rename_table() {
    let from = agreement_table();
    let to = agreement_table().renamed("Contract");

    assert_eq!(
        nuodb().rename_table_statements(&from, &to).unwrap(),
        vec![
            "DROP INDEX IF EXISTS \"AGREEMENT..PRIMARY_KEY\"",
            "ALTER TABLE Agreement RENAME TO Contract",
            "ALTER TABLE Contract ADD PRIMARY KEY (agreementNumber, version)",
        ]
    );
}

#[test]
fn test_rename_index_from_either_side() {
    let before = agreement_table();
    let expected = vec![
        "DROP INDEX Agreement_1",
        "CREATE INDEX Agreement_Currency ON Agreement (currencyCode)",
    ];
    assert_eq!(
        nuodb()
            .rename_index_statements(&before, "Agreement_1", "Agreement_Currency")
            .unwrap(),
        expected
    );

    let renamed = before.index("Agreement_1").unwrap().renamed("Agreement_Currency");
    let after = agreement_table()
        .without_index("Agreement_1")
        .with_index(renamed);
    assert_eq!(
        nuodb()
            .rename_index_statements(&after, "Agreement_1", "Agreement_Currency")
            .unwrap(),
        expected
    );

    assert!(matches!(
        nuodb().rename_index_statements(&before, "Nope", "Nothing"),
        Err(DialectError::IndexNotFound { .. })
    ));
}

#[test]
fn test_schema_changes_dispatch_to_nuodb_overrides() {
    let dialect = nuodb();
    let index = agreement_table().index("Agreement_1").unwrap().clone();

    assert_eq!(
        dialect
            .schema_change_statements(&SchemaChange::AddIndex {
                table: agreement_table(),
                index: index.clone(),
            })
            .unwrap(),
        vec![
            "DROP INDEX IF EXISTS Agreement_1",
            "CREATE INDEX Agreement_1 ON Agreement (currencyCode)",
        ]
    );
    assert_eq!(
        dialect
            .schema_change_statements(&SchemaChange::RemoveIndex {
                table: agreement_table().without_index("Agreement_1"),
                index,
            })
            .unwrap(),
        vec!["DROP INDEX Agreement_1"]
    );
    assert_eq!(
        dialect
            .schema_change_statements(&SchemaChange::AddTable {
                table: basic_table(),
            })
            .unwrap()
            .len(),
        3
    );
}
