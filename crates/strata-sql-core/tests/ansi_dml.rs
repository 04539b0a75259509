//! Statement and expression rendering through the ANSI dialect.

use chrono::NaiveDate;
use strata_sql_core::ast::{Expr, FunctionKind, Literal, Statement};
use strata_sql_core::builder::{
    add_days, cast, coalesce, concat, count, date_to_yyyymmdd, days_between, decimal, delete,
    divide, field, function, insert, is_null, left_pad, literal, merge, minus, null_literal, plus,
    random_string, select, substring, sum, table_ref, update,
};
use strata_sql_core::metadata::DataType;
use strata_sql_core::{AnsiDialect, DialectError, SqlDialect};

fn render(statement: impl Into<Statement>) -> String {
    AnsiDialect::default()
        .render_statement(&statement.into())
        .unwrap()
}

fn render_expr(expr: &strata_sql_core::Expr) -> String {
    AnsiDialect::default().render_expr(expr).unwrap()
}

// =============================================================================
// SELECT
// =============================================================================

#[test]
fn test_select_with_every_clause() {
    let a = table_ref("Agreement").alias("a");
    let c = table_ref("Currency").alias("c");
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let query = select([
        a.field("agreementNumber"),
        sum(a.field("amount")).alias("total"),
    ])
    .from(a.clone())
    .left_outer_join(c.clone(), c.field("code").eq(a.field("currencyCode")))
    .where_clause(
        a.field("startDate")
            .gt_eq(literal(start))
            .and(c.field("name").like(literal("Pound%"))),
    )
    .group_by([a.field("agreementNumber")])
    .having(sum(a.field("amount")).gt(literal(0)))
    .order_by([a.field("agreementNumber").asc().nulls_last()]);

    assert_eq!(
        render(query),
        "SELECT a.agreementNumber, SUM(a.amount) AS total FROM Agreement a \
         LEFT OUTER JOIN Currency c ON c.code = a.currencyCode \
         WHERE (a.startDate >= DATE '2024-01-01' AND c.name LIKE 'Pound%' ESCAPE '\\') \
         GROUP BY a.agreementNumber HAVING SUM(a.amount) > 0 \
         ORDER BY a.agreementNumber ASC NULLS LAST"
    );
}

#[test]
fn test_select_distinct_inner_join_and_or() {
    let query = select([field("code")])
        .distinct()
        .from(table_ref("Currency").in_schema("ref"))
        .inner_join(
            table_ref("Agreement"),
            field("currencyCode").eq(field("code")),
        )
        .where_clause(
            field("code")
                .in_list([literal("GBP"), literal("EUR")])
                .or(field("code").is_null().not()),
        );
    assert_eq!(
        render(query),
        "SELECT DISTINCT code FROM ref.Currency INNER JOIN Agreement ON currencyCode = code \
         WHERE (code IN ('GBP', 'EUR') OR NOT (code IS NULL))"
    );
}

#[test]
fn test_hints_are_ignored() {
    let query = select([field("id")])
        .from(table_ref("Agreement"))
        .use_index(table_ref("Agreement"), "Agreement_1")
        .optimise_for_row_count(10);
    assert_eq!(render(query), "SELECT id FROM Agreement");
}

#[test]
fn test_blank_table_reference_is_rejected() {
    let query = select([field("id")]).from(table_ref(""));
    assert_eq!(
        AnsiDialect::default().render_select(&query),
        Err(DialectError::BlankTableName)
    );
}

// =============================================================================
// MERGE, INSERT, UPDATE, DELETE
// =============================================================================

#[test]
fn test_merge() {
    let staging = table_ref("AgreementStaging");
    let statement = merge()
        .into_table(table_ref("Agreement"))
        .from(select([staging.field("agreementNumber"), staging.field("amount")]).from(staging))
        .table_unique_key([field("agreementNumber")])
        .build();
    assert_eq!(
        render(statement),
        "MERGE INTO Agreement USING (SELECT AgreementStaging.agreementNumber, \
         AgreementStaging.amount FROM AgreementStaging) xmergesource \
         ON (Agreement.agreementNumber = xmergesource.agreementNumber) \
         WHEN MATCHED THEN UPDATE SET amount = xmergesource.amount \
         WHEN NOT MATCHED THEN INSERT (agreementNumber, amount) \
         VALUES (xmergesource.agreementNumber, xmergesource.amount)"
    );
}

#[test]
fn test_merge_of_key_only_has_no_update() {
    let statement = merge()
        .into_table(table_ref("Currency"))
        .from(select([field("code")]).from(table_ref("CurrencyStaging")))
        .table_unique_key([field("code")])
        .build();
    let sql = render(statement);
    assert!(!sql.contains("WHEN MATCHED"));
    assert!(sql.ends_with("WHEN NOT MATCHED THEN INSERT (code) VALUES (xmergesource.code)"));
}

#[test]
fn test_merge_rejects_unnamed_key() {
    let statement = merge()
        .into_table(table_ref("Agreement"))
        .from(select([field("id")]).from(table_ref("AgreementStaging")))
        .table_unique_key([literal(1)])
        .build();
    assert_eq!(
        AnsiDialect::default().render_merge(&statement),
        Err(DialectError::UnnamedMergeKey("Agreement".to_string()))
    );
}

#[test]
fn test_insert_values_and_select() {
    let values = insert(table_ref("Currency"))
        .columns(["code", "name"])
        .values([literal("GBP"), literal("Pound Sterling")]);
    assert_eq!(
        render(values),
        "INSERT INTO Currency (code, name) VALUES ('GBP', 'Pound Sterling')"
    );

    let from_select = insert(table_ref("Currency"))
        .from_select(select([field("code"), field("name")]).from(table_ref("CurrencyStaging")));
    assert_eq!(
        render(from_select),
        "INSERT INTO Currency SELECT code, name FROM CurrencyStaging"
    );
}

#[test]
fn test_update_and_delete() {
    let statement = update(table_ref("Agreement"))
        .set([literal("USD").alias("currencyCode"), null_literal().alias("amount")])
        .where_clause(field("currencyCode").eq(literal("GBP")));
    assert_eq!(
        render(statement),
        "UPDATE Agreement SET currencyCode = 'USD', amount = null WHERE currencyCode = 'GBP'"
    );

    let statement = delete(table_ref("Agreement")).where_clause(field("amount").is_null());
    assert_eq!(render(statement), "DELETE FROM Agreement WHERE amount IS NULL");
    assert_eq!(render(delete(table_ref("Agreement"))), "DELETE FROM Agreement");
}

#[test]
fn test_update_rejects_unnamed_assignment() {
    let statement = update(table_ref("Agreement")).set([literal(1)]);
    assert_eq!(
        AnsiDialect::default().render_update(&statement),
        Err(DialectError::UnnamedField("Agreement".to_string()))
    );
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn test_quotes_are_doubled() {
    assert_eq!(render_expr(&literal("it's")), "'it''s'");
    assert_eq!(render_expr(&literal("''")), "''''''");
}

#[test]
fn test_literals() {
    assert_eq!(render_expr(&literal(true)), "TRUE");
    assert_eq!(render_expr(&literal(false)), "FALSE");
    assert_eq!(render_expr(&decimal("12.50").unwrap()), "12.50");
    assert_eq!(render_expr(&null_literal()), "null");
}

#[test]
fn test_malformed_decimals_are_rejected() {
    assert_eq!(
        decimal("1 OR 1=1"),
        Err(DialectError::InvalidDecimal("1 OR 1=1".to_string()))
    );
    let smuggled = Expr::Literal(Literal::Decimal("1 OR 1=1".to_string()));
    assert_eq!(
        AnsiDialect::default().render_expr(&smuggled),
        Err(DialectError::InvalidDecimal("1 OR 1=1".to_string()))
    );
}

#[test]
fn test_casts() {
    assert_eq!(
        render_expr(&cast(literal(1)).as_string(1)),
        "CAST(1 AS VARCHAR(1))"
    );
    assert_eq!(
        render_expr(&cast(field("amount")).as_sized(DataType::Decimal, 13, 2)),
        "CAST(amount AS DECIMAL(13,2))"
    );
    assert_eq!(
        AnsiDialect::default().render_expr(&cast(field("x")).as_type(DataType::Null)),
        Err(DialectError::UnmappedDataType(DataType::Null))
    );
}

#[test]
fn test_maths_and_concat() {
    let expr = divide(minus(field("a"), field("b")), plus(field("c"), literal(1)));
    assert_eq!(render_expr(&expr), "(a - b) / (c + 1)");
    assert_eq!(
        render_expr(&concat([field("first"), literal(" "), field("last")])),
        "CONCAT(first, ' ', last)"
    );
}

#[test]
fn test_functions() {
    assert_eq!(render_expr(&count()), "COUNT(*)");
    assert_eq!(
        render_expr(&coalesce([field("a"), field("b"), literal(0)])),
        "COALESCE(a, b, 0)"
    );
    assert_eq!(render_expr(&is_null(field("a"), literal(0))), "COALESCE(a, 0)");
    assert_eq!(
        render_expr(&days_between(field("endDate"), field("startDate"))),
        "EXTRACT(DAY FROM (endDate - startDate))"
    );
    assert_eq!(
        render_expr(&add_days(field("startDate"), literal(7))),
        "(startDate + 7 * INTERVAL '1' DAY)"
    );
    assert_eq!(
        render_expr(&date_to_yyyymmdd(field("startDate"))),
        "CAST(TO_CHAR(startDate, 'YYYYMMDD') AS INTEGER)"
    );
    assert_eq!(
        render_expr(&left_pad(field("code"), literal(5), literal("0"))),
        "LPAD(code, 5, '0')"
    );
    assert_eq!(
        render_expr(&substring(field("code"), literal(1), literal(2))),
        "SUBSTRING(code, 1, 2)"
    );
}

#[test]
fn test_function_arity_is_checked() {
    let broken = function(FunctionKind::Substring, [field("code")]);
    assert_eq!(
        AnsiDialect::default().render_expr(&broken),
        Err(DialectError::InvalidArguments {
            function: "SUBSTRING",
            expected: 3,
            actual: 1,
        })
    );
}

#[test]
fn test_random_string_is_unsupported() {
    let err = AnsiDialect::default()
        .render_expr(&random_string(literal(8)))
        .unwrap_err();
    assert!(err.is_unsupported());
    assert!(!err.is_configuration());
}

#[test]
fn test_syntax_hooks() {
    let dialect = AnsiDialect::default();
    assert_eq!(dialect.connection_test_statement(), "SELECT 1");
    assert_eq!(dialect.from_dummy_table(), "");
    assert_eq!(dialect.decorate_temporary_table_name("Staging"), "Staging");
}
