//! NuoDB statement and expression rendering.

mod common;

use chrono::NaiveDate;
use common::nuodb;
use strata_sql_core::builder::{
    add_days, add_months, concat, count, date_to_yyyymmdd, date_to_yyyymmddhhmmss, days_between,
    decimal, delete, field, insert, last_day_of_month, left_pad, left_trim, literal, merge,
    months_between, now, plus, random_string, right_trim, select, sum, table_ref, update,
    yyyymmdd_to_date,
};
use strata_sql_core::{DialectError, Expr, SqlDialect};

fn render(expr: &Expr) -> String {
    nuodb().render_expr(expr).unwrap()
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn test_merge_renders_insert_on_duplicate_key_update() {
    let staging = table_ref("AgreementStaging");
    let statement = merge()
        .into_table(table_ref("Agreement"))
        .from(
            select([staging.field("agreementNumber"), staging.field("amount")])
                .from(staging.clone()),
        )
        .table_unique_key([field("agreementNumber")])
        .build();

    assert_eq!(
        nuodb().render_merge(&statement).unwrap(),
        "INSERT INTO Agreement(agreementNumber, amount) \
         SELECT AgreementStaging.agreementNumber, AgreementStaging.amount FROM AgreementStaging \
         ON DUPLICATE KEY UPDATE agreementNumber = values(agreementNumber), amount = values(amount)"
    );
}

#[test]
fn test_merge_target_in_explicit_schema_is_upper_cased() {
    let statement = merge()
        .into_table(table_ref("Agreement").in_schema("core"))
        .from(select([field("amount")]).from(table_ref("AgreementStaging")))
        .build();

    assert!(nuodb()
        .render_merge(&statement)
        .unwrap()
        .starts_with("INSERT INTO CORE.Agreement(amount) SELECT amount"));
}

#[test]
fn test_merge_with_unnamed_source_field_is_rejected() {
    let statement = merge()
        .into_table(table_ref("Agreement"))
        .from(select([literal(1)]).from(table_ref("AgreementStaging")))
        .build();

    assert_eq!(
        nuodb().render_merge(&statement),
        Err(DialectError::UnnamedField("Agreement".to_string()))
    );
}

#[test]
fn test_select_without_from_uses_dual() {
    assert_eq!(
        nuodb().render_select(&select([literal(1)])).unwrap(),
        "SELECT 1 FROM dual"
    );
}

#[test]
fn test_order_by_emulates_null_ordering() {
    let statement = select([field("amount")])
        .from(table_ref("Agreement"))
        .order_by([
            field("amount").desc().nulls_first(),
            field("startDate").asc().nulls_last(),
            field("version").asc(),
        ]);

    assert_eq!(
        nuodb().render_select(&statement).unwrap(),
        "SELECT amount FROM Agreement ORDER BY amount IS NOT NULL, amount DESC, \
         startDate IS NULL, startDate ASC, version ASC"
    );
}

#[test]
fn test_like_has_no_escape_clause() {
    let statement = select([field("code")])
        .from(table_ref("Currency"))
        .where_clause(field("code").like(literal("G%")));

    assert_eq!(
        nuodb().render_select(&statement).unwrap(),
        "SELECT code FROM Currency WHERE code LIKE 'G%'"
    );
}

#[test]
fn test_insert_update_and_delete() {
    let dialect = nuodb();
    let agreement = table_ref("Agreement");

    assert_eq!(
        dialect
            .render_insert(
                &insert(agreement.clone())
                    .columns(["amount", "startDate"])
                    .values([
                        decimal("12.50").unwrap(),
                        literal(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
                    ])
            )
            .unwrap(),
        "INSERT INTO Agreement (amount, startDate) \
         VALUES (CAST ('12.50' AS DECIMAL(4,2)), DATE('2024-01-31'))"
    );
    assert_eq!(
        dialect
            .render_update(
                &update(agreement.clone())
                    .set([plus(field("amount"), literal(1)).alias("amount")])
                    .where_clause(field("version").eq(literal(2)))
            )
            .unwrap(),
        "UPDATE Agreement SET amount = CAST((amount + 1) AS NUMBER) WHERE version = 2"
    );
    assert_eq!(
        dialect
            .render_delete(&delete(agreement).where_clause(field("amount").is_null()))
            .unwrap(),
        "DELETE FROM Agreement WHERE amount IS NULL"
    );
}

// =============================================================================
// Literals and expressions
// =============================================================================

#[test]
fn test_string_literals_are_escaped() {
    assert_eq!(render(&literal("O'Brien")), "'O''Brien'");
    assert_eq!(render(&literal("C:\\")), "'C:'||TRIM('\\ ')||''");
}

#[test]
fn test_maths_and_concat() {
    assert_eq!(
        render(&plus(field("a"), plus(field("b"), literal(1)))),
        "CAST((a + CAST((b + 1) AS NUMBER)) AS NUMBER)"
    );
    assert_eq!(
        render(&concat([field("first"), literal(" "), field("last")])),
        "COALESCE(first,'') || COALESCE(' ','') || COALESCE(last,'')"
    );
}

#[test]
fn test_overrides_reach_nested_function_arguments() {
    assert_eq!(
        render(&sum(plus(field("a"), field("b")))),
        "SUM(CAST((a + b) AS NUMBER))"
    );
    assert_eq!(render(&count()), "COUNT(*)");
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn test_date_functions() {
    assert_eq!(render(&now()), "CURRENT_TIMESTAMP()");
    assert_eq!(
        render(&days_between(field("endDate"), field("startDate"))),
        "CAST(endDate AS DATE) - CAST(startDate AS DATE)"
    );
    assert_eq!(
        render(&add_days(field("startDate"), literal(7))),
        "DATE_ADD(startDate, INTERVAL 7 DAY)"
    );
    assert_eq!(
        render(&add_months(field("startDate"), literal(3))),
        "DATE_ADD(startDate, INTERVAL 3 MONTH)"
    );
    assert_eq!(
        render(&last_day_of_month(field("d"))),
        "DATE_SUB(DATE_ADD(DATE_SUB(d, INTERVAL DAY(d)-1 DAY), INTERVAL 1 MONTH), INTERVAL 1 DAY)"
    );

    let months = render(&months_between(field("endDate"), field("startDate")));
    assert!(months.starts_with("((EXTRACT(YEAR FROM endDate) - EXTRACT(YEAR FROM startDate)) * 12"));
    assert!(months.ends_with("END END)"));
}

#[test]
fn test_date_conversions() {
    assert_eq!(
        render(&yyyymmdd_to_date(field("d"))),
        "DATE_FROM_STR(d, 'yyyyMMdd')"
    );
    assert_eq!(
        render(&date_to_yyyymmdd(field("d"))),
        "CAST(DATE_TO_STR(d, 'yyyyMMdd') AS INT)"
    );
    assert_eq!(
        render(&date_to_yyyymmddhhmmss(field("d"))),
        "CAST(DATE_TO_STR(d, 'yyyyMMddHHmmss') AS BIGINT)"
    );
}

#[test]
fn test_string_functions() {
    assert_eq!(render(&left_trim(field("code"))), "LTRIM(code)");
    assert_eq!(render(&right_trim(field("code"))), "RTRIM(code)");
    assert_eq!(
        render(&random_string(literal(8))),
        "SUBSTRING(CAST(RAND() AS STRING), 3, 8)"
    );
    assert_eq!(
        render(&left_pad(field("code"), literal(5), literal("0"))),
        "CASE WHEN 5 - LENGTH(CAST(code AS STRING)) > 0 \
         THEN SUBSTRING(REPLACE('                    ', ' ', '0'), 1, 5 - LENGTH(CAST(code AS STRING))) || code \
         ELSE SUBSTRING(code, 1, 5) END"
    );
}

#[test]
fn test_function_arity_is_checked() {
    let wrong = strata_sql_core::builder::function(
        strata_sql_core::ast::FunctionKind::AddDays,
        [field("startDate")],
    );
    assert!(matches!(
        nuodb().render_expr(&wrong),
        Err(DialectError::InvalidArguments {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}
