//! NuoDB literal, expression and function rendering.

use strata_sql_core::ast::{Expr, Function, FunctionKind, Literal, NullOrdering, OrderBy};
use strata_sql_core::dialect::{ansi, SqlDialect};
use strata_sql_core::error::Result;

use crate::NuoDbDialect;

/// Blanks used as the padding source of `LEFT_PAD`.
const PADDING: &str = "                    ";

/// Doubles single quotes and splices backslashes in through `TRIM('\ ')`.
///
/// NuoDB treats `\` as an escape character, so a literal backslash next to
/// the closing quote would swallow it.
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''").replace('\\', "'||TRIM('\\ ')||'")
}

/// Dates as `DATE('..')` and fractional decimals as sized casts.
pub fn render_literal(dialect: &NuoDbDialect, literal: &Literal) -> Result<String> {
    literal.validate()?;
    match literal {
        Literal::Date(date) => Ok(format!("DATE('{}')", date.format("%Y-%m-%d"))),
        Literal::Decimal(value) if value.contains('.') => {
            let digits = value.chars().filter(char::is_ascii_digit).count();
            let scale = value
                .split_once('.')
                .map_or(0, |(_, fraction)| fraction.chars().filter(char::is_ascii_digit).count());
            Ok(format!(
                "CAST ('{}' AS DECIMAL({digits},{scale}))",
                dialect.escape_sql(value)
            ))
        }
        other => ansi::render_literal(dialect, other),
    }
}

/// Casts arithmetic back to NUMBER and treats NULL as empty in concatenation.
pub fn render_expr(dialect: &NuoDbDialect, expr: &Expr) -> Result<String> {
    match expr {
        Expr::Maths(maths) => Ok(format!(
            "CAST(({} {} {}) AS NUMBER)",
            dialect.render_expr(&maths.left)?,
            maths.operator.as_str(),
            dialect.render_expr(&maths.right)?
        )),
        Expr::Concat(concat) => Ok(concat
            .fields
            .iter()
            .map(|field| Ok(format!("COALESCE({},'')", dialect.render_expr(field)?)))
            .collect::<Result<Vec<_>>>()?
            .join(" || ")),
        Expr::Function(function) => render_function(dialect, function),
        other => ansi::render_expr(dialect, other),
    }
}

fn render_function(dialect: &NuoDbDialect, function: &Function) -> Result<String> {
    let args = function.checked_args()?;
    let arg = |i: usize| dialect.render_expr(&args[i]);

    Ok(match function.kind {
        FunctionKind::Now => "CURRENT_TIMESTAMP()".to_string(),
        FunctionKind::DaysBetween => {
            format!("CAST({} AS DATE) - CAST({} AS DATE)", arg(0)?, arg(1)?)
        }
        FunctionKind::MonthsBetween => months_between(&arg(0)?, &arg(1)?),
        FunctionKind::AddDays => format!("DATE_ADD({}, INTERVAL {} DAY)", arg(0)?, arg(1)?),
        FunctionKind::AddMonths => format!("DATE_ADD({}, INTERVAL {} MONTH)", arg(0)?, arg(1)?),
        FunctionKind::YyyymmddToDate => format!("DATE_FROM_STR({}, 'yyyyMMdd')", arg(0)?),
        FunctionKind::DateToYyyymmdd => {
            format!("CAST(DATE_TO_STR({}, 'yyyyMMdd') AS INT)", arg(0)?)
        }
        FunctionKind::DateToYyyymmddHhmmss => {
            format!("CAST(DATE_TO_STR({}, 'yyyyMMddHHmmss') AS BIGINT)", arg(0)?)
        }
        FunctionKind::LeftTrim => format!("LTRIM({})", arg(0)?),
        FunctionKind::RightTrim => format!("RTRIM({})", arg(0)?),
        FunctionKind::LeftPad => left_pad(&arg(0)?, &arg(1)?, &arg(2)?),
        FunctionKind::RandomString => {
            format!("SUBSTRING(CAST(RAND() AS STRING), 3, {})", arg(0)?)
        }
        FunctionKind::LastDayOfMonth => {
            let date = arg(0)?;
            format!(
                "DATE_SUB(DATE_ADD(DATE_SUB({date}, INTERVAL DAY({date})-1 DAY), \
                 INTERVAL 1 MONTH), INTERVAL 1 DAY)"
            )
        }
        _ => return ansi::render_function(dialect, function),
    })
}

/// Whole months from `from` to `to`, counting a month only once its day of
/// month is reached. Month ends count as reaching every later day.
fn months_between(to: &str, from: &str) -> String {
    format!(
        "((EXTRACT(YEAR FROM {to}) - EXTRACT(YEAR FROM {from})) * 12 \
         + (EXTRACT(MONTH FROM {to}) - EXTRACT(MONTH FROM {from})) \
         + CASE WHEN {to} > {from} \
         THEN CASE WHEN EXTRACT(DAY FROM {to}) >= EXTRACT(DAY FROM {from}) THEN 0 \
         WHEN EXTRACT(MONTH FROM {to}) <> EXTRACT(MONTH FROM {to} + 1) THEN 0 ELSE -1 END \
         ELSE CASE WHEN EXTRACT(MONTH FROM {from}) <> EXTRACT(MONTH FROM {from} + 1) THEN 0 \
         WHEN EXTRACT(DAY FROM {from}) >= EXTRACT(DAY FROM {to}) THEN 0 ELSE 1 END END)"
    )
}

fn left_pad(field: &str, length: &str, character: &str) -> String {
    let padding = format!("REPLACE('{PADDING}', ' ', {character})");
    let pad_length = format!("{length} - LENGTH(CAST({field} AS STRING))");
    format!(
        "CASE WHEN {pad_length} > 0 \
         THEN SUBSTRING({padding}, 1, {pad_length}) || {field} \
         ELSE SUBSTRING({field}, 1, {length}) END"
    )
}

/// Emulates NULLS FIRST/LAST with a leading boolean sort key.
pub fn render_order_by(dialect: &NuoDbDialect, order_by: &OrderBy) -> Result<String> {
    let expr = dialect.render_expr(&order_by.expr)?;
    let entry = format!("{expr} {}", order_by.direction.as_str());
    Ok(match order_by.nulls {
        Some(NullOrdering::First) => format!("{expr} IS NOT NULL, {entry}"),
        Some(NullOrdering::Last) => format!("{expr} IS NULL, {entry}"),
        None => entry,
    })
}
