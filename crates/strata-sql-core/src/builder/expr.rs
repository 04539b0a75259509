//! Expression and criterion builders.

use chrono::NaiveDate;

use crate::ast::{
    Cast, ConcatenatedField, Criterion, Expr, FieldReference, Function, FunctionKind, Literal,
    MathsField, MathsOperator, OrderBy, TableReference,
};
use crate::error::Result;
use crate::metadata::DataType;

/// Creates an unqualified field reference.
#[must_use]
pub fn field(name: impl Into<String>) -> Expr {
    Expr::Field(FieldReference {
        table: None,
        name: name.into(),
    })
}

/// Creates a table reference.
#[must_use]
pub fn table_ref(name: impl Into<String>) -> TableReference {
    TableReference::new(name)
}

impl TableReference {
    /// Creates a field reference qualified by this table.
    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Expr {
        Expr::Field(FieldReference {
            table: Some(self.clone()),
            name: name.into(),
        })
    }
}

/// Creates a literal expression.
#[must_use]
pub fn literal(value: impl Into<Literal>) -> Expr {
    Expr::Literal(value.into())
}

/// Creates a decimal literal from its textual form, e.g. `"12.50"`.
///
/// # Errors
///
/// Fails unless the text is a plain number.
pub fn decimal(value: impl Into<String>) -> Result<Expr> {
    Literal::decimal(value).map(Expr::Literal)
}

/// Creates a NULL literal.
#[must_use]
pub const fn null_literal() -> Expr {
    Expr::Literal(Literal::Null)
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

/// Starts a CAST of `expr`; finish with one of the `as_*` methods.
#[must_use]
pub fn cast(expr: Expr) -> CastBuilder {
    CastBuilder { expr }
}

/// Builder for a CAST expression.
#[derive(Debug, Clone)]
pub struct CastBuilder {
    expr: Expr,
}

impl CastBuilder {
    /// Casts to a string of the given width.
    #[must_use]
    pub fn as_string(self, width: u32) -> Expr {
        self.as_sized(DataType::String, width, 0)
    }

    /// Casts to a type that takes no width.
    #[must_use]
    pub fn as_type(self, data_type: DataType) -> Expr {
        self.as_sized(data_type, 0, 0)
    }

    /// Casts to a type with explicit width and scale.
    #[must_use]
    pub fn as_sized(self, data_type: DataType, width: u32, scale: u32) -> Expr {
        Expr::Cast(Cast {
            expr: Box::new(self.expr),
            data_type,
            width,
            scale,
        })
    }
}

/// Concatenates the expressions as strings.
#[must_use]
pub fn concat(fields: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Concat(ConcatenatedField {
        fields: fields.into_iter().collect(),
    })
}

fn maths(left: Expr, operator: MathsOperator, right: Expr) -> Expr {
    Expr::Maths(MathsField {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

/// `left + right`
#[must_use]
pub fn plus(left: Expr, right: Expr) -> Expr {
    maths(left, MathsOperator::Plus, right)
}

/// `left - right`
#[must_use]
pub fn minus(left: Expr, right: Expr) -> Expr {
    maths(left, MathsOperator::Minus, right)
}

/// `left * right`
#[must_use]
pub fn multiply(left: Expr, right: Expr) -> Expr {
    maths(left, MathsOperator::Multiply, right)
}

/// `left / right`
#[must_use]
pub fn divide(left: Expr, right: Expr) -> Expr {
    maths(left, MathsOperator::Divide, right)
}

/// Creates a function call without checking the argument count.
///
/// The count is checked when the expression is rendered.
#[must_use]
pub fn function(kind: FunctionKind, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function(Function {
        kind,
        args: args.into_iter().collect(),
    })
}

/// `COUNT(*)`
#[must_use]
pub fn count() -> Expr {
    function(FunctionKind::Count, [])
}

/// `COUNT(expr)`
#[must_use]
pub fn count_of(expr: Expr) -> Expr {
    function(FunctionKind::Count, [expr])
}

/// `SUM(expr)`
#[must_use]
pub fn sum(expr: Expr) -> Expr {
    function(FunctionKind::Sum, [expr])
}

/// `MIN(expr)`
#[must_use]
pub fn min(expr: Expr) -> Expr {
    function(FunctionKind::Min, [expr])
}

/// `MAX(expr)`
#[must_use]
pub fn max(expr: Expr) -> Expr {
    function(FunctionKind::Max, [expr])
}

/// `AVG(expr)`
#[must_use]
pub fn average(expr: Expr) -> Expr {
    function(FunctionKind::Average, [expr])
}

/// The first non-null expression.
#[must_use]
pub fn coalesce(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    function(FunctionKind::Coalesce, exprs)
}

/// `expr`, or `replacement` when `expr` is NULL.
#[must_use]
pub fn is_null(expr: Expr, replacement: Expr) -> Expr {
    function(FunctionKind::IsNull, [expr, replacement])
}

/// The current timestamp.
#[must_use]
pub fn now() -> Expr {
    function(FunctionKind::Now, [])
}

/// Whole days from `from` to `to`.
#[must_use]
pub fn days_between(to: Expr, from: Expr) -> Expr {
    function(FunctionKind::DaysBetween, [to, from])
}

/// Whole months from `from` to `to`.
#[must_use]
pub fn months_between(to: Expr, from: Expr) -> Expr {
    function(FunctionKind::MonthsBetween, [to, from])
}

/// `date` plus `days` days.
#[must_use]
pub fn add_days(date: Expr, days: Expr) -> Expr {
    function(FunctionKind::AddDays, [date, days])
}

/// `date` plus `months` months.
#[must_use]
pub fn add_months(date: Expr, months: Expr) -> Expr {
    function(FunctionKind::AddMonths, [date, months])
}

/// Parses a `yyyyMMdd` value into a date.
#[must_use]
pub fn yyyymmdd_to_date(expr: Expr) -> Expr {
    function(FunctionKind::YyyymmddToDate, [expr])
}

/// Formats a date as a `yyyyMMdd` number.
#[must_use]
pub fn date_to_yyyymmdd(expr: Expr) -> Expr {
    function(FunctionKind::DateToYyyymmdd, [expr])
}

/// Formats a timestamp as a `yyyyMMddHHmmss` number.
#[must_use]
pub fn date_to_yyyymmddhhmmss(expr: Expr) -> Expr {
    function(FunctionKind::DateToYyyymmddHhmmss, [expr])
}

/// Strips leading spaces.
#[must_use]
pub fn left_trim(expr: Expr) -> Expr {
    function(FunctionKind::LeftTrim, [expr])
}

/// Strips trailing spaces.
#[must_use]
pub fn right_trim(expr: Expr) -> Expr {
    function(FunctionKind::RightTrim, [expr])
}

/// Strips leading and trailing spaces.
#[must_use]
pub fn trim(expr: Expr) -> Expr {
    function(FunctionKind::Trim, [expr])
}

/// Pads `expr` on the left with `character` up to `length`.
#[must_use]
pub fn left_pad(expr: Expr, length: Expr, character: Expr) -> Expr {
    function(FunctionKind::LeftPad, [expr, length, character])
}

/// A random string of `length` characters.
#[must_use]
pub fn random_string(length: Expr) -> Expr {
    function(FunctionKind::RandomString, [length])
}

/// The last day of the month containing `date`.
#[must_use]
pub fn last_day_of_month(date: Expr) -> Expr {
    function(FunctionKind::LastDayOfMonth, [date])
}

/// `SUBSTRING(expr, start, length)`
#[must_use]
pub fn substring(expr: Expr, start: Expr, length: Expr) -> Expr {
    function(FunctionKind::Substring, [expr, start, length])
}

/// Character length of `expr`.
#[must_use]
pub fn length(expr: Expr) -> Expr {
    function(FunctionKind::Length, [expr])
}

/// Upper-cases `expr`.
#[must_use]
pub fn upper(expr: Expr) -> Expr {
    function(FunctionKind::Upper, [expr])
}

/// Lower-cases `expr`.
#[must_use]
pub fn lower(expr: Expr) -> Expr {
    function(FunctionKind::Lower, [expr])
}

/// `dividend MOD divisor`
#[must_use]
pub fn modulo(dividend: Expr, divisor: Expr) -> Expr {
    function(FunctionKind::Mod, [dividend, divisor])
}

/// Rounds `expr` to `places` decimal places.
#[must_use]
pub fn round(expr: Expr, places: Expr) -> Expr {
    function(FunctionKind::Round, [expr, places])
}

/// Rounds `expr` down.
#[must_use]
pub fn floor(expr: Expr) -> Expr {
    function(FunctionKind::Floor, [expr])
}

impl Expr {
    /// Creates an equality condition (`=`).
    #[must_use]
    pub fn eq(self, other: impl Into<Self>) -> Criterion {
        Criterion::Eq(self, other.into())
    }

    /// Creates an inequality condition (`<>`).
    #[must_use]
    pub fn not_eq(self, other: impl Into<Self>) -> Criterion {
        Criterion::NotEq(self, other.into())
    }

    /// Creates a less-than condition (`<`).
    #[must_use]
    pub fn lt(self, other: impl Into<Self>) -> Criterion {
        Criterion::Lt(self, other.into())
    }

    /// Creates a less-than-or-equal condition (`<=`).
    #[must_use]
    pub fn lt_eq(self, other: impl Into<Self>) -> Criterion {
        Criterion::LessThanOrEqual(self, other.into())
    }

    /// Creates a greater-than condition (`>`).
    #[must_use]
    pub fn gt(self, other: impl Into<Self>) -> Criterion {
        Criterion::Gt(self, other.into())
    }

    /// Creates a greater-than-or-equal condition (`>=`).
    #[must_use]
    pub fn gt_eq(self, other: impl Into<Self>) -> Criterion {
        Criterion::GreaterThanOrEqual(self, other.into())
    }

    /// Creates a LIKE condition.
    #[must_use]
    pub fn like(self, pattern: impl Into<Self>) -> Criterion {
        Criterion::Like(self, pattern.into())
    }

    /// Creates an IS NULL condition.
    #[must_use]
    pub fn is_null(self) -> Criterion {
        Criterion::IsNull(self)
    }

    /// Creates an IS NOT NULL condition.
    #[must_use]
    pub fn is_not_null(self) -> Criterion {
        Criterion::IsNotNull(self)
    }

    /// Creates an IN condition.
    #[must_use]
    pub fn in_list(self, values: impl IntoIterator<Item = Self>) -> Criterion {
        Criterion::In(self, values.into_iter().collect())
    }

    /// Ascending ORDER BY entry.
    #[must_use]
    pub const fn asc(self) -> OrderBy {
        OrderBy::asc(self)
    }

    /// Descending ORDER BY entry.
    #[must_use]
    pub const fn desc(self) -> OrderBy {
        OrderBy::desc(self)
    }
}
