//! Expression AST types.

use chrono::NaiveDate;

use super::statement::TableReference;
use crate::error::{DialectError, Result};
use crate::metadata::DataType;

/// A literal value.
///
/// Decimals are kept in their textual form so literals have exact equality
/// and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// NULL literal.
    Null,
    /// String literal.
    String(String),
    /// Integer literal.
    Integer(i64),
    /// Decimal literal, e.g. `"12.50"`.
    Decimal(String),
    /// Boolean literal.
    Boolean(bool),
    /// Date literal.
    Date(NaiveDate),
}

impl Literal {
    /// Returns the data type of the literal.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::String(_) => DataType::String,
            Self::Integer(_) => DataType::BigInteger,
            Self::Decimal(_) => DataType::Decimal,
            Self::Boolean(_) => DataType::Boolean,
            Self::Date(_) => DataType::Date,
        }
    }

    /// Creates a decimal literal from its textual form.
    ///
    /// # Errors
    ///
    /// Fails unless the text is an optional sign, digits and an optional
    /// fraction.
    pub fn decimal(value: impl Into<String>) -> Result<Self> {
        let literal = Self::Decimal(value.into());
        literal.validate()?;
        Ok(literal)
    }

    /// Checks that a decimal literal holds a plain number.
    ///
    /// # Errors
    ///
    /// [`DialectError::InvalidDecimal`] for anything else.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Decimal(value) if !is_decimal_text(value) => {
                Err(DialectError::InvalidDecimal(value.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Returns true for an optional sign, digits and an optional `.digits`.
#[must_use]
pub fn is_decimal_text(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (whole, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(whole, fraction)| (whole, Some(fraction)));
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.is_none_or(digits)
}

/// A reference to a column, optionally qualified by a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldReference {
    /// The qualifying table, if any.
    pub table: Option<TableReference>,
    /// Column name.
    pub name: String,
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathsOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl MathsOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A binary arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MathsField {
    /// Left operand.
    pub left: Box<Expr>,
    /// Operator.
    pub operator: MathsOperator,
    /// Right operand.
    pub right: Box<Expr>,
}

/// String concatenation of two or more expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConcatenatedField {
    /// The concatenated expressions, in order.
    pub fields: Vec<Expr>,
}

/// A CAST of an expression to a column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cast {
    /// Expression being cast.
    pub expr: Box<Expr>,
    /// Target type.
    pub data_type: DataType,
    /// Target width.
    pub width: u32,
    /// Target scale.
    pub scale: u32,
}

/// The functions every dialect knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// `COUNT(*)` or `COUNT(x)`.
    Count,
    /// `SUM(x)`.
    Sum,
    /// `MIN(x)`.
    Min,
    /// `MAX(x)`.
    Max,
    /// `AVG(x)`.
    Average,
    /// First non-null argument.
    Coalesce,
    /// `x` if not null, else `replacement`.
    IsNull,
    /// The current timestamp.
    Now,
    /// Whole days from the second argument to the first.
    DaysBetween,
    /// Whole months from the second argument to the first.
    MonthsBetween,
    /// Date plus a number of days.
    AddDays,
    /// Date plus a number of months.
    AddMonths,
    /// Parses a `yyyyMMdd` string or number into a date.
    YyyymmddToDate,
    /// Formats a date as a `yyyyMMdd` integer.
    DateToYyyymmdd,
    /// Formats a timestamp as a `yyyyMMddHHmmss` integer.
    DateToYyyymmddHhmmss,
    /// Strips leading spaces.
    LeftTrim,
    /// Strips trailing spaces.
    RightTrim,
    /// Strips leading and trailing spaces.
    Trim,
    /// Left-pads a string to a length with a character.
    LeftPad,
    /// A random string of the given length.
    RandomString,
    /// The last day of the month containing a date.
    LastDayOfMonth,
    /// `SUBSTRING(x, start, length)`.
    Substring,
    /// Character length of a string.
    Length,
    /// Upper-cases a string.
    Upper,
    /// Lower-cases a string.
    Lower,
    /// Integer remainder.
    Mod,
    /// Rounds to a number of decimal places.
    Round,
    /// Rounds down to an integer.
    Floor,
}

impl FunctionKind {
    /// Returns the function's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Average => "AVG",
            Self::Coalesce => "COALESCE",
            Self::IsNull => "IS_NULL",
            Self::Now => "NOW",
            Self::DaysBetween => "DAYS_BETWEEN",
            Self::MonthsBetween => "MONTHS_BETWEEN",
            Self::AddDays => "ADD_DAYS",
            Self::AddMonths => "ADD_MONTHS",
            Self::YyyymmddToDate => "YYYYMMDD_TO_DATE",
            Self::DateToYyyymmdd => "DATE_TO_YYYYMMDD",
            Self::DateToYyyymmddHhmmss => "DATE_TO_YYYYMMDDHHMMSS",
            Self::LeftTrim => "LEFT_TRIM",
            Self::RightTrim => "RIGHT_TRIM",
            Self::Trim => "TRIM",
            Self::LeftPad => "LEFT_PAD",
            Self::RandomString => "RANDOM_STRING",
            Self::LastDayOfMonth => "LAST_DAY_OF_MONTH",
            Self::Substring => "SUBSTRING",
            Self::Length => "LENGTH",
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Mod => "MOD",
            Self::Round => "ROUND",
            Self::Floor => "FLOOR",
        }
    }

    /// The fixed argument count, or `None` for variadic functions.
    #[must_use]
    pub const fn arity(self) -> Option<usize> {
        match self {
            Self::Count | Self::Coalesce => None,
            Self::Now => Some(0),
            Self::Sum
            | Self::Min
            | Self::Max
            | Self::Average
            | Self::YyyymmddToDate
            | Self::DateToYyyymmdd
            | Self::DateToYyyymmddHhmmss
            | Self::LeftTrim
            | Self::RightTrim
            | Self::Trim
            | Self::RandomString
            | Self::LastDayOfMonth
            | Self::Length
            | Self::Upper
            | Self::Lower
            | Self::Floor => Some(1),
            Self::IsNull
            | Self::DaysBetween
            | Self::MonthsBetween
            | Self::AddDays
            | Self::AddMonths
            | Self::Mod
            | Self::Round => Some(2),
            Self::LeftPad | Self::Substring => Some(3),
        }
    }
}

/// A function call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    /// Which function.
    pub kind: FunctionKind,
    /// Arguments, in order.
    pub args: Vec<Expr>,
}

impl Function {
    /// Returns the arguments after checking their count.
    ///
    /// # Errors
    ///
    /// Fails with [`DialectError::InvalidArguments`] when the count does not
    /// match the function's arity. `COUNT` takes zero or one argument and
    /// `COALESCE` at least one.
    pub fn checked_args(&self) -> Result<&[Expr]> {
        let actual = self.args.len();
        let expected = match self.kind.arity() {
            Some(n) => n,
            None if self.kind == FunctionKind::Count && actual <= 1 => actual,
            None if self.kind == FunctionKind::Coalesce && actual >= 1 => actual,
            None => 1,
        };
        if actual == expected {
            Ok(&self.args)
        } else {
            Err(DialectError::InvalidArguments {
                function: self.kind.name(),
                expected,
                actual,
            })
        }
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A column reference.
    Field(FieldReference),
    /// A literal value.
    Literal(Literal),
    /// A function call.
    Function(Function),
    /// A CAST expression.
    Cast(Cast),
    /// An arithmetic expression.
    Maths(MathsField),
    /// A string concatenation.
    Concat(ConcatenatedField),
    /// An expression with an alias.
    Aliased {
        /// The aliased expression.
        expr: Box<Expr>,
        /// The alias.
        alias: String,
    },
}

impl Expr {
    /// Gives the expression an alias, replacing any existing one.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self::Aliased {
            expr: Box::new(self.unaliased().clone()),
            alias: alias.into(),
        }
    }

    /// The expression without its alias.
    #[must_use]
    pub fn unaliased(&self) -> &Self {
        match self {
            Self::Aliased { expr, .. } => expr.unaliased(),
            other => other,
        }
    }

    /// The name this expression takes in a result set: its alias, or the
    /// column name of a field reference.
    #[must_use]
    pub fn implied_name(&self) -> Option<&str> {
        match self {
            Self::Aliased { alias, .. } => Some(alias.as_str()),
            Self::Field(field) => Some(field.name.as_str()),
            _ => None,
        }
    }
}
