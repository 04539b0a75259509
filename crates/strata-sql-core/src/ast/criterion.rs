//! Boolean conditions used by WHERE, HAVING and JOIN clauses.

use super::expression::Expr;

/// A boolean condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// `a = b`
    Eq(Expr, Expr),
    /// `a <> b`
    NotEq(Expr, Expr),
    /// `a < b`
    Lt(Expr, Expr),
    /// `a <= b`
    LessThanOrEqual(Expr, Expr),
    /// `a > b`
    Gt(Expr, Expr),
    /// `a >= b`
    GreaterThanOrEqual(Expr, Expr),
    /// `a LIKE pattern`
    Like(Expr, Expr),
    /// `a IS NULL`
    IsNull(Expr),
    /// `a IS NOT NULL`
    IsNotNull(Expr),
    /// `a IN (values)`
    In(Expr, Vec<Expr>),
    /// All of the criteria hold.
    And(Vec<Criterion>),
    /// Any of the criteria holds.
    Or(Vec<Criterion>),
    /// The criterion does not hold.
    Not(Box<Criterion>),
}

impl Criterion {
    /// Combines with another criterion using AND, flattening nested ANDs.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut criteria) => {
                criteria.push(other);
                Self::And(criteria)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Combines with another criterion using OR, flattening nested ORs.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut criteria) => {
                criteria.push(other);
                Self::Or(criteria)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Negates the criterion.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Returns the SQL comparison operator for binary comparisons.
    #[must_use]
    pub const fn comparison_operator(&self) -> Option<&'static str> {
        match self {
            Self::Eq(..) => Some("="),
            Self::NotEq(..) => Some("<>"),
            Self::Lt(..) => Some("<"),
            Self::LessThanOrEqual(..) => Some("<="),
            Self::Gt(..) => Some(">"),
            Self::GreaterThanOrEqual(..) => Some(">="),
            Self::Like(..) => Some("LIKE"),
            _ => None,
        }
    }
}
