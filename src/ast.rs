use crate::token::{Literal, Token};

/// An expression node.
///
/// A closed set of variants matched directly by any traversal; nodes
/// exclusively own their children, so the whole tree is dropped with
/// its root.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Infix operation, e.g. `1 + 2`.
    Binary {
        op: Token,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Prefix operation, e.g. `-x` or `!ready`.
    Unary { op: Token, rhs: Box<Expr> },
    /// Parenthesized expression.
    Grouping(Box<Expr>),
    /// Literal value; `None` is `nil`.
    Literal(Option<Literal>),
}

impl Expr {
    #[must_use]
    pub fn binary(op: Token, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn unary(op: Token, rhs: Self) -> Self {
        Self::Unary {
            op,
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn grouping(inner: Self) -> Self {
        Self::Grouping(Box::new(inner))
    }

    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Literal(Some(Literal::Float(value)))
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Some(Literal::Str(value.into())))
    }

    #[must_use]
    pub const fn bool_lit(value: bool) -> Self {
        Self::Literal(Some(Literal::Bool(value)))
    }

    #[must_use]
    pub const fn nil() -> Self {
        Self::Literal(None)
    }
}
