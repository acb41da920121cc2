//! Pretty-printer that renders an expression tree in fully
//! parenthesized prefix notation, e.g. `1 + 2 * 3` becomes
//! `(+ 1 (* 2 3))`.

use std::fmt::Write as _;

use crate::ast::Expr;

/// Render an expression tree as prefix notation.
#[must_use]
pub fn print(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Binary { op, lhs, rhs } => {
            let _ = write!(out, "({} ", op.kind);
            write_expr(out, lhs);
            out.push(' ');
            write_expr(out, rhs);
            out.push(')');
        }
        Expr::Unary { op, rhs } => {
            let _ = write!(out, "({} ", op.kind);
            write_expr(out, rhs);
            out.push(')');
        }
        Expr::Grouping(inner) => {
            out.push_str("(group ");
            write_expr(out, inner);
            out.push(')');
        }
        Expr::Literal(Some(value)) => {
            let _ = write!(out, "{value}");
        }
        Expr::Literal(None) => out.push_str("nil"),
    }
}
