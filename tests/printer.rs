//! Pretty-printer output for programmatically built trees.

use quill_syntax::{Expr, Span, Token, TokenKind, print};

fn op(kind: TokenKind) -> Token {
    Token {
        kind,
        span: Span { start: 0, end: 1 },
        literal: None,
        line: 1,
        column: 0,
    }
}

#[test]
fn fully_parenthesized_prefix_form() {
    let expr = Expr::binary(
        op(TokenKind::Plus),
        Expr::number(1.0),
        Expr::binary(op(TokenKind::Star), Expr::number(2.0), Expr::number(3.0)),
    );
    assert_eq!(print(&expr), "(+ 1 (* 2 3))");
}

#[test]
fn unary_and_grouping() {
    let expr = Expr::binary(
        op(TokenKind::Star),
        Expr::unary(op(TokenKind::Minus), Expr::number(123.0)),
        Expr::grouping(Expr::number(45.67)),
    );
    assert_eq!(print(&expr), "(* (- 123) (group 45.67))");
}

#[test]
fn leaf_literals() {
    assert_eq!(print(&Expr::nil()), "nil");
    assert_eq!(print(&Expr::bool_lit(true)), "true");
    assert_eq!(print(&Expr::string("quill")), "quill");
    assert_eq!(print(&Expr::number(0.5)), "0.5");
}

#[test]
fn whole_numbers_print_without_fraction() {
    // Numbers are always floats; the canonical rendering drops the
    // redundant fractional part.
    assert_eq!(print(&Expr::number(42.0)), "42");
}
