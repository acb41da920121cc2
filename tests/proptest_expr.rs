//! Property-based tests with proptest.
//!
//! Generate random parenthesized infix expressions together with the
//! prefix rendering the parser should produce for them, plus fuzz-style
//! properties over arbitrary input: scanning never panics, always ends
//! in exactly one `Eof`, and is idempotent.

use proptest::prelude::*;
use quill_syntax::{Literal, Reporter, SourceFile, Token, TokenKind, parse, scan};

fn scan_capture(input: &str) -> (Vec<Token>, String) {
    let src = SourceFile::new("prop.ql", input);
    let mut reporter = Reporter::new(Vec::new());
    let tokens = scan(&src, &mut reporter);
    let output = String::from_utf8_lossy(&reporter.into_sink()).into_owned();
    (tokens, output)
}

/// Strategy producing a pair of (parenthesized infix source, expected
/// prefix rendering). Every composite is wrapped in parentheses so the
/// expected tree shape is unambiguous: each source `(a op b)` parses
/// to `(group (op a b))`.
fn expr_pair(depth: u32) -> BoxedStrategy<(String, String)> {
    let leaf = (0u32..10_000)
        .prop_map(|n| (n.to_string(), n.to_string()))
        .boxed();

    if depth == 0 {
        return leaf;
    }

    let binary_op = prop::sample::select(vec![
        "+", "-", "*", "/", "==", "!=", "<", "<=", ">", ">=",
    ]);
    let binary = (expr_pair(depth - 1), binary_op, expr_pair(depth - 1)).prop_map(
        |((lhs_src, lhs_pre), op, (rhs_src, rhs_pre))| {
            (
                format!("({lhs_src} {op} {rhs_src})"),
                format!("(group ({op} {lhs_pre} {rhs_pre}))"),
            )
        },
    );

    let unary_op = prop::sample::select(vec!["-", "!"]);
    let unary = (unary_op, expr_pair(depth - 1)).prop_map(|(op, (src, pre))| {
        (format!("({op}{src})"), format!("(group ({op} {pre}))"))
    });

    prop_oneof![
        3 => leaf,
        2 => binary,
        1 => unary,
    ]
    .boxed()
}

proptest! {
    /// Generated infix expressions parse without error and
    /// pretty-print to the predicted prefix form.
    #[test]
    fn infix_parses_to_predicted_prefix((source, expected) in expr_pair(4)) {
        let src = SourceFile::new("prop.ql", source.as_str());
        let mut reporter = Reporter::new(Vec::new());
        let tokens = scan(&src, &mut reporter);
        let expr = parse(&tokens, &src, &mut reporter).map_err(|e| {
            TestCaseError::fail(std::format!("parse error: {e}\n--- source ---\n{source}"))
        })?;
        prop_assert!(!reporter.had_error());
        prop_assert_eq!(quill_syntax::print(&expr), expected);
    }

    /// Scanning arbitrary input never panics and always yields exactly
    /// one trailing `Eof` token.
    #[test]
    fn scan_always_terminates_with_one_eof(input in ".*") {
        let (tokens, _) = scan_capture(&input);
        let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        prop_assert_eq!(eof_count, 1);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    /// Scanning the same buffer twice yields identical tokens and
    /// identical diagnostics.
    #[test]
    fn scanning_is_idempotent(input in ".*") {
        let first = scan_capture(&input);
        let second = scan_capture(&input);
        prop_assert_eq!(first, second);
    }

    /// Parsing arbitrary input never panics; it either returns an
    /// expression or a reported error.
    #[test]
    fn parse_never_panics(input in ".*") {
        let src = SourceFile::new("prop.ql", input.as_str());
        let mut reporter = Reporter::new(Vec::new());
        let tokens = scan(&src, &mut reporter);
        let result = parse(&tokens, &src, &mut reporter);
        if result.is_err() {
            prop_assert!(reporter.had_error());
        }
    }

    /// Numeric literal values survive scanning: the token's literal
    /// equals standard float parsing of its lexeme.
    #[test]
    fn number_literal_round_trip(int_part in 0u64..1_000_000, frac in proptest::option::of(0u32..100_000)) {
        let text = frac.map_or_else(
            || int_part.to_string(),
            |frac| std::format!("{int_part}.{frac}"),
        );
        let (tokens, _) = scan_capture(&text);
        prop_assert_eq!(tokens[0].kind, TokenKind::Number);
        let expected: f64 = text.parse().unwrap();
        prop_assert_eq!(tokens[0].literal.clone(), Some(Literal::Float(expected)));
    }
}
