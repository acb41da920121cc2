use std::fmt;
use std::io;

use crate::ast::Expr;
use crate::report::{Diagnostic, Reporter, Severity};
use crate::source::SourceFile;
use crate::token::{Token, TokenKind};

/// Classifies a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `(` group was never closed.
    ExpectedClosingParen,
    /// The token at hand cannot start a primary expression.
    ExpectedExpression,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedClosingParen => f.write_str("Expected ')' after expression."),
            Self::ExpectedExpression => f.write_str("Expected an expression."),
        }
    }
}

/// Error produced during parsing.
///
/// By the time this is returned the diagnostic has already been
/// rendered through the reporter; the error value carries just enough
/// for programmatic callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

/// Parse a scanned token sequence into a single expression.
///
/// `src` must be the buffer the tokens were scanned from; it supplies
/// the offending line text for diagnostics. `Comment` tokens are
/// skipped transparently.
///
/// A syntax error aborts the whole parse: the diagnostic is emitted
/// through `reporter`, the token cursor synchronizes to the next
/// statement boundary, and `Err` travels up the call chain — no
/// partial AST is ever returned.
///
/// # Errors
///
/// Returns `ParseError` on the first grammar violation.
pub fn parse<W: io::Write>(
    tokens: &[Token],
    src: &SourceFile,
    reporter: &mut Reporter<W>,
) -> Result<Expr, ParseError> {
    Parser::new(tokens, src, reporter).parse()
}

struct Parser<'a, W> {
    tokens: &'a [Token],
    pos: usize,
    src: &'a SourceFile,
    reporter: &'a mut Reporter<W>,
}

impl<'a, W: io::Write> Parser<'a, W> {
    fn new(tokens: &'a [Token], src: &'a SourceFile, reporter: &'a mut Reporter<W>) -> Self {
        let mut parser = Self {
            tokens,
            pos: 0,
            src,
            reporter,
        };
        parser.skip_comments();
        parser
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        match self.expression() {
            Ok(expr) => Ok(expr),
            Err(err) => {
                self.synchronize();
                Err(err)
            }
        }
    }

    // expression → equality
    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.equality()
    }

    // equality → comparison (("!=" | "==") comparison)*
    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;
        while let Some(op) = self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let rhs = self.comparison()?;
            expr = Expr::binary(op, expr, rhs);
        }
        Ok(expr)
    }

    // comparison → term ((">" | ">=" | "<" | "<=") term)*
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;
        while let Some(op) = self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let rhs = self.term()?;
            expr = Expr::binary(op, expr, rhs);
        }
        Ok(expr)
    }

    // term → factor (("-" | "+") factor)*
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;
        while let Some(op) = self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let rhs = self.factor()?;
            expr = Expr::binary(op, expr, rhs);
        }
        Ok(expr)
    }

    // factor → unary (("/" | "*") unary)*
    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        while let Some(op) = self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let rhs = self.unary()?;
            expr = Expr::binary(op, expr, rhs);
        }
        Ok(expr)
    }

    // unary → ("!" | "-") unary | primary
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let rhs = self.unary()?;
            return Ok(Expr::unary(op, rhs));
        }
        self.primary()
    }

    // primary → NUMBER | STRING | "true" | "false" | "nil"
    //         | "(" expression ")"
    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::False]).is_some() {
            return Ok(Expr::bool_lit(false));
        }
        if self.match_any(&[TokenKind::True]).is_some() {
            return Ok(Expr::bool_lit(true));
        }
        if self.match_any(&[TokenKind::Nil]).is_some() {
            return Ok(Expr::nil());
        }
        if let Some(token) = self.match_any(&[TokenKind::Number, TokenKind::String]) {
            return Ok(Expr::Literal(token.literal));
        }
        if self.match_any(&[TokenKind::LeftParen]).is_some() {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, ParseErrorKind::ExpectedClosingParen)?;
            return Ok(Expr::grouping(expr));
        }

        Err(self.error_at_current(ParseErrorKind::ExpectedExpression))
    }

    /// Skip tokens until a statement boundary: just past a `;`, or in
    /// front of a keyword that starts a new statement. Run once per
    /// failed top-level parse so a future multi-statement grammar can
    /// resume cleanly.
    fn synchronize(&mut self) {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon => {
                    self.pos += 1;
                    self.skip_comments();
                    return;
                }
                TokenKind::Class
                | TokenKind::Fn
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => self.pos += 1,
            }
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// Consume and return the current token if it matches any of
    /// `kinds`; comments after it are skipped.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        for &kind in kinds {
            if self.check(kind) {
                let token = self.tokens[self.pos].clone();
                self.pos += 1;
                self.skip_comments();
                return Some(token);
            }
        }
        None
    }

    fn consume(
        &mut self,
        kind: TokenKind,
        error_kind: ParseErrorKind,
    ) -> Result<Token, ParseError> {
        self.match_any(&[kind])
            .ok_or_else(|| self.error_at_current(error_kind))
    }

    fn skip_comments(&mut self) {
        while self.check(TokenKind::Comment) {
            self.pos += 1;
        }
    }

    /// Report a diagnostic anchored at the offending token and build
    /// the error value returned up the call chain.
    fn error_at_current(&mut self, kind: ParseErrorKind) -> ParseError {
        let (line, column, length) = self.peek().map_or((1, 0, 0), |token| {
            (token.line, token.column, token.span.len())
        });
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            filename: self.src.name().to_string(),
            line,
            column,
            length,
            line_text: self.src.line_text(line).unwrap_or_default().to_string(),
            message: kind.to_string(),
        };
        self.reporter.report(&diagnostic);
        ParseError { kind, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print;
    use crate::scanner::scan;

    fn parse_input(input: &str) -> Result<Expr, ParseError> {
        let src = SourceFile::new("test.ql", input);
        let mut reporter = Reporter::new(Vec::new());
        let tokens = scan(&src, &mut reporter);
        parse(&tokens, &src, &mut reporter)
    }

    fn parse_print(input: &str) -> String {
        print(&parse_input(input).expect("parse failed"))
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(parse_print("1 + 2 * 3"), "(+ 1 (* 2 3))");
    }

    #[test]
    fn binary_levels_left_associate() {
        assert_eq!(parse_print("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(parse_print("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    }

    #[test]
    fn comparison_below_equality() {
        assert_eq!(parse_print("1 < 2 == true"), "(== (< 1 2) true)");
    }

    #[test]
    fn unary_nests() {
        assert_eq!(parse_print("!!true"), "(! (! true))");
        assert_eq!(parse_print("-1 + 2"), "(+ (- 1) 2)");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(parse_print("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
    }

    #[test]
    fn literal_primaries() {
        assert_eq!(parse_print("nil"), "nil");
        assert_eq!(parse_print("false"), "false");
        assert_eq!(parse_print("\"hi\""), "hi");
    }

    #[test]
    fn missing_close_paren() {
        let err = parse_input("(1 + 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedClosingParen);
    }

    #[test]
    fn bare_operator_is_not_an_expression() {
        let err = parse_input("+ 1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
        assert_eq!((err.line, err.column), (1, 0));
    }

    #[test]
    fn comments_are_transparent() {
        assert_eq!(parse_print("1 + // add\n2"), "(+ 1 2)");
        assert_eq!(parse_print("// leading\n1 * 2"), "(* 1 2)");
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = parse_input("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    }
}
