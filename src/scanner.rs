use std::io;

use crate::report::{Diagnostic, Reporter, Severity};
use crate::source::SourceFile;
use crate::token::{self, Literal, Span, Token, TokenKind};

/// Scan a source buffer into a token sequence, always terminated by
/// exactly one `Eof` token positioned at end of input.
///
/// Scanning never fails outright: lexical errors (unexpected
/// characters, unterminated strings) are reported through `reporter`
/// and scanning continues, so a single pass always yields a token
/// sequence. Check [`Reporter::had_error`] before trusting it.
pub fn scan<W: io::Write>(src: &SourceFile, reporter: &mut Reporter<W>) -> Vec<Token> {
    Scanner::new(src, reporter).scan_all()
}

struct Scanner<'a, W> {
    src: &'a SourceFile,
    reporter: &'a mut Reporter<W>,
    start: usize,
    current: usize,
    line: usize,
    /// Byte offset of the first character of the current line; a
    /// token's column is `start - line_start`.
    line_start: usize,
    start_line: usize,
    start_column: usize,
    tokens: Vec<Token>,
}

impl<'a, W: io::Write> Scanner<'a, W> {
    fn new(src: &'a SourceFile, reporter: &'a mut Reporter<W>) -> Self {
        Self {
            src,
            reporter,
            start: 0,
            current: 0,
            line: 1,
            line_start: 0,
            start_line: 1,
            start_column: 0,
            tokens: Vec::with_capacity(256),
        }
    }

    fn scan_all(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.current - self.line_start;
            self.scan_token();
        }

        let end = self.src.len();
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span { start: end, end },
            literal: None,
            line: self.line,
            column: self.current - self.line_start,
        });
        self.tokens
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.advance() else {
            return;
        };
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => self.add_token_for('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_token_for('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_token_for('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_token_for('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.match_char('/') {
                    self.scan_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' | '\n' => {}
            '"' => self.scan_string(),
            _ if ch.is_ascii_digit() => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(),
            _ => self.error(ch.len_utf8(), format!("Unexpected character: '{ch}'")),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src.text()[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.src.text()[self.current..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.line_start = self.current;
        }
        Some(ch)
    }

    /// One-character lookahead: consume `expected` if it is next.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> &str {
        &self.src.text()[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        self.tokens.push(Token {
            kind,
            span: Span {
                start: self.start,
                end: self.current,
            },
            literal,
            line: self.start_line,
            column: self.start_column,
        });
    }

    /// Maximal munch for one-or-two-character operators: emit
    /// `matched` when the continuation follows, `unmatched` otherwise.
    fn add_token_for(&mut self, continuation: char, matched: TokenKind, unmatched: TokenKind) {
        if self.match_char(continuation) {
            self.add_token(matched);
        } else {
            self.add_token(unmatched);
        }
    }

    /// `//` comment up to (not including) the newline; emitted as a
    /// token so downstream consumers may choose to filter it.
    fn scan_comment(&mut self) {
        while self.peek().is_some_and(|ch| ch != '\n') {
            self.advance();
        }
        self.add_token(TokenKind::Comment);
    }

    /// `"`-delimited string, raw contents, no escape processing. An
    /// unterminated string reports an error spanning from the opening
    /// quote to end of input and emits no token.
    fn scan_string(&mut self) {
        while self.peek().is_some_and(|ch| ch != '"') {
            self.advance();
        }

        if self.is_at_end() {
            let length = self.current - self.start;
            self.error(length, "Unterminated string.".to_string());
            return;
        }

        // Closing quote.
        self.advance();
        let contents = self.src.text()[self.start + 1..self.current - 1].to_string();
        self.add_literal_token(TokenKind::String, Some(Literal::Str(contents)));
    }

    /// `digits ('.' digits)?` — no leading or trailing dot, no
    /// exponent. Always materialized as a float, even without a
    /// fractional part.
    fn scan_number(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
                self.advance();
            }
        }

        match self.lexeme().parse::<f64>() {
            Ok(value) => self.add_literal_token(TokenKind::Number, Some(Literal::Float(value))),
            Err(_) => {
                let message = format!("Invalid number literal: '{}'", self.lexeme());
                self.error(self.current - self.start, message);
            }
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }
        let kind = token::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn error(&mut self, length: usize, message: String) {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            filename: self.src.name().to_string(),
            line: self.start_line,
            column: self.start_column,
            length,
            line_text: self
                .src
                .line_text(self.start_line)
                .unwrap_or_default()
                .to_string(),
            message,
        };
        self.reporter.report(&diagnostic);
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
