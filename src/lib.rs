//! Scanner, expression parser, and diagnostics for the Quill
//! scripting language.
//!
//! Converts raw UTF-8 source text into a token stream, then into an
//! expression AST, producing human-readable diagnostics anchored to
//! exact source positions along the way. Lexical errors are tolerated
//! (scanning always completes); syntax errors abort the parse unit
//! without crashing the process.
//!
//! # Quick start
//!
//! ## Scan, parse, and pretty-print an expression
//!
//! ```
//! use quill_syntax::{Reporter, SourceFile, parse, print, scan};
//!
//! let src = SourceFile::new("demo.ql", "1 + 2 * 3");
//! let mut reporter = Reporter::new(Vec::new());
//!
//! let tokens = scan(&src, &mut reporter);
//! let expr = parse(&tokens, &src, &mut reporter).unwrap();
//!
//! assert!(!reporter.had_error());
//! assert_eq!(print(&expr), "(+ 1 (* 2 3))");
//! ```
//!
//! ## Check the error flag before trusting a result
//!
//! ```
//! use quill_syntax::{Reporter, SourceFile, parse_source};
//!
//! let src = SourceFile::new("demo.ql", "(1 + 2");
//! let mut reporter = Reporter::new(Vec::new());
//!
//! assert!(parse_source(&src, &mut reporter).is_err());
//! assert!(reporter.had_error());
//!
//! // The reporter is call-scoped: reset it (or use a fresh one)
//! // for the next independent unit.
//! reporter.reset();
//! assert!(!reporter.had_error());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod parser;
pub mod printer;
pub mod report;
pub mod scanner;
pub mod source;
pub mod token;

pub use ast::Expr;
pub use parser::{ParseError, ParseErrorKind, parse};
pub use printer::print;
pub use report::{Diagnostic, Reporter, Severity, stderr_reporter};
pub use scanner::scan;
pub use source::{Position, PositionError, SourceFile};
pub use token::{Literal, Span, Token, TokenKind, keyword};

use std::io;

/// Unified error type covering parsing and position lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A syntax error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// An out-of-range offset or span (internal-invariant breakage).
    #[error("{0}")]
    Position(#[from] PositionError),
}

/// Scan and parse a source buffer in one step.
///
/// Lexical errors set the reporter's flag but do not abort the scan;
/// the first syntax error aborts with `Err`. Callers must still
/// consult [`Reporter::had_error`]: a parse can succeed over a token
/// stream that carried lexical errors.
///
/// # Errors
///
/// Returns [`Error::Parse`] on the first grammar violation.
pub fn parse_source<W: io::Write>(
    src: &SourceFile,
    reporter: &mut Reporter<W>,
) -> Result<Expr, Error> {
    let tokens = scan(src, reporter);
    Ok(parse(&tokens, src, reporter)?)
}
