//! Rendering of leveled diagnostics with a caret underline into the
//! offending source line, and the per-unit `had_error` state callers
//! consult before trusting a scan or parse result.

use std::fmt;
use std::io;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single diagnostic, rendered immediately and not retained.
///
/// `line` is 1-based; `column` is a 0-based byte offset into
/// `line_text`; `length` is the byte length of the offending span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub line_text: String,
    pub message: String,
}

impl Diagnostic {
    /// Render the diagnostic banner:
    ///
    /// ```text
    /// error: Unexpected character: '@'
    ///  --> demo.ql:1:4
    ///   | var @ = 1;
    ///   |     ^
    /// ```
    ///
    /// Column and length are clamped to the source line's byte length
    /// before slicing, so edge-of-line positions never reach past it;
    /// a clamped-away span still gets a single caret.
    #[must_use]
    pub fn render(&self) -> String {
        use fmt::Write as _;

        let line_len = self.line_text.len();
        let column = self.column.min(line_len);
        let length = self.length.clamp(1, (line_len - column).max(1));

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", self.severity, self.message);
        let _ = writeln!(out, " --> {}:{}:{}", self.filename, self.line, self.column);
        let _ = writeln!(out, "  | {}", self.line_text);
        let _ = writeln!(out, "  | {}{}", " ".repeat(column), "^".repeat(length));
        out
    }
}

/// Sink for diagnostics plus the per-unit error flag.
///
/// The flag is call-scoped state owned by the surrounding driver, not
/// a process global: each independent scan/parse unit (a file, a REPL
/// line) gets its own `Reporter` or an explicit [`Reporter::reset`].
#[derive(Debug)]
pub struct Reporter<W> {
    sink: W,
    had_error: bool,
}

impl<W: io::Write> Reporter<W> {
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self {
            sink,
            had_error: false,
        }
    }

    /// Write a diagnostic to the sink. Error-level diagnostics set the
    /// `had_error` flag; info-level ones do not. Sink write failures
    /// are swallowed: reporting never interrupts scanning or parsing.
    pub fn report(&mut self, diagnostic: &Diagnostic) {
        if diagnostic.severity == Severity::Error {
            self.had_error = true;
        }
        let _ = self.sink.write_all(diagnostic.render().as_bytes());
    }

    /// Whether any error-level diagnostic was reported since the last
    /// reset. Callers gate later phases on this.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }

    /// Clear the error flag before an independent scan/parse unit.
    pub const fn reset(&mut self) {
        self.had_error = false;
    }

    /// Borrow the sink, e.g. to inspect captured output in tests.
    #[must_use]
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
    }
}

/// A reporter writing to standard error, for CLI use.
#[must_use]
pub fn stderr_reporter() -> Reporter<io::Stderr> {
    Reporter::new(io::stderr())
}
