#![allow(dead_code)]

use quill_syntax::{Expr, ParseError, Reporter, SourceFile, Token, parse, scan};

/// Result of scanning an input with a captured diagnostic sink.
pub struct Scanned {
    pub src: SourceFile,
    pub tokens: Vec<Token>,
    pub output: String,
    pub had_error: bool,
}

pub fn scan_capture(input: &str) -> Scanned {
    let src = SourceFile::new("test.ql", input);
    let mut reporter = Reporter::new(Vec::new());
    let tokens = scan(&src, &mut reporter);
    let had_error = reporter.had_error();
    let output = String::from_utf8(reporter.into_sink()).expect("diagnostics are UTF-8");
    Scanned {
        src,
        tokens,
        output,
        had_error,
    }
}

/// Result of a full scan+parse with a captured diagnostic sink.
pub struct Parsed {
    pub result: Result<Expr, ParseError>,
    pub output: String,
    pub had_error: bool,
}

pub fn parse_capture(input: &str) -> Parsed {
    let src = SourceFile::new("test.ql", input);
    let mut reporter = Reporter::new(Vec::new());
    let tokens = scan(&src, &mut reporter);
    let result = parse(&tokens, &src, &mut reporter);
    let had_error = reporter.had_error();
    let output = String::from_utf8(reporter.into_sink()).expect("diagnostics are UTF-8");
    Parsed {
        result,
        output,
        had_error,
    }
}

/// Number of rendered error-level diagnostics in captured output.
pub fn error_count(output: &str) -> usize {
    output.matches("error: ").count()
}
