//! CLI driver: scans and parses Quill source files and prints the
//! token stream or AST, mapping diagnostics to an exit code.

use std::fs;
use std::process::ExitCode;

use quill_syntax::{SourceFile, parse, print, scan, stderr_reporter};

// sysexits EX_DATAERR: the input was malformed.
const EXIT_DATA_ERROR: u8 = 65;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: quill <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens  Print the token stream of each file");
        eprintln!("  ast     Parse each file and print the expression tree");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  quill tokens demo.ql");
        eprintln!("  quill ast demo.ql");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_io_error = false;
    let mut had_data_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_io_error = true;
                continue;
            }
        };

        let src = SourceFile::new(path.as_str(), content);
        // One reporter per file: units are independent.
        let mut reporter = stderr_reporter();

        match command {
            "tokens" => {
                for token in scan(&src, &mut reporter) {
                    println!(
                        "{}:{}\t{:?}\t{}",
                        token.line,
                        token.column,
                        token.kind,
                        token.lexeme(src.text())
                    );
                }
            }
            "ast" => {
                let tokens = scan(&src, &mut reporter);
                if let Ok(expr) = parse(&tokens, &src, &mut reporter) {
                    if !reporter.had_error() {
                        println!("{}", print(&expr));
                    }
                }
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }

        if reporter.had_error() {
            had_data_error = true;
        }
    }

    if had_data_error {
        ExitCode::from(EXIT_DATA_ERROR)
    } else if had_io_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
