use crate::token::Span;

/// Error produced when an offset or span falls outside a source buffer.
///
/// This is a programming-error class: it signals broken internal
/// bookkeeping, not malformed user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("offset {offset} out of bounds (0, {len})")]
pub struct PositionError {
    pub offset: usize,
    pub len: usize,
}

/// A resolved source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based byte offset within the line.
    pub column: usize,
}

/// A source buffer with its name and a line-start offset table.
///
/// The table holds the byte offset of the first character of each line
/// (the first entry is always 0), so position lookups are a binary
/// search rather than a rescan of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    /// Name used to label diagnostics, e.g. a file path or `<repl>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines in the buffer (at least 1, even when empty).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset to a line/column position.
    ///
    /// An offset equal to the buffer length is valid and resolves to
    /// the position just past the last character (where `Eof` sits).
    ///
    /// # Errors
    ///
    /// Returns `PositionError` when `offset` exceeds the buffer length.
    pub fn position(&self, offset: usize) -> Result<Position, PositionError> {
        if offset > self.text.len() {
            return Err(PositionError {
                offset,
                len: self.text.len(),
            });
        }
        let line = self.line_starts.partition_point(|&start| start <= offset);
        Ok(Position {
            line,
            column: offset - self.line_starts[line - 1],
        })
    }

    /// Text of a 1-based line, without its trailing newline.
    ///
    /// Returns `None` when `line` is 0 or past the last line.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.text.len(), |&next| next - 1);
        self.text.get(start..end)
    }

    /// The source substring covered by a span.
    ///
    /// # Errors
    ///
    /// Returns `PositionError` when the span reaches past the buffer
    /// or does not fall on character boundaries.
    pub fn slice(&self, span: Span) -> Result<&str, PositionError> {
        self.text
            .get(span.start..span.end)
            .ok_or(PositionError {
                offset: span.end,
                len: self.text.len(),
            })
    }
}
