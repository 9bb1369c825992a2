//! Source location tracking for token diagnostics
//!
//! Tokens only remember a byte offset into their shared source. These types
//! turn that offset back into line/column information when a diagnostic or a
//! tokenization failure has to be reported.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, counted in chars)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Check if this span is empty
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a shared source text
#[derive(Debug, Clone)]
pub struct SourceMap {
    source: Arc<str>,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a new source map from source text
    pub fn new(source: Arc<str>) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Zero-based line index: the number of newlines before `offset`
    pub fn line_index(&self, offset: usize) -> usize {
        let offset = self.floor_boundary(offset);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Get the line and column for a byte offset
    ///
    /// Offsets past the end or inside a multibyte char resolve to the
    /// preceding char boundary.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = self.floor_boundary(offset);
        let line = self.line_index(offset);
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Span covering `length` bytes starting at `offset`
    pub fn span(&self, offset: usize, length: usize) -> Span {
        Span::new(self.position_at(offset), self.position_at(offset + length))
    }

    /// Clamp `offset` into the source and back off to a char boundary
    pub fn floor_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(text: &str) -> SourceMap {
        SourceMap::new(Arc::from(text))
    }

    #[test]
    fn test_line_index_counts_preceding_newlines() {
        let source = map("a\nbb\n\ncc");
        assert_eq!(source.line_index(0), 0);
        assert_eq!(source.line_index(1), 0);
        assert_eq!(source.line_index(2), 1);
        assert_eq!(source.line_index(5), 2);
        assert_eq!(source.line_index(6), 3);
        assert_eq!(source.line_index(100), 3);
    }

    #[test]
    fn test_position_at_uses_char_columns() {
        let source = map("é = 1\nx");
        let pos = source.position_at(3);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 3);
        assert_eq!(source.position_at(7), Position::new(7, 2, 1));
    }

    #[test]
    fn test_offsets_inside_multibyte_chars_resolve_backwards() {
        // '€' occupies bytes 2..5
        let source = map("ab€\nc");
        assert_eq!(source.floor_boundary(4), 2);
        assert_eq!(source.position_at(4), Position::new(2, 1, 3));
        assert_eq!(source.position_at(99), Position::new(7, 2, 2));

        let span = source.span(0, 4);
        assert_eq!(span.end.offset, 2);
        assert_eq!(span.to_string(), "1:1-3");
    }

    #[test]
    fn test_span_display() {
        let source = map("let x\n= 2");
        let span = source.span(4, 1);
        assert_eq!(span.to_string(), "1:5-6");
        assert_eq!(span.len(), 1);
        assert!(!span.is_empty());
        assert_eq!(source.span(4, 4).to_string(), "1:5-2:3");
    }
}
