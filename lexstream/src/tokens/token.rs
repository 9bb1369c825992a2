//! Located tokens over a shared source text

use super::error::{StreamError, SyntaxError};
use crate::config::compile_time::diagnostics::CONTEXT_LINES;
use crate::format::{self, Color};
use crate::logging::codes;
use crate::utils::{SourceMap, Span};
use std::fmt;
use std::sync::Arc;

/// A piece of matched source text with its type and location
///
/// The full source is held behind an `Arc<str>` so that every token of a
/// stream points into one allocation. `position` is the byte offset of the
/// token's first character within that source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
    content: String,
    ty: T,
    position: usize,
    source: Arc<str>,
}

impl<T> Token<T> {
    /// A free-standing token whose source is its own content
    pub fn new(content: impl Into<String>, ty: T) -> Self {
        let content = content.into();
        let source = Arc::from(content.as_str());
        Self {
            content,
            ty,
            position: 0,
            source,
        }
    }

    /// A token located at `position` within `source`
    pub fn located(content: impl Into<String>, ty: T, position: usize, source: Arc<str>) -> Self {
        Self {
            content: content.into(),
            ty,
            position,
            source,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ty(&self) -> &T {
        &self.ty
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte offset one past the token's last character
    pub fn end(&self) -> usize {
        self.position + self.content.len()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The shared source handle, for building sibling tokens
    pub fn source_handle(&self) -> &Arc<str> {
        &self.source
    }

    /// Line/column span of this token in its source
    pub fn span(&self) -> Span {
        self.source_map().span(self.position, self.content.len())
    }

    fn source_map(&self) -> SourceMap {
        SourceMap::new(Arc::clone(&self.source))
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl<T: Clone> Token<T> {
    /// Join `other`'s content onto this token, keeping this token's type
    pub fn plus(&self, other: &Token<T>) -> Token<T> {
        self.plus_as(other, self.ty.clone())
    }

    /// Join `other`'s content onto this token under a new type
    pub fn plus_as(&self, other: &Token<T>, ty: T) -> Token<T> {
        Token {
            content: format!("{}{}", self.content, other.content),
            ty,
            position: self.position,
            source: Arc::clone(&self.source),
        }
    }

    /// Raise a located syntax error at this token
    ///
    /// Writes the framed excerpt to the diagnostic stream, logs the failure
    /// and hands back the error for the caller to return.
    pub fn error(&self, message: impl Into<String>) -> StreamError {
        let colorize = crate::logging::config::get_diagnostic_preferences().colorize;
        let map = self.source_map();
        let diagnostic = self.diagnostic_in(&map, message, colorize);

        crate::logging::emit_diagnostic(&diagnostic.render());
        crate::log_error!(codes::syntax::UNEXPECTED_TOKEN, &diagnostic.message,
            span = map.span(self.position, self.content.len()),
            "line" => diagnostic.line,
            "token" => self.content
        );

        StreamError::Syntax(diagnostic)
    }

    /// Build the syntax error for this token without emitting anything
    pub fn diagnostic(&self, message: impl Into<String>, colorize: bool) -> SyntaxError {
        self.diagnostic_in(&self.source_map(), message, colorize)
    }

    fn diagnostic_in(
        &self,
        map: &SourceMap,
        message: impl Into<String>,
        colorize: bool,
    ) -> SyntaxError {
        let (line_index, excerpt) = self.excerpt(map, colorize);
        SyntaxError {
            message: message.into(),
            line: line_index + 1,
            position: self.position,
            excerpt,
        }
    }

    /// Line-numbered excerpt around this token, with its zero-based line index
    fn excerpt(&self, map: &SourceMap, colorize: bool) -> (usize, String) {
        let source: &str = &self.source;
        let start = map.floor_boundary(self.position);
        let end = map.floor_boundary(self.end()).max(start);

        let middle = if colorize {
            format::background(Color::Red, &self.content)
        } else {
            self.content.clone()
        };
        let highlighted = format!("{}{}{}", &source[..start], middle, &source[end..]);
        let lines: Vec<&str> = highlighted.split('\n').collect();

        let line_index = map.line_index(start);
        let first = line_index.saturating_sub(CONTEXT_LINES);
        let last = (line_index + CONTEXT_LINES + 1).min(lines.len());
        let window = &lines[first..last];
        let width = (window.len() + first).to_string().len();

        let excerpt = window
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>width$} | {}", i + first + 1, line, width = width))
            .collect::<Vec<_>>()
            .join("\n");

        (line_index, excerpt)
    }
}

/// `(type: content)` with the content in blue; `{:#}` renders without color
impl<T: fmt::Display> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colorize =
            !f.alternate() && crate::logging::config::get_diagnostic_preferences().colorize;
        if colorize {
            write!(f, "({}: {})", self.ty, format::color(Color::Blue, &self.content))
        } else {
            write!(f, "({}: {})", self.ty, self.content)
        }
    }
}
