//! Error types for tokenization and stream consumption
//!
//! Three kinds of failure exist: reading past the tokens a stream holds,
//! located syntax errors raised by a token, and tokenization failures. All of
//! them abort the current parse; a grammar that wants to backtrack clones the
//! stream before the attempt.

use crate::config::compile_time::tokenization::{MAX_SOURCE_SIZE, MAX_TOKEN_COUNT};
use crate::logging::{codes, Code};

pub type StreamResult<T> = Result<T, StreamError>;

/// Coarse classification of a `StreamError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfBounds,
    Syntax,
    Tokenization,
}

/// A located syntax error with its rendered source excerpt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (line {line})")]
pub struct SyntaxError {
    pub message: String,
    /// Line of the offending token (1-based)
    pub line: usize,
    /// Byte offset of the offending token
    pub position: usize,
    /// Line-numbered excerpt around the offending token
    pub excerpt: String,
}

impl SyntaxError {
    /// The framed report written to the diagnostic stream
    pub fn render(&self) -> String {
        use crate::config::compile_time::diagnostics::SEPARATOR_WIDTH;

        let bar = "=".repeat(SEPARATOR_WIDTH);
        format!(
            "\n\n{}\n{}\n{}\n{} (line {})\n\n",
            bar, self.excerpt, bar, self.message, self.line
        )
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
    #[error("Desired index {index} is out of bounds (stream length {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    #[error("Cannot skip over {amount} tokens in a stream of {length}")]
    SkipPastEnd { amount: usize, length: usize },

    #[error("Cannot advance an empty stream")]
    EmptyStream,

    #[error("The specified boundaries \"{open}{close}\" don't exist")]
    MissingBoundary { open: String, close: String },

    #[error("Boundary \"{open}\" at offset {position} is never closed by \"{close}\"")]
    UnclosedBoundary {
        open: String,
        close: String,
        position: usize,
    },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("No rule matches input at line {line}, column {column}: '{preview}'")]
    NoRuleMatched {
        position: usize,
        line: u32,
        column: u32,
        preview: String,
    },

    #[error("Content '{content}' does not occur at or after offset {from}")]
    ContentNotFound { content: String, from: usize },

    #[error("Cannot append empty content at offset {from}")]
    EmptyContent { from: usize },

    #[error("Source too large: {size} bytes (max {MAX_SOURCE_SIZE})")]
    SourceTooLarge { size: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid rule set: {reason}")]
    InvalidRuleSet { reason: String },
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfBounds { .. }
            | Self::SkipPastEnd { .. }
            | Self::EmptyStream
            | Self::MissingBoundary { .. }
            | Self::UnclosedBoundary { .. } => ErrorKind::OutOfBounds,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::NoRuleMatched { .. }
            | Self::ContentNotFound { .. }
            | Self::EmptyContent { .. }
            | Self::SourceTooLarge { .. }
            | Self::TooManyTokens { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidRuleSet { .. } => ErrorKind::Tokenization,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::IndexOutOfBounds { .. } => codes::stream::INDEX_OUT_OF_BOUNDS,
            Self::SkipPastEnd { .. } => codes::stream::SKIP_PAST_END,
            Self::EmptyStream => codes::stream::EMPTY_STREAM,
            Self::MissingBoundary { .. } => codes::stream::MISSING_BOUNDARY,
            Self::UnclosedBoundary { .. } => codes::stream::UNCLOSED_BOUNDARY,
            Self::Syntax(_) => codes::syntax::UNEXPECTED_TOKEN,
            Self::NoRuleMatched { .. } => codes::tokenization::NO_RULE_MATCHED,
            Self::ContentNotFound { .. } => codes::tokenization::CONTENT_NOT_FOUND,
            Self::EmptyContent { .. } => codes::tokenization::EMPTY_CONTENT,
            Self::SourceTooLarge { .. } => codes::tokenization::SOURCE_TOO_LARGE,
            Self::TooManyTokens { .. } => codes::tokenization::TOO_MANY_TOKENS,
            Self::InvalidPattern { .. } => codes::tokenization::INVALID_PATTERN,
            Self::InvalidRuleSet { .. } => codes::tokenization::INVALID_RULE_SET,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.kind() == ErrorKind::OutOfBounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(StreamError::EmptyStream.kind(), ErrorKind::OutOfBounds);
        assert!(StreamError::SkipPastEnd {
            amount: 3,
            length: 1
        }
        .is_out_of_bounds());
        assert_eq!(
            StreamError::InvalidRuleSet {
                reason: "empty".into()
            }
            .kind(),
            ErrorKind::Tokenization
        );
    }

    #[test]
    fn test_error_codes_match_registry() {
        let err = StreamError::NoRuleMatched {
            position: 0,
            line: 1,
            column: 1,
            preview: "@".into(),
        };
        assert_eq!(err.error_code().as_str(), "E030");
        assert_eq!(
            crate::logging::codes::get_category(err.error_code().as_str()),
            "Tokenization"
        );
    }

    #[test]
    fn test_syntax_error_display_and_frame() {
        let err = SyntaxError {
            message: "Unexpected token 'y', expected 'x'".into(),
            line: 2,
            position: 4,
            excerpt: "1 | a\n2 | y".into(),
        };
        assert_eq!(err.to_string(), "Unexpected token 'y', expected 'x' (line 2)");

        let bar = "=".repeat(crate::config::compile_time::diagnostics::SEPARATOR_WIDTH);
        assert_eq!(
            err.render(),
            format!(
                "\n\n{bar}\n1 | a\n2 | y\n{bar}\nUnexpected token 'y', expected 'x' (line 2)\n\n"
            )
        );

        let wrapped: StreamError = err.into();
        assert_eq!(wrapped.kind(), ErrorKind::Syntax);
    }
}
