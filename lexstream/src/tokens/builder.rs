//! Building token streams from source text

use super::error::{StreamError, StreamResult};
use super::rules::Rule;
use super::token::Token;
use super::token_stream::TokenStream;
use crate::config::compile_time::tokenization::{
    MAX_SOURCE_SIZE, MAX_TOKEN_COUNT, UNMATCHED_PREVIEW_LENGTH,
};
use crate::logging::codes;
use crate::utils::{SourceMap, Span};
use std::sync::Arc;

/// Accumulates located tokens over one source text
///
/// Tokens are recorded in source order: each `append` searches forward from
/// the end of the previous token.
#[derive(Debug, Clone)]
pub struct TokenStreamBuilder<T> {
    source: Arc<str>,
    cursor: usize,
    tokens: Vec<Token<T>>,
}

impl<T: Clone + PartialEq> TokenStreamBuilder<T> {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            cursor: 0,
            tokens: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset where the next `append` starts searching
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Record a token at the next occurrence of `content` after the cursor
    pub fn append(&mut self, content: &str, ty: T) -> StreamResult<()> {
        if content.is_empty() {
            crate::log_error!(codes::tokenization::EMPTY_CONTENT, "Appended content is empty",
                "from" => self.cursor
            );
            return Err(StreamError::EmptyContent { from: self.cursor });
        }

        let Some(found) = self.source[self.cursor..].find(content) else {
            crate::log_error!(codes::tokenization::CONTENT_NOT_FOUND, "Appended content not found",
                "content" => content,
                "from" => self.cursor
            );
            return Err(StreamError::ContentNotFound {
                content: content.to_string(),
                from: self.cursor,
            });
        };

        let start = self.cursor + found;
        self.push(start, start + content.len(), ty)
    }

    fn push(&mut self, start: usize, end: usize, ty: T) -> StreamResult<()> {
        if self.tokens.len() >= MAX_TOKEN_COUNT {
            crate::log_error!(codes::tokenization::TOO_MANY_TOKENS, "Token limit exceeded",
                "limit" => MAX_TOKEN_COUNT
            );
            return Err(StreamError::TooManyTokens {
                count: self.tokens.len() + 1,
            });
        }

        self.tokens.push(Token::located(
            &self.source[start..end],
            ty,
            start,
            Arc::clone(&self.source),
        ));
        self.cursor = end;
        Ok(())
    }

    /// The tokens recorded so far, leaving the builder usable
    pub fn stream(&self) -> TokenStream<T> {
        TokenStream::new(self.tokens.clone())
    }

    pub fn into_stream(self) -> TokenStream<T> {
        TokenStream::new(self.tokens)
    }

    /// Tokenize `source` with priority-ordered rules
    ///
    /// Leading whitespace is skipped before every token. The first rule that
    /// matches a non-empty prefix of the remaining text wins. Input that no
    /// rule matches is an error reporting where tokenization stopped.
    pub fn regex(source: impl Into<Arc<str>>, rules: &[Rule<T>]) -> StreamResult<TokenStream<T>> {
        let mut builder = Self::new(source);
        let source = Arc::clone(&builder.source);

        if source.len() > MAX_SOURCE_SIZE {
            crate::log_error!(codes::tokenization::SOURCE_TOO_LARGE, "Source exceeds size limit",
                "size" => source.len(),
                "limit" => MAX_SOURCE_SIZE
            );
            return Err(StreamError::SourceTooLarge { size: source.len() });
        }

        crate::log_debug!("Starting rule-based tokenization",
            "bytes" => source.len(),
            "rules" => rules.len()
        );

        let mut offset = 0;
        loop {
            let remainder = source[offset..].trim_start();
            offset = source.len() - remainder.len();
            if remainder.is_empty() {
                break;
            }

            let matched = rules
                .iter()
                .find_map(|rule| rule.match_len(remainder).map(|len| (rule, len)));

            let Some((rule, len)) = matched else {
                return Err(builder.unmatched(offset));
            };

            builder.push(offset, offset + len, rule.ty().clone())?;
            offset += len;
        }

        crate::log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "tokens" => builder.tokens.len(),
            "bytes" => source.len()
        );

        Ok(builder.into_stream())
    }

    fn unmatched(&self, offset: usize) -> StreamError {
        let position = SourceMap::new(Arc::clone(&self.source)).position_at(offset);
        let preview: String = self.source[offset..]
            .chars()
            .take_while(|&c| c != '\n')
            .take(UNMATCHED_PREVIEW_LENGTH)
            .collect();

        crate::log_error!(codes::tokenization::NO_RULE_MATCHED, "No rule matches input",
            span = Span::new(position, position),
            "preview" => preview
        );

        StreamError::NoRuleMatched {
            position: offset,
            line: position.line,
            column: position.column,
            preview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Num,
        Op,
        Ident,
    }

    fn arithmetic() -> Vec<Rule<Kind>> {
        vec![
            Rule::new(r"\d+", Kind::Num).unwrap(),
            Rule::new(r"[-+*/]", Kind::Op).unwrap(),
            Rule::new(r"[a-z]+", Kind::Ident).unwrap(),
        ]
    }

    fn summary(stream: &TokenStream<Kind>) -> Vec<(String, Kind, usize)> {
        stream
            .iter()
            .map(|t| (t.content().to_string(), *t.ty(), t.position()))
            .collect()
    }

    #[test]
    fn test_regex_positions() {
        let stream = TokenStreamBuilder::regex("12+34", &arithmetic()).unwrap();
        assert_eq!(
            summary(&stream),
            vec![
                ("12".to_string(), Kind::Num, 0),
                ("+".to_string(), Kind::Op, 2),
                ("34".to_string(), Kind::Num, 3),
            ]
        );
    }

    #[test]
    fn test_regex_skips_whitespace_and_shares_source() {
        let stream = TokenStreamBuilder::regex("  a \n\t* 7  ", &arithmetic()).unwrap();
        let tokens = stream.all();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].position(), 6);
        assert!(Arc::ptr_eq(
            tokens[0].source_handle(),
            tokens[2].source_handle()
        ));
        for token in &tokens {
            assert_eq!(
                &token.source()[token.position()..token.end()],
                token.content()
            );
        }
    }

    #[test]
    fn test_rule_order_decides_ties() {
        let rules = vec![
            Rule::new("if", "keyword").unwrap(),
            Rule::new("[a-z]+", "identifier").unwrap(),
        ];
        let stream = TokenStreamBuilder::regex("if iffy", &rules).unwrap();
        let types: Vec<&str> = stream.iter().map(|t| *t.ty()).collect();

        // "iffy" starts with "if", and the keyword rule comes first
        assert_eq!(types, vec!["keyword", "keyword", "identifier"]);
    }

    #[test]
    fn test_empty_and_blank_sources() {
        assert!(TokenStreamBuilder::regex("", &arithmetic()).unwrap().is_empty());
        assert!(TokenStreamBuilder::regex(" \n ", &arithmetic()).unwrap().is_empty());
    }

    #[test]
    fn test_unmatched_input_reports_location() {
        let err = TokenStreamBuilder::regex("1 +\n  2 @ 3\nx", &arithmetic()).unwrap_err();
        assert_matches!(
            err,
            StreamError::NoRuleMatched { position: 8, line: 2, column: 5, ref preview }
                if preview == "@ 3"
        );
    }

    #[test]
    fn test_no_rules_fails_on_first_token() {
        let err = TokenStreamBuilder::<Kind>::regex("abc", &[]).unwrap_err();
        assert_matches!(err, StreamError::NoRuleMatched { position: 0, line: 1, column: 1, .. });
    }

    #[test]
    fn test_append_searches_forward() {
        let mut builder = TokenStreamBuilder::new("a = a");
        builder.append("a", "id").unwrap();
        builder.append("=", "op").unwrap();
        builder.append("a", "id").unwrap();

        let positions: Vec<usize> = builder.stream().iter().map(|t| t.position()).collect();
        assert_eq!(positions, vec![0, 2, 4]);
        assert_eq!(builder.cursor(), 5);
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_append_missing_content() {
        let mut builder = TokenStreamBuilder::new("a b");
        builder.append("b", "id").unwrap();

        assert_matches!(
            builder.append("a", "id"),
            Err(StreamError::ContentNotFound { from: 3, .. })
        );
        assert_eq!(builder.into_stream().len(), 1);
    }

    #[test]
    fn test_append_rejects_empty_content() {
        let mut builder = TokenStreamBuilder::new("a b");
        builder.append("a", "id").unwrap();

        let err = builder.append("", "id").unwrap_err();
        assert_matches!(err, StreamError::EmptyContent { from: 1 });
        assert_eq!(err.kind(), crate::tokens::ErrorKind::Tokenization);
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.cursor(), 1);
    }

    #[test]
    fn test_source_size_limit() {
        let oversized = "1".repeat(MAX_SOURCE_SIZE + 1);
        assert_matches!(
            TokenStreamBuilder::regex(oversized, &arithmetic()),
            Err(StreamError::SourceTooLarge { .. })
        );
    }
}
