//! Consumable token stream with lookahead and grammar combinators
//!
//! The front of the stream is the next token to be consumed. Lookahead never
//! mutates; consuming operations remove from the front. Cloning a stream is
//! the way to parse speculatively: the clone owns its own token queue while
//! sharing the immutable source text.

use super::error::{StreamError, StreamResult};
use super::matcher::Matcher;
use super::token::Token;
use crate::logging::codes;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream<T> {
    tokens: VecDeque<Token<T>>,
}

impl<T> Default for TokenStream<T> {
    fn default() -> Self {
        Self {
            tokens: VecDeque::new(),
        }
    }
}

impl<T: Clone + PartialEq> TokenStream<T> {
    pub fn new(tokens: Vec<Token<T>>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    // === INSPECTION ===

    /// Number of tokens not yet consumed
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Remaining tokens in order, without consuming them
    pub fn all(&self) -> Vec<Token<T>> {
        self.tokens.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token<T>> {
        self.tokens.iter()
    }

    /// Push a token back as the new front
    pub fn prepend(&mut self, token: Token<T>) {
        self.tokens.push_front(token);
    }

    // === LOOKAHEAD ===

    /// Whether the front token matches
    pub fn has(&self, matcher: impl Into<Matcher<T>>) -> bool {
        self.has_at(matcher, 0)
    }

    /// Whether the token `index` positions ahead exists and matches
    pub fn has_at(&self, matcher: impl Into<Matcher<T>>, index: usize) -> bool {
        self.matches_at(&matcher.into(), index)
    }

    /// Whether any of `matchers` holds for the front token
    pub fn has_any(&self, matchers: &[Matcher<T>]) -> bool {
        self.has_any_at(matchers, 0)
    }

    pub fn has_any_at(&self, matchers: &[Matcher<T>], index: usize) -> bool {
        matchers.iter().any(|matcher| self.matches_at(matcher, index))
    }

    fn matches_at(&self, matcher: &Matcher<T>, index: usize) -> bool {
        self.tokens
            .get(index)
            .is_some_and(|token| matcher.matches(token))
    }

    /// Content of the token `index` positions ahead
    pub fn get(&self, index: usize) -> StreamResult<&str> {
        self.get_token(index).map(Token::content)
    }

    /// The token `index` positions ahead
    pub fn get_token(&self, index: usize) -> StreamResult<&Token<T>> {
        self.tokens.get(index).ok_or_else(|| {
            crate::log_error!(codes::stream::INDEX_OUT_OF_BOUNDS, "Lookahead past end of stream",
                "index" => index,
                "length" => self.tokens.len()
            );
            StreamError::IndexOutOfBounds {
                index,
                length: self.tokens.len(),
            }
        })
    }

    // === CONSUMPTION ===

    /// Drop `amount` tokens from the front; fails without effect if fewer remain
    pub fn skip(&mut self, amount: usize) -> StreamResult<()> {
        if amount > self.tokens.len() {
            crate::log_error!(codes::stream::SKIP_PAST_END, "Skip past end of stream",
                "amount" => amount,
                "length" => self.tokens.len()
            );
            return Err(StreamError::SkipPastEnd {
                amount,
                length: self.tokens.len(),
            });
        }

        self.tokens.drain(..amount);
        Ok(())
    }

    /// Consume tokens while the front matches
    pub fn skip_all(&mut self, matcher: impl Into<Matcher<T>>) {
        let matcher = matcher.into();
        while self.matches_at(&matcher, 0) {
            self.tokens.pop_front();
        }
    }

    /// Remove every matching token, keeping the others in order
    pub fn remove(&mut self, matcher: impl Into<Matcher<T>>) {
        let matcher = matcher.into();
        self.tokens.retain(|token| !matcher.matches(token));
    }

    /// Consume and return the front token
    pub fn next_token(&mut self) -> StreamResult<Token<T>> {
        self.tokens.pop_front().ok_or_else(|| {
            crate::log_error!(codes::stream::EMPTY_STREAM, "Cannot advance an empty stream");
            StreamError::EmptyStream
        })
    }

    /// Consume the front token and return its content
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> StreamResult<String> {
        self.next_token().map(Token::into_content)
    }

    /// Consume the front token if it matches
    pub fn optional(&mut self, matcher: impl Into<Matcher<T>>) -> bool {
        if self.matches_at(&matcher.into(), 0) {
            self.tokens.pop_front();
            true
        } else {
            false
        }
    }

    /// Consume up to, but not including, the first matching token
    ///
    /// Without a match the whole stream is consumed.
    pub fn until(&mut self, boundary: impl Into<Matcher<T>>) -> TokenStream<T> {
        let boundary = boundary.into();
        let end = self
            .tokens
            .iter()
            .position(|token| boundary.matches(token))
            .unwrap_or(self.tokens.len());

        TokenStream {
            tokens: self.tokens.drain(..end).collect(),
        }
    }
}

impl<T: Clone + PartialEq + fmt::Display> TokenStream<T> {
    /// Consume the front token, which must match `expected`
    ///
    /// On mismatch the consumed token raises a located syntax error and is
    /// not pushed back.
    pub fn expect(&mut self, expected: impl Into<Matcher<T>>) -> StreamResult<String> {
        let expected = expected.into();
        let token = self.next_token()?;

        if expected.matches(&token) {
            return Ok(token.into_content());
        }

        let message = match &expected {
            Matcher::Content(content) => format!(
                "Unexpected token '{}', expected '{}'",
                token.content(),
                content
            ),
            Matcher::Type(ty) => format!(
                "Unexpected token '{}', expected token of type '{}'",
                token.content(),
                ty
            ),
        };
        Err(token.error(message))
    }

    /// Extract the tokens enclosed by the first balanced `open`/`close` pair
    ///
    /// Everything before the first `open` is discarded, then nesting is
    /// tracked from depth one: `open` increments, `close` decrements. The
    /// closing token is consumed but not returned. When no `open` exists, or
    /// the group never closes, the stream is left untouched.
    pub fn end_of(
        &mut self,
        open: impl Into<Matcher<T>>,
        close: impl Into<Matcher<T>>,
    ) -> StreamResult<TokenStream<T>> {
        let open = open.into();
        let close = close.into();

        let Some(start) = self.tokens.iter().position(|token| open.matches(token)) else {
            crate::log_error!(codes::stream::MISSING_BOUNDARY, "Opening boundary not found",
                "open" => open,
                "close" => close
            );
            return Err(StreamError::MissingBoundary {
                open: open.to_string(),
                close: close.to_string(),
            });
        };

        let mut depth = 1usize;
        let mut end = None;
        for (index, token) in self.tokens.iter().enumerate().skip(start + 1) {
            if open.matches(token) {
                depth += 1;
            }
            if close.matches(token) {
                depth -= 1;
            }
            if depth == 0 {
                end = Some(index);
                break;
            }
        }

        let Some(end) = end else {
            let position = self.tokens[start].position();
            crate::log_error!(codes::stream::UNCLOSED_BOUNDARY, "Boundary never closed",
                "open" => open,
                "close" => close,
                "position" => position
            );
            return Err(StreamError::UnclosedBoundary {
                open: open.to_string(),
                close: close.to_string(),
                position,
            });
        };

        self.tokens.drain(..=start);
        let inner = self.tokens.drain(..end - start - 1).collect();
        self.tokens.pop_front();

        Ok(TokenStream { tokens: inner })
    }

    /// Parse a delimiter-separated list of items
    ///
    /// `parse_item` runs against this stream for each item. Between items the
    /// list stops if `interrupt` matches the front, otherwise exactly one
    /// `delimiter` must follow. The list also ends when the stream runs out.
    pub fn delimited_list<R, F>(
        &mut self,
        mut parse_item: F,
        delimiter: impl Into<Matcher<T>>,
        interrupt: Option<Matcher<T>>,
    ) -> StreamResult<Vec<R>>
    where
        F: FnMut(&mut Self) -> StreamResult<R>,
    {
        let delimiter = delimiter.into();
        let mut items = Vec::new();

        while !self.is_empty() {
            items.push(parse_item(self)?);

            if let Some(interrupt) = &interrupt {
                if self.matches_at(interrupt, 0) {
                    break;
                }
            }

            if !self.is_empty() {
                self.expect(delimiter.clone())?;
            }
        }

        Ok(items)
    }
}

impl<T> From<Vec<Token<T>>> for TokenStream<T> {
    fn from(tokens: Vec<Token<T>>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }
}

impl<T> FromIterator<Token<T>> for TokenStream<T> {
    fn from_iter<I: IntoIterator<Item = Token<T>>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for TokenStream<T> {
    type Item = Token<T>;
    type IntoIter = std::collections::vec_deque::IntoIter<Token<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Space-joined token rendering, for debugging
impl<T: fmt::Display> fmt::Display for TokenStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if f.alternate() {
                write!(f, "{:#}", token)?;
            } else {
                write!(f, "{}", token)?;
            }
        }
        Ok(())
    }
}
