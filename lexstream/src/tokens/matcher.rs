//! Token matchers: literal content or a type tag

use super::token::Token;
use std::fmt;

/// Predicate over a single token
///
/// Every lookahead and consuming operation on a stream accepts either the
/// literal text a token must carry or the type it must have. String literals
/// convert into `Matcher::Content`; type tags are wrapped explicitly with
/// `Matcher::Type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Matcher<T> {
    Content(String),
    Type(T),
}

impl<T: PartialEq> Matcher<T> {
    pub fn content(content: impl Into<String>) -> Self {
        Matcher::Content(content.into())
    }

    pub fn ty(ty: T) -> Self {
        Matcher::Type(ty)
    }

    pub fn matches(&self, token: &Token<T>) -> bool {
        match self {
            Matcher::Content(content) => token.content() == content,
            Matcher::Type(ty) => token.ty() == ty,
        }
    }
}

impl<T> From<&str> for Matcher<T> {
    fn from(content: &str) -> Self {
        Matcher::Content(content.to_string())
    }
}

impl<T> From<String> for Matcher<T> {
    fn from(content: String) -> Self {
        Matcher::Content(content)
    }
}

impl<T> From<&String> for Matcher<T> {
    fn from(content: &String) -> Self {
        Matcher::Content(content.clone())
    }
}

impl<T: fmt::Display> fmt::Display for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Content(content) => f.write_str(content),
            Matcher::Type(ty) => write!(f, "{}", ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_and_type_matching() {
        let token = Token::new("+", "op");

        assert!(Matcher::from("+").matches(&token));
        assert!(!Matcher::from("-").matches(&token));
        assert!(Matcher::Type("op").matches(&token));
        assert!(!Matcher::Type("num").matches(&token));
    }

    #[test]
    fn test_string_conversions_yield_content() {
        let owned = String::from("x");
        assert_eq!(Matcher::<u8>::from(&owned), Matcher::Content("x".into()));
        assert_eq!(Matcher::<u8>::from(owned), Matcher::content("x"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Matcher::<&str>::content("(").to_string(), "(");
        assert_eq!(Matcher::ty("identifier").to_string(), "identifier");
    }
}
