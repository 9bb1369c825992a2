//! Lexical tokenization and token-stream consumption
//!
//! Source text is split into typed tokens by priority-ordered regex rules, and
//! parsers consume the resulting stream through lookahead, expectation and
//! grouping primitives. Syntax errors carry a line-numbered excerpt of the
//! offending source.

// Internal modules
pub mod config;
pub mod format;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use tokens::{
    ErrorKind, Matcher, Rule, RuleSet, StreamError, StreamResult, SyntaxError, Token,
    TokenStream, TokenStreamBuilder,
};
