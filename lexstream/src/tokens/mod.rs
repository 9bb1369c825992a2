//! Token system for rule-driven lexical analysis
//!
//! This module turns source text into a stream of typed, located tokens and
//! provides the consumption primitives a hand-written recursive-descent parser
//! is built from.
//!
//! ## Key Components
//!
//! - **[`Token`]** - Matched text with a caller-defined type tag and its byte
//!   offset in a shared source
//! - **[`TokenStream`]** - Ordered, consumable sequence with lookahead,
//!   expectation checks and grammar combinators (`until`, `end_of`,
//!   `delimited_list`)
//! - **[`TokenStreamBuilder`]** - Builds streams by appending located content or
//!   by priority-ordered regex rules
//! - **[`Matcher`]** - Literal content or type tag, accepted wherever a token is
//!   tested
//! - **[`RuleSet`]** - Rules with string types, loadable from TOML
//!
//! ## Errors
//!
//! Every fallible operation returns [`StreamResult`]. Reading past the end of a
//! stream, a located syntax error raised through [`Token::error`], and input
//! no rule accepts are the three kinds reported by [`StreamError::kind`].
//!
//! ## Example
//!
//! ```
//! use lexstream::tokens::{Rule, TokenStreamBuilder};
//!
//! let rules = vec![
//!     Rule::new(r"\d+", "num").unwrap(),
//!     Rule::new(r"[(),]", "punct").unwrap(),
//! ];
//! let mut stream = TokenStreamBuilder::regex("(1, 2, 3)", &rules).unwrap();
//!
//! let mut group = stream.end_of("(", ")").unwrap();
//! let items = group.delimited_list(|s| s.next(), ",", None).unwrap();
//! assert_eq!(items, vec!["1", "2", "3"]);
//! assert!(stream.is_empty());
//! ```

pub mod builder;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod token;
pub mod token_stream;

pub use builder::TokenStreamBuilder;
pub use error::{ErrorKind, StreamError, StreamResult, SyntaxError};
pub use matcher::Matcher;
pub use rules::{Rule, RuleSet, RuleSpec};
pub use token::Token;
pub use token_stream::TokenStream;
