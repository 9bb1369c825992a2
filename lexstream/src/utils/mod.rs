//! Shared source-location helpers used by tokens and diagnostics.

pub mod span;

pub use span::{Position, SourceMap, Span};
