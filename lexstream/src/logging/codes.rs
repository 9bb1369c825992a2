//! Error and success codes with their classification metadata
//!
//! Every `StreamError` variant maps to one of these codes so that log output
//! and JSON events can be filtered and grouped without parsing messages.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Stream consumption errors (reading past the available tokens)
pub mod stream {
    use super::Code;

    pub const INDEX_OUT_OF_BOUNDS: Code = Code::new("E010");
    pub const SKIP_PAST_END: Code = Code::new("E011");
    pub const EMPTY_STREAM: Code = Code::new("E012");
    pub const MISSING_BOUNDARY: Code = Code::new("E013");
    pub const UNCLOSED_BOUNDARY: Code = Code::new("E014");
}

/// Located syntax errors raised by tokens
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E020");
}

/// Tokenization errors
pub mod tokenization {
    use super::Code;

    pub const NO_RULE_MATCHED: Code = Code::new("E030");
    pub const CONTENT_NOT_FOUND: Code = Code::new("E031");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E032");
    pub const TOO_MANY_TOKENS: Code = Code::new("E033");
    pub const INVALID_PATTERN: Code = Code::new("E034");
    pub const INVALID_RULE_SET: Code = Code::new("E035");
    pub const EMPTY_CONTENT: Code = Code::new("E036");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I010");
    pub const RULE_SET_LOADED: Code = Code::new("I011");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static METADATA: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Internal error",
        "Report the failure with the input that produced it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::High,
        false,
        true,
        "Initialization failure",
        "Check runtime preferences and build profile",
    ),
    ErrorMetadata::new(
        "E010",
        "Stream",
        Severity::High,
        true,
        true,
        "Lookahead index past the end of the stream",
        "Guard the lookup with has_at() or len()",
    ),
    ErrorMetadata::new(
        "E011",
        "Stream",
        Severity::High,
        true,
        true,
        "Skip amount exceeds the remaining tokens",
        "Check len() before skipping",
    ),
    ErrorMetadata::new(
        "E012",
        "Stream",
        Severity::High,
        true,
        true,
        "Cannot advance an empty stream",
        "Check is_empty() before consuming",
    ),
    ErrorMetadata::new(
        "E013",
        "Stream",
        Severity::High,
        true,
        true,
        "Opening boundary not found in the remaining stream",
        "Verify the grammar expects a bracketed group here",
    ),
    ErrorMetadata::new(
        "E014",
        "Stream",
        Severity::High,
        true,
        true,
        "Opening boundary is never closed",
        "Check the input for unbalanced delimiters",
    ),
    ErrorMetadata::new(
        "E020",
        "Syntax",
        Severity::High,
        false,
        true,
        "Unexpected token",
        "Fix the source at the highlighted location",
    ),
    ErrorMetadata::new(
        "E030",
        "Tokenization",
        Severity::High,
        false,
        true,
        "No rule matches the remaining input",
        "Add a rule covering the reported text or fix the input",
    ),
    ErrorMetadata::new(
        "E031",
        "Tokenization",
        Severity::High,
        false,
        true,
        "Appended content does not occur after the cursor",
        "Append tokens in source order",
    ),
    ErrorMetadata::new(
        "E032",
        "Tokenization",
        Severity::Critical,
        false,
        true,
        "Source exceeds the configured size limit",
        "Split the input or raise max_source_size in the build profile",
    ),
    ErrorMetadata::new(
        "E033",
        "Tokenization",
        Severity::Critical,
        false,
        true,
        "Token count exceeds the configured limit",
        "Split the input or raise max_token_count in the build profile",
    ),
    ErrorMetadata::new(
        "E034",
        "Tokenization",
        Severity::High,
        false,
        true,
        "Rule pattern is not a valid regular expression",
        "Fix the pattern syntax",
    ),
    ErrorMetadata::new(
        "E035",
        "Tokenization",
        Severity::High,
        false,
        true,
        "Rule set file could not be parsed",
        "Check the TOML structure of the rule set",
    ),
    ErrorMetadata::new(
        "E036",
        "Tokenization",
        Severity::High,
        false,
        true,
        "Appended content is empty",
        "Append only non-empty token text",
    ),
    ErrorMetadata::new(
        "I001",
        "System",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "Continue",
    ),
    ErrorMetadata::new(
        "I010",
        "Tokenization",
        Severity::Low,
        true,
        false,
        "Tokenization completed successfully",
        "Continue to parsing",
    ),
    ErrorMetadata::new(
        "I011",
        "Tokenization",
        Severity::Low,
        true,
        false,
        "Rule set loaded",
        "Continue to tokenization",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|meta| (meta.code, meta)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            stream::INDEX_OUT_OF_BOUNDS,
            stream::SKIP_PAST_END,
            stream::EMPTY_STREAM,
            stream::MISSING_BOUNDARY,
            stream::UNCLOSED_BOUNDARY,
            syntax::UNEXPECTED_TOKEN,
            tokenization::NO_RULE_MATCHED,
            tokenization::CONTENT_NOT_FOUND,
            tokenization::SOURCE_TOO_LARGE,
            tokenization::TOO_MANY_TOKENS,
            tokenization::INVALID_PATTERN,
            tokenization::INVALID_RULE_SET,
            tokenization::EMPTY_CONTENT,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::TOKENIZATION_COMPLETE,
            success::RULE_SET_LOADED,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification_lookups() {
        assert_eq!(get_category("E030"), "Tokenization");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("E020"));
        assert!(is_recoverable("E012"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_action("X999"), "No specific action available");
        assert_eq!(get_severity("X999"), Severity::Medium);
    }
}
