//! Tokenization rules and TOML rule sets

use super::builder::TokenStreamBuilder;
use super::error::{StreamError, StreamResult};
use super::token_stream::TokenStream;
use crate::logging::codes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A compiled `(pattern, type)` pair
///
/// The pattern is anchored at the start of the text it is tried against, so
/// a rule only ever matches a prefix of the remaining input.
#[derive(Debug, Clone)]
pub struct Rule<T> {
    regex: Regex,
    pattern: String,
    ty: T,
}

impl<T> Rule<T> {
    pub fn new(pattern: &str, ty: T) -> StreamResult<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            crate::log_error!(codes::tokenization::INVALID_PATTERN, "Rule pattern failed to compile",
                "pattern" => pattern
            );
            StreamError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            regex,
            pattern: pattern.to_string(),
            ty,
        })
    }

    /// The pattern as written, before anchoring
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn ty(&self) -> &T {
        &self.ty
    }

    /// Length of the non-empty prefix of `text` this rule matches
    pub fn match_len(&self, text: &str) -> Option<usize> {
        self.regex
            .find(text)
            .filter(|m| m.start() == 0 && !m.is_empty())
            .map(|m| m.end())
    }
}

/// One `[[rules]]` entry of a rule-set file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RuleSetFile {
    #[serde(default)]
    rules: Vec<RuleSpec>,
}

/// Ordered rules with string types, loadable from TOML
///
/// ```toml
/// [[rules]]
/// pattern = '\d+'
/// type = "number"
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule<String>>,
}

impl RuleSet {
    /// Compile rule specs in priority order; an empty set is rejected
    pub fn from_specs(specs: Vec<RuleSpec>) -> StreamResult<Self> {
        if specs.is_empty() {
            return Err(StreamError::InvalidRuleSet {
                reason: "rule set contains no rules".to_string(),
            });
        }

        let rules = specs
            .into_iter()
            .map(|spec| Rule::new(&spec.pattern, spec.ty))
            .collect::<StreamResult<Vec<_>>>()?;

        crate::log_success!(codes::success::RULE_SET_LOADED, "Rule set loaded",
            "rules" => rules.len()
        );

        Ok(Self { rules })
    }

    pub fn from_toml_str(content: &str) -> StreamResult<Self> {
        let file: RuleSetFile = toml::from_str(content).map_err(|e| {
            crate::log_error!(codes::tokenization::INVALID_RULE_SET, "Rule set is not valid TOML");
            StreamError::InvalidRuleSet {
                reason: e.to_string(),
            }
        })?;

        Self::from_specs(file.rules)
    }

    pub fn from_file(path: impl AsRef<Path>) -> StreamResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::log_error!(codes::tokenization::INVALID_RULE_SET, "Rule set file unreadable",
                "path" => path.display()
            );
            StreamError::InvalidRuleSet {
                reason: format!("{}: {}", path.display(), e),
            }
        })?;

        Self::from_toml_str(&content)
    }

    pub fn rules(&self) -> &[Rule<String>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tokenize `source` with these rules
    pub fn tokenize(&self, source: &str) -> StreamResult<TokenStream<String>> {
        TokenStreamBuilder::regex(source, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ARITHMETIC: &str = r#"
[[rules]]
pattern = '\d+'
type = "number"

[[rules]]
pattern = '[-+*/]'
type = "operator"
"#;

    #[test]
    fn test_rule_matches_prefix_only() {
        let rule = Rule::new(r"\d+", "num").unwrap();
        assert_eq!(rule.match_len("123abc"), Some(3));
        assert_eq!(rule.match_len("abc123"), None);
        assert_eq!(rule.pattern(), r"\d+");
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let rule = Rule::new("a|b", "ab").unwrap();
        assert_eq!(rule.match_len("xb"), None);
        assert_eq!(rule.match_len("bx"), Some(1));
    }

    #[test]
    fn test_zero_length_match_is_no_match() {
        let rule = Rule::new(r"\d*", "digits").unwrap();
        assert_eq!(rule.match_len("abc"), None);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::new("(", "broken").unwrap_err();
        assert_matches!(err, StreamError::InvalidPattern { pattern, .. } if pattern == "(");
    }

    #[test]
    fn test_rule_set_from_toml() {
        let rules = RuleSet::from_toml_str(ARITHMETIC).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[1].ty(), "operator");

        let stream = rules.tokenize("1 + 22").unwrap();
        let types: Vec<&str> = stream.iter().map(|t| t.ty().as_str()).collect();
        assert_eq!(types, vec!["number", "operator", "number"]);
    }

    #[test]
    fn test_rule_set_rejects_bad_input() {
        assert_matches!(
            RuleSet::from_toml_str("rules = 3"),
            Err(StreamError::InvalidRuleSet { .. })
        );
        assert_matches!(
            RuleSet::from_toml_str(""),
            Err(StreamError::InvalidRuleSet { reason }) if reason.contains("no rules")
        );
        assert_matches!(
            RuleSet::from_toml_str("[[rules]]\npattern = '['\ntype = 'x'"),
            Err(StreamError::InvalidPattern { .. })
        );
    }

    #[test]
    fn test_rule_set_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ARITHMETIC.as_bytes()).unwrap();

        let rules = RuleSet::from_file(file.path()).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_missing_rule_set_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_matches!(
            RuleSet::from_file(&missing),
            Err(StreamError::InvalidRuleSet { .. })
        );
    }
}
