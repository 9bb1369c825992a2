// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

/// Log verbosity selected at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Convert to the logging module's event level
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }

    /// Parse a level name as accepted by `LEXSTREAM_LOG_LEVEL`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticPreferences {
    /// Whether excerpts highlight the offending token with ANSI colors
    pub colorize: bool,

    /// Whether located errors print their framed excerpt to stderr
    pub print_excerpts: bool,
}

impl Default for DiagnosticPreferences {
    fn default() -> Self {
        Self {
            colorize: env::var("LEXSTREAM_COLORIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            print_excerpts: env::var("LEXSTREAM_PRINT_EXCERPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var("LEXSTREAM_LOG_LEVEL")
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env::var("LEXSTREAM_STRUCTURED_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_level_conversion_preserves_order() {
        let error = LogLevel::Error.to_events_log_level();
        let debug = LogLevel::Debug.to_events_log_level();
        assert!(error < debug);
    }

    #[test]
    fn test_preferences_serialize() {
        let prefs = DiagnosticPreferences {
            colorize: false,
            print_excerpts: true,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"colorize\":false"));
    }
}
