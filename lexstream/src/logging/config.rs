//! Runtime logging preferences access
//!
//! Preferences are read once, either from an explicit call to
//! `init_runtime_preferences` or lazily from the environment.

use crate::config::runtime::{DiagnosticPreferences, LoggingPreferences};
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();
static DIAGNOSTIC_PREFERENCES: OnceLock<DiagnosticPreferences> = OnceLock::new();

/// Initialize runtime logging preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

/// Diagnostic preferences, read from the environment on first use
pub fn get_diagnostic_preferences() -> &'static DiagnosticPreferences {
    DIAGNOSTIC_PREFERENCES.get_or_init(DiagnosticPreferences::default)
}

/// Get minimum log level
pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let logging = get_runtime_preferences();
    let diagnostics = get_diagnostic_preferences();

    format!(
        "Logging Configuration:\n\
         - Build profile: {}\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Colorized excerpts: {}\n\
         - Print excerpts: {}",
        crate::config::build_info::profile(),
        logging.min_log_level,
        logging.use_structured_logging,
        diagnostics.colorize,
        diagnostics.print_excerpts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_summary_lists_preferences() {
        let summary = get_config_summary();
        assert!(summary.contains("Min log level"));
        assert!(summary.contains("Print excerpts"));
    }
}
