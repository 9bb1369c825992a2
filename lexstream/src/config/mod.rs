//! Configuration module for lexstream
//! Build-time limits come from the TOML profile read by build.rs; user
//! preferences are read from the environment at runtime.

// Generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{DiagnosticPreferences, LogLevel, LoggingPreferences};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("LEXSTREAM_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("LEXSTREAM_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;
    use super::*;

    #[test]
    fn test_generated_limits_are_usable() {
        assert!(tokenization::MAX_SOURCE_SIZE > 0);
        assert!(tokenization::MAX_TOKEN_COUNT > 0);
        assert!(tokenization::UNMATCHED_PREVIEW_LENGTH > 0);
        assert!(diagnostics::SEPARATOR_WIDTH > 0);
        assert!(logging::MAX_LOG_MESSAGE_LENGTH >= 80);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = build_info::source_info();
        assert!(info.contains(build_info::profile()));
        assert!(info.ends_with(".toml"));
    }
}
