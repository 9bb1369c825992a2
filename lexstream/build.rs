// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    tokenization: TokenizationLimits,
    diagnostics: DiagnosticLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct TokenizationLimits {
    max_source_size: usize,
    max_token_count: usize,
    unmatched_preview_length: usize,
}

#[derive(serde::Deserialize)]
struct DiagnosticLimits {
    separator_width: usize,
    context_lines: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LEXSTREAM_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LEXSTREAM_CONFIG_DIR");

    let profile =
        env::var("LEXSTREAM_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LEXSTREAM_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of lexstream directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_SOURCE_SIZE: usize = 1_000_000_000;
    const ABSOLUTE_MAX_TOKEN_COUNT: usize = 100_000_000;

    if config.tokenization.max_source_size == 0
        || config.tokenization.max_source_size > ABSOLUTE_MAX_SOURCE_SIZE
    {
        panic!("LIMITS: max_source_size must be within 1..={}", ABSOLUTE_MAX_SOURCE_SIZE);
    }

    if config.tokenization.max_token_count == 0
        || config.tokenization.max_token_count > ABSOLUTE_MAX_TOKEN_COUNT
    {
        panic!("LIMITS: max_token_count must be within 1..={}", ABSOLUTE_MAX_TOKEN_COUNT);
    }

    if config.tokenization.unmatched_preview_length == 0 {
        panic!("LIMITS: unmatched_preview_length cannot be zero");
    }

    if config.diagnostics.separator_width == 0 {
        panic!("DIAGNOSTICS: separator_width cannot be zero");
    }

    if config.logging.max_log_message_length < 80 {
        panic!("LOGGING: max_log_message_length too small (min: 80)");
    }

    if profile == "production" && config.tokenization.max_source_size > 50_000_000 {
        panic!("PRODUCTION: max_source_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod tokenization {{
        pub const MAX_SOURCE_SIZE: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const UNMATCHED_PREVIEW_LENGTH: usize = {};
    }}

    pub mod diagnostics {{
        pub const SEPARATOR_WIDTH: usize = {};
        pub const CONTEXT_LINES: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.tokenization.max_source_size,
        config.tokenization.max_token_count,
        config.tokenization.unmatched_preview_length,
        config.diagnostics.separator_width,
        config.diagnostics.context_lines,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
