//! # lexstream CLI
//!
//! Tokenizes files with a TOML rule set and prints the resulting stream.

use clap::{Parser, Subcommand};
use lexstream::config::{LogLevel, LoggingPreferences};
use lexstream::logging;
use lexstream::{log_info, Matcher, RuleSet, TokenStream};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lexstream")]
#[command(version, about = "Rule-driven tokenizer and token stream inspector")]
struct Cli {
    /// Log tokenizer events down to debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a file and print one token per line
    Tokenize {
        /// Source file to tokenize
        file: PathBuf,
        /// TOML rule set ([[rules]] pattern/type entries)
        #[arg(short, long)]
        rules: PathBuf,
        /// Print a JSON array instead of text
        #[arg(long)]
        json: bool,
        /// Remove every token of this type before printing
        #[arg(long = "drop", value_name = "TYPE")]
        drop: Vec<String>,
    },
    /// Print the tokens enclosed by the first balanced delimiter pair
    Extract {
        /// Source file to tokenize
        file: PathBuf,
        /// TOML rule set ([[rules]] pattern/type entries)
        #[arg(short, long)]
        rules: PathBuf,
        /// Opening delimiter content
        #[arg(long)]
        open: String,
        /// Closing delimiter content
        #[arg(long)]
        close: String,
        /// Print a JSON array instead of text
        #[arg(long)]
        json: bool,
    },
}

/// JSON shape of a printed token
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    #[serde(rename = "type")]
    ty: &'a str,
    content: &'a str,
    position: usize,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.verbose {
        logging::config::init_runtime_preferences(LoggingPreferences {
            min_log_level: LogLevel::Debug,
            ..LoggingPreferences::default()
        })?;
    }
    logging::init_global_logging()?;
    log::debug!("{}", logging::get_system_diagnostics());
    log_info!("lexstream starting", "version" => env!("CARGO_PKG_VERSION"));

    let output = match cli.command {
        Commands::Tokenize {
            file,
            rules,
            json,
            drop,
        } => tokenize_command(&file, &rules, &drop, json)?,
        Commands::Extract {
            file,
            rules,
            open,
            close,
            json,
        } => extract_command(&file, &rules, &open, &close, json)?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn load_stream(file: &Path, rules: &Path) -> Result<TokenStream<String>, Box<dyn Error>> {
    let rule_set = RuleSet::from_file(rules)?;
    log::info!("Loaded {} rules from {}", rule_set.len(), rules.display());

    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let stream = rule_set.tokenize(&source)?;
    log::info!("Tokenized {} into {} tokens", file.display(), stream.len());

    Ok(stream)
}

fn tokenize_command(
    file: &Path,
    rules: &Path,
    drop: &[String],
    json: bool,
) -> Result<String, Box<dyn Error>> {
    let mut stream = load_stream(file, rules)?;
    for ty in drop {
        stream.remove(Matcher::Type(ty.clone()));
    }

    Ok(render(&stream, json)?)
}

fn extract_command(
    file: &Path,
    rules: &Path,
    open: &str,
    close: &str,
    json: bool,
) -> Result<String, Box<dyn Error>> {
    let mut stream = load_stream(file, rules)?;
    let group = stream.end_of(open, close)?;
    log::debug!("Extracted {} tokens, {} remain", group.len(), stream.len());

    Ok(render(&group, json)?)
}

fn render(stream: &TokenStream<String>, json: bool) -> Result<String, serde_json::Error> {
    if json {
        let records: Vec<TokenRecord> = stream
            .iter()
            .map(|token| TokenRecord {
                ty: token.ty(),
                content: token.content(),
                position: token.position(),
            })
            .collect();
        return serde_json::to_string_pretty(&records);
    }

    Ok(stream
        .iter()
        .map(|token| format!("{:#} @{}", token, token.position()))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RULES: &str = r#"
[[rules]]
pattern = '\d+'
type = "number"

[[rules]]
pattern = '[a-z_]+'
type = "identifier"

[[rules]]
pattern = '[(),+]'
type = "punctuation"
"#;

    fn fixture(source: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("input.txt");
        let rules = dir.path().join("rules.toml");
        fs::write(&file, source).unwrap();
        fs::write(&rules, RULES).unwrap();
        (dir, file, rules)
    }

    #[test]
    fn test_tokenize_text_output() {
        let (_dir, file, rules) = fixture("max(1, 2)");
        let output = tokenize_command(&file, &rules, &[], false).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "(identifier: max) @0");
        assert_eq!(lines[2], "(number: 1) @4");
    }

    #[test]
    fn test_tokenize_drop_and_json() {
        let (_dir, file, rules) = fixture("a + 1");
        let output =
            tokenize_command(&file, &rules, &["punctuation".to_string()], true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["type"], "number");
        assert_eq!(records[1]["content"], "1");
        assert_eq!(records[1]["position"], 4);
    }

    #[test]
    fn test_extract_group() {
        let (_dir, file, rules) = fixture("f(g(1), 2) + 3");
        let output = extract_command(&file, &rules, "(", ")", true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let contents: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["g", "(", "1", ")", ",", "2"]);
    }

    #[test]
    fn test_errors_propagate() {
        let (_dir, file, rules) = fixture("1 @ 2");
        let err = tokenize_command(&file, &rules, &[], false).unwrap_err();
        assert!(err.to_string().contains("line 1, column 3"));

        let (_dir, file, rules) = fixture("1 2");
        assert!(extract_command(&file, &rules, "(", ")", false).is_err());
    }
}
